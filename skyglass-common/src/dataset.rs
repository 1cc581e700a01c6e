use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Dataset families exposed by the NASA open API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Dataset {
    /// Astronomy Picture of the Day
    #[serde(rename = "apod")]
    Apod,
    /// Mars rover photos
    #[serde(rename = "mars")]
    Mars,
    /// Near-Earth Object feed
    #[serde(rename = "neo")]
    Neo,
    /// EPIC full-disk Earth imagery
    #[serde(rename = "epic")]
    Epic,
}

impl Dataset {
    pub const ALL: [Dataset; 4] = [Dataset::Apod, Dataset::Mars, Dataset::Neo, Dataset::Epic];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dataset::Apod => "apod",
            Dataset::Mars => "mars",
            Dataset::Neo => "neo",
            Dataset::Epic => "epic",
        }
    }

    /// Whether the dataset has a favorites list
    pub fn is_favoritable(&self) -> bool {
        !matches!(self, Dataset::Neo)
    }
}

impl std::fmt::Display for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Name that matches no dataset
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown dataset: {0}")]
pub struct UnknownDataset(pub String);

impl std::str::FromStr for Dataset {
    type Err = UnknownDataset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "apod" => Ok(Dataset::Apod),
            "mars" => Ok(Dataset::Mars),
            "neo" => Ok(Dataset::Neo),
            "epic" => Ok(Dataset::Epic),
            _ => Err(UnknownDataset(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_round_trips_through_str() {
        for dataset in Dataset::ALL {
            assert_eq!(dataset.as_str().parse::<Dataset>(), Ok(dataset));
        }
        assert_eq!("MARS".parse::<Dataset>(), Ok(Dataset::Mars));
        assert!("jupiter".parse::<Dataset>().is_err());
    }

    #[test]
    fn test_only_neo_is_not_favoritable() {
        assert!(Dataset::Apod.is_favoritable());
        assert!(Dataset::Mars.is_favoritable());
        assert!(Dataset::Epic.is_favoritable());
        assert!(!Dataset::Neo.is_favoritable());
    }
}
