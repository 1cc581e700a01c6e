///! Mars rover photo records
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Mission status reported for a rover
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RoverStatus {
    Active,
    Complete,
    Other(String),
}

impl From<String> for RoverStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "active" => RoverStatus::Active,
            "complete" => RoverStatus::Complete,
            _ => RoverStatus::Other(s),
        }
    }
}

impl From<RoverStatus> for String {
    fn from(s: RoverStatus) -> Self {
        match s {
            RoverStatus::Active => "active".to_string(),
            RoverStatus::Complete => "complete".to_string(),
            RoverStatus::Other(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarsCamera {
    pub id: u64,
    /// Short code, e.g. "NAVCAM"
    pub name: String,
    pub rover_id: u64,
    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarsRover {
    pub id: u64,
    pub name: String,
    pub landing_date: Option<NaiveDate>,
    pub launch_date: Option<NaiveDate>,
    pub status: RoverStatus,
}

/// A single rover photo, identified by its photo id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarsPhoto {
    pub id: u64,
    pub sol: u32,
    pub camera: MarsCamera,
    pub img_src: String,
    pub earth_date: NaiveDate,
    pub rover: MarsRover,
}

/// One page of rover photos
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarsPhotoPage {
    pub photos: Vec<MarsPhoto>,
}

impl MarsPhotoPage {
    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }
}
