///! Mars rover photos
use std::fmt;
use std::str::FromStr;

use skyglass_common::{Dataset, MarsPhotoPage};

use super::queries::{non_blank, parse_date, parse_sol, DatasetQueries, FetchMode};
use crate::model::query::{QueryKey, QueryOutcome};

/// Photos per page served by the rover photo API
pub const PER_PAGE: usize = 25;

/// A full page means there may be another one after it
pub fn has_next_page(page: &MarsPhotoPage) -> bool {
    page.len() >= PER_PAGE
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rover {
    Curiosity,
    Opportunity,
    Spirit,
}

impl Rover {
    pub const ALL: [Rover; 3] = [Rover::Curiosity, Rover::Opportunity, Rover::Spirit];

    pub fn as_str(&self) -> &'static str {
        match self {
            Rover::Curiosity => "curiosity",
            Rover::Opportunity => "opportunity",
            Rover::Spirit => "spirit",
        }
    }

    /// Cameras this rover carries
    pub fn cameras(&self) -> &'static [CameraCode] {
        use CameraCode::*;
        match self {
            Rover::Curiosity => &[Fhaz, Rhaz, Mast, Chemcam, Mahli, Mardi, Navcam],
            Rover::Opportunity | Rover::Spirit => &[Fhaz, Rhaz, Navcam, Pancam, Minites],
        }
    }

    pub fn supports(&self, camera: CameraCode) -> bool {
        self.cameras().contains(&camera)
    }
}

impl fmt::Display for Rover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Rover {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "curiosity" => Ok(Rover::Curiosity),
            "opportunity" => Ok(Rover::Opportunity),
            "spirit" => Ok(Rover::Spirit),
            _ => Err(format!("Unknown rover: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraCode {
    Fhaz,
    Rhaz,
    Mast,
    Chemcam,
    Mahli,
    Mardi,
    Navcam,
    Pancam,
    Minites,
}

impl CameraCode {
    pub const ALL: [CameraCode; 9] = [
        CameraCode::Fhaz,
        CameraCode::Rhaz,
        CameraCode::Mast,
        CameraCode::Chemcam,
        CameraCode::Mahli,
        CameraCode::Mardi,
        CameraCode::Navcam,
        CameraCode::Pancam,
        CameraCode::Minites,
    ];

    /// Code as the API expects it in `camera=`
    pub fn as_str(&self) -> &'static str {
        match self {
            CameraCode::Fhaz => "FHAZ",
            CameraCode::Rhaz => "RHAZ",
            CameraCode::Mast => "MAST",
            CameraCode::Chemcam => "CHEMCAM",
            CameraCode::Mahli => "MAHLI",
            CameraCode::Mardi => "MARDI",
            CameraCode::Navcam => "NAVCAM",
            CameraCode::Pancam => "PANCAM",
            CameraCode::Minites => "MINITES",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CameraCode::Fhaz => "Front Hazard Avoidance Camera",
            CameraCode::Rhaz => "Rear Hazard Avoidance Camera",
            CameraCode::Mast => "Mast Camera",
            CameraCode::Chemcam => "Chemistry and Camera Complex",
            CameraCode::Mahli => "Mars Hand Lens Imager",
            CameraCode::Mardi => "Mars Descent Imager",
            CameraCode::Navcam => "Navigation Camera",
            CameraCode::Pancam => "Panoramic Camera",
            CameraCode::Minites => "Miniature Thermal Emission Spectrometer",
        }
    }
}

impl fmt::Display for CameraCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.as_str())
    }
}

impl FromStr for CameraCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        CameraCode::ALL
            .into_iter()
            .find(|c| c.as_str() == upper)
            .ok_or_else(|| format!("Unknown camera: {}", s))
    }
}

/// Camera filter from user input; blank and `ALL` mean no filter
fn camera_filter(camera: Option<&str>) -> Option<String> {
    camera
        .and_then(non_blank)
        .filter(|c| !c.eq_ignore_ascii_case("all"))
        .map(str::to_uppercase)
}

impl DatasetQueries {
    /// Photos taken on an Earth date. Not ready until rover and date are given.
    pub async fn mars_by_earth_date(
        &self,
        rover: &str,
        date: &str,
        camera: Option<&str>,
        page: u32,
    ) -> QueryOutcome<MarsPhotoPage> {
        self.mars_by_earth_date_with(rover, date, camera, page, FetchMode::Cached)
            .await
    }

    pub async fn refresh_mars_by_earth_date(
        &self,
        rover: &str,
        date: &str,
        camera: Option<&str>,
        page: u32,
    ) -> QueryOutcome<MarsPhotoPage> {
        self.mars_by_earth_date_with(rover, date, camera, page, FetchMode::Refresh)
            .await
    }

    async fn mars_by_earth_date_with(
        &self,
        rover: &str,
        date: &str,
        camera: Option<&str>,
        page: u32,
        mode: FetchMode,
    ) -> QueryOutcome<MarsPhotoPage> {
        let (Some(rover), Some(date)) = (non_blank(rover), parse_date(date)) else {
            return QueryOutcome::NotReady;
        };
        let rover = rover.to_lowercase();
        let camera = camera_filter(camera);
        let page = page.max(1);

        let key = QueryKey::new(Dataset::Mars)
            .with("earth")
            .with(rover.as_str())
            .with(date)
            .with(camera.as_deref())
            .with(page);
        self.run(key, mode, move |client, token| {
            let rover = rover.clone();
            let camera = camera.clone();
            async move {
                client
                    .mars_by_earth_date(&rover, date, camera.as_deref(), page, &token)
                    .await
            }
        })
        .await
    }

    /// Photos taken on a mission day. `sol` must be a finite, whole, non-negative number.
    pub async fn mars_by_sol(
        &self,
        rover: &str,
        sol: f64,
        camera: Option<&str>,
        page: u32,
    ) -> QueryOutcome<MarsPhotoPage> {
        self.mars_by_sol_with(rover, sol, camera, page, FetchMode::Cached).await
    }

    pub async fn refresh_mars_by_sol(
        &self,
        rover: &str,
        sol: f64,
        camera: Option<&str>,
        page: u32,
    ) -> QueryOutcome<MarsPhotoPage> {
        self.mars_by_sol_with(rover, sol, camera, page, FetchMode::Refresh).await
    }

    async fn mars_by_sol_with(
        &self,
        rover: &str,
        sol: f64,
        camera: Option<&str>,
        page: u32,
        mode: FetchMode,
    ) -> QueryOutcome<MarsPhotoPage> {
        let (Some(rover), Some(sol)) = (non_blank(rover), parse_sol(sol)) else {
            return QueryOutcome::NotReady;
        };
        let rover = rover.to_lowercase();
        let camera = camera_filter(camera);
        let page = page.max(1);

        let key = QueryKey::new(Dataset::Mars)
            .with("sol")
            .with(rover.as_str())
            .with(sol)
            .with(camera.as_deref())
            .with(page);
        self.run(key, mode, move |client, token| {
            let rover = rover.clone();
            let camera = camera.clone();
            async move {
                client
                    .mars_by_sol(&rover, sol, camera.as_deref(), page, &token)
                    .await
            }
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rover_camera_compatibility() {
        assert!(Rover::Curiosity.supports(CameraCode::Chemcam));
        assert!(!Rover::Curiosity.supports(CameraCode::Pancam));
        assert!(Rover::Spirit.supports(CameraCode::Minites));
        assert!(!Rover::Opportunity.supports(CameraCode::Mast));
    }

    #[test]
    fn test_parse_rover_and_camera() {
        assert_eq!("Curiosity".parse::<Rover>(), Ok(Rover::Curiosity));
        assert!("perseverance".parse::<Rover>().is_err());
        assert_eq!("navcam".parse::<CameraCode>(), Ok(CameraCode::Navcam));
        assert_eq!(CameraCode::Fhaz.to_string(), "Front Hazard Avoidance Camera (FHAZ)");
    }

    #[test]
    fn test_camera_filter_treats_all_as_none() {
        assert_eq!(camera_filter(Some("ALL")), None);
        assert_eq!(camera_filter(Some("")), None);
        assert_eq!(camera_filter(None), None);
        assert_eq!(camera_filter(Some("fhaz")), Some("FHAZ".to_string()));
    }

    #[test]
    fn test_empty_page_has_no_next() {
        assert!(!has_next_page(&MarsPhotoPage::default()));
    }
}
