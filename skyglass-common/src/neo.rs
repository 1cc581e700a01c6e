///! Near-Earth Object feed
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One close approach of an object to a body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloseApproach {
    pub date: Option<NaiveDate>,
    pub miss_distance_km: Option<f64>,
    pub relative_velocity_kps: Option<f64>,
    pub orbiting_body: Option<String>,
}

/// A near-earth object, identified by its NeoWs id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearEarthObject {
    pub id: String,
    pub name: String,
    pub nasa_jpl_url: Option<String>,
    pub absolute_magnitude_h: Option<f64>,
    pub diameter_min_m: Option<f64>,
    pub diameter_max_m: Option<f64>,
    pub is_potentially_hazardous: bool,
    pub close_approaches: Vec<CloseApproach>,
}

impl NearEarthObject {
    /// The approach NeoWs lists first for the feed day
    pub fn first_approach(&self) -> Option<&CloseApproach> {
        self.close_approaches.first()
    }
}

/// Feed response: objects grouped by approach day, ordered by day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NeoFeed {
    pub element_count: u64,
    pub objects_by_date: BTreeMap<NaiveDate, Vec<NearEarthObject>>,
}

impl NeoFeed {
    pub fn is_empty(&self) -> bool {
        self.objects_by_date.values().all(|v| v.is_empty())
    }

    /// All objects in day order
    pub fn objects(&self) -> impl Iterator<Item = &NearEarthObject> {
        self.objects_by_date.values().flatten()
    }
}
