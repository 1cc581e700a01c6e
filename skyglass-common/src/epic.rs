///! EPIC (DSCOVR) natural-color Earth imagery
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpicCoordinates {
    pub lat: f64,
    pub lon: f64,
}

/// A single EPIC capture, identified by its timestamp and image name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpicImage {
    pub identifier: String,
    pub caption: String,
    /// Archive image name without extension, e.g. "epic_1b_20240101003633"
    pub image: String,
    pub version: String,
    /// Capture timestamp exactly as published ("YYYY-MM-DD HH:MM:SS")
    pub date: String,
    pub captured_at: NaiveDateTime,
    pub centroid_coordinates: Option<EpicCoordinates>,
}

impl EpicImage {
    /// Day part of the capture timestamp
    pub fn day(&self) -> &str {
        self.date.split(' ').next().unwrap_or(&self.date)
    }
}
