//! Payload shapes as NASA sends them.
//!
//! Everything optional that the upstream has been seen to omit is optional
//! here; `into_domain` decides what is required.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::collections::BTreeMap;

use skyglass_common::{
    ApodEntry, CloseApproach, EpicCoordinates, EpicImage, MarsCamera, MarsPhoto, MarsPhotoPage,
    MarsRover, MediaType, NearEarthObject, NeoFeed, RoverStatus,
};

use crate::error::ApiError;

const EPIC_TIMESTAMP: &str = "%Y-%m-%d %H:%M:%S";

fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| ApiError::Decode(format!("{} '{}': {}", field, value, e)))
}

fn parse_optional_date(value: Option<&str>) -> Option<NaiveDate> {
    value.and_then(|v| NaiveDate::parse_from_str(v.trim(), "%Y-%m-%d").ok())
}

/// NeoWs ships most measurements as decimal strings
fn parse_decimal(value: Option<&str>) -> Option<f64> {
    value
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|n| n.is_finite())
}

/// Identifier sent either as a JSON string or number
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum FlexibleId {
    Text(String),
    Number(u64),
}

impl FlexibleId {
    fn into_string(self) -> String {
        match self {
            FlexibleId::Text(s) => s,
            FlexibleId::Number(n) => n.to_string(),
        }
    }
}

// ============ APOD ============

#[derive(Debug, Deserialize)]
pub(crate) struct WireApod {
    date: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    explanation: String,
    #[serde(default)]
    url: String,
    hdurl: Option<String>,
    #[serde(default)]
    media_type: String,
    copyright: Option<String>,
    service_version: Option<String>,
}

impl WireApod {
    pub(crate) fn into_domain(self) -> Result<ApodEntry, ApiError> {
        Ok(ApodEntry {
            date: parse_date("apod date", &self.date)?,
            title: self.title,
            explanation: self.explanation,
            url: self.url,
            hdurl: self.hdurl,
            media_type: MediaType::from(self.media_type),
            copyright: self.copyright.map(|c| c.trim().to_string()),
            service_version: self.service_version,
        })
    }
}

// ============ Mars ============

#[derive(Debug, Deserialize)]
pub(crate) struct WireMarsCamera {
    id: u64,
    name: String,
    #[serde(default)]
    rover_id: u64,
    #[serde(default)]
    full_name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireMarsRover {
    id: u64,
    name: String,
    landing_date: Option<String>,
    launch_date: Option<String>,
    #[serde(default)]
    status: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireMarsPhoto {
    id: u64,
    sol: u32,
    camera: WireMarsCamera,
    img_src: String,
    earth_date: String,
    rover: WireMarsRover,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireMarsPhotos {
    #[serde(default)]
    photos: Vec<WireMarsPhoto>,
}

impl WireMarsPhotos {
    pub(crate) fn into_domain(self) -> Result<MarsPhotoPage, ApiError> {
        let photos = self
            .photos
            .into_iter()
            .map(|p| {
                Ok(MarsPhoto {
                    id: p.id,
                    sol: p.sol,
                    earth_date: parse_date("earth_date", &p.earth_date)?,
                    img_src: p.img_src,
                    camera: MarsCamera {
                        id: p.camera.id,
                        name: p.camera.name,
                        rover_id: p.camera.rover_id,
                        full_name: p.camera.full_name,
                    },
                    rover: MarsRover {
                        id: p.rover.id,
                        name: p.rover.name,
                        landing_date: parse_optional_date(p.rover.landing_date.as_deref()),
                        launch_date: parse_optional_date(p.rover.launch_date.as_deref()),
                        status: RoverStatus::from(p.rover.status),
                    },
                })
            })
            .collect::<Result<Vec<_>, ApiError>>()?;

        Ok(MarsPhotoPage { photos })
    }
}

// ============ NEO ============

#[derive(Debug, Default, Deserialize)]
pub(crate) struct WireDiameterRange {
    estimated_diameter_min: Option<f64>,
    estimated_diameter_max: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct WireDiameter {
    meters: Option<WireDiameterRange>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct WireMissDistance {
    kilometers: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct WireVelocity {
    kilometers_per_second: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireCloseApproach {
    close_approach_date: Option<String>,
    #[serde(default)]
    miss_distance: WireMissDistance,
    #[serde(default)]
    relative_velocity: WireVelocity,
    orbiting_body: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireNeo {
    id: FlexibleId,
    name: String,
    nasa_jpl_url: Option<String>,
    absolute_magnitude_h: Option<f64>,
    #[serde(default)]
    estimated_diameter: WireDiameter,
    #[serde(default)]
    is_potentially_hazardous_asteroid: bool,
    #[serde(default)]
    close_approach_data: Vec<WireCloseApproach>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireNeoFeed {
    #[serde(default)]
    element_count: u64,
    #[serde(default)]
    near_earth_objects: BTreeMap<String, Vec<WireNeo>>,
}

impl WireNeoFeed {
    pub(crate) fn into_domain(self) -> Result<NeoFeed, ApiError> {
        let mut objects_by_date = BTreeMap::new();

        for (day, objects) in self.near_earth_objects {
            let day = parse_date("feed day", &day)?;
            let objects = objects
                .into_iter()
                .map(|neo| {
                    let meters = neo.estimated_diameter.meters.unwrap_or_default();
                    NearEarthObject {
                        id: neo.id.into_string(),
                        name: neo.name,
                        nasa_jpl_url: neo.nasa_jpl_url,
                        absolute_magnitude_h: neo.absolute_magnitude_h,
                        diameter_min_m: meters.estimated_diameter_min,
                        diameter_max_m: meters.estimated_diameter_max,
                        is_potentially_hazardous: neo.is_potentially_hazardous_asteroid,
                        close_approaches: neo
                            .close_approach_data
                            .into_iter()
                            .map(|a| CloseApproach {
                                date: parse_optional_date(a.close_approach_date.as_deref()),
                                miss_distance_km: parse_decimal(a.miss_distance.kilometers.as_deref()),
                                relative_velocity_kps: parse_decimal(
                                    a.relative_velocity.kilometers_per_second.as_deref(),
                                ),
                                orbiting_body: a.orbiting_body,
                            })
                            .collect(),
                    }
                })
                .collect::<Vec<_>>();
            objects_by_date.insert(day, objects);
        }

        Ok(NeoFeed {
            element_count: self.element_count,
            objects_by_date,
        })
    }
}

// ============ EPIC ============

#[derive(Debug, Deserialize)]
pub(crate) struct WireEpicCoordinates {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireEpic {
    identifier: FlexibleId,
    #[serde(default)]
    caption: String,
    image: String,
    #[serde(default)]
    version: String,
    date: String,
    centroid_coordinates: Option<WireEpicCoordinates>,
}

impl WireEpic {
    pub(crate) fn into_domain(self) -> Result<EpicImage, ApiError> {
        let captured_at = NaiveDateTime::parse_from_str(self.date.trim(), EPIC_TIMESTAMP)
            .map_err(|e| ApiError::Decode(format!("epic date '{}': {}", self.date, e)))?;

        Ok(EpicImage {
            identifier: self.identifier.into_string(),
            caption: self.caption,
            image: self.image,
            version: self.version,
            date: self.date,
            captured_at,
            centroid_coordinates: self
                .centroid_coordinates
                .map(|c| EpicCoordinates { lat: c.lat, lon: c.lon }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apod_requires_valid_date() {
        let wire: WireApod = serde_json::from_str(
            r#"{"date":"2024-13-01","title":"x","url":"u","media_type":"image"}"#,
        )
        .unwrap();
        assert!(matches!(wire.into_domain(), Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_apod_tolerates_missing_optional_fields() {
        let wire: WireApod =
            serde_json::from_str(r#"{"date":"2024-01-01","media_type":"other"}"#).unwrap();
        let entry = wire.into_domain().unwrap();
        assert_eq!(entry.url, "");
        assert_eq!(entry.media_type, MediaType::Other("other".to_string()));
    }

    #[test]
    fn test_neo_numeric_strings_are_parsed() {
        let raw = r#"{
            "element_count": 1,
            "near_earth_objects": {
                "2024-01-02": [{
                    "id": "3542519",
                    "name": "(2010 PK9)",
                    "absolute_magnitude_h": 21.7,
                    "estimated_diameter": {"meters": {"estimated_diameter_min": 120.5, "estimated_diameter_max": 269.4}},
                    "is_potentially_hazardous_asteroid": true,
                    "close_approach_data": [{
                        "close_approach_date": "2024-01-02",
                        "miss_distance": {"kilometers": "7345123.55"},
                        "relative_velocity": {"kilometers_per_second": "abc"},
                        "orbiting_body": "Earth"
                    }]
                }]
            }
        }"#;
        let feed = serde_json::from_str::<WireNeoFeed>(raw).unwrap().into_domain().unwrap();
        let neo = feed.objects().next().unwrap();
        assert_eq!(neo.id, "3542519");
        assert!(neo.is_potentially_hazardous);
        let approach = neo.first_approach().unwrap();
        assert_eq!(approach.miss_distance_km, Some(7345123.55));
        assert_eq!(approach.relative_velocity_kps, None);
        assert_eq!(neo.diameter_max_m, Some(269.4));
    }

    #[test]
    fn test_epic_timestamp_is_validated() {
        let good: WireEpic = serde_json::from_str(
            r#"{"identifier":"20240101003633","caption":"c","image":"epic_1b_20240101003633","version":"03","date":"2024-01-01 00:31:45"}"#,
        )
        .unwrap();
        let image = good.into_domain().unwrap();
        assert_eq!(image.day(), "2024-01-01");

        let bad: WireEpic =
            serde_json::from_str(r#"{"identifier":1,"image":"i","date":"yesterday"}"#).unwrap();
        assert!(bad.into_domain().is_err());
    }
}
