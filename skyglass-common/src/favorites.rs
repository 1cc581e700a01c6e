///! Reduced projections of dataset items kept in the favorites lists
///!
///! Field names follow the persisted JSON layout, so lists written by earlier
///! versions of the browser front end load unchanged.
use serde::{Deserialize, Serialize};

use crate::apod::{ApodEntry, MediaType};
use crate::dataset::Dataset;
use crate::epic::EpicImage;
use crate::mars::MarsPhoto;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarsFavoriteRover {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarsFavoriteCamera {
    pub name: String,
    pub full_name: String,
}

/// Favorite rover photo, keyed by photo id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarsFavorite {
    pub id: u64,
    pub img_src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub earth_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sol: Option<u32>,
    pub rover: MarsFavoriteRover,
    pub camera: MarsFavoriteCamera,
}

impl From<&MarsPhoto> for MarsFavorite {
    fn from(p: &MarsPhoto) -> Self {
        Self {
            id: p.id,
            img_src: p.img_src.clone(),
            earth_date: Some(p.earth_date.format("%Y-%m-%d").to_string()),
            sol: Some(p.sol),
            rover: MarsFavoriteRover {
                name: p.rover.name.clone(),
            },
            camera: MarsFavoriteCamera {
                name: p.camera.name.clone(),
                full_name: p.camera.full_name.clone(),
            },
        }
    }
}

/// Favorite APOD day, keyed by date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApodFavorite {
    pub date: String,
    pub title: String,
    pub url: String,
    pub media_type: MediaType,
}

impl From<&ApodEntry> for ApodFavorite {
    fn from(e: &ApodEntry) -> Self {
        Self {
            date: e.key(),
            title: e.title.clone(),
            url: e.url.clone(),
            media_type: e.media_type.clone(),
        }
    }
}

/// Favorite EPIC capture, keyed by (date, image)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpicFavorite {
    pub date: String,
    pub image: String,
}

impl From<&EpicImage> for EpicFavorite {
    fn from(e: &EpicImage) -> Self {
        Self {
            date: e.date.clone(),
            image: e.image.clone(),
        }
    }
}

/// Unified display shape for the merged favorites view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteItem {
    pub uid: String,
    pub source: Dataset,
    pub src: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub date_label: Option<String>,
}
