///! Astronomy Picture of the Day entries
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Media kind of an APOD entry.
///
/// The API documents `image` and `video`; anything else is preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MediaType {
    Image,
    Video,
    Other(String),
}

impl MediaType {
    pub fn as_str(&self) -> &str {
        match self {
            MediaType::Image => "image",
            MediaType::Video => "video",
            MediaType::Other(s) => s,
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, MediaType::Image)
    }
}

impl From<String> for MediaType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "image" => MediaType::Image,
            "video" => MediaType::Video,
            _ => MediaType::Other(s),
        }
    }
}

impl From<&str> for MediaType {
    fn from(s: &str) -> Self {
        MediaType::from(s.to_string())
    }
}

impl From<MediaType> for String {
    fn from(m: MediaType) -> Self {
        m.as_str().to_string()
    }
}

/// One day of APOD, identified by its date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApodEntry {
    pub date: NaiveDate,
    pub title: String,
    pub explanation: String,
    pub url: String,
    pub hdurl: Option<String>,
    pub media_type: MediaType,
    pub copyright: Option<String>,
    pub service_version: Option<String>,
}

impl ApodEntry {
    /// Natural key: the publication date in `YYYY-MM-DD` form
    pub fn key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}
