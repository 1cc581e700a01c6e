use chrono::NaiveDate;

use crate::config::ApiKey;

/// URL builders for every dataset, bound to one base address and access key.
///
/// Pure and deterministic: identical inputs always give identical URLs.
#[derive(Debug, Clone)]
pub struct NasaEndpoints {
    base: String,
    key: ApiKey,
}

fn ymd(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn camera_param(camera: Option<&str>) -> String {
    match camera {
        Some(c) if !c.is_empty() => format!("&camera={}", urlencoding::encode(c)),
        _ => String::new(),
    }
}

impl NasaEndpoints {
    pub fn new(base: &str, key: ApiKey) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
            key,
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn apod_range(&self, start: NaiveDate, end: NaiveDate) -> String {
        format!(
            "{}/planetary/apod?start_date={}&end_date={}&api_key={}",
            self.base,
            ymd(start),
            ymd(end),
            self.key.as_str()
        )
    }

    pub fn apod_by_date(&self, date: NaiveDate) -> String {
        format!(
            "{}/planetary/apod?date={}&api_key={}",
            self.base,
            ymd(date),
            self.key.as_str()
        )
    }

    /// Rover photos for an Earth date. `page` is 1-based; 0 is treated as 1.
    pub fn mars_by_earth_date(
        &self,
        rover: &str,
        date: NaiveDate,
        camera: Option<&str>,
        page: u32,
    ) -> String {
        format!(
            "{}/mars-photos/api/v1/rovers/{}/photos?earth_date={}{}&page={}&api_key={}",
            self.base,
            urlencoding::encode(rover),
            ymd(date),
            camera_param(camera),
            page.max(1),
            self.key.as_str()
        )
    }

    /// Rover photos for a mission day. `page` is 1-based; 0 is treated as 1.
    pub fn mars_by_sol(&self, rover: &str, sol: u32, camera: Option<&str>, page: u32) -> String {
        format!(
            "{}/mars-photos/api/v1/rovers/{}/photos?sol={}{}&page={}&api_key={}",
            self.base,
            urlencoding::encode(rover),
            sol,
            camera_param(camera),
            page.max(1),
            self.key.as_str()
        )
    }

    /// The upstream caps the span at 7 days; it is not checked here.
    pub fn neo_feed(&self, start: NaiveDate, end: NaiveDate) -> String {
        format!(
            "{}/neo/rest/v1/feed?start_date={}&end_date={}&api_key={}",
            self.base,
            ymd(start),
            ymd(end),
            self.key.as_str()
        )
    }

    pub fn epic_latest(&self) -> String {
        format!("{}/EPIC/api/natural/images?api_key={}", self.base, self.key.as_str())
    }

    pub fn epic_by_date(&self, date: NaiveDate) -> String {
        format!(
            "{}/EPIC/api/natural/date/{}?api_key={}",
            self.base,
            ymd(date),
            self.key.as_str()
        )
    }

    /// Archive PNG address for a capture.
    ///
    /// `date` is the capture timestamp ("2024-01-01 00:13:03"); only the part
    /// before the first space is used and split into year/month/day segments.
    pub fn epic_image_url(&self, date: &str, image: &str) -> String {
        let day = date.split(' ').next().unwrap_or(date);
        let mut parts = day.splitn(3, '-');
        let year = parts.next().unwrap_or_default();
        let month = parts.next().unwrap_or_default();
        let dom = parts.next().unwrap_or_default();

        format!(
            "{}/EPIC/archive/natural/{}/{}/{}/png/{}.png?api_key={}",
            self.base,
            year,
            month,
            dom,
            image,
            self.key.as_str()
        )
    }
}
