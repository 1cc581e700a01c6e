///! Near-Earth Object feed
use chrono::{Days, NaiveDate};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use skyglass_common::{Dataset, NearEarthObject, NeoFeed};

use super::queries::{parse_date, DatasetQueries, FetchMode};
use crate::model::query::{QueryKey, QueryOutcome};

/// Days covered by one feed search after the start day
pub const WEEK_SPAN_DAYS: u64 = 6;

/// Feed window starting at `start`: six days later, but never past `today`
pub fn week_range(start: NaiveDate, today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let end = start
        .checked_add_days(Days::new(WEEK_SPAN_DAYS))
        .unwrap_or(NaiveDate::MAX);
    (start, end.min(today))
}

/// Table row for one object, taken from its first close approach
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeoRow {
    pub id: String,
    pub name: String,
    pub hazardous: bool,
    pub approach_date: Option<NaiveDate>,
    pub miss_km: Option<f64>,
    pub velocity_kps: Option<f64>,
    pub diameter_min_m: Option<f64>,
    pub diameter_max_m: Option<f64>,
    pub absolute_magnitude: Option<f64>,
    pub jpl_url: Option<String>,
}

impl From<&NearEarthObject> for NeoRow {
    fn from(neo: &NearEarthObject) -> Self {
        let approach = neo.first_approach();
        Self {
            id: neo.id.clone(),
            name: neo.name.clone(),
            hazardous: neo.is_potentially_hazardous,
            approach_date: approach.and_then(|a| a.date),
            miss_km: approach.and_then(|a| a.miss_distance_km),
            velocity_kps: approach.and_then(|a| a.relative_velocity_kps),
            diameter_min_m: neo.diameter_min_m,
            diameter_max_m: neo.diameter_max_m,
            absolute_magnitude: neo.absolute_magnitude_h,
            jpl_url: neo.nasa_jpl_url.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HazardFilter {
    #[default]
    All,
    Hazardous,
    NotHazardous,
}

impl HazardFilter {
    pub fn matches(&self, row: &NeoRow) -> bool {
        match self {
            HazardFilter::All => true,
            HazardFilter::Hazardous => row.hazardous,
            HazardFilter::NotHazardous => !row.hazardous,
        }
    }
}

impl fmt::Display for HazardFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HazardFilter::All => "all",
            HazardFilter::Hazardous => "true",
            HazardFilter::NotHazardous => "false",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for HazardFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "" => Ok(HazardFilter::All),
            "true" => Ok(HazardFilter::Hazardous),
            "false" => Ok(HazardFilter::NotHazardous),
            _ => Err(format!("Unknown hazard filter: {} (expected all, true or false)", s)),
        }
    }
}

/// Flatten a feed into rows in day order, keeping those that match `filter`
pub fn rows(feed: &NeoFeed, filter: HazardFilter) -> Vec<NeoRow> {
    feed.objects()
        .map(NeoRow::from)
        .filter(|row| filter.matches(row))
        .collect()
}

impl DatasetQueries {
    /// Objects approaching between two dates. Not ready until both are valid.
    pub async fn neo_feed(&self, start: &str, end: &str) -> QueryOutcome<NeoFeed> {
        self.neo_feed_with(start, end, FetchMode::Cached).await
    }

    pub async fn refresh_neo_feed(&self, start: &str, end: &str) -> QueryOutcome<NeoFeed> {
        self.neo_feed_with(start, end, FetchMode::Refresh).await
    }

    async fn neo_feed_with(&self, start: &str, end: &str, mode: FetchMode) -> QueryOutcome<NeoFeed> {
        let (Some(start), Some(end)) = (parse_date(start), parse_date(end)) else {
            return QueryOutcome::NotReady;
        };

        let key = QueryKey::new(Dataset::Neo).with("feed").with(start).with(end);
        self.run(key, mode, move |client, token| async move {
            client.neo_feed(start, end, &token).await
        })
        .await
    }
}
