///! Astronomy Picture of the Day
use chrono::NaiveDate;

use skyglass_common::{ApodEntry, ApodFavorite, Dataset};

use super::queries::{parse_date, DatasetQueries, FetchMode};
use crate::model::query::{QueryKey, QueryOutcome};

/// Range endpoints in chronological order
pub fn ordered_range(start: NaiveDate, end: NaiveDate) -> (NaiveDate, NaiveDate) {
    if start <= end { (start, end) } else { (end, start) }
}

/// Entries that may be bookmarked. Only pictures are; videos are skipped.
pub fn favorite_candidates(entries: &[ApodEntry]) -> Vec<ApodFavorite> {
    entries
        .iter()
        .filter(|e| e.media_type.is_image())
        .map(ApodFavorite::from)
        .collect()
}

impl DatasetQueries {
    /// Entries of a date range, ordered by date. Not ready until both ends are valid dates.
    pub async fn apod_range(&self, start: &str, end: &str) -> QueryOutcome<Vec<ApodEntry>> {
        self.apod_range_with(start, end, FetchMode::Cached).await
    }

    pub async fn refresh_apod_range(&self, start: &str, end: &str) -> QueryOutcome<Vec<ApodEntry>> {
        self.apod_range_with(start, end, FetchMode::Refresh).await
    }

    async fn apod_range_with(&self, start: &str, end: &str, mode: FetchMode) -> QueryOutcome<Vec<ApodEntry>> {
        let (Some(start), Some(end)) = (parse_date(start), parse_date(end)) else {
            return QueryOutcome::NotReady;
        };
        let (start, end) = ordered_range(start, end);

        let key = QueryKey::new(Dataset::Apod).with("range").with(start).with(end);
        self.run(key, mode, move |client, token| async move {
            client.apod_range(start, end, &token).await
        })
        .await
    }

    pub async fn apod_by_date(&self, date: &str) -> QueryOutcome<ApodEntry> {
        self.apod_by_date_with(date, FetchMode::Cached).await
    }

    pub async fn refresh_apod_by_date(&self, date: &str) -> QueryOutcome<ApodEntry> {
        self.apod_by_date_with(date, FetchMode::Refresh).await
    }

    async fn apod_by_date_with(&self, date: &str, mode: FetchMode) -> QueryOutcome<ApodEntry> {
        let Some(date) = parse_date(date) else {
            return QueryOutcome::NotReady;
        };

        let key = QueryKey::new(Dataset::Apod).with("byDate").with(date);
        self.run(key, mode, move |client, token| async move {
            client.apod_by_date(date, &token).await
        })
        .await
    }
}
