///! EPIC full-disk Earth imagery
use chrono::NaiveDate;

use skyglass_common::{Dataset, EpicImage};

use super::queries::{parse_date, DatasetQueries, FetchMode};
use crate::model::query::{QueryKey, QueryOutcome};

/// Day shown above a result set: the capture day of its first image
pub fn display_day(images: &[EpicImage]) -> Option<&str> {
    images.first().map(EpicImage::day)
}

impl DatasetQueries {
    /// Most recent published set of captures
    pub async fn epic_latest(&self) -> QueryOutcome<Vec<EpicImage>> {
        self.epic_latest_with(FetchMode::Cached).await
    }

    pub async fn refresh_epic_latest(&self) -> QueryOutcome<Vec<EpicImage>> {
        self.epic_latest_with(FetchMode::Refresh).await
    }

    async fn epic_latest_with(&self, mode: FetchMode) -> QueryOutcome<Vec<EpicImage>> {
        let key = QueryKey::new(Dataset::Epic).with("latest");
        self.run(key, mode, |client, token| async move {
            client.epic_latest(&token).await
        })
        .await
    }

    pub async fn epic_by_date(&self, date: &str) -> QueryOutcome<Vec<EpicImage>> {
        self.epic_by_date_with(date, FetchMode::Cached).await
    }

    pub async fn refresh_epic_by_date(&self, date: &str) -> QueryOutcome<Vec<EpicImage>> {
        self.epic_by_date_with(date, FetchMode::Refresh).await
    }

    /// Captures of `today`; shares its cache entry with `epic_by_date` for that day
    pub async fn epic_today(&self, today: NaiveDate) -> QueryOutcome<Vec<EpicImage>> {
        self.epic_by_date_with(&today.format("%Y-%m-%d").to_string(), FetchMode::Cached)
            .await
    }

    async fn epic_by_date_with(&self, date: &str, mode: FetchMode) -> QueryOutcome<Vec<EpicImage>> {
        let Some(date) = parse_date(date) else {
            return QueryOutcome::NotReady;
        };

        let key = QueryKey::new(Dataset::Epic).with("byDate").with(date);
        self.run(key, mode, move |client, token| async move {
            client.epic_by_date(date, &token).await
        })
        .await
    }
}
