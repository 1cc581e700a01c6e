use chrono::NaiveDate;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use skyglass_common::{ApodEntry, EpicImage, MarsPhotoPage, NeoFeed};

use super::endpoints::NasaEndpoints;
use super::wire::{WireApod, WireEpic, WireMarsPhotos, WireNeoFeed};
use crate::error::ApiError;
use crate::model::http::HttpClient;

/// Dataset calls against the NASA open API.
///
/// Every method takes the caller's cancellation token and hands it down to the
/// HTTP layer unchanged.
#[derive(Clone)]
pub struct NasaClient {
    http: HttpClient,
    endpoints: Arc<NasaEndpoints>,
}

impl NasaClient {
    pub fn new(http: HttpClient, endpoints: NasaEndpoints) -> Self {
        Self {
            http,
            endpoints: Arc::new(endpoints),
        }
    }

    pub fn endpoints(&self) -> &NasaEndpoints {
        &self.endpoints
    }

    pub async fn apod_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        cancel: &CancellationToken,
    ) -> Result<Vec<ApodEntry>, ApiError> {
        let url = self.endpoints.apod_range(start, end);
        let wire: Vec<WireApod> = self.http.get_json(&url, cancel).await?;
        let mut entries = wire
            .into_iter()
            .map(WireApod::into_domain)
            .collect::<Result<Vec<_>, _>>()?;
        entries.sort_by_key(|e| e.date);
        Ok(entries)
    }

    pub async fn apod_by_date(
        &self,
        date: NaiveDate,
        cancel: &CancellationToken,
    ) -> Result<ApodEntry, ApiError> {
        let url = self.endpoints.apod_by_date(date);
        let wire: WireApod = self.http.get_json(&url, cancel).await?;
        wire.into_domain()
    }

    pub async fn mars_by_earth_date(
        &self,
        rover: &str,
        date: NaiveDate,
        camera: Option<&str>,
        page: u32,
        cancel: &CancellationToken,
    ) -> Result<MarsPhotoPage, ApiError> {
        let url = self.endpoints.mars_by_earth_date(rover, date, camera, page);
        let wire: WireMarsPhotos = self.http.get_json(&url, cancel).await?;
        wire.into_domain()
    }

    pub async fn mars_by_sol(
        &self,
        rover: &str,
        sol: u32,
        camera: Option<&str>,
        page: u32,
        cancel: &CancellationToken,
    ) -> Result<MarsPhotoPage, ApiError> {
        let url = self.endpoints.mars_by_sol(rover, sol, camera, page);
        let wire: WireMarsPhotos = self.http.get_json(&url, cancel).await?;
        wire.into_domain()
    }

    pub async fn neo_feed(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        cancel: &CancellationToken,
    ) -> Result<NeoFeed, ApiError> {
        let url = self.endpoints.neo_feed(start, end);
        let wire: WireNeoFeed = self.http.get_json(&url, cancel).await?;
        wire.into_domain()
    }

    pub async fn epic_latest(&self, cancel: &CancellationToken) -> Result<Vec<EpicImage>, ApiError> {
        let url = self.endpoints.epic_latest();
        self.fetch_epic(&url, cancel).await
    }

    pub async fn epic_by_date(
        &self,
        date: NaiveDate,
        cancel: &CancellationToken,
    ) -> Result<Vec<EpicImage>, ApiError> {
        let url = self.endpoints.epic_by_date(date);
        self.fetch_epic(&url, cancel).await
    }

    async fn fetch_epic(&self, url: &str, cancel: &CancellationToken) -> Result<Vec<EpicImage>, ApiError> {
        let wire: Vec<WireEpic> = self.http.get_json(url, cancel).await?;
        wire.into_iter().map(WireEpic::into_domain).collect()
    }
}
