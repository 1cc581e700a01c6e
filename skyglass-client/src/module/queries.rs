use chrono::NaiveDate;
use std::future::Future;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use skyglass_common::Dataset;

use crate::error::ApiError;
use crate::model::nasa::NasaClient;
use crate::model::query::{QueryCache, QueryKey, QueryOutcome, QueryPolicy};

/// How a query treats cached data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// Serve fresh data or join an identical request already in flight
    Cached,
    /// User-initiated search: supersede whatever is in flight for the key
    Refresh,
}

/// Per-dataset queries over a shared cache
#[derive(Clone)]
pub struct DatasetQueries {
    client: NasaClient,
    cache: Arc<QueryCache>,
    policy: QueryPolicy,
}

impl DatasetQueries {
    pub fn new(client: NasaClient, cache: Arc<QueryCache>, policy: QueryPolicy) -> Self {
        Self {
            client,
            cache,
            policy,
        }
    }

    pub fn client(&self) -> &NasaClient {
        &self.client
    }

    pub fn cache(&self) -> &Arc<QueryCache> {
        &self.cache
    }

    pub fn policy(&self) -> &QueryPolicy {
        &self.policy
    }

    /// Cancel everything a dataset view still has in flight
    pub fn leave(&self, dataset: Dataset) -> usize {
        self.cache.cancel_dataset(dataset)
    }

    /// Run `call` through the cache under this query surface's policy.
    ///
    /// `call` receives its own clone of the client and the request's token.
    pub(crate) async fn run<T, F, Fut>(&self, key: QueryKey, mode: FetchMode, call: F) -> QueryOutcome<T>
    where
        T: Send + Sync + 'static,
        F: Fn(NasaClient, CancellationToken) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let client = self.client.clone();
        let fetcher = move |token: CancellationToken| call(client.clone(), token);

        let result = match mode {
            FetchMode::Cached => self.cache.fetch_with(key, &self.policy, fetcher).await,
            FetchMode::Refresh => self.cache.refetch(key, &self.policy, fetcher).await,
        };
        QueryOutcome::from_result(result)
    }
}

/// `YYYY-MM-DD`, surrounding whitespace ignored; anything else is "not ready"
pub(crate) fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(e) => {
            debug!("Ignoring malformed date {:?}: {}", input, e);
            None
        }
    }
}

/// Mission day from free numeric input: finite, non-negative, whole
pub(crate) fn parse_sol(sol: f64) -> Option<u32> {
    if !sol.is_finite() || sol < 0.0 || sol.fract() != 0.0 || sol > f64::from(u32::MAX) {
        return None;
    }
    Some(sol as u32)
}

/// Trimmed value, or `None` when blank
pub(crate) fn non_blank(input: &str) -> Option<&str> {
    let input = input.trim();
    (!input.is_empty()).then_some(input)
}
