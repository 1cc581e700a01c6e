use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use crate::config::ExplorerConfig;
use crate::model::favorites::{FavoritesStore, FileKeyValueStore, KeyValueStore};
use crate::model::http::{HttpClient, HttpTransport, ReqwestTransport};
use crate::model::nasa::{NasaClient, NasaEndpoints};
use crate::model::query::QueryCache;
use crate::module::DatasetQueries;

/// Everything a front end needs, built once at startup and passed around explicitly.
///
/// Owns the query cache and the favorites store; `shutdown` cancels any request
/// still in flight.
pub struct ExplorerContext {
    config: ExplorerConfig,
    cache: Arc<QueryCache>,
    queries: DatasetQueries,
    favorites: Arc<FavoritesStore>,
}

impl ExplorerContext {
    /// Production wiring: reqwest transport and file-backed favorites under `data_dir`.
    ///
    /// Fails before any request is made when the API key is missing.
    pub fn new(config: ExplorerConfig) -> Result<Self> {
        // Checked first so a missing key is reported ahead of any I/O problem.
        config.api_key()?;

        let transport = ReqwestTransport::new(config.request_timeout())
            .context("Failed to build HTTP transport")?;
        let storage = FileKeyValueStore::new(config.favorites_dir());

        Self::with_parts(config, Arc::new(transport), Arc::new(storage))
    }

    /// Wire the context over caller-provided transport and storage
    pub fn with_parts(
        config: ExplorerConfig,
        transport: Arc<dyn HttpTransport>,
        storage: Arc<dyn KeyValueStore>,
    ) -> Result<Self> {
        let key = config.api_key()?;
        let endpoints = NasaEndpoints::new(&config.api_base, key);
        let client = NasaClient::new(HttpClient::new(transport), endpoints);

        let cache = Arc::new(QueryCache::new(config.global_policy()).with_gc_time(config.cache_gc_time()));
        let queries = DatasetQueries::new(client, cache.clone(), config.dataset_policy());

        let favorites = FavoritesStore::load(storage).context("Failed to load favorites")?;

        info!("Explorer context ready (api base {})", config.api_base);

        Ok(Self {
            config,
            cache,
            queries,
            favorites: Arc::new(favorites),
        })
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    pub fn queries(&self) -> &DatasetQueries {
        &self.queries
    }

    pub fn favorites(&self) -> &Arc<FavoritesStore> {
        &self.favorites
    }

    pub fn endpoints(&self) -> &NasaEndpoints {
        self.queries.client().endpoints()
    }

    pub fn cache(&self) -> &Arc<QueryCache> {
        &self.cache
    }

    /// Cancel in-flight requests. Favorites are already persisted.
    pub fn shutdown(&self) {
        let pending = self.cache.in_flight_count();
        self.cache.shutdown();
        info!("Explorer context shut down ({} requests canceled)", pending);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::model::favorites::MemoryKeyValueStore;
    use crate::model::http::ScriptedTransport;

    #[test]
    fn test_missing_key_fails_fast() {
        let err = ExplorerContext::with_parts(
            ExplorerConfig::default(),
            Arc::new(ScriptedTransport::new()),
            Arc::new(MemoryKeyValueStore::new()),
        )
        .err()
        .unwrap();

        assert!(matches!(err.downcast_ref::<ConfigError>(), Some(ConfigError::MissingApiKey)));
        assert!(err.to_string().contains("NASA_API_KEY"));
    }

    #[tokio::test]
    async fn test_shutdown_cancels_cache() {
        let config = ExplorerConfig::default().with_api_key_override(Some("DEMO".to_string()));
        let transport = Arc::new(ScriptedTransport::new());
        let ctx = ExplorerContext::with_parts(config, transport.clone(), Arc::new(MemoryKeyValueStore::new()))
            .unwrap();

        ctx.shutdown();
        assert!(ctx.cache().is_shut_down());
        assert!(ctx.queries().epic_latest().await.error().unwrap().is_canceled());
        assert_eq!(transport.request_count(), 0);
    }
}
