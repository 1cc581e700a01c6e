use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;
use crate::model::query::QueryPolicy;

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_PATH: &str = "skyglass.toml";

/// Environment variable that overrides `api_key`
pub const API_KEY_ENV: &str = "NASA_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorerConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,

    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_log_dir")]
    pub log_dir: String,

    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Freshness window of the global query policy
    #[serde(default = "default_stale_secs")]
    pub default_stale_secs: u64,

    /// Freshness window of the per-dataset queries
    #[serde(default = "default_query_stale_secs")]
    pub query_stale_secs: u64,

    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Age after which an idle cached result is evicted
    #[serde(default = "default_cache_gc_secs")]
    pub cache_gc_secs: u64,
}

fn default_api_base() -> String {
    "https://api.nasa.gov".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_stale_secs() -> u64 {
    5 * 60
}

fn default_query_stale_secs() -> u64 {
    60
}

fn default_max_retries() -> u32 {
    2
}

fn default_cache_gc_secs() -> u64 {
    10 * 60
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            api_key: None,
            log_level: default_log_level(),
            log_dir: default_log_dir(),
            data_dir: default_data_dir(),
            request_timeout_secs: default_request_timeout_secs(),
            default_stale_secs: default_stale_secs(),
            query_stale_secs: default_query_stale_secs(),
            max_retries: default_max_retries(),
            cache_gc_secs: default_cache_gc_secs(),
        }
    }
}

impl ExplorerConfig {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        Self::from_toml(path, &content)
    }

    fn from_toml(path: &str, content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }

    /// Load the config file if present, then apply environment overrides.
    ///
    /// A missing file yields the defaults; an unreadable or malformed one is an error.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::debug!("Config file {} not found, using defaults", path);
            Self::default()
        };

        Ok(config.with_api_key_override(std::env::var(API_KEY_ENV).ok()))
    }

    /// A non-blank override replaces the configured key
    pub fn with_api_key_override(mut self, key: Option<String>) -> Self {
        if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
        self
    }

    /// The access key, or a fail-fast diagnostic when it is absent
    pub fn api_key(&self) -> Result<ApiKey, ConfigError> {
        ApiKey::new(self.api_key.as_deref().unwrap_or_default())
    }

    pub fn favorites_dir(&self) -> PathBuf {
        Path::new(&self.data_dir).join("favorites")
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn cache_gc_time(&self) -> Duration {
        Duration::from_secs(self.cache_gc_secs)
    }

    /// Policy applied when a query does not set its own
    pub fn global_policy(&self) -> QueryPolicy {
        QueryPolicy::global()
            .with_stale_time(Duration::from_secs(self.default_stale_secs))
            .with_max_retries(self.max_retries)
    }

    /// Policy of the per-dataset queries
    pub fn dataset_policy(&self) -> QueryPolicy {
        QueryPolicy::dataset()
            .with_stale_time(Duration::from_secs(self.query_stale_secs))
            .with_max_retries(self.max_retries)
    }
}

/// NASA API access key. Never empty.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: &str) -> Result<Self, ConfigError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        Ok(Self(key.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ApiKey(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = ExplorerConfig::from_toml("skyglass.toml", "").unwrap();
        assert_eq!(config.api_base, "https://api.nasa.gov");
        assert_eq!(config.query_stale_secs, 60);
        assert_eq!(config.default_stale_secs, 300);
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.cache_gc_time(), Duration::from_secs(600));
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_partial_file_overrides_fields() {
        let config = ExplorerConfig::from_toml(
            "skyglass.toml",
            "api_key = \"DEMO_KEY\"\nlog_level = \"debug\"\ndata_dir = \"/tmp/sky\"\n",
        )
        .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("DEMO_KEY"));
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.favorites_dir(), PathBuf::from("/tmp/sky/favorites"));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let result = ExplorerConfig::from_toml("skyglass.toml", "max_retries = \"two\"");
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_missing_api_key_fails_fast() {
        let config = ExplorerConfig::default();
        let err = config.api_key().unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));
        assert!(err.to_string().contains("NASA_API_KEY"));

        let blank = ExplorerConfig::default().with_api_key_override(Some("   ".to_string()));
        assert!(blank.api_key().is_err());
    }

    #[test]
    fn test_env_override_wins() {
        let config = ExplorerConfig {
            api_key: Some("FROM_FILE".to_string()),
            ..ExplorerConfig::default()
        }
        .with_api_key_override(Some("FROM_ENV".to_string()));
        assert_eq!(config.api_key().unwrap().as_str(), "FROM_ENV");
    }

    #[test]
    fn test_api_key_debug_is_redacted() {
        let key = ApiKey::new("SECRET").unwrap();
        assert_eq!(format!("{:?}", key), "ApiKey(***)");
    }

    #[test]
    fn test_policies_follow_config() {
        let config = ExplorerConfig {
            query_stale_secs: 10,
            max_retries: 1,
            ..ExplorerConfig::default()
        };
        assert_eq!(config.dataset_policy().stale_time, Duration::from_secs(10));
        assert_eq!(config.dataset_policy().max_retries, 1);
        assert_eq!(config.global_policy().stale_time, Duration::from_secs(300));
    }
}
