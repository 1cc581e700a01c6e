///! Error types for the skyglass client
///!
///! `ApiError` is cloned to every waiter of a shared in-flight request, so it
///! carries rendered messages instead of non-clonable source errors.
use serde::Serialize;
use thiserror::Error;

/// Rate-limit counters advertised by the upstream on an error response.
///
/// Informational only; the client never throttles itself from these.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RateLimitInfo {
    pub limit: Option<f64>,
    pub remaining: Option<f64>,
    /// Epoch seconds at which the window resets
    pub reset: Option<f64>,
}

impl RateLimitInfo {
    pub fn is_empty(&self) -> bool {
        self.limit.is_none() && self.remaining.is_none() && self.reset.is_none()
    }
}

/// Non-2xx response from the upstream API
#[derive(Debug, Clone, PartialEq, Error)]
#[error("HTTP {status}")]
pub struct HttpError {
    pub status: u16,
    pub rate_limit: Option<RateLimitInfo>,
}

impl HttpError {
    pub fn new(status: u16, rate_limit: Option<RateLimitInfo>) -> Self {
        Self { status, rate_limit }
    }
}

/// Failure of a dataset request
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("request canceled")]
    Canceled,

    #[error(transparent)]
    Http(#[from] HttpError),

    #[error("network error: {0}")]
    Transport(String),

    #[error("invalid response body: {0}")]
    Decode(String),

    #[error("invalid request: {0}")]
    Invalid(String),
}

impl ApiError {
    /// HTTP status of the failure, or 0 when no response was received
    pub fn status(&self) -> u16 {
        match self {
            ApiError::Http(e) => e.status,
            _ => 0,
        }
    }

    pub fn is_canceled(&self) -> bool {
        matches!(self, ApiError::Canceled)
    }

    pub fn rate_limit(&self) -> Option<&RateLimitInfo> {
        match self {
            ApiError::Http(e) => e.rate_limit.as_ref(),
            _ => None,
        }
    }

    /// Server errors and 429 are worth another attempt; nothing else is.
    pub fn is_retryable(&self) -> bool {
        let status = self.status();
        status >= 500 || status == 429
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        // The request URL carries the access key.
        let e = e.without_url();
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

/// Failure of the persistent key-value store
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to read {key}: {source}")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {key}: {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize {key}: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Configuration loading failure
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("NASA API key missing: set NASA_API_KEY or api_key in skyglass.toml")]
    MissingApiKey,

    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_statuses() {
        assert!(ApiError::Http(HttpError::new(500, None)).is_retryable());
        assert!(ApiError::Http(HttpError::new(503, None)).is_retryable());
        assert!(ApiError::Http(HttpError::new(429, None)).is_retryable());
        assert!(!ApiError::Http(HttpError::new(404, None)).is_retryable());
        assert!(!ApiError::Http(HttpError::new(400, None)).is_retryable());
        assert!(!ApiError::Canceled.is_retryable());
        assert!(!ApiError::Transport("reset".to_string()).is_retryable());
    }

    #[test]
    fn test_status_is_zero_without_response() {
        assert_eq!(ApiError::Decode("eof".to_string()).status(), 0);
        assert_eq!(ApiError::Http(HttpError::new(418, None)).status(), 418);
    }

    #[test]
    fn test_http_error_display() {
        let err = ApiError::Http(HttpError::new(503, None));
        assert_eq!(err.to_string(), "HTTP 503");
    }
}
