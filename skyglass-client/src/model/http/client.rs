use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::{ApiError, HttpError, RateLimitInfo};

const USER_AGENT: &str = concat!("skyglass/", env!("CARGO_PKG_VERSION"));

const RATE_LIMIT_LIMIT: &str = "x-ratelimit-limit";
const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";
const RATE_LIMIT_RESET: &str = "x-ratelimit-reset";

/// Status, headers and body of a completed response
#[derive(Debug, Clone, Default)]
pub struct RawResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Network GET, abstracted so the client can run against canned responses.
///
/// Dropping the returned future must abort the transfer.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, url: &str) -> Result<RawResponse, ApiError>;
}

/// Production transport backed by `reqwest`
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<RawResponse, ApiError> {
        let response = self.client.get(url).send().await?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.as_str().to_string(), v.to_string())))
            .collect();
        let body = response.bytes().await?.to_vec();

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

/// JSON GET client shared by every dataset call
#[derive(Clone)]
pub struct HttpClient {
    transport: Arc<dyn HttpTransport>,
}

impl HttpClient {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    /// GET `url` and parse the body as `T`.
    ///
    /// Resolves to `ApiError::Canceled` as soon as `cancel` fires; the pending
    /// transfer is dropped, which aborts it.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<T, ApiError> {
        if cancel.is_cancelled() {
            return Err(ApiError::Canceled);
        }

        debug!("GET {}", redact_key(url));

        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("GET {} canceled", redact_key(url));
                return Err(ApiError::Canceled);
            }
            result = self.transport.get(url) => result?,
        };

        if !response.is_success() {
            debug!("GET {} failed with HTTP {}", redact_key(url), response.status);
            return Err(HttpError::new(response.status, parse_rate_limit(&response)).into());
        }

        Ok(serde_json::from_slice(&response.body)?)
    }
}

/// Rate-limit counters from the response headers; `None` when none is usable
pub fn parse_rate_limit(response: &RawResponse) -> Option<RateLimitInfo> {
    let info = RateLimitInfo {
        limit: header_number(response.header(RATE_LIMIT_LIMIT)),
        remaining: header_number(response.header(RATE_LIMIT_REMAINING)),
        reset: header_number(response.header(RATE_LIMIT_RESET)),
    };
    (!info.is_empty()).then_some(info)
}

fn header_number(value: Option<&str>) -> Option<f64> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|n| n.is_finite())
}

/// Replace the `api_key` query value so URLs can be logged
pub fn redact_key(url: &str) -> String {
    match url.find("api_key=") {
        Some(pos) => {
            let start = pos + "api_key=".len();
            let end = url[start..].find('&').map_or(url.len(), |i| start + i);
            format!("{}***{}", &url[..start], &url[end..])
        }
        None => url.to_string(),
    }
}
