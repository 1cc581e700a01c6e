use std::time::Duration;

use crate::error::ApiError;

/// Freshness and retry rules applied to a query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryPolicy {
    /// How long a result is served from cache without a network round-trip
    pub stale_time: Duration,
    /// Extra attempts after the first failure
    pub max_retries: u32,
    pub retry_base_delay: Duration,
    pub retry_max_delay: Duration,
}

impl QueryPolicy {
    pub const GLOBAL_STALE_TIME: Duration = Duration::from_secs(5 * 60);
    pub const DATASET_STALE_TIME: Duration = Duration::from_secs(60);
    pub const MAX_RETRIES: u32 = 2;

    /// Default policy for queries that do not set their own
    pub fn global() -> Self {
        Self {
            stale_time: Self::GLOBAL_STALE_TIME,
            max_retries: Self::MAX_RETRIES,
            retry_base_delay: Duration::from_secs(1),
            retry_max_delay: Duration::from_secs(30),
        }
    }

    /// Policy used by the per-dataset queries
    pub fn dataset() -> Self {
        Self {
            stale_time: Self::DATASET_STALE_TIME,
            ..Self::global()
        }
    }

    pub fn with_stale_time(mut self, stale_time: Duration) -> Self {
        self.stale_time = stale_time;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_retry_delay(mut self, base: Duration, max: Duration) -> Self {
        self.retry_base_delay = base;
        self.retry_max_delay = max;
        self
    }

    /// `failures` counts failures before this one
    pub fn should_retry(&self, failures: u32, error: &ApiError) -> bool {
        failures < self.max_retries && error.is_retryable()
    }

    /// Exponential backoff, capped
    pub fn retry_delay(&self, failures: u32) -> Duration {
        let factor = 2u32.saturating_pow(failures);
        self.retry_base_delay
            .saturating_mul(factor)
            .min(self.retry_max_delay)
    }
}

impl Default for QueryPolicy {
    fn default() -> Self {
        Self::global()
    }
}
