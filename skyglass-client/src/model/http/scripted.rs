use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use super::client::{HttpTransport, RawResponse};
use crate::error::ApiError;

struct Step {
    delay: Duration,
    result: Result<RawResponse, ApiError>,
}

/// Transport that replays a fixed queue of responses and records every URL.
///
/// Used for offline runs and tests. Once the queue is drained every request
/// fails with a transport error.
#[derive(Default)]
pub struct ScriptedTransport {
    steps: Mutex<VecDeque<Step>>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(self, result: Result<RawResponse, ApiError>) -> Self {
        self.then_after(Duration::ZERO, result)
    }

    pub fn then_after(self, delay: Duration, result: Result<RawResponse, ApiError>) -> Self {
        self.push(delay, result);
        self
    }

    pub fn respond(self, status: u16, body: &str) -> Self {
        self.then(Ok(RawResponse::new(status, body)))
    }

    pub fn respond_after(self, delay: Duration, status: u16, body: &str) -> Self {
        self.then_after(delay, Ok(RawResponse::new(status, body)))
    }

    /// Queue another response on a shared transport
    pub fn push(&self, delay: Duration, result: Result<RawResponse, ApiError>) {
        if let Ok(mut steps) = self.steps.lock() {
            steps.push_back(Step { delay, result });
        }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or_default()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn get(&self, url: &str) -> Result<RawResponse, ApiError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }

        let step = self.steps.lock().ok().and_then(|mut steps| steps.pop_front());
        match step {
            Some(step) => {
                if !step.delay.is_zero() {
                    tokio::time::sleep(step.delay).await;
                }
                step.result
            }
            None => Err(ApiError::Transport(format!("no scripted response for {}", url))),
        }
    }
}
