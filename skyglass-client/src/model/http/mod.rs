///! HTTP client wrapper
///!
///! One GET primitive with cooperative cancellation and typed failures. No
///! retries happen at this layer; the query cache owns the retry policy.

mod client;
mod scripted;

pub use client::{parse_rate_limit, redact_key, HttpClient, HttpTransport, RawResponse, ReqwestTransport};
pub use scripted::ScriptedTransport;
