use crate::error::ApiError;
use crate::model::query::QueryOutcome;

/// What a dataset view should render for a query
#[derive(Debug, Clone, PartialEq)]
pub enum ViewStatus {
    /// Filters incomplete
    NotReady,
    /// Dropped by navigation or a newer request; rendered as nothing
    Canceled,
    /// Upstream answered 503
    ServiceUnavailable,
    Failed(String),
    /// Request succeeded with nothing in it
    Empty,
    Ready,
}

impl ViewStatus {
    /// Classify a settled query. `is_empty` inspects the data of a ready outcome.
    pub fn classify<T>(outcome: &QueryOutcome<T>, is_empty: impl FnOnce(&T) -> bool) -> Self {
        match outcome {
            QueryOutcome::NotReady => ViewStatus::NotReady,
            QueryOutcome::Failed(e) => Self::from_error(e),
            QueryOutcome::Ready(data) => {
                if is_empty(data) {
                    ViewStatus::Empty
                } else {
                    ViewStatus::Ready
                }
            }
        }
    }

    pub fn from_error(error: &ApiError) -> Self {
        match error {
            ApiError::Canceled => ViewStatus::Canceled,
            e if e.status() == 503 => ViewStatus::ServiceUnavailable,
            e => ViewStatus::Failed(user_message(e)),
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            ViewStatus::NotReady => Some("Fill in the search filters to see results."),
            ViewStatus::Canceled => None,
            ViewStatus::ServiceUnavailable => {
                Some("The NASA service is temporarily unavailable (503). Try again later.")
            }
            ViewStatus::Failed(message) => Some(message.as_str()),
            ViewStatus::Empty => Some("No results for these filters."),
            ViewStatus::Ready => None,
        }
    }
}

fn user_message(error: &ApiError) -> String {
    match error {
        ApiError::Http(e) if e.status == 429 => {
            let mut msg = "Rate limit reached.".to_string();
            if let Some(remaining) = e.rate_limit.and_then(|r| r.remaining) {
                msg.push_str(&format!(" Remaining requests: {}.", remaining));
            }
            msg
        }
        ApiError::Http(e) if e.status == 404 => "Nothing found for these filters.".to_string(),
        ApiError::Http(e) => format!("The request failed ({}).", e),
        ApiError::Transport(_) => "Could not reach the NASA API.".to_string(),
        ApiError::Decode(_) => "The NASA API returned an unexpected response.".to_string(),
        ApiError::Invalid(reason) => format!("Invalid search: {}.", reason),
        ApiError::Canceled => "Request canceled.".to_string(),
    }
}
