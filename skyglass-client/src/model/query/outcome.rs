use std::sync::Arc;

use crate::error::ApiError;

/// Result of a dataset query as seen by a view
#[derive(Debug, Clone)]
pub enum QueryOutcome<T> {
    /// Required parameters are missing or malformed; nothing was requested
    NotReady,
    Ready(Arc<T>),
    Failed(ApiError),
}

impl<T> QueryOutcome<T> {
    pub fn from_result(result: Result<Arc<T>, ApiError>) -> Self {
        match result {
            Ok(data) => QueryOutcome::Ready(data),
            Err(e) => QueryOutcome::Failed(e),
        }
    }

    pub fn data(&self) -> Option<&Arc<T>> {
        match self {
            QueryOutcome::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            QueryOutcome::Failed(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_not_ready(&self) -> bool {
        matches!(self, QueryOutcome::NotReady)
    }
}
