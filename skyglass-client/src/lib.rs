///! skyglass client library
///!
///! Browse NASA open datasets (APOD, Mars rover photos, NEO feed, EPIC) through
///! a cached query layer and keep local favorites.

pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod model;
pub mod module;

pub use config::ExplorerConfig;
pub use context::ExplorerContext;
pub use error::{ApiError, ConfigError, HttpError, RateLimitInfo, StorageError};
