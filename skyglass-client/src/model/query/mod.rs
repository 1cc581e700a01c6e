///! Query cache
///!
///! Cached, de-duplicated, retry-governed fetches keyed by request parameters.

mod cache;
mod key;
mod outcome;
mod policy;

pub use cache::{QueryCache, QueryStatus};
pub use key::{KeyPart, QueryKey};
pub use outcome::QueryOutcome;
pub use policy::QueryPolicy;
