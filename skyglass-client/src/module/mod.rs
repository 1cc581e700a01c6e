///! Dataset queries and view helpers
///!
///! `DatasetQueries` is the outbound surface used by the front end: one query
///! function per dataset and filter combination, each returning a
///! `QueryOutcome`. The per-dataset modules add the small pieces of view logic
///! (filter vocabularies, paging, row shaping) that sit on top of the results.

// ============ Query Surface ============
mod queries;
pub use queries::{DatasetQueries, FetchMode};

// ============ Datasets ============
pub mod apod;
pub mod epic;
pub mod mars;
pub mod neo;

// ============ Presentation ============
pub mod view;
pub use view::ViewStatus;
