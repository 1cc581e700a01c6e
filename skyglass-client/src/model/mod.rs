pub mod favorites;
pub mod http;
pub mod nasa;
pub mod query;
