///! NASA open API access
///!
///! `endpoints` builds request URLs, `wire` holds the loosely-typed payload
///! shapes and `client` turns them into validated `skyglass_common` entities.

mod client;
mod endpoints;
mod wire;

pub use client::NasaClient;
pub use endpoints::NasaEndpoints;
