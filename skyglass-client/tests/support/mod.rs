//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use skyglass_client::model::favorites::{KeyValueStore, MemoryKeyValueStore};
use skyglass_client::model::http::ScriptedTransport;
use skyglass_client::{ExplorerConfig, ExplorerContext};

pub const API_KEY: &str = "TEST_KEY";

pub fn config() -> ExplorerConfig {
    ExplorerConfig::default().with_api_key_override(Some(API_KEY.to_string()))
}

/// Context over a scripted transport and in-memory favorites
pub fn context(transport: ScriptedTransport) -> (ExplorerContext, Arc<ScriptedTransport>, Arc<MemoryKeyValueStore>) {
    context_with_storage(transport, MemoryKeyValueStore::new())
}

pub fn context_with_storage(
    transport: ScriptedTransport,
    storage: MemoryKeyValueStore,
) -> (ExplorerContext, Arc<ScriptedTransport>, Arc<MemoryKeyValueStore>) {
    let transport = Arc::new(transport);
    let storage = Arc::new(storage);
    let ctx = ExplorerContext::with_parts(
        config(),
        transport.clone(),
        storage.clone() as Arc<dyn KeyValueStore>,
    )
    .expect("context");
    (ctx, transport, storage)
}

pub fn apod_json(date: &str, title: &str, media_type: &str) -> String {
    format!(
        r#"{{"date":"{date}","title":"{title}","explanation":"","url":"https://apod.nasa.gov/apod/image/{date}.jpg","media_type":"{media_type}","service_version":"v1"}}"#
    )
}

/// APOD range answer for 2024-01-01..03, the middle day being a video
pub fn apod_week_json() -> String {
    format!(
        "[{},{},{}]",
        apod_json("2024-01-01", "Starlink Satellite Trails", "image"),
        apod_json("2024-01-02", "Perseverance Rover Sounds", "video"),
        apod_json("2024-01-03", "The Horsehead Nebula", "image"),
    )
}

pub fn mars_photo_json(id: u64) -> String {
    format!(
        r#"{{"id":{id},"sol":1000,
            "camera":{{"id":20,"name":"FHAZ","rover_id":5,"full_name":"Front Hazard Avoidance Camera"}},
            "img_src":"http://mars.jpl.nasa.gov/msl-raw-images/{id}.JPG","earth_date":"2015-05-30",
            "rover":{{"id":5,"name":"Curiosity","landing_date":"2012-08-06","launch_date":"2011-11-26","status":"active"}}}}"#
    )
}
