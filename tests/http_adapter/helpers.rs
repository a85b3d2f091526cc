//! Shared helpers for HTTP adapter integration tests.

use std::time::Duration;

use serde_json::{Value, json};
use taskdeck::{
    config::TodoClientConfig,
    task::adapters::http::{HttpImageUploader, HttpTaskGateway},
};
use wiremock::MockServer;

/// Path prefix of the task API on the mock server.
pub const API_PREFIX: &str = "/api/v1";

/// Points every endpoint at `server`.
pub fn config_for(server: &MockServer) -> TodoClientConfig {
    TodoClientConfig {
        api_base_url: format!("{}{API_PREFIX}", server.uri()),
        upload_url: format!("{}/api/upload", server.uri()),
        asset_base_url: server.uri(),
        request_timeout: Duration::from_secs(5),
    }
}

/// Builds a gateway for `server`.
///
/// # Panics
///
/// Panics when the HTTP client cannot be built.
pub fn gateway_for(server: &MockServer) -> HttpTaskGateway {
    HttpTaskGateway::new(&config_for(server)).expect("http client should build")
}

/// Builds an uploader for `server`.
///
/// # Panics
///
/// Panics when the HTTP client cannot be built.
pub fn uploader_for(server: &MockServer) -> HttpImageUploader {
    HttpImageUploader::new(&config_for(server)).expect("http client should build")
}

/// A task record as the store sends it.
pub fn wire_task(id: Value, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": "",
        "completed": false,
        "createdAt": "2025-03-01T09:00:00.000Z",
        "updatedAt": "2025-03-01T09:00:00.000Z",
        "dueDate": "2025-03-08T17:00:00.000Z",
        "priority": "medium",
        "recurring": { "isRecurring": false, "frequency": null },
    })
}

/// Wraps `data` in a success envelope.
pub fn success(data: Value) -> Value {
    json!({ "success": true, "data": data })
}
