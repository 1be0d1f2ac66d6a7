//! Health check endpoint.

use axum::Json;
use serde_json::{json, Value};

/// Liveness probe reporting service status and version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
