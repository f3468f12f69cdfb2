//! Liveness probe.

use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// GET /health
///
/// Always returns `200 OK` while the process is serving requests.
pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
