//! Liveness check.

use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

/// GET /health - always `{"status":"ok"}` while the process serves requests.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Router exposing `/health`.
pub fn health_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/health", get(health))
}
