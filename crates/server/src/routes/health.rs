use crate::error::ServerResult;
use crate::state::ServerState;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::sync::Arc;
use std::time::SystemTime;

/// Global server start time for uptime calculation
static SERVER_START_TIME: once_cell::sync::Lazy<SystemTime> =
    once_cell::sync::Lazy::new(SystemTime::now);

fn uptime_seconds() -> u64 {
    SERVER_START_TIME
        .elapsed()
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Health check endpoint (liveness)
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "wikicount-server",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime_seconds": uptime_seconds(),
    }))
}

/// Readiness check endpoint
///
/// Reports the configured limits; no upstream call is made.
pub async fn readiness_check(
    State(state): State<Arc<ServerState>>,
) -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "status": "ready",
        "service": "wikicount-server",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime_seconds": uptime_seconds(),
        "limits": {
            "max_depth": state.max_depth_limit(),
            "max_concurrent_fetches": state.pipeline.walker.max_concurrent_fetches,
        }
    })))
}

/// Prometheus metrics endpoint
///
/// Falls back to a JSON uptime stub when no recorder is installed.
pub async fn metrics(State(state): State<Arc<ServerState>>) -> Response {
    match (&state.prometheus, state.config.metrics_enabled) {
        (Some(handle), true) => (
            [(CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        _ => Json(json!({ "uptime_seconds": uptime_seconds() })).into_response(),
    }
}
