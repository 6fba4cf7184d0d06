//! API route handlers
//!
//! - `health`: liveness, readiness and metrics
//! - `frequency`: word-frequency and keyword endpoints

pub mod frequency;
pub mod health;

use crate::error::{ServerError, ServerResult};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// API version and base info
///
/// # Response
///
/// ```json
/// {
///   "name": "WikiCount Server",
///   "version": "0.1.0",
///   "endpoints": ["..."]
/// }
/// ```
pub async fn api_info() -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "WikiCount Server",
        "description": "Word frequencies over Wikipedia articles and the pages they link to",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "GET /word-frequency?article=<title>&depth=<n>",
            "POST /keywords",
            "/health",
            "/ready",
            "/metrics"
        ]
    })))
}

/// 404 Not Found handler
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
