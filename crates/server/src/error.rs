use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use wikicount::{FetchError, PipelineError};

pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid value for '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Upstream fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found")]
    NotFound,
}

/// API error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ServerError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ServerError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Get HTTP status code for this error
    fn status_code(&self) -> StatusCode {
        match self {
            ServerError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound => StatusCode::NOT_FOUND,
            ServerError::Fetch(_) => StatusCode::BAD_GATEWAY,
            ServerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code string
    fn error_code(&self) -> &'static str {
        match self {
            ServerError::Validation { .. } => "VALIDATION_ERROR",
            ServerError::BadRequest(_) => "BAD_REQUEST",
            ServerError::Fetch(_) => "FETCH_ERROR",
            ServerError::Config(_) => "CONFIG_ERROR",
            ServerError::NotFound => "NOT_FOUND",
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ServerError::Validation { field, .. } => Some(json!({ "field": field })),
            _ => None,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = ErrorResponse {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message: self.to_string(),
                details: self.details(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<PipelineError> for ServerError {
    fn from(err: PipelineError) -> Self {
        let field = match err {
            PipelineError::EmptyArticle => "article",
            PipelineError::DepthTooLarge { .. } => "depth",
            PipelineError::PercentileOutOfRange(_) => "percentile",
        };
        ServerError::validation(field, err.to_string())
    }
}

impl From<JsonRejection> for ServerError {
    fn from(err: JsonRejection) -> Self {
        match err {
            JsonRejection::JsonDataError(e) => {
                ServerError::validation(rejected_field(&e.body_text()), e.body_text())
            }
            JsonRejection::JsonSyntaxError(e) => ServerError::validation("body", e.body_text()),
            JsonRejection::MissingJsonContentType(e) => ServerError::BadRequest(e.body_text()),
            other => ServerError::BadRequest(other.body_text()),
        }
    }
}

impl From<QueryRejection> for ServerError {
    fn from(err: QueryRejection) -> Self {
        let text = err.body_text();
        ServerError::validation(rejected_field(&text), text)
    }
}

/// Best-effort field name from a serde rejection message.
///
/// Decoders report either "missing field `x`" or "<prefix>: x: <reason>".
fn rejected_field(message: &str) -> String {
    if let Some(rest) = message.split("missing field `").nth(1) {
        if let Some(field) = rest.split('`').next() {
            return field.to_string();
        }
    }
    message
        .split(": ")
        .nth(1)
        .filter(|name| {
            !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
        .map(str::to_string)
        .unwrap_or_else(|| "body".to_string())
}
