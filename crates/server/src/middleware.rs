use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request ID injection middleware
///
/// Echoes a caller-supplied `x-request-id` or generates a UUID v4.
pub async fn request_id(mut request: Request, next: Next) -> Response {
    let (request_id, header) = match request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok().map(|s| (s.to_string(), v.clone())))
    {
        Some(found) => found,
        None => {
            let id = uuid::Uuid::new_v4().to_string();
            let header = HeaderValue::from_str(&id).unwrap_or_else(|_| HeaderValue::from_static("-"));
            (id, header)
        }
    };

    // Add to request extensions for handlers to access
    request.extensions_mut().insert(RequestId(request_id));

    let mut response = next.run(request).await;
    response.headers_mut().insert(REQUEST_ID_HEADER, header);
    response
}

/// Request id stored in request extensions by [`request_id`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

/// Logging middleware
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = std::time::Instant::now();

    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.clone())
        .unwrap_or_default();

    tracing::info!(
        method = %method,
        uri = %uri,
        request_id = %request_id,
        "Request started"
    );

    let response = next.run(request).await;
    let duration = start.elapsed();
    let status = response.status();

    metrics::counter!(
        "wikicount_http_responses_total",
        "status" => status.as_u16().to_string()
    )
    .increment(1);

    tracing::info!(
        method = %method,
        uri = %uri,
        status = %status,
        duration_ms = %duration.as_millis(),
        request_id = %request_id,
        "Request completed"
    );

    response
}
