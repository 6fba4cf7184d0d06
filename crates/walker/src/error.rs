use thiserror::Error;

/// Errors surfaced by a [`PageFetcher`](crate::PageFetcher).
///
/// A page that does not exist is not an error; fetchers report it as
/// [`PageContent::missing`](crate::PageContent::missing).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Fetcher configuration is unusable (bad endpoint, client build failure).
    #[error("invalid fetcher config: {0}")]
    InvalidConfig(String),
    /// The request never produced a response (DNS, connect, timeout).
    #[error("http request failed: {0}")]
    Http(String),
    /// The upstream answered with a non-success status.
    #[error("upstream returned status {status}: {body}")]
    Status { status: u16, body: String },
    /// The body was not the JSON shape we expect, or carried an API error.
    #[error("unexpected upstream response: {0}")]
    Decode(String),
}
