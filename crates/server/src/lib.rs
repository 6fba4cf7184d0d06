//! WikiCount Server - HTTP REST API for Wikipedia word frequencies
//!
//! Walks an article's link graph to a bounded depth, counts the words on
//! every page reached and returns a ranked frequency table.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /` - API information
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe
//! - `GET /metrics` - Prometheus metrics
//! - `GET /word-frequency?article=<title>&depth=<n>` - Full frequency table
//! - `POST /keywords` - Frequency table with ignore list and percentile cut
//!
//! Validation failures answer `422` with
//! `{"error": {"code": "VALIDATION_ERROR", "message", "details": {"field"}}}`.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;
pub mod telemetry;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
