//! Logging and metrics setup for the server binary.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use wikicount::{set_pipeline_metrics, PipelineMetrics, WalkReport};

/// Forwards pipeline stage timings to the `metrics` facade.
#[derive(Debug, Default)]
pub struct RecorderMetrics;

impl PipelineMetrics for RecorderMetrics {
    fn record_walk(&self, latency: Duration, report: &WalkReport) {
        metrics::histogram!("wikicount_walk_seconds").record(latency.as_secs_f64());
        metrics::counter!("wikicount_pages_fetched_total").increment(report.pages_visited() as u64);
        metrics::counter!("wikicount_pages_missing_total").increment(report.pages_missing as u64);
        metrics::counter!("wikicount_pages_failed_total").increment(report.pages_failed as u64);
    }

    fn record_rank(&self, latency: Duration, distinct_words: usize, retained: usize) {
        metrics::histogram!("wikicount_rank_seconds").record(latency.as_secs_f64());
        metrics::histogram!("wikicount_distinct_words").record(distinct_words as f64);
        metrics::histogram!("wikicount_retained_words").record(retained as f64);
    }
}

/// JSON logs filtered by `RUST_LOG`, falling back to `level`.
pub fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(true)
        .with_thread_names(true)
        .json()
        .try_init();
    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

/// Installs the global Prometheus recorder and the pipeline observer.
pub fn install_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    set_pipeline_metrics(Some(Arc::new(RecorderMetrics)));
    Ok(handle)
}
