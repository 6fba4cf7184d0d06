use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use wikicount::{IgnoreSet, MediaWikiFetcher, PageFetcher, PipelineConfig};

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Fetcher, walker and ranking settings
    pub pipeline: Arc<PipelineConfig>,

    /// Article source shared by every request
    pub fetcher: Arc<dyn PageFetcher>,

    /// Renders `/metrics` when a Prometheus recorder is installed
    pub prometheus: Option<PrometheusHandle>,
}

impl ServerState {
    /// Create state backed by the live MediaWiki API.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let pipeline = config
            .pipeline()
            .map_err(|e| ServerError::Config(e.to_string()))?;
        let fetcher = MediaWikiFetcher::new(&pipeline.mediawiki_config())
            .map_err(|e| ServerError::Config(e.to_string()))?;

        Ok(Self::with_fetcher(config, pipeline, Arc::new(fetcher)))
    }

    /// Create state around an existing fetcher.
    pub fn with_fetcher(
        config: ServerConfig,
        pipeline: PipelineConfig,
        fetcher: Arc<dyn PageFetcher>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            pipeline: Arc::new(pipeline),
            fetcher,
            prometheus: None,
        }
    }

    pub fn with_prometheus(mut self, handle: PrometheusHandle) -> Self {
        self.prometheus = Some(handle);
        self
    }

    /// Largest depth a request may ask for.
    pub fn max_depth_limit(&self) -> u32 {
        self.pipeline.walker.max_depth_limit
    }

    /// Configured stop-words plus the request's own ignore list.
    pub fn ignore_set<S: AsRef<str>>(&self, extra: &[S]) -> IgnoreSet {
        self.pipeline
            .ranking
            .ignore_words
            .iter()
            .map(String::as_str)
            .chain(extra.iter().map(|word| word.as_ref()))
            .collect()
    }
}
