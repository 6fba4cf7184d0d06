//! Workspace umbrella crate for wikicount.
//!
//! This crate stitches the page walker and the counting layer together so
//! callers can go from an article title to a ranked word-frequency table with
//! a single call to [`analyze`].

pub mod config;

pub use config::{ConfigLoadError, PipelineConfig};
pub use counting::{
    count_words, normalize, rank, tokenize, FrequencyTable, IgnoreSet, WordCount, WordFrequency,
};
pub use walker::{
    walk, walk_with, FetchError, MediaWikiConfig, MediaWikiFetcher, PageContent, PageFetcher,
    StubFetcher, WalkConfig, WalkReport,
};

use std::sync::{Arc, OnceLock, RwLock};
use std::time::{Duration, Instant};

use thiserror::Error;

/// Errors raised while validating an [`AnalysisRequest`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PipelineError {
    #[error("article title must not be empty")]
    EmptyArticle,
    #[error("depth {depth} exceeds the maximum of {limit}")]
    DepthTooLarge { depth: u32, limit: u32 },
    #[error("percentile must be between 0 and 100, got {0}")]
    PercentileOutOfRange(f64),
}

/// Metrics observer for pipeline stages.
pub trait PipelineMetrics: Send + Sync {
    fn record_walk(&self, latency: Duration, report: &WalkReport);
    fn record_rank(&self, latency: Duration, distinct_words: usize, retained: usize);
}

/// Install or clear the global pipeline metrics recorder.
pub fn set_pipeline_metrics(recorder: Option<Arc<dyn PipelineMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn PipelineMetrics>>> {
    static METRICS: OnceLock<RwLock<Option<Arc<dyn PipelineMetrics>>>> = OnceLock::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

fn metrics_recorder() -> Option<Arc<dyn PipelineMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

/// One article analysis: where to start, how far to go, what to drop.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub article: String,
    pub max_depth: u32,
    pub ignore: IgnoreSet,
    /// Inverted percentile, see [`counting::rank`].
    pub percentile: f64,
}

impl AnalysisRequest {
    pub fn new(article: impl Into<String>) -> Self {
        Self {
            article: article.into(),
            max_depth: 0,
            ignore: IgnoreSet::new(),
            percentile: 0.0,
        }
    }

    pub fn with_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_ignore(mut self, ignore: IgnoreSet) -> Self {
        self.ignore = ignore;
        self
    }

    pub fn with_percentile(mut self, percentile: f64) -> Self {
        self.percentile = percentile;
        self
    }

    /// Checks the request against `depth_limit`.
    pub fn validate(&self, depth_limit: u32) -> Result<(), PipelineError> {
        if self.article.trim().is_empty() {
            return Err(PipelineError::EmptyArticle);
        }
        if self.max_depth > depth_limit {
            return Err(PipelineError::DepthTooLarge {
                depth: self.max_depth,
                limit: depth_limit,
            });
        }
        if !(0.0..=100.0).contains(&self.percentile) {
            return Err(PipelineError::PercentileOutOfRange(self.percentile));
        }
        Ok(())
    }
}

/// Result of [`analyze`].
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub start_article: String,
    pub max_depth: u32,
    pub table: FrequencyTable,
    pub pages_visited: usize,
    pub pages_missing: usize,
    pub pages_failed: usize,
    /// Why the start page could not be fetched, if it could not.
    pub start_error: Option<FetchError>,
    pub elapsed: Duration,
}

/// Walks from `request.article`, counts every page's words and ranks them.
///
/// Validation is the caller's job (see [`AnalysisRequest::validate`]); an
/// unchecked percentile is clamped by the ranker.
pub async fn analyze(
    fetcher: &dyn PageFetcher,
    request: &AnalysisRequest,
    walk_cfg: &WalkConfig,
) -> Analysis {
    let started = Instant::now();
    let recorder = metrics_recorder();

    let walk_started = Instant::now();
    let report = walk_with(
        fetcher,
        &request.article,
        request.max_depth,
        &request.ignore,
        walk_cfg,
    )
    .await;
    if let Some(rec) = recorder.as_ref() {
        rec.record_walk(walk_started.elapsed(), &report);
    }

    let rank_started = Instant::now();
    let table = rank(&report.counts, request.percentile);
    if let Some(rec) = recorder.as_ref() {
        rec.record_rank(rank_started.elapsed(), report.counts.len(), table.len());
    }

    tracing::info!(
        article = %request.article,
        depth = request.max_depth,
        pages = report.pages_visited(),
        words = table.len(),
        "analysis complete"
    );

    Analysis {
        start_article: request.article.clone(),
        max_depth: request.max_depth,
        pages_visited: report.pages_visited(),
        pages_missing: report.pages_missing,
        pages_failed: report.pages_failed,
        start_error: report.start_error,
        table,
        elapsed: started.elapsed(),
    }
}

/// Offline demo over a small built-in link graph.
pub async fn stub_demo(max_depth: u32, percentile: f64) -> Analysis {
    let fetcher = demo_fetcher();
    let request = AnalysisRequest::new("Rust")
        .with_depth(max_depth)
        .with_ignore(IgnoreSet::from_words(["a", "an", "and", "the", "of", "is"]))
        .with_percentile(percentile);
    analyze(&fetcher, &request, &WalkConfig::default()).await
}

fn demo_fetcher() -> StubFetcher {
    StubFetcher::new()
        .with_page(
            "Rust",
            "Rust is a general-purpose programming language. Rust emphasizes \
             performance, type safety, and concurrency.",
            ["Programming language", "Type safety", "Concurrency"],
        )
        .with_page(
            "Programming language",
            "A programming language is a system of notation for writing programs.",
            ["Rust", "Compiler"],
        )
        .with_page(
            "Type safety",
            "Type safety is the extent to which a programming language discourages type errors.",
            ["Programming language"],
        )
        .with_page(
            "Compiler",
            "A compiler translates code written in one programming language into another language.",
            ["Programming language"],
        )
}
