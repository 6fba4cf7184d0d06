//! Depth-bounded traversal of the article link graph.
//!
//! The walk runs as a level-by-level worklist: level `d` holds the titles
//! first discovered at depth `d`, in the order their linking pages listed
//! them. A title is marked visited when it is enqueued, so it is fetched at
//! most once per walk and always at the smallest depth it is reachable at.
//!
//! Fetches within one level run concurrently, capped by
//! [`WalkConfig::max_concurrent_fetches`]; results are folded into the total
//! in frontier order, so the outcome does not depend on which response
//! arrives first.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use counting::{count_words, IgnoreSet, WordCount};
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};

use crate::{FetchError, PageContent, PageFetcher};

/// Tuning knobs for a walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkConfig {
    /// Ceiling on in-flight fetches. Values below 1 are treated as 1.
    #[serde(default = "default_max_concurrent_fetches")]
    pub max_concurrent_fetches: usize,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            max_concurrent_fetches: default_max_concurrent_fetches(),
        }
    }
}

impl WalkConfig {
    pub fn with_max_concurrent_fetches(mut self, limit: usize) -> Self {
        self.max_concurrent_fetches = limit;
        self
    }

    fn fetch_limit(&self) -> usize {
        self.max_concurrent_fetches.max(1)
    }
}

fn default_max_concurrent_fetches() -> usize {
    8
}

/// Aggregate result of [`walk_with`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WalkReport {
    /// Word counts summed over every fetched page.
    pub counts: WordCount,
    /// Titles fetched, in frontier order.
    pub visited: Vec<String>,
    /// Titles that did not resolve to a page.
    pub pages_missing: usize,
    /// Titles whose fetch failed.
    pub pages_failed: usize,
    /// Set when the start page itself could not be fetched.
    pub start_error: Option<FetchError>,
    /// Deepest level that had at least one page.
    pub depth_reached: u32,
    pub elapsed: Duration,
}

impl WalkReport {
    pub fn pages_visited(&self) -> usize {
        self.visited.len()
    }
}

/// Walks from `start_title` up to `max_depth` link hops and returns the
/// summed word counts.
///
/// `max_depth = 0` fetches only the start page. Missing pages and failed
/// fetches contribute nothing; the walk carries on without them.
pub async fn walk(
    fetcher: &dyn PageFetcher,
    start_title: &str,
    max_depth: u32,
    ignore: &IgnoreSet,
) -> WordCount {
    walk_with(fetcher, start_title, max_depth, ignore, &WalkConfig::default())
        .await
        .counts
}

/// [`walk`] with explicit tuning, returning the full [`WalkReport`].
pub async fn walk_with(
    fetcher: &dyn PageFetcher,
    start_title: &str,
    max_depth: u32,
    ignore: &IgnoreSet,
    config: &WalkConfig,
) -> WalkReport {
    let started = Instant::now();
    let limit = config.fetch_limit();
    let mut report = WalkReport::default();

    let mut visited: HashSet<String> = HashSet::new();
    visited.insert(start_title.to_string());
    let mut frontier = vec![start_title.to_string()];
    let mut depth = 0u32;

    while !frontier.is_empty() {
        report.depth_reached = depth;

        let pages: Vec<(String, Fetched)> = stream::iter(frontier)
            .map(move |title| async move {
                let page = fetch_page(fetcher, &title, depth).await;
                (title, page)
            })
            .buffered(limit)
            .collect()
            .await;

        let mut next = Vec::new();
        for (title, fetched) in pages {
            let page = match fetched {
                Fetched::Page(page) => page,
                Fetched::Missing => {
                    report.pages_missing += 1;
                    PageContent::missing()
                }
                Fetched::Failed(err) => {
                    report.pages_failed += 1;
                    if depth == 0 {
                        report.start_error = Some(err);
                    }
                    PageContent::missing()
                }
            };
            report.counts.merge(count_words(&page.text, ignore));

            if depth < max_depth {
                for link in page.links {
                    if visited.insert(link.clone()) {
                        next.push(link);
                    }
                }
            }
            report.visited.push(title);
        }

        frontier = next;
        depth += 1;
    }

    report.elapsed = started.elapsed();

    tracing::debug!(
        start = start_title,
        max_depth,
        pages = report.pages_visited(),
        missing = report.pages_missing,
        failed = report.pages_failed,
        distinct_words = report.counts.len(),
        elapsed_ms = report.elapsed.as_millis() as u64,
        "walk finished"
    );
    report
}

enum Fetched {
    Page(PageContent),
    Missing,
    Failed(FetchError),
}

async fn fetch_page(fetcher: &dyn PageFetcher, title: &str, depth: u32) -> Fetched {
    match fetcher.fetch(title).await {
        Ok(page) if page.exists => {
            tracing::debug!(title, depth, links = page.links.len(), "visited page");
            Fetched::Page(page)
        }
        Ok(_) => {
            tracing::warn!(title, depth, "page does not exist or is not unique");
            Fetched::Missing
        }
        Err(err) => {
            tracing::warn!(title, depth, error = %err, "page fetch failed, skipping");
            Fetched::Failed(err)
        }
    }
}
