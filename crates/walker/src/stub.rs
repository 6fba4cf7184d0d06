//! In-memory page graph, for tests, demos and offline runs.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::{FetchError, PageContent, PageFetcher};

/// [`PageFetcher`] over a fixed title -> page map.
///
/// Unknown titles come back as [`PageContent::missing`]. Every call is logged
/// so callers can check which titles were fetched and how often. Clones
/// share the log.
#[derive(Debug, Clone, Default)]
pub struct StubFetcher {
    pages: HashMap<String, PageContent>,
    failing: HashSet<String>,
    log: Arc<Mutex<Vec<String>>>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an existing page.
    pub fn with_page<I, S>(mut self, title: impl Into<String>, text: impl Into<String>, links: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pages
            .insert(title.into(), PageContent::new(text, links));
        self
    }

    /// Makes fetches of `title` fail with an HTTP error.
    pub fn with_failure(mut self, title: impl Into<String>) -> Self {
        self.failing.insert(title.into());
        self
    }

    /// Titles fetched so far, in call order.
    pub fn fetched(&self) -> Vec<String> {
        self.log
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn fetch_count(&self, title: &str) -> usize {
        self.fetched().iter().filter(|t| *t == title).count()
    }
}

#[async_trait]
impl PageFetcher for StubFetcher {
    async fn fetch(&self, title: &str) -> Result<PageContent, FetchError> {
        self.log
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(title.to_string());

        if self.failing.contains(title) {
            return Err(FetchError::Http(format!("stub failure for '{title}'")));
        }
        Ok(self
            .pages
            .get(title)
            .cloned()
            .unwrap_or_else(PageContent::missing))
    }
}
