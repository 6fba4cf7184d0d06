use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::FetchError;

/// Text and outbound article links of one page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContent {
    /// `false` when the title did not resolve to a page.
    pub exists: bool,
    /// Plain text of the page.
    pub text: String,
    /// Distinct article-namespace titles linked from the page, in source order.
    pub links: Vec<String>,
}

impl PageContent {
    /// An existing page. Duplicate links are dropped, first occurrence wins.
    pub fn new<I, S>(text: impl Into<String>, links: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let links = links
            .into_iter()
            .map(Into::into)
            .filter(|link: &String| seen.insert(link.clone()))
            .collect();
        Self {
            exists: true,
            text: text.into(),
            links,
        }
    }

    /// Placeholder for a title that does not exist: no text, no links.
    pub fn missing() -> Self {
        Self::default()
    }
}

/// Resolves an article title to its [`PageContent`].
///
/// Implementations filter links down to the article namespace. A missing
/// page is `Ok(PageContent::missing())`; `Err` is reserved for transport or
/// decoding failures.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, title: &str) -> Result<PageContent, FetchError>;
}

#[async_trait]
impl<F: PageFetcher + ?Sized> PageFetcher for Arc<F> {
    async fn fetch(&self, title: &str) -> Result<PageContent, FetchError> {
        (**self).fetch(title).await
    }
}

#[async_trait]
impl<F: PageFetcher + ?Sized> PageFetcher for &F {
    async fn fetch(&self, title: &str) -> Result<PageContent, FetchError> {
        (**self).fetch(title).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_dedups_links_keeping_first_order() {
        let page = PageContent::new("text", ["B", "A", "B", "C", "A"]);
        assert!(page.exists);
        assert_eq!(page.links, vec!["B", "A", "C"]);
    }

    #[test]
    fn missing_page_is_empty() {
        let page = PageContent::missing();
        assert!(!page.exists);
        assert!(page.text.is_empty());
        assert!(page.links.is_empty());
    }
}
