//! wikicount page walker.
//!
//! Follows article links outward from a start title, up to a fixed number of
//! hops, and sums the word counts of every page it reaches.
//!
//! - [`PageFetcher`]: the seam to the article source. [`MediaWikiFetcher`]
//!   talks to Wikipedia (or any MediaWiki); [`StubFetcher`] serves a fixed
//!   in-memory graph.
//! - [`walk`] / [`walk_with`]: the traversal. Each title is fetched at most
//!   once per walk, missing pages and fetch failures are logged and skipped,
//!   and in-flight fetches are capped per [`WalkConfig`].
//!
//! The fetcher is always passed in by the caller; nothing here holds a
//! process-wide client.
//!
//! ```rust,no_run
//! use counting::{rank, IgnoreSet};
//! use walker::{walk, MediaWikiConfig, MediaWikiFetcher};
//!
//! # async fn run() -> Result<(), walker::FetchError> {
//! let fetcher = MediaWikiFetcher::new(&MediaWikiConfig::default())?;
//! let counts = walk(&fetcher, "MSCI", 1, &IgnoreSet::from_words(["the", "and"])).await;
//! let top = rank(&counts, 90.0);
//! for (word, freq) in top.iter() {
//!     println!("{word}: {freq}");
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod fetcher;
mod mediawiki;
mod stub;
mod walk;

pub use crate::error::FetchError;
pub use crate::fetcher::{PageContent, PageFetcher};
pub use crate::mediawiki::{MediaWikiConfig, MediaWikiFetcher};
pub use crate::stub::StubFetcher;
pub use crate::walk::{walk, walk_with, WalkConfig, WalkReport};
