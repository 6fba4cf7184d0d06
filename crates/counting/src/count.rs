use std::ops::AddAssign;

use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::token::{normalize, tokenize, IgnoreSet};

/// Occurrence counts keyed by normalized token.
///
/// Counters built from separate texts combine with [`WordCount::merge`] (or
/// `+=`); merging is associative and commutative, so the order in which page
/// counts are folded together never changes the result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordCount {
    counts: FxHashMap<String, u64>,
}

impl WordCount {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `n` occurrences of `token`.
    pub fn add(&mut self, token: impl Into<String>, n: u64) {
        if n == 0 {
            return;
        }
        *self.counts.entry(token.into()).or_insert(0) += n;
    }

    /// Sums `other` into `self`.
    pub fn merge(&mut self, other: WordCount) {
        if self.counts.is_empty() {
            self.counts = other.counts;
            return;
        }
        for (token, n) in other.counts {
            *self.counts.entry(token).or_insert(0) += n;
        }
    }

    pub fn get(&self, token: &str) -> u64 {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterates in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(token, n)| (token.as_str(), *n))
    }
}

impl AddAssign for WordCount {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(rhs);
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for WordCount {
    fn from_iter<T: IntoIterator<Item = (S, u64)>>(iter: T) -> Self {
        let mut counts = WordCount::new();
        counts.extend(iter);
        counts
    }
}

impl<S: Into<String>> Extend<(S, u64)> for WordCount {
    fn extend<T: IntoIterator<Item = (S, u64)>>(&mut self, iter: T) {
        for (token, n) in iter {
            self.add(token, n);
        }
    }
}

/// Counts the normalized tokens of `text`, skipping anything in `ignore`.
///
/// ```rust
/// use counting::{count_words, IgnoreSet};
///
/// let counts = count_words("Hello, HELLO world! test.", &IgnoreSet::new());
/// assert_eq!(counts.get("hello"), 2);
/// assert_eq!(counts.get("world"), 1);
/// assert_eq!(counts.get("test"), 1);
/// assert_eq!(counts.len(), 3);
/// ```
pub fn count_words(text: &str, ignore: &IgnoreSet) -> WordCount {
    let mut counts = WordCount::new();
    for raw in tokenize(text) {
        let token = normalize(raw);
        if ignore.contains(&token) {
            continue;
        }
        counts.add(token, 1);
    }
    counts
}
