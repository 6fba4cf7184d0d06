//! Token normalization.
//!
//! A token is a whitespace-separated word that has been lowercased and had
//! a fixed set of ASCII punctuation trimmed from both ends. Nothing else is
//! touched: no Unicode normalization, no stemming, and markup leftovers such
//! as `===` or `\lambda` pass through unchanged apart from the trim.
//!
//! ```rust
//! use counting::normalize;
//!
//! assert_eq!(normalize("(Hello!)"), "hello");
//! assert_eq!(normalize("don't"), "don't");
//! assert_eq!(normalize("..."), "");
//! ```

use fxhash::FxHashSet;

/// Characters trimmed from both ends of every raw token.
pub const STRIP_CHARS: [char; 12] = ['.', ',', '!', '?', '(', ')', '[', ']', '{', '}', '"', '\''];

/// Lowercases `raw` and trims [`STRIP_CHARS`] from both ends.
///
/// The result may be empty (`"?!"` normalizes to `""`); an empty token is
/// still a token and gets counted like any other word. Idempotent.
pub fn normalize(raw: &str) -> String {
    raw.to_lowercase().trim_matches(&STRIP_CHARS[..]).to_string()
}

/// Splits text on runs of Unicode whitespace.
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
}

/// Set of normalized tokens excluded from counting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreSet {
    words: FxHashSet<String>,
}

impl IgnoreSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from user-supplied words, normalizing each one so that
    /// `"The"` and `"the,"` both exclude the token `the`.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words.into_iter().map(|w| normalize(w.as_ref())).collect(),
        }
    }

    /// Adds an already-normalized token.
    pub fn insert(&mut self, token: impl Into<String>) -> bool {
        self.words.insert(token.into())
    }

    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for IgnoreSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::from_words(iter)
    }
}
