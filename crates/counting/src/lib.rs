//! wikicount counting layer.
//!
//! Turns raw article text into word frequencies. Three pieces, each usable on
//! its own:
//!
//! - [`normalize`] / [`tokenize`]: whitespace splitting, lowercasing and a
//!   fixed ASCII punctuation trim
//! - [`count_words`] / [`WordCount`]: per-token occurrence counts that merge
//!   by addition
//! - [`rank`] / [`FrequencyTable`]: count-descending table with percentages
//!   and the inverted percentile filter (see [`rank`](crate::rank) module docs)
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock, no locale. Same text and ignore set give the same counts;
//! same counts and percentile give the same table, including tie order.
//!
//! ```rust
//! use counting::{count_words, rank, IgnoreSet};
//!
//! let ignore = IgnoreSet::from_words(["the"]);
//! let counts = count_words("The cat saw the other cat.", &ignore);
//! let table = rank(&counts, 0.0);
//!
//! assert_eq!(table.words().next(), Some("cat"));
//! assert_eq!(table.get("cat").unwrap().word_count, 2);
//! ```

mod count;
mod rank;
mod token;

pub use crate::count::{count_words, WordCount};
pub use crate::rank::{rank, retained_count, FrequencyTable, WordFrequency};
pub use crate::token::{normalize, tokenize, IgnoreSet, STRIP_CHARS};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_then_rank_end_to_end() {
        let text = "Rust is fast. Rust is safe! Is it? (Rust)";
        let counts = count_words(text, &IgnoreSet::new());
        let table = rank(&counts, 0.0);

        let expected = vec![
            ("is", 3, 33.3333),
            ("rust", 3, 33.3333),
            ("fast", 1, 11.1111),
            ("it", 1, 11.1111),
            ("safe", 1, 11.1111),
        ];
        let got: Vec<(&str, u64, f64)> = table
            .iter()
            .map(|(w, f)| (w, f.word_count, f.frequency_percent))
            .collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn counts_survive_merging_pages_before_ranking() {
        let ignore = IgnoreSet::from_words(["a"]);
        let mut total = count_words("A page about dogs", &ignore);
        total.merge(count_words("A page about cats and dogs", &ignore));

        let table = rank(&total, 50.0);
        assert_eq!(table.total(), 8);
        // 5 distinct words -> floor(6 * 0.5) = 3 kept
        assert_eq!(
            table.words().collect::<Vec<_>>(),
            vec!["about", "dogs", "page"]
        );
    }
}
