//! Frequency ranking.
//!
//! [`rank`] turns a [`WordCount`] into a [`FrequencyTable`]: words sorted by
//! count (descending, ties broken by the word itself in ascending byte
//! order), each paired with its share of the total as a percentage rounded
//! to four decimals.
//!
//! # Percentile convention
//!
//! The `percentile` argument names the share of the *least* frequent
//! distinct words to drop, so a higher percentile keeps fewer words:
//!
//! | percentile | kept                                   |
//! |-----------:|----------------------------------------|
//! | 0          | every word                             |
//! | 50         | roughly the top half                   |
//! | 90         | roughly the top 10%                    |
//! | 100        | only the single most frequent word     |
//!
//! With `n` distinct words the number kept is
//! `max(1, floor((n + 1) * (100 - percentile) / 100))`. Percentages are
//! always computed against the unfiltered total, so a filtered table sums to
//! less than 100.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::count::WordCount;

/// Count and share of the total for a single word.
///
/// Serializes as a two-element array `[word_count, frequency_percent]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(u64, f64)", into = "(u64, f64)")]
pub struct WordFrequency {
    pub word_count: u64,
    pub frequency_percent: f64,
}

impl WordFrequency {
    pub fn new(word_count: u64, frequency_percent: f64) -> Self {
        Self {
            word_count,
            frequency_percent,
        }
    }
}

impl From<(u64, f64)> for WordFrequency {
    fn from((word_count, frequency_percent): (u64, f64)) -> Self {
        Self::new(word_count, frequency_percent)
    }
}

impl From<WordFrequency> for (u64, f64) {
    fn from(value: WordFrequency) -> Self {
        (value.word_count, value.frequency_percent)
    }
}

impl fmt::Display for WordFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2}%)", self.word_count, self.frequency_percent)
    }
}

/// Ordered word -> [`WordFrequency`] table produced by [`rank`].
///
/// Serializes as a JSON object whose keys keep the table order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrequencyTable {
    entries: Vec<(String, WordFrequency)>,
    total: u64,
}

impl FrequencyTable {
    /// Sum of all counts in the ranked input, including filtered-out words.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks a word up by its normalized form. Linear in table size.
    pub fn get(&self, word: &str) -> Option<&WordFrequency> {
        self.entries
            .iter()
            .find(|(w, _)| w == word)
            .map(|(_, freq)| freq)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &WordFrequency)> {
        self.entries.iter().map(|(w, freq)| (w.as_str(), freq))
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(w, _)| w.as_str())
    }

    pub fn into_entries(self) -> Vec<(String, WordFrequency)> {
        self.entries
    }
}

impl Serialize for FrequencyTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (word, freq) in &self.entries {
            map.serialize_entry(word, freq)?;
        }
        map.end()
    }
}

/// Number of distinct words kept out of `distinct` for `percentile`.
pub fn retained_count(distinct: usize, percentile: f64) -> usize {
    if distinct == 0 || percentile <= 0.0 {
        return distinct;
    }
    let share = (100.0 - percentile.min(100.0)) / 100.0;
    let keep = ((distinct as f64 + 1.0) * share).floor() as usize;
    keep.clamp(1, distinct)
}

/// Ranks `counts` by frequency, keeping the top words for `percentile`.
///
/// `percentile` is expected in `[0, 100]`; values outside are clamped.
/// An empty input yields an empty table.
pub fn rank(counts: &WordCount, percentile: f64) -> FrequencyTable {
    let total = counts.total();
    if total == 0 {
        return FrequencyTable::default();
    }

    let mut sorted: Vec<(&str, u64)> = counts.iter().collect();
    sorted.sort_unstable_by(|(wa, ca), (wb, cb)| cb.cmp(ca).then_with(|| wa.cmp(wb)));
    sorted.truncate(retained_count(sorted.len(), percentile));

    let entries = sorted
        .into_iter()
        .map(|(word, count)| {
            let percent = round4(count as f64 * 100.0 / total as f64);
            (word.to_string(), WordFrequency::new(count, percent))
        })
        .collect();

    FrequencyTable { entries, total }
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> WordCount {
        [("hello", 5u64), ("world", 3), ("test", 2)].into_iter().collect()
    }

    fn as_pairs(table: &FrequencyTable) -> Vec<(&str, u64, f64)> {
        table
            .iter()
            .map(|(w, f)| (w, f.word_count, f.frequency_percent))
            .collect()
    }

    #[test]
    fn ranks_all_words_without_percentile() {
        let table = rank(&sample(), 0.0);
        assert_eq!(
            as_pairs(&table),
            vec![("hello", 5, 50.0), ("world", 3, 30.0), ("test", 2, 20.0)]
        );
        assert_eq!(table.total(), 10);
    }

    #[test]
    fn empty_counts_give_empty_table() {
        let table = rank(&WordCount::new(), 50.0);
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
    }

    #[test]
    fn percentile_thirty_drops_least_frequent() {
        let table = rank(&sample(), 30.0);
        assert_eq!(table.words().collect::<Vec<_>>(), vec!["hello", "world"]);
        assert_eq!(table.get("hello"), Some(&WordFrequency::new(5, 50.0)));
        assert_eq!(table.get("world"), Some(&WordFrequency::new(3, 30.0)));
        assert!(table.get("test").is_none());
    }

    #[test]
    fn high_percentile_keeps_only_the_top_word() {
        for p in [99.0, 100.0, 250.0] {
            let table = rank(&sample(), p);
            assert_eq!(as_pairs(&table), vec![("hello", 5, 50.0)], "percentile {p}");
        }
    }

    #[test]
    fn low_percentile_keeps_everything() {
        assert_eq!(rank(&sample(), 1.0).len(), 3);
    }

    #[test]
    fn retained_count_follows_formula() {
        assert_eq!(retained_count(3, 0.0), 3);
        assert_eq!(retained_count(3, 30.0), 2);
        assert_eq!(retained_count(3, 99.0), 1);
        assert_eq!(retained_count(9, 50.0), 5);
        assert_eq!(retained_count(99, 90.0), 10);
        assert_eq!(retained_count(0, 50.0), 0);
    }

    #[test]
    fn ties_break_by_word_ascending() {
        let counts: WordCount = [("pear", 2u64), ("apple", 2), ("fig", 2), ("kiwi", 5)]
            .into_iter()
            .collect();
        let table = rank(&counts, 0.0);
        assert_eq!(
            table.words().collect::<Vec<_>>(),
            vec!["kiwi", "apple", "fig", "pear"]
        );

        let top = rank(&[("b", 1u64), ("a", 1)].into_iter().collect(), 100.0);
        assert_eq!(top.words().collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn percentages_round_to_four_decimals_and_sum_to_hundred() {
        let counts: WordCount = [("a", 1u64), ("b", 1), ("c", 1)].into_iter().collect();
        let table = rank(&counts, 0.0);
        for (_, freq) in table.iter() {
            assert_eq!(freq.frequency_percent, 33.3333);
        }
        let sum: f64 = table.iter().map(|(_, f)| f.frequency_percent).sum();
        assert!((sum - 100.0).abs() < 0.01);
    }

    #[test]
    fn sorted_descending_by_count() {
        let counts: WordCount = (1..=20u64).map(|n| (format!("w{n}"), n)).collect();
        let table = rank(&counts, 0.0);
        let counts_in_order: Vec<u64> = table.iter().map(|(_, f)| f.word_count).collect();
        assert!(counts_in_order.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(table.len(), 20);
    }

    #[test]
    fn serializes_in_rank_order_as_pairs() {
        let table = rank(&sample(), 0.0);
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(
            json,
            r#"{"hello":[5,50.0],"world":[3,30.0],"test":[2,20.0]}"#
        );
    }

    #[test]
    fn word_frequency_display_and_roundtrip() {
        let freq = WordFrequency::new(10, 43.478);
        assert_eq!(freq.to_string(), "10 (43.48%)");
        let back: WordFrequency = serde_json::from_str("[10,43.478]").unwrap();
        assert_eq!(back, freq);
    }
}
