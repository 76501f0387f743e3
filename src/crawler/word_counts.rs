//! Reduces accumulated word counts to the ranked top-K

use crate::crawler::result::RankedWords;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Returns the `popular_word_count` highest-ranked words
///
/// Ranking, highest first:
/// 1. count, descending
/// 2. word length in characters, descending
/// 3. word, ascending (case-folded, then exact as a last resort)
///
/// The output depends only on the map's contents, never on its iteration order.
pub fn sort(word_counts: &HashMap<String, u64>, popular_word_count: usize) -> RankedWords {
    let mut entries: Vec<(&String, &u64)> = word_counts.iter().collect();
    entries.sort_by(|a, b| compare(a, b));

    entries
        .into_iter()
        .take(popular_word_count)
        .map(|(word, count)| (word.clone(), *count))
        .collect()
}

fn compare(a: &(&String, &u64), b: &(&String, &u64)) -> Ordering {
    let (word_a, count_a) = *a;
    let (word_b, count_b) = *b;

    count_b
        .cmp(count_a)
        .then_with(|| word_b.chars().count().cmp(&word_a.chars().count()))
        .then_with(|| word_a.to_lowercase().cmp(&word_b.to_lowercase()))
        .then_with(|| word_a.cmp(word_b))
}
