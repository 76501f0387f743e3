//! Shared state for a single crawl invocation
//!
//! Every task spawned by one `crawl` call shares the same [`CrawlState`]; a new
//! call always starts from a fresh one.

use dashmap::{DashMap, DashSet};
use std::collections::HashMap;

/// Visited URLs and accumulated word counts for one crawl invocation
#[derive(Debug, Default)]
pub struct CrawlState {
    visited: DashSet<String>,
    word_counts: DashMap<String, u64>,
}

impl CrawlState {
    /// Creates an empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically claims a URL for visiting
    ///
    /// Returns true for exactly one caller per URL, no matter how many tasks
    /// race on it.
    pub fn try_visit(&self, url: &str) -> bool {
        if self.visited.contains(url) {
            return false;
        }
        self.visited.insert(url.to_string())
    }

    /// Adds `count` occurrences of `word` to the running total
    ///
    /// The entry lock is held across the read-modify-write, so concurrent
    /// increments are never lost.
    pub fn add_word(&self, word: String, count: u64) {
        *self.word_counts.entry(word).or_insert(0) += count;
    }

    /// Number of URLs claimed so far
    pub fn urls_visited(&self) -> usize {
        self.visited.len()
    }

    /// Returns true if the URL has been claimed
    #[cfg(test)]
    pub(crate) fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    /// Copies the current word counts
    pub fn word_counts(&self) -> HashMap<String, u64> {
        self.word_counts
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }
}
