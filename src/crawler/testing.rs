//! In-memory page parser for engine tests

use crate::crawler::page_parser::{PageParser, ParseResult};
use crate::FetchError;
use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::{HashMap, HashSet};
use std::time::Duration;

/// A fixed link graph served from memory
///
/// Unknown URLs parse as empty pages. Every call is counted per URL.
#[derive(Debug, Default)]
pub struct GraphParser {
    pages: HashMap<String, ParseResult>,
    failing: HashSet<String>,
    delay: Option<Duration>,
    calls: DashMap<String, usize>,
}

impl GraphParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, words: &[(&str, u64)], links: &[&str]) -> Self {
        let result = ParseResult {
            word_counts: words
                .iter()
                .map(|(word, count)| (word.to_string(), *count))
                .collect(),
            links: links.iter().map(|link| link.to_string()).collect(),
        };
        self.pages.insert(url.to_string(), result);
        self
    }

    pub fn failing(mut self, url: &str) -> Self {
        self.failing.insert(url.to_string());
        self
    }

    /// Makes every parse take `delay` of (tokio) time
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self, url: &str) -> usize {
        self.calls.get(url).map(|c| *c).unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.iter().map(|c| *c.value()).sum()
    }
}

#[async_trait]
impl PageParser for GraphParser {
    async fn parse(&self, url: &str) -> Result<ParseResult, FetchError> {
        *self.calls.entry(url.to_string()).or_insert(0) += 1;

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing.contains(url) {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: 500,
            });
        }

        Ok(self.pages.get(url).cloned().unwrap_or_default())
    }
}
