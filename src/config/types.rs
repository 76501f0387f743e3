use regex::Regex;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration file contents, as written by the user
///
/// Keys are camelCase in both JSON and TOML files.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Seed URLs the crawl starts from
    pub start_pages: Vec<String>,

    /// Patterns for URLs that must never be visited
    #[serde(default)]
    pub ignored_urls: Vec<String>,

    /// Patterns for words that must never be counted
    #[serde(default)]
    pub ignored_words: Vec<String>,

    /// Desired number of workers; zero or negative means "all available"
    #[serde(default = "default_parallelism")]
    pub parallelism: i32,

    /// Forces a crawler implementation by name ("sequential" or "parallel")
    #[serde(default)]
    pub implementation_override: String,

    /// Maximum number of link hops from a seed page
    #[serde(default)]
    pub max_depth: u32,

    /// Wall-clock budget for starting new page visits
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Number of top words to report
    pub popular_word_count: usize,

    /// Where to append profiling data; empty means stdout
    #[serde(default)]
    pub profile_output_path: String,

    /// Where to append the crawl result; empty means stdout
    #[serde(default)]
    pub result_path: String,

    /// Skip pages that fail to load instead of aborting the crawl
    #[serde(default)]
    pub skip_failed_pages: bool,
}

fn default_parallelism() -> i32 {
    -1
}

fn default_timeout_seconds() -> u64 {
    1
}

/// Immutable, compiled crawl configuration
///
/// Built once per run from a validated [`Config`]; shared read-only by every
/// crawl task.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub seeds: Vec<String>,
    pub max_depth: u32,
    pub timeout: Duration,
    pub ignored_urls: Vec<Regex>,
    pub ignored_words: Vec<Regex>,
    pub popular_word_count: usize,
    pub parallelism: i32,
    pub implementation_override: Option<String>,
    pub result_path: Option<PathBuf>,
    pub profile_output_path: Option<PathBuf>,
    pub skip_failed_pages: bool,
}

impl CrawlConfig {
    /// Returns true if the URL matches any ignored-URL pattern
    pub fn is_ignored_url(&self, url: &str) -> bool {
        self.ignored_urls.iter().any(|pattern| pattern.is_match(url))
    }

    /// Returns true if the (already case-folded) word matches any ignored-word pattern
    pub fn is_ignored_word(&self, word: &str) -> bool {
        self.ignored_words.iter().any(|pattern| pattern.is_match(word))
    }
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            seeds: Vec::new(),
            max_depth: 0,
            timeout: Duration::from_secs(default_timeout_seconds()),
            ignored_urls: Vec::new(),
            ignored_words: Vec::new(),
            popular_word_count: 10,
            parallelism: default_parallelism(),
            implementation_override: None,
            result_path: None,
            profile_output_path: None,
            skip_failed_pages: false,
        }
    }
}
