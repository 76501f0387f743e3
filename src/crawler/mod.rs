//! Crawler module for page visiting and word counting
//!
//! This module contains the core crawling logic, including:
//! - Fetching and parsing pages into words and links
//! - The recursive crawl task and its shared-state discipline
//! - Sequential and parallel crawl strategies
//! - Strategy selection by parallelism
//! - Ranking of the accumulated word counts

mod fetcher;
mod page_parser;
mod parallel;
mod parser;
mod result;
mod selector;
mod sequential;
mod task;
pub mod word_counts;

#[cfg(test)]
pub(crate) mod testing;

pub use fetcher::{build_http_client, fetch_page, FetchedPage};
pub use page_parser::{HtmlPageParser, PageParser, ParseResult, SkipFailedPages};
pub use parallel::ParallelCrawler;
pub use parser::{parse_html, split_words, ParsedPage};
pub use result::{CrawlResult, RankedWords};
pub use selector::{build_crawler, resolve_parallelism, select_crawler};
pub use sequential::SequentialCrawler;
pub use task::{CrawlTask, TaskContext};

use async_trait::async_trait;

/// A crawl strategy
///
/// Every implementation honours the same contract: fresh state per call,
/// one deadline per call, each URL visited at most once, and a result only
/// after all reachable work has finished.
#[async_trait]
pub trait WebCrawler: Send + Sync {
    /// Name used to force this implementation from configuration
    fn name(&self) -> &str;

    /// Crawls from the given seed URLs and ranks the words found
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlResult)` - Crawl finished (possibly cut short by the deadline)
    /// * `Err(CrawlError)` - A page failed to load; the whole crawl is abandoned
    async fn crawl(&self, seeds: &[String]) -> crate::Result<CrawlResult>;

    /// How many workers this implementation can usefully exploit
    fn max_parallelism(&self) -> usize;
}
