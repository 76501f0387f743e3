//! The recursive unit of crawl work
//!
//! A [`CrawlTask`] is one URL plus the number of link hops it may still follow.
//! Both strategies drive tasks through the same two steps:
//!
//! 1. [`CrawlTask::claim`] - cheap short-circuit checks (depth, deadline,
//!    ignored URL, already visited) ending in the atomic visited-set insert.
//! 2. [`CrawlTask::visit`] - parse the page, merge its words into the shared
//!    counts and return the child tasks for its links.
//!
//! Strategies differ only in how they schedule and await the children.

use crate::config::CrawlConfig;
use crate::crawler::page_parser::PageParser;
use crate::crawler::result::CrawlResult;
use crate::crawler::word_counts;
use crate::state::CrawlState;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Used when `now + timeout` does not fit in an `Instant`
const FAR_FUTURE: Duration = Duration::from_secs(30 * 365 * 24 * 60 * 60);

/// Everything the tasks of one crawl invocation share
pub struct TaskContext {
    pub config: Arc<CrawlConfig>,
    pub parser: Arc<dyn PageParser>,
    pub state: CrawlState,
    pub deadline: Instant,
}

impl TaskContext {
    /// Starts a crawl invocation: fresh state, deadline fixed from now
    pub fn new(config: Arc<CrawlConfig>, parser: Arc<dyn PageParser>) -> Self {
        let now = Instant::now();
        let deadline = now
            .checked_add(config.timeout)
            .unwrap_or_else(|| now + FAR_FUTURE);

        Self {
            config,
            parser,
            state: CrawlState::new(),
            deadline,
        }
    }

    /// Root tasks for the given seeds, each with the full depth budget
    pub fn root_tasks(&self, seeds: &[String]) -> Vec<CrawlTask> {
        seeds
            .iter()
            .map(|seed| CrawlTask::new(seed.clone(), self.config.max_depth))
            .collect()
    }

    /// Ranks the accumulated counts
    ///
    /// Only valid once every task of the invocation has finished.
    pub fn result(&self) -> CrawlResult {
        let counts = self.state.word_counts();
        CrawlResult {
            word_counts: word_counts::sort(&counts, self.config.popular_word_count),
            urls_visited: self.state.urls_visited(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTask {
    url: String,
    depth_remaining: u32,
}

impl CrawlTask {
    pub fn new(url: impl Into<String>, depth_remaining: u32) -> Self {
        Self {
            url: url.into(),
            depth_remaining,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn depth_remaining(&self) -> u32 {
        self.depth_remaining
    }

    /// Decides whether this task visits its URL
    ///
    /// Returns true for at most one task per URL per invocation. A false
    /// return means the task is finished and has not touched any state
    /// besides, possibly, losing the visited-set race.
    pub fn claim(&self, ctx: &TaskContext) -> bool {
        if self.depth_remaining == 0 || Instant::now() > ctx.deadline {
            tracing::trace!("Depth or time budget exhausted at {}", self.url);
            return false;
        }

        if ctx.config.is_ignored_url(&self.url) {
            tracing::trace!("Ignoring {}", self.url);
            return false;
        }

        if !ctx.state.try_visit(&self.url) {
            tracing::trace!("Already visited {}", self.url);
            return false;
        }

        true
    }

    /// Parses the claimed URL, merges its words and returns its children
    ///
    /// Children are sorted and de-duplicated so that strategies see them in a
    /// stable order. Parser errors are returned untouched.
    pub async fn visit(&self, ctx: &TaskContext) -> crate::Result<Vec<CrawlTask>> {
        tracing::debug!("Crawling {} (depth remaining {})", self.url, self.depth_remaining);

        let parsed = ctx.parser.parse(&self.url).await?;

        for (word, count) in parsed.word_counts {
            let word = word.to_lowercase();
            if ctx.config.is_ignored_word(&word) {
                continue;
            }
            ctx.state.add_word(word, count);
        }

        let mut links = parsed.links;
        links.sort();
        links.dedup();

        Ok(links
            .into_iter()
            .map(|link| CrawlTask::new(link, self.depth_remaining - 1))
            .collect())
    }
}
