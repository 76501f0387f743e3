//! Fork/join crawler over a bounded set of workers
//!
//! Every task runs on the tokio runtime and spawns its children into its own
//! `JoinSet`, so a parent is finished only once its whole subtree is. A
//! semaphore with one permit per worker bounds how many pages are being
//! parsed at once. A task holds its permit while claiming, parsing and
//! merging, never while waiting on children, so nested submission cannot
//! deadlock.

use crate::config::CrawlConfig;
use crate::CrawlError;
use crate::crawler::page_parser::PageParser;
use crate::crawler::result::CrawlResult;
use crate::crawler::task::{CrawlTask, TaskContext};
use crate::crawler::WebCrawler;
use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Crawls pages concurrently with up to `parallelism` visits in flight
pub struct ParallelCrawler {
    config: Arc<CrawlConfig>,
    parser: Arc<dyn PageParser>,
    parallelism: usize,
}

/// State shared by every task of one parallel crawl
struct Shared {
    ctx: TaskContext,
    workers: Semaphore,
}

impl ParallelCrawler {
    pub const NAME: &'static str = "parallel";

    pub fn new(config: Arc<CrawlConfig>, parser: Arc<dyn PageParser>, parallelism: usize) -> Self {
        Self {
            config,
            parser,
            parallelism: parallelism.clamp(1, Semaphore::MAX_PERMITS),
        }
    }

    pub fn parallelism(&self) -> usize {
        self.parallelism
    }
}

#[async_trait]
impl WebCrawler for ParallelCrawler {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn crawl(&self, seeds: &[String]) -> crate::Result<CrawlResult> {
        let shared = Arc::new(Shared {
            ctx: TaskContext::new(Arc::clone(&self.config), Arc::clone(&self.parser)),
            workers: Semaphore::new(self.parallelism),
        });
        tracing::info!(
            "Starting parallel crawl of {} seed URLs with {} workers",
            seeds.len(),
            self.parallelism
        );

        let mut roots = JoinSet::new();
        for task in shared.ctx.root_tasks(seeds) {
            roots.spawn(run_task(task, Arc::clone(&shared)));
        }
        join_all(&mut roots).await?;

        let result = shared.ctx.result();
        tracing::info!(
            "Parallel crawl finished: {} URLs visited",
            result.urls_visited
        );
        Ok(result)
    }

    fn max_parallelism(&self) -> usize {
        Semaphore::MAX_PERMITS
    }
}

fn run_task(task: CrawlTask, shared: Arc<Shared>) -> BoxFuture<'static, crate::Result<()>> {
    async move {
        let children = {
            // The pool is never closed.
            let Ok(_permit) = shared.workers.acquire().await else {
                return Ok(());
            };

            // Claim under the permit: the deadline applies when a worker
            // picks the task up, not when it was spawned.
            if !task.claim(&shared.ctx) {
                return Ok(());
            }
            task.visit(&shared.ctx).await?
        };

        let mut subtasks = JoinSet::new();
        for child in children {
            subtasks.spawn(run_task(child, Arc::clone(&shared)));
        }
        join_all(&mut subtasks).await
    }
    .boxed()
}

/// Waits for every task in the set, stopping at the first failure
///
/// Returning early drops the set, which aborts the tasks still running.
async fn join_all(tasks: &mut JoinSet<crate::Result<()>>) -> crate::Result<()> {
    while let Some(joined) = tasks.join_next().await {
        joined.map_err(|e| CrawlError::TaskFailed(e.to_string()))??;
    }
    Ok(())
}
