//! Single-threaded depth-first crawler

use crate::config::CrawlConfig;
use crate::crawler::page_parser::PageParser;
use crate::crawler::result::CrawlResult;
use crate::crawler::task::{CrawlTask, TaskContext};
use crate::crawler::WebCrawler;
use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt};
use std::sync::Arc;

/// Visits one page at a time, finishing each subtree before the next sibling
pub struct SequentialCrawler {
    config: Arc<CrawlConfig>,
    parser: Arc<dyn PageParser>,
}

impl SequentialCrawler {
    pub const NAME: &'static str = "sequential";

    pub fn new(config: Arc<CrawlConfig>, parser: Arc<dyn PageParser>) -> Self {
        Self { config, parser }
    }
}

#[async_trait]
impl WebCrawler for SequentialCrawler {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn crawl(&self, seeds: &[String]) -> crate::Result<CrawlResult> {
        let ctx = TaskContext::new(Arc::clone(&self.config), Arc::clone(&self.parser));
        tracing::info!("Starting sequential crawl of {} seed URLs", seeds.len());

        for task in ctx.root_tasks(seeds) {
            crawl_depth_first(task, &ctx).await?;
        }

        let result = ctx.result();
        tracing::info!(
            "Sequential crawl finished: {} URLs visited",
            result.urls_visited
        );
        Ok(result)
    }

    fn max_parallelism(&self) -> usize {
        1
    }
}

fn crawl_depth_first(task: CrawlTask, ctx: &TaskContext) -> BoxFuture<'_, crate::Result<()>> {
    async move {
        if !task.claim(ctx) {
            return Ok(());
        }

        for child in task.visit(ctx).await? {
            crawl_depth_first(child, ctx).await?;
        }

        Ok(())
    }
    .boxed()
}
