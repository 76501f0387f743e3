//! Chooses a crawler implementation for the configured parallelism

use crate::config::CrawlConfig;
use crate::crawler::page_parser::PageParser;
use crate::crawler::parallel::ParallelCrawler;
use crate::crawler::sequential::SequentialCrawler;
use crate::crawler::WebCrawler;
use crate::ConfigError;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Turns the configured parallelism into a worker count
///
/// Zero or negative means "use every available compute unit".
pub fn resolve_parallelism(requested: i32) -> usize {
    if requested > 0 {
        return requested as usize;
    }

    let available = std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1);
    tracing::debug!("Using available parallelism: {}", available);
    available
}

/// Picks a crawler from `crawlers`, which are listed in priority order
///
/// An override selects by exact name. Otherwise the first crawler whose
/// maximum parallelism covers `parallelism` wins.
pub fn select_crawler(
    crawlers: Vec<Arc<dyn WebCrawler>>,
    parallelism: usize,
    implementation_override: Option<&str>,
) -> Result<Arc<dyn WebCrawler>, ConfigError> {
    if let Some(name) = implementation_override {
        return crawlers
            .into_iter()
            .find(|crawler| crawler.name() == name)
            .ok_or_else(|| ConfigError::UnknownCrawler(name.to_string()));
    }

    crawlers
        .into_iter()
        .find(|crawler| crawler.max_parallelism() >= parallelism)
        .ok_or(ConfigError::UnsupportedParallelism(parallelism))
}

/// Builds the crawler the configuration asks for
///
/// Registered implementations, in priority order: sequential, parallel.
pub fn build_crawler(
    config: Arc<CrawlConfig>,
    parser: Arc<dyn PageParser>,
) -> Result<Arc<dyn WebCrawler>, ConfigError> {
    let parallelism = resolve_parallelism(config.parallelism);

    let crawlers: Vec<Arc<dyn WebCrawler>> = vec![
        Arc::new(SequentialCrawler::new(
            Arc::clone(&config),
            Arc::clone(&parser),
        )),
        Arc::new(ParallelCrawler::new(
            Arc::clone(&config),
            Arc::clone(&parser),
            parallelism,
        )),
    ];

    let crawler = select_crawler(
        crawlers,
        parallelism,
        config.implementation_override.as_deref(),
    )?;
    tracing::info!(
        "Selected {} crawler (parallelism = {})",
        crawler.name(),
        parallelism
    );
    Ok(crawler)
}
