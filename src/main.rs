//! Wordcrawl main entry point
//!
//! This is the command-line interface for the Wordcrawl word-frequency crawler.

use anyhow::Context;
use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use wordcrawl::config::load_config;
use wordcrawl::crawler::{
    build_crawler, resolve_parallelism, HtmlPageParser, PageParser, SkipFailedPages,
};
use wordcrawl::output::{write_result, write_result_to};
use wordcrawl::profiler::Profiler;
use wordcrawl::CrawlConfig;

/// Wordcrawl: a deadline-bounded word-frequency crawler
///
/// Wordcrawl follows links from a set of seed pages up to a maximum depth
/// within a time budget, counts the words it finds and reports the most
/// popular ones.
#[derive(Parser, Debug)]
#[command(name = "wordcrawl")]
#[command(version)]
#[command(about = "A deadline-bounded word-frequency crawler", long_about = None)]
struct Cli {
    /// Path to JSON or TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show which crawler would run without crawling
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = match load_config(&cli.config) {
        Ok(config) => Arc::new(config),
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e).context("invalid configuration");
        }
    };

    let workers = resolve_parallelism(config.parallelism);
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(workers)
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    runtime.block_on(async {
        if cli.dry_run {
            handle_dry_run(config)
        } else {
            handle_crawl(config).await
        }
    })
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("wordcrawl=info,warn"),
            1 => EnvFilter::new("wordcrawl=debug,info"),
            2 => EnvFilter::new("wordcrawl=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

fn page_parser(config: &CrawlConfig) -> anyhow::Result<Arc<dyn PageParser>> {
    let parser = HtmlPageParser::new().context("failed to build HTTP client")?;
    if config.skip_failed_pages {
        tracing::info!("Pages that fail to load will be skipped");
        Ok(Arc::new(SkipFailedPages::new(parser)))
    } else {
        Ok(Arc::new(parser))
    }
}

/// Handles the --dry-run mode: validates config and shows what would run
fn handle_dry_run(config: Arc<CrawlConfig>) -> anyhow::Result<()> {
    println!("=== Wordcrawl Dry Run ===\n");

    println!("Crawl Configuration:");
    println!("  Max depth: {}", config.max_depth);
    println!("  Timeout: {}s", config.timeout.as_secs_f64());
    println!("  Popular word count: {}", config.popular_word_count);
    println!(
        "  Parallelism: {} (resolved to {})",
        config.parallelism,
        resolve_parallelism(config.parallelism)
    );
    println!("  Skip failed pages: {}", config.skip_failed_pages);

    println!("\nStart Pages ({}):", config.seeds.len());
    for seed in &config.seeds {
        println!("  - {}", seed);
    }

    println!("\nIgnored URL patterns ({}):", config.ignored_urls.len());
    for pattern in &config.ignored_urls {
        println!("  - {}", pattern.as_str());
    }

    println!("\nIgnored word patterns ({}):", config.ignored_words.len());
    for pattern in &config.ignored_words {
        println!("  - {}", pattern.as_str());
    }

    println!("\nOutput:");
    match &config.result_path {
        Some(path) => println!("  Result: {}", path.display()),
        None => println!("  Result: <stdout>"),
    }
    match &config.profile_output_path {
        Some(path) => println!("  Profile: {}", path.display()),
        None => println!("  Profile: <stdout>"),
    }

    let parser = page_parser(&config)?;
    let crawler = build_crawler(Arc::clone(&config), parser)?;

    println!("\n✓ Configuration is valid");
    println!("✓ Would crawl with the {} implementation", crawler.name());

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: Arc<CrawlConfig>) -> anyhow::Result<()> {
    let parser = page_parser(&config)?;
    let profiler = Profiler::new();
    let crawler = profiler.wrap(build_crawler(Arc::clone(&config), parser)?);

    tracing::info!(
        "Crawling {} start pages (max depth {}, timeout {:?})",
        config.seeds.len(),
        config.max_depth,
        config.timeout
    );

    let result = match crawler.crawl(&config.seeds).await {
        Ok(result) => {
            tracing::info!(
                "Crawl completed: {} URLs visited",
                result.urls_visited
            );
            result
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e).context("crawl failed");
        }
    };

    match &config.result_path {
        Some(path) => {
            write_result(&result, path)
                .with_context(|| format!("failed to write result to {}", path.display()))?;
            tracing::info!("Result written to: {}", path.display());
        }
        None => write_result_to(&result, &mut io::stdout().lock())?,
    }

    match &config.profile_output_path {
        Some(path) => {
            profiler
                .write_to_path(path)
                .with_context(|| format!("failed to write profile to {}", path.display()))?;
            tracing::info!("Profile written to: {}", path.display());
        }
        None => profiler.write_data(&mut io::stdout().lock())?,
    }

    Ok(())
}
