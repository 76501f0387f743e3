//! Timing of crawler runs
//!
//! A [`Profiler`] wraps a [`WebCrawler`] so that every `crawl` call adds its
//! elapsed time to a per-method total. The totals can be written out as a
//! short plain-text report.

use crate::crawler::{CrawlResult, WebCrawler};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

/// Collects cumulative call durations keyed by `"<crawler>#<method>"`
#[derive(Debug)]
pub struct Profiler {
    started_at: DateTime<Utc>,
    totals: Mutex<BTreeMap<String, Duration>>,
}

impl Profiler {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            started_at: Utc::now(),
            totals: Mutex::new(BTreeMap::new()),
        })
    }

    /// Wraps a crawler so that its `crawl` calls are timed by this profiler
    pub fn wrap(self: &Arc<Self>, crawler: Arc<dyn WebCrawler>) -> Arc<dyn WebCrawler> {
        Arc::new(ProfiledCrawler {
            inner: crawler,
            profiler: Arc::clone(self),
        })
    }

    /// Adds `elapsed` to the running total for `key`
    pub fn record(&self, key: &str, elapsed: Duration) {
        let mut totals = match self.totals.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *totals.entry(key.to_string()).or_default() += elapsed;
    }

    /// Total time recorded for `key` so far
    pub fn total(&self, key: &str) -> Option<Duration> {
        let totals = match self.totals.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        totals.get(key).copied()
    }

    /// Writes the report: start time, one line per key, then a blank line
    pub fn write_data<W: Write>(&self, writer: &mut W) -> crate::Result<()> {
        writeln!(writer, "Run at {}", self.started_at.to_rfc2822())?;

        let totals = match self.totals.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        for (key, elapsed) in totals.iter() {
            writeln!(writer, "{} took {}", key, format_duration(*elapsed))?;
        }

        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Appends the report to the file at `path`, creating it if needed
    pub fn write_to_path(&self, path: &Path) -> crate::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        self.write_data(&mut file)
    }
}

fn format_duration(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!(
        "{}m {}s {}ms",
        secs / 60,
        secs % 60,
        elapsed.subsec_millis()
    )
}

/// A crawler whose `crawl` calls are timed
struct ProfiledCrawler {
    inner: Arc<dyn WebCrawler>,
    profiler: Arc<Profiler>,
}

#[async_trait]
impl WebCrawler for ProfiledCrawler {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn crawl(&self, seeds: &[String]) -> crate::Result<CrawlResult> {
        let start = Instant::now();
        let result = self.inner.crawl(seeds).await;
        let key = format!("{}#crawl", self.inner.name());
        self.profiler.record(&key, start.elapsed());
        result
    }

    fn max_parallelism(&self) -> usize {
        self.inner.max_parallelism()
    }
}
