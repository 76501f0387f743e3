//! JSON crawl result output
//!
//! Results are written as pretty-printed JSON with `wordCounts` in rank order.

use crate::crawler::CrawlResult;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Appends a crawl result to the file at `path`, creating it if needed
///
/// # Arguments
///
/// * `result` - The crawl result to write
/// * `path` - Destination file; existing content is kept
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the result
/// * `Err(CrawlError)` - Failed to open, serialize or write
pub fn write_result(result: &CrawlResult, path: &Path) -> crate::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    write_result_to(result, &mut file)
}

/// Writes a crawl result to any writer, followed by a newline
pub fn write_result_to<W: Write>(result: &CrawlResult, writer: &mut W) -> crate::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, result)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
