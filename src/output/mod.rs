//! Output module for crawl results
//!
//! This module handles formatting a [`CrawlResult`](crate::crawler::CrawlResult)
//! and writing it to a file or stream.

mod json;

pub use json::{write_result, write_result_to};
