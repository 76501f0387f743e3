//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlState`: the visited-URL set and word-count accumulator owned by a
//!   single crawl invocation

mod crawl_state;

pub use crawl_state::CrawlState;
