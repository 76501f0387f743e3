//! Page parser capability consumed by the crawl engine
//!
//! The engine only sees the [`PageParser`] trait. [`HtmlPageParser`] is the
//! production implementation; [`SkipFailedPages`] turns fetch failures into
//! empty pages for callers that prefer partial results over aborting.

use crate::crawler::fetcher::{build_http_client, fetch_page};
use crate::crawler::parser::parse_html;
use crate::FetchError;
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;

/// Words and outbound links found on one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseResult {
    pub word_counts: HashMap<String, u64>,
    pub links: Vec<String>,
}

/// Loads a page and reports its word counts and outbound links
#[async_trait]
pub trait PageParser: Send + Sync {
    async fn parse(&self, url: &str) -> Result<ParseResult, FetchError>;
}

/// Fetches pages over HTTP(S) or from local files and parses them as HTML
#[derive(Debug, Clone)]
pub struct HtmlPageParser {
    client: Client,
}

impl HtmlPageParser {
    pub fn new() -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(build_http_client()?))
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageParser for HtmlPageParser {
    async fn parse(&self, url: &str) -> Result<ParseResult, FetchError> {
        let page = fetch_page(&self.client, url).await?;

        if !page.is_html() {
            tracing::debug!(
                "Skipping non-HTML content at {} ({})",
                url,
                page.content_type.as_deref().unwrap_or("unknown")
            );
            return Ok(ParseResult::default());
        }

        let parsed = parse_html(&page.body, &page.final_url);
        Ok(ParseResult {
            word_counts: parsed.word_counts,
            links: parsed.links,
        })
    }
}

/// Wraps a parser so that pages which fail to load count as empty
pub struct SkipFailedPages<P> {
    inner: P,
}

impl<P> SkipFailedPages<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<P: PageParser> PageParser for SkipFailedPages<P> {
    async fn parse(&self, url: &str) -> Result<ParseResult, FetchError> {
        match self.inner.parse(url).await {
            Ok(result) => Ok(result),
            Err(e) => {
                tracing::warn!("Skipping {}: {}", url, e);
                Ok(ParseResult::default())
            }
        }
    }
}
