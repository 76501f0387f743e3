//! Page fetcher implementation
//!
//! This module loads raw page content for the HTML page parser:
//! - Building the HTTP client with the crate's user agent string
//! - GET requests for `http`/`https` URLs
//! - Local reads for `file` URLs
//! - Error classification into [`FetchError`]

use crate::FetchError;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Whole-request timeout for HTTP fetches
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Connect timeout for HTTP fetches
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Raw content of one fetched page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects, used to resolve relative links
    pub final_url: Url,
    /// Content-Type header value, if the response had one
    pub content_type: Option<String>,
    /// Page body
    pub body: String,
}

impl FetchedPage {
    /// Returns true if the page should be parsed as HTML
    ///
    /// Pages without a Content-Type (local files) are assumed to be HTML.
    pub fn is_html(&self) -> bool {
        match &self.content_type {
            Some(content_type) => {
                let content_type = content_type.to_ascii_lowercase();
                content_type.contains("text/html") || content_type.contains("application/xhtml")
            }
            None => true,
        }
    }
}

/// Builds an HTTP client for page fetches
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    // Format: CrawlerName/Version
    let user_agent = format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    Client::builder()
        .user_agent(user_agent)
        .timeout(REQUEST_TIMEOUT)
        .connect_timeout(CONNECT_TIMEOUT)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page's raw content
///
/// | Condition | Result |
/// |-----------|--------|
/// | Unparsable URL | `FetchError::InvalidUrl` |
/// | Scheme other than http, https, file | `FetchError::UnsupportedScheme` |
/// | Transport failure (timeout, refused, TLS) | `FetchError::Http` |
/// | Non-2xx status | `FetchError::Status` |
/// | Unreadable local file | `FetchError::File` |
///
/// No retries are attempted.
pub async fn fetch_page(client: &Client, url: &str) -> Result<FetchedPage, FetchError> {
    let parsed = Url::parse(url).map_err(|source| FetchError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;

    match parsed.scheme() {
        "http" | "https" => fetch_http(client, parsed).await,
        "file" => fetch_file(parsed).await,
        scheme => Err(FetchError::UnsupportedScheme {
            url: url.to_string(),
            scheme: scheme.to_string(),
        }),
    }
}

async fn fetch_http(client: &Client, url: Url) -> Result<FetchedPage, FetchError> {
    let http_error = |source| FetchError::Http {
        url: url.to_string(),
        source,
    };

    let response = client.get(url.clone()).send().await.map_err(http_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let final_url = response.url().clone();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let body = response.text().await.map_err(http_error)?;

    Ok(FetchedPage {
        final_url,
        content_type,
        body,
    })
}

async fn fetch_file(url: Url) -> Result<FetchedPage, FetchError> {
    let file_error = |source| FetchError::File {
        url: url.to_string(),
        source,
    };

    let path = url.to_file_path().map_err(|_| {
        file_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "URL does not name a local path",
        ))
    })?;
    let body = tokio::fs::read_to_string(&path).await.map_err(file_error)?;

    Ok(FetchedPage {
        final_url: url,
        content_type: None,
        body,
    })
}
