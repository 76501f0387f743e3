//! HTML parser for extracting words and links
//!
//! This module handles parsing HTML content to extract:
//! - Visible words and their per-page counts
//! - Links to follow (from <a> tags)

use scraper::{Html, Node, Selector};
use std::collections::HashMap;
use url::Url;

/// Elements whose text is never counted
const NON_CONTENT_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    /// Word occurrences on the page, case preserved
    pub word_counts: HashMap<String, u64>,

    /// All links found on the page (absolute URLs, fragments removed)
    pub links: Vec<String>,
}

/// Parses HTML content and extracts words and links
///
/// # Word Extraction Rules
///
/// Text nodes outside `script`, `style`, `noscript` and `template` are split
/// on every non-alphanumeric character; each non-empty piece is a word.
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` tags anywhere in the document
///
/// **Exclude:**
/// - `<a href="..." download>`
/// - `javascript:`, `mailto:`, `tel:` links
/// - Data URIs
/// - Fragment-only links
///
/// # Example
///
/// ```no_run
/// use wordcrawl::crawler::parse_html;
/// use url::Url;
///
/// let html = r#"<html><body><p>Hello hello</p><a href="/page">Link</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let parsed = parse_html(html, &base_url);
/// assert_eq!(parsed.word_counts.get("hello"), Some(&1));
/// assert_eq!(parsed.links, vec!["https://example.com/page".to_string()]);
/// ```
pub fn parse_html(html: &str, base_url: &Url) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        word_counts: extract_words(&document),
        links: extract_links(&document, base_url),
    }
}

/// Counts words in every content text node of the document
fn extract_words(document: &Html) -> HashMap<String, u64> {
    let mut counts = HashMap::new();

    for node in document.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };

        let in_non_content = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| NON_CONTENT_ELEMENTS.contains(&el.name()))
        });
        if in_non_content {
            continue;
        }

        for word in split_words(text) {
            *counts.entry(word.to_string()).or_insert(0) += 1;
        }
    }

    counts
}

/// Splits text into words on any non-alphanumeric character
pub fn split_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
}

/// Extracts all valid links from the HTML document
fn extract_links(document: &Html, base_url: &Url) -> Vec<String> {
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            // Skip if it has the download attribute
            if element.value().attr("download").is_some() {
                continue;
            }

            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_link(href, base_url) {
                    links.push(absolute_url);
                }
            }
        }
    }

    links
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Fragment-only links
/// - Invalid URLs
/// - Non-HTTP(S)/file URLs after resolution
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let mut absolute_url = base_url.join(href).ok()?;
    absolute_url.set_fragment(None);

    match absolute_url.scheme() {
        "http" | "https" | "file" => Some(absolute_url.to_string()),
        _ => None,
    }
}
