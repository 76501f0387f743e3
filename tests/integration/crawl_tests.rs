//! Integration tests for the crawler
//!
//! These tests use wiremock to serve small sites over HTTP and run the full
//! fetch, parse, count and rank cycle end-to-end.

use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use wordcrawl::config::{compile_pattern, load_config};
use wordcrawl::crawler::{
    build_crawler, HtmlPageParser, ParallelCrawler, SequentialCrawler, SkipFailedPages,
};
use wordcrawl::{CrawlConfig, CrawlError, FetchError, PageParser, WebCrawler};

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(
        format!("<html><head></head><body>{}</body></html>", body),
        "text/html; charset=utf-8",
    )
}

async fn mount_page(server: &MockServer, route: &str, body: &str, expected_hits: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html(body))
        .expect(expected_hits)
        .mount(server)
        .await;
}

/// Three reachable pages, one ignored page and a script block
async fn start_site(expected_hits: u64) -> MockServer {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r#"<h1>Rust crawler</h1><p>rust</p>
           <script>var ignored = "script words";</script>
           <a href="/a">A</a> <a href="/b#top">B</a> <a href="/private">P</a>
           <a href="mailto:someone@example.com">M</a>"#,
        expected_hits,
    )
    .await;
    mount_page(
        &server,
        "/a",
        r#"<p>crawler words</p><a href="b">B</a><a href="/">H</a>"#,
        expected_hits,
    )
    .await;
    mount_page(&server, "/b", "<p>words, WORDS; rust!</p>", expected_hits).await;
    mount_page(&server, "/private", "<p>secret</p>", 0).await;

    server
}

fn site_config(server: &MockServer, max_depth: u32) -> CrawlConfig {
    CrawlConfig {
        seeds: vec![format!("{}/", server.uri())],
        max_depth,
        timeout: Duration::from_secs(30),
        ignored_urls: vec![compile_pattern(".*/private").unwrap()],
        ignored_words: vec![compile_pattern("[a-z]").unwrap()],
        popular_word_count: 10,
        ..CrawlConfig::default()
    }
}

fn html_parser() -> Arc<dyn PageParser> {
    Arc::new(HtmlPageParser::new().expect("Failed to build HTTP client"))
}

fn expected_words() -> Vec<(String, u64)> {
    vec![
        ("words".to_string(), 3),
        ("rust".to_string(), 3),
        ("crawler".to_string(), 2),
    ]
}

#[tokio::test]
async fn test_sequential_crawl_over_http() {
    let server = start_site(1).await;
    let config = Arc::new(site_config(&server, 3));

    let crawler = SequentialCrawler::new(Arc::clone(&config), html_parser());
    let result = crawler.crawl(&config.seeds).await.unwrap();

    assert_eq!(result.urls_visited, 3);
    assert_eq!(result.word_counts.into_vec(), expected_words());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_crawl_over_http() {
    let server = start_site(1).await;
    let config = Arc::new(site_config(&server, 3));

    let crawler = ParallelCrawler::new(Arc::clone(&config), html_parser(), 4);
    let result = crawler.crawl(&config.seeds).await.unwrap();

    assert_eq!(result.urls_visited, 3);
    assert_eq!(result.word_counts.into_vec(), expected_words());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_strategies_produce_identical_results() {
    let server = start_site(2).await;
    let config = Arc::new(site_config(&server, 5));
    let seeds = config.seeds.clone();

    let sequential = SequentialCrawler::new(Arc::clone(&config), html_parser())
        .crawl(&seeds)
        .await
        .unwrap();
    let parallel = ParallelCrawler::new(Arc::clone(&config), html_parser(), 2)
        .crawl(&seeds)
        .await
        .unwrap();

    assert_eq!(sequential, parallel);
}

#[tokio::test]
async fn test_depth_one_visits_only_seed() {
    let server = MockServer::start().await;
    mount_page(&server, "/", r#"<p>alpha beta beta</p><a href="/next"></a>"#, 1).await;
    mount_page(&server, "/next", "<p>gamma</p>", 0).await;

    let config = Arc::new(CrawlConfig {
        seeds: vec![format!("{}/", server.uri())],
        max_depth: 1,
        timeout: Duration::from_secs(30),
        popular_word_count: 1,
        ..CrawlConfig::default()
    });

    let result = SequentialCrawler::new(Arc::clone(&config), html_parser())
        .crawl(&config.seeds)
        .await
        .unwrap();

    assert_eq!(result.urls_visited, 1);
    assert_eq!(result.word_counts.into_vec(), vec![("beta".to_string(), 2)]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_server_error_aborts_crawl() {
    let server = MockServer::start().await;
    mount_page(&server, "/", r#"<p>hello</p><a href="/broken"></a>"#, 2).await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let config = Arc::new(CrawlConfig {
        seeds: vec![format!("{}/", server.uri())],
        max_depth: 3,
        timeout: Duration::from_secs(30),
        ..CrawlConfig::default()
    });

    let sequential = SequentialCrawler::new(Arc::clone(&config), html_parser())
        .crawl(&config.seeds)
        .await;
    assert!(matches!(
        sequential,
        Err(CrawlError::Fetch(FetchError::Status { status: 500, .. }))
    ));

    let parallel = ParallelCrawler::new(Arc::clone(&config), html_parser(), 2)
        .crawl(&config.seeds)
        .await;
    assert!(matches!(
        parallel,
        Err(CrawlError::Fetch(FetchError::Status { status: 500, .. }))
    ));
}

#[tokio::test]
async fn test_skip_failed_pages_keeps_partial_results() {
    let server = MockServer::start().await;
    mount_page(&server, "/", r#"<p>hello</p><a href="/broken"></a>"#, 1).await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let config = Arc::new(CrawlConfig {
        seeds: vec![format!("{}/", server.uri())],
        max_depth: 3,
        timeout: Duration::from_secs(30),
        skip_failed_pages: true,
        ..CrawlConfig::default()
    });
    let parser: Arc<dyn PageParser> = Arc::new(SkipFailedPages::new(
        HtmlPageParser::new().expect("Failed to build HTTP client"),
    ));

    let result = SequentialCrawler::new(Arc::clone(&config), parser)
        .crawl(&config.seeds)
        .await
        .unwrap();

    assert_eq!(result.urls_visited, 2);
    assert_eq!(result.word_counts.into_vec(), vec![("hello".to_string(), 1)]);
}

#[tokio::test]
async fn test_non_html_pages_contribute_no_words() {
    let server = MockServer::start().await;
    mount_page(&server, "/", r#"<p>page</p><a href="/data.json"></a>"#, 1).await;
    Mock::given(method("GET"))
        .and(path("/data.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"{"words": "lots"}"#, "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = Arc::new(CrawlConfig {
        seeds: vec![format!("{}/", server.uri())],
        max_depth: 2,
        timeout: Duration::from_secs(30),
        ..CrawlConfig::default()
    });

    let result = SequentialCrawler::new(Arc::clone(&config), html_parser())
        .crawl(&config.seeds)
        .await
        .unwrap();

    assert_eq!(result.urls_visited, 2);
    assert_eq!(result.word_counts.into_vec(), vec![("page".to_string(), 1)]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_file_crawl_from_config_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    std::fs::write(
        dir.path().join("index.html"),
        r#"<html><body><p>Alpha beta</p><a href="other.html"></a></body></html>"#,
    )
    .unwrap();
    std::fs::write(
        dir.path().join("other.html"),
        r#"<html><body><p>beta gamma</p><a href="index.html"></a></body></html>"#,
    )
    .unwrap();

    let seed = url::Url::from_file_path(dir.path().join("index.html")).unwrap();
    let config_path = dir.path().join("crawl.json");
    std::fs::write(
        &config_path,
        format!(
            r#"{{
                "startPages": ["{}"],
                "maxDepth": 2,
                "timeoutSeconds": 30,
                "popularWordCount": 5,
                "parallelism": 2
            }}"#,
            seed
        ),
    )
    .unwrap();

    let config = Arc::new(load_config(&config_path).unwrap());
    let crawler = build_crawler(Arc::clone(&config), html_parser()).unwrap();
    assert_eq!(crawler.name(), ParallelCrawler::NAME);

    let result = crawler.crawl(&config.seeds).await.unwrap();

    assert_eq!(result.urls_visited, 2);
    assert_eq!(
        result.word_counts.into_vec(),
        vec![
            ("beta".to_string(), 2),
            ("alpha".to_string(), 1),
            ("gamma".to_string(), 1),
        ]
    );
}

#[tokio::test]
async fn test_missing_file_aborts_crawl() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let seed = url::Url::from_file_path(dir.path().join("missing.html")).unwrap();

    let config = Arc::new(CrawlConfig {
        seeds: vec![seed.to_string()],
        max_depth: 1,
        timeout: Duration::from_secs(30),
        ..CrawlConfig::default()
    });

    let result = SequentialCrawler::new(Arc::clone(&config), html_parser())
        .crawl(&config.seeds)
        .await;

    assert!(matches!(
        result,
        Err(CrawlError::Fetch(FetchError::File { .. }))
    ));
}
