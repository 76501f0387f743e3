use crate::config::types::{Config, CrawlConfig};
use crate::ConfigError;
use regex::Regex;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_start_pages(&config.start_pages)?;

    if config.popular_word_count < 1 {
        return Err(ConfigError::Validation(format!(
            "popularWordCount must be >= 1, got {}",
            config.popular_word_count
        )));
    }

    Ok(())
}

/// Validates the seed URLs
fn validate_start_pages(pages: &[String]) -> Result<(), ConfigError> {
    if pages.is_empty() {
        return Err(ConfigError::Validation(
            "startPages must contain at least one URL".to_string(),
        ));
    }

    for page in pages {
        Url::parse(page).map_err(|e| {
            ConfigError::Validation(format!("Invalid start page '{}': {}", page, e))
        })?;
    }

    Ok(())
}

/// Compiles a pattern so that it must match the whole input
pub fn compile_pattern(pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(&format!("^(?:{})$", pattern)).map_err(|source| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Validates a raw configuration and compiles it into a [`CrawlConfig`]
pub fn compile(config: Config) -> Result<CrawlConfig, ConfigError> {
    validate(&config)?;

    let ignored_urls = config
        .ignored_urls
        .iter()
        .map(|p| compile_pattern(p))
        .collect::<Result<Vec<_>, _>>()?;
    let ignored_words = config
        .ignored_words
        .iter()
        .map(|p| compile_pattern(p))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CrawlConfig {
        seeds: config.start_pages,
        max_depth: config.max_depth,
        timeout: Duration::from_secs(config.timeout_seconds),
        ignored_urls,
        ignored_words,
        popular_word_count: config.popular_word_count,
        parallelism: config.parallelism,
        implementation_override: non_empty(config.implementation_override),
        result_path: non_empty(config.result_path).map(PathBuf::from),
        profile_output_path: non_empty(config.profile_output_path).map(PathBuf::from),
        skip_failed_pages: config.skip_failed_pages,
    })
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
