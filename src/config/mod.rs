//! Configuration module for wordcrawl
//!
//! This module handles loading, parsing, validating and compiling JSON (or
//! TOML) configuration files into an immutable [`CrawlConfig`].
//!
//! # Example
//!
//! ```no_run
//! use wordcrawl::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.json")).unwrap();
//! println!("Crawler will use max depth: {}", config.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlConfig};

// Re-export parser functions
pub use parser::{load_config, parse_config, ConfigFormat};
pub use validation::{compile, compile_pattern, validate};
