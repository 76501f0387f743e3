use crate::config::types::{Config, CrawlConfig};
use crate::config::validation::compile;
use crate::ConfigError;
use std::path::Path;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// Picks a format from the file extension; files without one are read as JSON
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            None => Ok(Self::Json),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
        }
    }
}

/// Loads, validates and compiles a configuration file
///
/// # Arguments
///
/// * `path` - Path to a JSON (or `.toml`) configuration file
///
/// # Returns
///
/// * `Ok(CrawlConfig)` - Successfully loaded and compiled configuration
/// * `Err(ConfigError)` - Failed to read, parse, validate or compile the file
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use wordcrawl::config::load_config;
///
/// let config = load_config(Path::new("config.json")).unwrap();
/// println!("Max depth: {}", config.max_depth);
/// ```
pub fn load_config(path: &Path) -> Result<CrawlConfig, ConfigError> {
    let format = ConfigFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)?;
    compile(parse_config(&content, format)?)
}

/// Deserializes raw configuration text without validating it
pub fn parse_config(content: &str, format: ConfigFormat) -> Result<Config, ConfigError> {
    let config = match format {
        ConfigFormat::Json => serde_json::from_str(content)?,
        ConfigFormat::Toml => toml::from_str(content)?,
    };
    Ok(config)
}
