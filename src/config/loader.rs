use std::fs;
use std::path::{Path, PathBuf};

use chrono::format::{Item, StrftimeItems};
use reqwest::Url;
use thiserror::Error;

use crate::config::types::Config;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/nasa-photos/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("nasa-photos").join("config.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - If the file exists, parses it as TOML and validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The base URL parses and uses http or https
    /// - At least one page is requested
    /// - At least one preview variant is listed
    /// - The date format is a valid strftime pattern
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.service.base_url).map_err(|e| ConfigError::ValidationError {
            message: format!("Invalid base_url '{}': {}", self.service.base_url, e),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::ValidationError {
                message: format!("base_url must use http or https, got '{}'", url.scheme()),
            });
        }

        if self.browse.pages == 0 {
            return Err(ConfigError::ValidationError {
                message: "pages must be at least 1".to_string(),
            });
        }

        if self.browse.preview_variants.is_empty() {
            return Err(ConfigError::ValidationError {
                message: "At least one preview variant must be configured".to_string(),
            });
        }

        if StrftimeItems::new(&self.browse.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::ValidationError {
                message: format!("Invalid date_format '{}'", self.browse.date_format),
            });
        }

        Ok(())
    }

    /// Builds the URL of the first search results page.
    pub fn search_url(&self) -> Result<Url, ConfigError> {
        let mut url =
            Url::parse(&self.service.base_url).map_err(|e| ConfigError::ValidationError {
                message: format!("Invalid base_url '{}': {}", self.service.base_url, e),
            })?;

        url.query_pairs_mut()
            .append_pair("q", &self.service.query)
            .append_pair("media_type", &self.service.media_type);

        Ok(url)
    }
}
