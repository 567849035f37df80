use serde::{Deserialize, Serialize};

use crate::photos::{Variant, DEFAULT_PREVIEW_VARIANTS};

/// Root configuration container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub browse: BrowseConfig,
}

/// Image-search endpoint and HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Search endpoint (default: NASA images API).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Free-text search query.
    #[serde(default = "default_query")]
    pub query: String,
    /// Media type filter passed to the search endpoint.
    #[serde(default = "default_media_type")]
    pub media_type: String,
    /// Rewrite `http` URLs to `https` before sending (default: true).
    #[serde(default = "default_force_https")]
    pub force_https: bool,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
}

/// Browsing behaviour of the command-line front end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowseConfig {
    /// Number of pages to load (default: 1).
    #[serde(default = "default_pages")]
    pub pages: u32,
    /// Consecutive failures after which retry is no longer offered (default: 3).
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Preferred image variants for previews, most preferred first.
    #[serde(default = "default_preview_variants")]
    pub preview_variants: Vec<Variant>,
    /// chrono format string for photo dates.
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_base_url() -> String {
    "https://images-api.nasa.gov/search".to_string()
}

fn default_query() -> String {
    "\"\"".to_string()
}

fn default_media_type() -> String {
    "image".to_string()
}

fn default_force_https() -> bool {
    true
}

fn default_timeout() -> u32 {
    30
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_pages() -> u32 {
    1
}

fn default_max_retries() -> u32 {
    3
}

fn default_preview_variants() -> Vec<Variant> {
    DEFAULT_PREVIEW_VARIANTS.to_vec()
}

fn default_date_format() -> String {
    "%d %b, %Y".to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            query: default_query(),
            media_type: default_media_type(),
            force_https: default_force_https(),
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            pages: default_pages(),
            max_retries: default_max_retries(),
            preview_variants: default_preview_variants(),
            date_format: default_date_format(),
        }
    }
}
