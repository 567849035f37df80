//! Configuration: search endpoint, HTTP timeouts and browsing preferences,
//! loaded from a TOML file.

pub mod loader;
pub mod types;

pub use loader::ConfigError;
pub use types::{BrowseConfig, Config, ServiceConfig};
