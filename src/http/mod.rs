//! HTTP fetch adapter.
//!
//! Retrieves JSON payloads and decodes them into typed values. Requests are
//! upgraded to `https` unless the service is configured otherwise.

pub mod error;
pub mod service;
pub mod url;

pub use error::FetchError;
pub use service::{get_json, GetService, HttpGetService, TimeoutConfig};
pub use url::{escape_unsafe, upgrade_to_https, EscapedUrl, LinkUrl};
