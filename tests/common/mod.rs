//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use nasa_photos::config::ServiceConfig;
use nasa_photos::cursor::MockCursor;
use nasa_photos::http::{FetchError, GetService, HttpGetService, TimeoutConfig};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// HTTP service that talks plain http to the local mock server.
pub fn local_service() -> Arc<dyn GetService> {
    let timeouts = TimeoutConfig {
        connect: Duration::from_secs(2),
        request: Duration::from_secs(5),
    };
    Arc::new(HttpGetService::new(timeouts, false).expect("Failed to build HTTP client"))
}

/// Service config pointing at `base_url` without the https upgrade.
pub fn local_service_config(base_url: &str) -> ServiceConfig {
    ServiceConfig {
        base_url: base_url.to_string(),
        force_https: false,
        ..ServiceConfig::default()
    }
}

/// Create a temporary config file with the given TOML content.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

/// One search record in wire format.
pub fn photo_record(id: &str) -> String {
    format!(
        r#"{{"nasa_id": "{id}", "date_created": "2020-01-02T00:00:00Z", "title": "Photo {id}", "photographer": "NASA"}}"#
    )
}

/// A page envelope with one item per id and an optional next link.
pub fn collection_page(base_url: &str, ids: &[&str], next: Option<&str>) -> String {
    let items: Vec<String> = ids
        .iter()
        .map(|id| {
            format!(
                r#"{{"data": [{record}], "links": [{{"href": "{base_url}/thumbs/{id}~thumb.jpg", "rel": "preview"}}], "href": "{base_url}/asset/{id}/collection.json"}}"#,
                record = photo_record(id),
            )
        })
        .collect();
    let links = match next {
        Some(next) => format!(r#"[{{"href": "{next}", "rel": "next"}}]"#),
        None => "[]".to_string(),
    };
    format!(
        r#"{{"collection": {{"items": [{}], "links": {links}}}}}"#,
        items.join(",")
    )
}

// -- Cursor chains ------------------------------------------------------------

/// Cursor whose `resolve_next` yields cursors over `pages` in order.
pub fn chain(pages: Vec<Vec<&'static str>>) -> MockCursor<&'static str> {
    chain_from("root", pages)
}

fn chain_from(id: &str, mut pages: Vec<Vec<&'static str>>) -> MockCursor<&'static str> {
    if pages.is_empty() {
        return MockCursor::with_id(id).on_next(|| Ok(None));
    }
    let page = pages.remove(0);
    let next_id = format!("{id}/{}", page.join(","));
    let next = chain_from(&next_id, pages).on_fetch(move || Ok(page.clone()));
    MockCursor::with_id(id).on_next(move || Ok(Some(next.clone())))
}

pub fn server_error() -> FetchError {
    FetchError::BadResponse {
        url: "https://images-api.nasa.gov/search".to_string(),
        status: 500,
    }
}
