use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::config::ServiceConfig;
use crate::http::error::FetchError;
use crate::http::url::upgrade_to_https;

/// Retrieves the raw body of a resource.
///
/// Repositories depend on this trait rather than on reqwest directly so tests
/// can serve canned payloads without a network.
#[async_trait]
pub trait GetService: Send + Sync {
    async fn get(&self, url: &Url) -> Result<Vec<u8>, FetchError>;
}

/// Fetches `url` through `service` and decodes the body as JSON.
pub async fn get_json<T>(service: &dyn GetService, url: &Url) -> Result<T, FetchError>
where
    T: DeserializeOwned,
{
    let body = service.get(url).await?;
    let value = serde_json::from_slice(&body)?;
    Ok(value)
}

/// Timeouts applied to every request.
#[derive(Debug, Clone, Copy)]
pub struct TimeoutConfig {
    pub connect: Duration,
    pub request: Duration,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(5),
            request: Duration::from_secs(30),
        }
    }
}

impl From<&ServiceConfig> for TimeoutConfig {
    fn from(config: &ServiceConfig) -> Self {
        Self {
            connect: Duration::from_secs(config.connect_timeout_seconds as u64),
            request: Duration::from_secs(config.timeout_seconds as u64),
        }
    }
}

/// [`GetService`] backed by a reqwest client.
pub struct HttpGetService {
    client: Client,
    force_https: bool,
}

impl HttpGetService {
    pub fn new(timeouts: TimeoutConfig, force_https: bool) -> Result<Self, FetchError> {
        let client = Client::builder()
            .connect_timeout(timeouts.connect)
            .timeout(timeouts.request)
            .build()
            .map_err(|e| FetchError::Transport {
                url: String::new(),
                source: e,
            })?;

        Ok(Self {
            client,
            force_https,
        })
    }

    pub fn from_config(config: &ServiceConfig) -> Result<Self, FetchError> {
        Self::new(TimeoutConfig::from(config), config.force_https)
    }

    fn request_url(&self, url: &Url) -> Url {
        if self.force_https {
            upgrade_to_https(url)
        } else {
            url.clone()
        }
    }
}

#[async_trait]
impl GetService for HttpGetService {
    async fn get(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        let url = self.request_url(url);

        tracing::debug!(url = %url, "Sending GET request");

        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                url: url.to_string(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %url, status = %status, "Request returned error status");
            return Err(FetchError::BadResponse {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| FetchError::Transport {
            url: url.to_string(),
            source: e,
        })?;

        tracing::trace!(url = %url, bytes = body.len(), "Received response body");
        Ok(body.to_vec())
    }
}
