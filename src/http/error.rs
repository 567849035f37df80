//! Error types for fetching and decoding remote resources.
//!
//! Every failure a cursor, repository or manifest lookup can produce is
//! folded into [`FetchError`], so the paging engine has a single type to
//! publish on its error stream.

use thiserror::Error;

/// Errors that can occur while retrieving or decoding a remote resource.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection failure, timeout or any other transport problem.
    #[error("Request to '{url}' failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("Bad server response from '{url}': HTTP {status}")]
    BadResponse { url: String, status: u16 },

    /// The payload was not the expected JSON shape.
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A URL string could not be turned into a valid URL.
    #[error("Invalid URL string: {0}")]
    InvalidUrl(String),

    /// A required reference (such as a manifest URL) is absent.
    #[error("Resource unavailable: {0}")]
    ResourceUnavailable(String),

    /// The operation was cancelled before it completed.
    #[error("Request cancelled")]
    Cancelled,
}

impl FetchError {
    /// Short machine-readable category, used as a structured log field.
    pub fn error_type(&self) -> &'static str {
        match self {
            FetchError::Transport { .. } => "transport",
            FetchError::BadResponse { .. } => "bad_response",
            FetchError::Decode(_) => "decode",
            FetchError::InvalidUrl(_) => "invalid_url",
            FetchError::ResourceUnavailable(_) => "resource_unavailable",
            FetchError::Cancelled => "cancelled",
        }
    }

    /// Whether re-issuing the same request has a chance of succeeding.
    ///
    /// Decode and URL errors are deterministic for a given payload, so
    /// retrying them only repeats the failure.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            FetchError::Transport { .. } | FetchError::BadResponse { .. } | FetchError::Cancelled
        )
    }
}
