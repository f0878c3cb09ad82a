//! Source error types.

use thiserror::Error;

/// Errors that can occur when talking to the catalog or a live provider.
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the upstream.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// Failed to parse an upstream response body.
    #[error("parse error: {0}")]
    Parse(String),

    /// The upstream returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// The call was cancelled before it completed.
    #[error("cancelled")]
    Cancelled,

    /// No provider is registered under the requested name.
    #[error("unknown provider: {0}")]
    UnknownProvider(String),
}
