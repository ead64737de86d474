//! Router client error types.

use thiserror::Error;

/// Errors from the routing and moderation services.
#[derive(Debug, Error)]
pub enum RouterError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status, or with an `error`
    /// field in an otherwise successful body.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the service.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The response body did not match the expected shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// The service returned 429 Too Many Requests.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// No service base URL was configured.
    #[error("router is not configured: set router.base_url")]
    NotConfigured,
}
