//! Error types for content-store lookups.
//!
//! These never reach the voice platform: the client logs them and degrades
//! every failed lookup to an empty result set. They exist so the query path
//! stays testable and the logs say what actually went wrong.

use thiserror::Error;

/// Result type alias for lookup operations.
pub type Result<T> = std::result::Result<T, LookupError>;

/// Failures while querying the content store.
#[derive(Debug, Error)]
pub enum LookupError {
    /// Network-level connectivity failure.
    #[error("network error: {message}")]
    Network {
        /// Error message describing the network failure
        message: String,
    },

    /// Request timeout exceeded.
    #[error("request timeout after {timeout_seconds}s")]
    Timeout {
        /// Number of seconds before the request timed out
        timeout_seconds: u64,
    },

    /// Store responded with a non-success status.
    #[error("store returned HTTP {status_code}")]
    Status {
        /// HTTP status code returned by the store
        status_code: u16,
        /// Response body content
        body: String,
    },

    /// Store response body was not the expected query-result shape.
    #[error("malformed store response: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Client construction or configuration problem.
    #[error("store client configuration: {message}")]
    Configuration {
        /// Configuration error message
        message: String,
    },
}

impl LookupError {
    /// Creates a network error from a message.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network { message: message.into() }
    }

    /// Creates a timeout error.
    pub fn timeout(timeout_seconds: u64) -> Self {
        Self::Timeout { timeout_seconds }
    }

    /// Creates a status error from an HTTP response.
    pub fn status(status_code: u16, body: impl Into<String>) -> Self {
        Self::Status { status_code, body: body.into() }
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration { message: message.into() }
    }
}
