//! Error types for the ingestion pipeline.

use thiserror::Error;

/// Errors that can occur while talking to the catalog service.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The token endpoint rejected the client credentials.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The catalog service returned a rate-limit response.
    #[error("rate limited by catalog service")]
    RateLimited,

    /// The catalog service returned a non-success status.
    #[error("catalog service returned {status} for {endpoint}")]
    Http { status: u16, endpoint: String },

    /// A response body could not be decoded into the expected shape.
    #[error("malformed response from {endpoint}: {message}")]
    Parse { endpoint: String, message: String },

    /// An error propagated from `reqwest` (connect, timeout, TLS, ...).
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    /// An error propagated from the core dataset layer.
    #[error(transparent)]
    Dataset(#[from] hitcast_core::Error),
}

impl CatalogError {
    /// Returns `true` when the error is transient and the call may succeed
    /// if retried: rate limits, server-side failures, and connection-level
    /// request errors. Client-side errors (bad request, auth, parse) are
    /// not retried.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::RateLimited => true,
            Self::Http { status, .. } => (500..=599).contains(status),
            Self::Request(e) => e.is_timeout() || e.is_connect(),
            Self::Auth(_) | Self::Parse { .. } | Self::Dataset(_) => false,
        }
    }
}

/// Convenience alias for catalog results.
pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_is_transient() {
        assert!(CatalogError::RateLimited.is_transient());
    }

    #[test]
    fn test_server_errors_are_transient() {
        let err = CatalogError::Http {
            status: 503,
            endpoint: "/tracks".to_string(),
        };
        assert!(err.is_transient());
    }

    #[test]
    fn test_client_errors_are_not_transient() {
        let err = CatalogError::Http {
            status: 404,
            endpoint: "/search".to_string(),
        };
        assert!(!err.is_transient());

        let err = CatalogError::Auth("bad credentials".to_string());
        assert!(!err.is_transient());

        let err = CatalogError::Parse {
            endpoint: "/tracks".to_string(),
            message: "missing field `id`".to_string(),
        };
        assert!(!err.is_transient());
    }
}
