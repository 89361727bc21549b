//! Error types for corpus assembly.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.

use std::time::Duration;

/// Errors from the HTTP layer shared by all provider adapters.
#[derive(thiserror::Error, Debug)]
pub enum ProviderError {
    /// HTTP transport error (connection, DNS, TLS, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Middleware error
    #[error("Middleware error: {0}")]
    Middleware(#[from] reqwest_middleware::Error),

    /// Rate limited by a provider (429 response)
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Suggested wait time before retry
        retry_after: Duration,
    },

    /// Request timeout
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Json(#[from] serde_json::Error),

    /// Atom/XML parsing error
    #[error("Failed to parse feed: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Server error (5xx response)
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Unexpected HTTP status
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },
}

impl ProviderError {
    /// Create a rate limited error with retry-after duration.
    #[must_use]
    pub fn rate_limited(seconds: u64) -> Self {
        Self::RateLimited { retry_after: Duration::from_secs(seconds) }
    }

    /// Create a server error.
    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server { status, message: message.into() }
    }

    /// Create an unexpected status error.
    #[must_use]
    pub fn unexpected(status: u16, message: impl Into<String>) -> Self {
        Self::UnexpectedStatus { status, message: message.into() }
    }

    /// Returns true if this error is retryable.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::Timeout(_) | Self::Server { .. })
    }

    /// Get the retry-after duration if this is a rate limit error.
    #[must_use]
    pub const fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after } => Some(*retry_after),
            _ => None,
        }
    }
}

/// Errors from corpus construction and the citation layer.
#[derive(thiserror::Error, Debug)]
pub enum CorpusError {
    /// Too few records survived dedup and ranking to support synthesis.
    #[error("corpus has {found} records after dedup and ranking, need at least {required}")]
    InsufficientCorpus {
        /// Records that survived
        found: usize,
        /// Configured minimum
        required: usize,
    },

    /// A citation marker refers to a number that was never issued.
    #[error("citation [{number}] was never issued (highest issued number: {issued})")]
    CitationIntegrity {
        /// The offending marker number
        number: usize,
        /// Highest number the registry has issued
        issued: usize,
    },
}

impl CorpusError {
    /// Create an insufficient corpus error.
    #[must_use]
    pub fn insufficient(found: usize, required: usize) -> Self {
        Self::InsufficientCorpus { found, required }
    }
}

/// Result type alias for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Result type alias for corpus operations.
pub type CorpusResult<T> = Result<T, CorpusError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_retryable() {
        assert!(ProviderError::rate_limited(60).is_retryable());
        assert!(ProviderError::Timeout(Duration::from_secs(30)).is_retryable());
        assert!(ProviderError::server(500, "Internal error").is_retryable());

        assert!(!ProviderError::unexpected(418, "teapot").is_retryable());
    }

    #[test]
    fn test_provider_error_retry_after() {
        let err = ProviderError::rate_limited(60);
        assert_eq!(err.retry_after(), Some(Duration::from_secs(60)));

        let err = ProviderError::unexpected(404, "missing");
        assert_eq!(err.retry_after(), None);
    }

    #[test]
    fn test_corpus_error_display() {
        let err = CorpusError::insufficient(3, 5);
        assert!(err.to_string().contains("3 records"));
        assert!(err.to_string().contains("at least 5"));

        let err = CorpusError::CitationIntegrity { number: 9, issued: 4 };
        assert!(err.to_string().contains("[9]"));
        assert!(err.to_string().contains("4"));
    }
}
