//! Error types for single HTTP retrievals.

use thiserror::Error;

/// Failure of one retrieval against the catalog or a mirror.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The URL could not be parsed as an absolute URL.
    #[error("invalid URL: {url}")]
    InvalidUrl {
        /// The rejected URL string.
        url: String,
    },

    /// Network-level error (DNS resolution, connection refused, TLS, body read).
    #[error("network error fetching {url}: {source}")]
    Network {
        /// The URL being fetched.
        url: String,
        /// The underlying client error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout fetching {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// Server answered with a non-success status.
    #[error("HTTP {status} fetching {url}")]
    HttpStatus {
        /// The URL that returned the status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// Server answered with a success status but no content.
    #[error("empty response body from {url}")]
    EmptyBody {
        /// The URL that returned nothing.
        url: String,
    },

    /// The HTTP client could not be constructed.
    #[error("HTTP client construction failed: {source}")]
    ClientBuild {
        /// The underlying builder error.
        #[source]
        source: reqwest::Error,
    },
}

impl TransportError {
    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Creates a network error, mapping client timeouts to [`TransportError::Timeout`].
    pub fn from_reqwest(url: impl Into<String>, source: reqwest::Error) -> Self {
        let url = url.into();
        if source.is_timeout() {
            Self::Timeout { url }
        } else {
            Self::Network { url, source }
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates an empty body error.
    pub fn empty_body(url: impl Into<String>) -> Self {
        Self::EmptyBody { url: url.into() }
    }

    /// Returns the HTTP status when the failure was a status response.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the URL the failure relates to, if any.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::InvalidUrl { url }
            | Self::Network { url, .. }
            | Self::Timeout { url }
            | Self::HttpStatus { url, .. }
            | Self::EmptyBody { url } => Some(url),
            Self::ClientBuild { .. } => None,
        }
    }
}

// No `From<reqwest::Error>`: every variant needs the URL for context.
