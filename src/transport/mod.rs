//! Transport capability consumed by the search and download pipeline.
//!
//! The pipeline never talks to `reqwest` directly. It depends on the [`Fetch`]
//! trait, which the [`HttpClient`] implements for real traffic and tests can
//! implement with canned responses.
//!
//! # Example
//!
//! ```no_run
//! use toshi_core::transport::{Fetch, HttpClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new()?;
//! let page = client.fetch("https://libgen.is/search.php?req=iliad").await?;
//! println!("{} bytes from {}", page.body.len(), page.url);
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
pub(crate) mod html;

use std::borrow::Cow;

use async_trait::async_trait;

pub use client::{CONNECT_TIMEOUT_SECS, HttpClient, READ_TIMEOUT_SECS};
pub use error::TransportError;

/// A successful retrieval.
#[derive(Debug, Clone)]
pub struct Fetched {
    /// Final URL after redirects.
    pub url: String,
    /// HTTP status code (always a success status).
    pub status: u16,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl Fetched {
    /// Body decoded as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Retrieval capability: one GET, success statuses only.
///
/// Implementations must return [`TransportError::HttpStatus`] for non-2xx
/// responses rather than an `Ok` value.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Fetches `url` and returns the full response body.
    async fn fetch(&self, url: &str) -> Result<Fetched, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetched_text_is_lossy() {
        let fetched = Fetched {
            url: "https://example.com".to_string(),
            status: 200,
            body: vec![b'o', b'k', 0xff],
        };
        assert_eq!(fetched.text(), "ok\u{fffd}");
    }
}
