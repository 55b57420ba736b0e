//! `reqwest`-backed implementation of the [`Fetch`] capability.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::ACCEPT;
use tracing::{debug, instrument};
use url::Url;

use super::error::TransportError;
use super::{Fetch, Fetched};
use crate::user_agent::DEFAULT_USER_AGENT;

/// Default HTTP connect timeout (10 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default HTTP read timeout (5 minutes, books can be large).
pub const READ_TIMEOUT_SECS: u64 = 300;

/// HTTP client shared by the catalog search, mirror resolution and downloads.
///
/// Created once per process and reused so requests share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a client with the default browser User-Agent and timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::ClientBuild`] when the TLS backend or system
    /// configuration prevents client construction.
    pub fn new() -> Result<Self, TransportError> {
        Self::with_settings(DEFAULT_USER_AGENT, CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS)
    }

    /// Creates a client with an explicit User-Agent and timeout values.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::ClientBuild`] when client construction fails.
    pub fn with_settings(
        user_agent: &str,
        connect_timeout_secs: u64,
        read_timeout_secs: u64,
    ) -> Result<Self, TransportError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .timeout(Duration::from_secs(read_timeout_secs))
            .user_agent(user_agent)
            .gzip(true)
            .build()
            .map_err(|source| TransportError::ClientBuild { source })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetch for HttpClient {
    #[instrument(level = "debug", skip(self), fields(url = %url))]
    async fn fetch(&self, url: &str) -> Result<Fetched, TransportError> {
        let parsed = Url::parse(url).map_err(|_| TransportError::invalid_url(url))?;

        let response = self
            .client
            .get(parsed)
            .header(ACCEPT, "text/html,application/xhtml+xml,*/*;q=0.8")
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(url, e))?;

        let status = response.status();
        if !status.is_success() {
            debug!(status = status.as_u16(), "non-success status");
            return Err(TransportError::http_status(url, status.as_u16()));
        }

        let final_url = response.url().to_string();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::from_reqwest(url, e))?;

        debug!(status = status.as_u16(), bytes = body.len(), "fetched");
        Ok(Fetched {
            url: final_url,
            status: status.as_u16(),
            body: body.to_vec(),
        })
    }
}
