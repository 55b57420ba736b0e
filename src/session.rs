//! One search-pick-download run over the pipeline.
//!
//! A [`Session`] owns the transport and the stage settings. Each stage runs
//! under its own timeout: fetching every results page is one scope, and
//! resolving plus downloading the chosen book is another.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::catalog::{Record, build_filename, filter_by_extension};
use crate::config::PipelineConfig;
use crate::download::{DownloadAttempter, DownloadError, DownloadReport};
use crate::resolver::resolve_candidates;
use crate::search::{SearchError, SearchOrchestrator};
use crate::select::RecordPicker;
use crate::transport::{CONNECT_TIMEOUT_SECS, Fetch, HttpClient, READ_TIMEOUT_SECS, TransportError};

/// Errors that end a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The search stage failed.
    #[error("search failed: {0}")]
    Search(#[from] SearchError),

    /// The download stage failed.
    #[error("download failed: {0}")]
    Download(#[from] DownloadError),

    /// A stage ran past its time budget.
    #[error("{stage} timed out after {secs}s")]
    Timeout {
        /// `search` or `download`.
        stage: &'static str,
        /// The budget that was exceeded, in seconds.
        secs: u64,
    },
}

/// How a session ended when nothing went wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The search (after format filtering) found nothing.
    NoResults,
    /// The picker declined every record.
    NothingSelected,
    /// The chosen record was downloaded.
    Downloaded(DownloadReport),
}

/// Search, selection and download wired to one transport.
pub struct Session {
    fetcher: Box<dyn Fetch>,
    search: SearchOrchestrator,
    attempter: DownloadAttempter,
    format: Option<String>,
    search_timeout: Duration,
    download_timeout: Duration,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("search", &self.search)
            .field("attempter", &self.attempter)
            .field("format", &self.format)
            .field("search_timeout", &self.search_timeout)
            .field("download_timeout", &self.download_timeout)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Creates a session backed by a real HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::ClientBuild`] when the client cannot be built.
    pub fn new(config: &PipelineConfig) -> Result<Self, TransportError> {
        let client =
            HttpClient::with_settings(&config.user_agent, CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS)?;
        Ok(Self::with_fetcher(config, client))
    }

    /// Creates a session over any transport.
    pub fn with_fetcher(config: &PipelineConfig, fetcher: impl Fetch + 'static) -> Self {
        Self {
            fetcher: Box::new(fetcher),
            search: SearchOrchestrator::new(config.base_url.clone())
                .with_page_delay(config.page_delay),
            attempter: DownloadAttempter::new(config.output_dir.clone()),
            format: config.format.clone(),
            search_timeout: config.search_timeout,
            download_timeout: config.download_timeout,
        }
    }

    /// Searches for `term` and applies the configured format filter.
    ///
    /// # Errors
    ///
    /// [`SessionError::Search`] for search failures and
    /// [`SessionError::Timeout`] when the search budget runs out.
    pub async fn search(&self, term: &str) -> Result<Vec<Record>, SessionError> {
        let records = within("search", self.search_timeout, async {
            self.search.search(self.fetcher.as_ref(), term).await
        })
        .await??;

        Ok(match self.format.as_deref() {
            Some(format) => {
                let kept = filter_by_extension(&records, format);
                info!(found = records.len(), kept = kept.len(), format, "format filter applied");
                kept
            }
            None => records,
        })
    }

    /// Resolves `record`'s mirror and downloads it.
    ///
    /// # Errors
    ///
    /// [`SessionError::Download`] when no candidate works and
    /// [`SessionError::Timeout`] when the download budget runs out.
    pub async fn download(&self, record: &Record) -> Result<DownloadReport, SessionError> {
        let report = within("download", self.download_timeout, async {
            let candidates = resolve_candidates(self.fetcher.as_ref(), record).await;
            let filename = build_filename(record);
            self.attempter
                .attempt(self.fetcher.as_ref(), &candidates, &filename)
                .await
        })
        .await??;
        Ok(report)
    }

    /// Runs search, selection and download for `term`.
    ///
    /// # Errors
    ///
    /// Propagates the first stage failure; declining or finding nothing is
    /// reported through [`SessionOutcome`] instead.
    #[instrument(skip(self, picker), fields(term = %term))]
    pub async fn run(
        &self,
        term: &str,
        picker: &mut dyn RecordPicker,
    ) -> Result<SessionOutcome, SessionError> {
        let records = self.search(term).await?;
        if records.is_empty() {
            info!("no results");
            return Ok(SessionOutcome::NoResults);
        }

        let Some(record) = picker.pick(&records) else {
            info!("nothing selected");
            return Ok(SessionOutcome::NothingSelected);
        };

        info!(id = %record.id, title = %record.title, "record selected");
        let report = self.download(&record).await?;
        Ok(SessionOutcome::Downloaded(report))
    }
}

async fn within<T>(
    stage: &'static str,
    budget: Duration,
    work: impl Future<Output = T>,
) -> Result<T, SessionError> {
    tokio::time::timeout(budget, work).await.map_err(|_| {
        warn!(stage, secs = budget.as_secs(), "stage timed out");
        SessionError::Timeout {
            stage,
            secs: budget.as_secs(),
        }
    })
}
