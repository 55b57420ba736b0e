//! Ordered candidate attempts that persist the first successful body.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use super::DownloadError;
use crate::transport::{Fetch, TransportError};

/// Default directory downloads are written to.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Progress of one attempt over a candidate list.
///
/// `Pending -> TryingCandidate(0)`, then each candidate either succeeds or
/// moves on to the next one; running out of candidates ends in `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptState {
    /// Nothing tried yet.
    Pending,
    /// Trying the candidate at this 0-based index.
    TryingCandidate(usize),
    /// A candidate was written to disk.
    Succeeded,
    /// No candidate produced a file.
    Failed,
}

impl AttemptState {
    /// Leaves `Pending`: the first candidate, or `Failed` when there are none.
    #[must_use]
    pub fn start(self, candidates: usize) -> Self {
        match self {
            Self::Pending if candidates == 0 => Self::Failed,
            Self::Pending => Self::TryingCandidate(0),
            other => other,
        }
    }

    /// The current candidate succeeded.
    #[must_use]
    pub fn succeed(self) -> Self {
        match self {
            Self::TryingCandidate(_) => Self::Succeeded,
            other => other,
        }
    }

    /// The current candidate failed: move to the next one or give up.
    #[must_use]
    pub fn fail(self, candidates: usize) -> Self {
        match self {
            Self::TryingCandidate(index) if index + 1 < candidates => {
                Self::TryingCandidate(index + 1)
            }
            Self::TryingCandidate(_) => Self::Failed,
            other => other,
        }
    }

    /// Whether no further transition is possible.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

/// Outcome of a successful download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadReport {
    /// Where the file was written.
    pub path: PathBuf,
    /// The candidate URL that produced it.
    pub url: String,
    /// Number of candidates tried, including the successful one.
    pub attempts: usize,
    /// Bytes written.
    pub bytes: usize,
}

/// Tries candidate links in order and writes the first good body to disk.
#[derive(Debug, Clone)]
pub struct DownloadAttempter {
    output_dir: PathBuf,
}

impl Default for DownloadAttempter {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_DIR)
    }
}

impl DownloadAttempter {
    /// Creates an attempter writing into `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// The directory files are written to.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Downloads the first working candidate to `<output_dir>/<filename>`.
    ///
    /// A candidate works when it answers with a success status and a
    /// non-empty body; the body is written verbatim.
    ///
    /// # Errors
    ///
    /// - [`DownloadError::NoCandidates`] for an empty candidate list
    /// - [`DownloadError::AllCandidatesFailed`] with the last failure when no candidate works
    /// - [`DownloadError::Io`] when the directory or file cannot be written;
    ///   remaining candidates are not tried
    #[instrument(skip(self, fetcher, candidates), fields(candidates = candidates.len(), filename = %filename))]
    pub async fn attempt(
        &self,
        fetcher: &dyn Fetch,
        candidates: &[String],
        filename: &str,
    ) -> Result<DownloadReport, DownloadError> {
        let total = candidates.len();
        let mut state = AttemptState::Pending.start(total);
        if state.is_terminal() {
            return Err(DownloadError::NoCandidates);
        }

        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|source| DownloadError::io(&self.output_dir, source))?;
        let path = self.output_dir.join(filename);

        let mut last_error: Option<TransportError> = None;
        let mut report = None;
        while let AttemptState::TryingCandidate(index) = state {
            let url = &candidates[index];
            match fetch_nonempty(fetcher, url).await {
                Ok(body) => {
                    tokio::fs::write(&path, &body)
                        .await
                        .map_err(|source| DownloadError::io(&path, source))?;
                    info!(url = %url, path = %path.display(), bytes = body.len(), "download complete");
                    report = Some(DownloadReport {
                        path: path.clone(),
                        url: url.clone(),
                        attempts: index + 1,
                        bytes: body.len(),
                    });
                    state = state.succeed();
                }
                Err(error) => {
                    debug!(url = %url, attempt = index + 1, error = %error, "download candidate failed");
                    last_error = Some(error);
                    state = state.fail(total);
                }
            }
        }

        match (state, report, last_error) {
            (AttemptState::Succeeded, Some(report), _) => Ok(report),
            (_, _, Some(source)) => Err(DownloadError::all_failed(total, source)),
            _ => Err(DownloadError::NoCandidates),
        }
    }
}

async fn fetch_nonempty(fetcher: &dyn Fetch, url: &str) -> Result<Vec<u8>, TransportError> {
    let fetched = fetcher.fetch(url).await?;
    if fetched.body.is_empty() {
        return Err(TransportError::empty_body(&fetched.url));
    }
    Ok(fetched.body)
}
