//! Error types for the download module.

use std::path::PathBuf;

use thiserror::Error;

use crate::transport::TransportError;

/// Errors that end a download attempt over a candidate list.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The mirror page yielded no links for the requested format.
    #[error("no download links found")]
    NoCandidates,

    /// Every candidate link was tried and none produced a file.
    #[error("all {attempts} download links failed; last error: {source}")]
    AllCandidatesFailed {
        /// Number of candidates tried.
        attempts: usize,
        /// Failure of the last candidate.
        #[source]
        source: TransportError,
    },

    /// File system error while creating the output directory or writing the file.
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl DownloadError {
    /// Creates an all-candidates-failed error from the attempt count and last failure.
    pub fn all_failed(attempts: usize, source: TransportError) -> Self {
        Self::AllCandidatesFailed { attempts, source }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Number of candidates tried before giving up, when known.
    #[must_use]
    pub fn attempts(&self) -> Option<usize> {
        match self {
            Self::NoCandidates => Some(0),
            Self::AllCandidatesFailed { attempts, .. } => Some(*attempts),
            Self::Io { .. } => None,
        }
    }
}
