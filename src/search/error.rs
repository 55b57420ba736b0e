//! Error types for catalog search.

use thiserror::Error;

use crate::transport::TransportError;

/// Errors that can occur while searching the catalog.
///
/// Every variant raised during a search names the term, and page failures
/// name the page, so a single terminal error is enough to diagnose a run.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The configured search base URL is not a usable absolute URL.
    #[error("invalid search base URL '{base_url}': {reason}")]
    InvalidBaseUrl {
        /// The rejected base URL.
        base_url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Page numbers start at 1.
    #[error("invalid page number {page}: pages start at 1")]
    InvalidPage {
        /// The rejected page number.
        page: usize,
    },

    /// The pagination script did not hold exactly three `number,` entries.
    #[error(
        "could not read pagination for '{term}': expected 3 page-info numbers, found {matches}"
    )]
    PaginationParse {
        /// The search term.
        term: String,
        /// How many `number,` entries were found.
        matches: usize,
    },

    /// The page count in the pagination script does not fit in memory.
    #[error("could not read pagination for '{term}': page count '{value}' is out of range")]
    PageCountOutOfRange {
        /// The search term.
        term: String,
        /// The raw page count text.
        value: String,
    },

    /// Fetching the first results page failed while discovering pagination.
    #[error("pagination discovery failed for '{term}': {source}")]
    Discovery {
        /// The search term.
        term: String,
        /// The underlying retrieval failure.
        #[source]
        source: TransportError,
    },

    /// Fetching one results page failed.
    #[error("fetching results page {page} for '{term}' failed: {source}")]
    PageFetch {
        /// The search term.
        term: String,
        /// 1-based page number.
        page: usize,
        /// The page URL.
        url: String,
        /// The underlying retrieval failure.
        #[source]
        source: TransportError,
    },
}

impl SearchError {
    /// Creates an invalid base URL error.
    pub fn invalid_base_url(base_url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidBaseUrl {
            base_url: base_url.into(),
            reason: reason.into(),
        }
    }

    /// Creates a pagination parse error.
    pub fn pagination_parse(term: impl Into<String>, matches: usize) -> Self {
        Self::PaginationParse {
            term: term.into(),
            matches,
        }
    }

    /// Creates a discovery error.
    pub fn discovery(term: impl Into<String>, source: TransportError) -> Self {
        Self::Discovery {
            term: term.into(),
            source,
        }
    }

    /// Creates a page fetch error.
    pub fn page_fetch(
        term: impl Into<String>,
        page: usize,
        url: impl Into<String>,
        source: TransportError,
    ) -> Self {
        Self::PageFetch {
            term: term.into(),
            page,
            url: url.into(),
            source,
        }
    }

    /// Name of the search stage that failed, for user-facing reports.
    #[must_use]
    pub fn stage(&self) -> &'static str {
        match self {
            Self::InvalidBaseUrl { .. } | Self::InvalidPage { .. } => "url building",
            Self::PaginationParse { .. }
            | Self::PageCountOutOfRange { .. }
            | Self::Discovery { .. } => "pagination discovery",
            Self::PageFetch { .. } => "page fetch",
        }
    }
}
