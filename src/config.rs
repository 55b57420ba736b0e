//! Runtime settings shared by the search and download stages.

use std::path::PathBuf;
use std::time::Duration;

use crate::download::DEFAULT_OUTPUT_DIR;
use crate::search::{DEFAULT_BASE_URL, DEFAULT_PAGE_DELAY};
use crate::user_agent::DEFAULT_USER_AGENT;

/// Default extension downloads are filtered to.
pub const DEFAULT_FORMAT: &str = "epub";

/// Default budget for fetching every results page of one search.
pub const DEFAULT_SEARCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Default budget for resolving mirrors and downloading one book.
pub const DEFAULT_DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(300);

/// Effective pipeline configuration after all layers are merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Catalog search endpoint.
    pub base_url: String,
    /// Pause between results pages.
    pub page_delay: Duration,
    /// Where downloaded files are written.
    pub output_dir: PathBuf,
    /// Keep only records with this extension; `None` keeps every format.
    pub format: Option<String>,
    /// Timeout around a whole search.
    pub search_timeout: Duration,
    /// Timeout around mirror resolution plus download.
    pub download_timeout: Duration,
    /// User-Agent sent with every request.
    pub user_agent: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_delay: DEFAULT_PAGE_DELAY,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            format: Some(DEFAULT_FORMAT.to_string()),
            search_timeout: DEFAULT_SEARCH_TIMEOUT,
            download_timeout: DEFAULT_DOWNLOAD_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.base_url, "https://libgen.is/search.php");
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.format.as_deref(), Some("epub"));
        assert_eq!(config.page_delay, Duration::from_secs(1));
        assert_eq!(config.search_timeout, Duration::from_secs(30));
        assert_eq!(config.download_timeout, Duration::from_secs(300));
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
    }
}
