//! Multi-page search: discover pages, then fetch them one by one.

use std::time::Duration;

use tracing::{debug, info, instrument};

use super::SearchError;
use super::page::fetch_page;
use super::pagination::discover_pages;
use super::url_builder::page_refs;
use crate::catalog::Record;
use crate::transport::Fetch;

/// Default pause between consecutive results-page requests.
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_secs(1);

/// Runs a full catalog search across every results page.
///
/// Pages are fetched strictly in order, one at a time, with a fixed courtesy
/// delay before every page after the first.
///
/// # Example
///
/// ```no_run
/// use toshi_core::search::SearchOrchestrator;
/// use toshi_core::transport::HttpClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = HttpClient::new()?;
/// let search = SearchOrchestrator::new("https://libgen.is/search.php");
/// let records = search.search(&client, "deep utopia").await?;
/// println!("{} results", records.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SearchOrchestrator {
    base_url: String,
    page_delay: Duration,
}

impl SearchOrchestrator {
    /// Creates a search against `base_url` with the default page delay.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            page_delay: DEFAULT_PAGE_DELAY,
        }
    }

    /// Overrides the delay between pages (`Duration::ZERO` disables it).
    #[must_use]
    pub fn with_page_delay(mut self, page_delay: Duration) -> Self {
        self.page_delay = page_delay;
        self
    }

    /// The configured search base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Searches for `term` and returns every record, page order then row order.
    ///
    /// # Errors
    ///
    /// Fails fast with the first error: discovery errors as returned by
    /// [`discover_pages`], and [`SearchError::PageFetch`] naming the page for
    /// a page that cannot be retrieved. Records from earlier pages are dropped.
    #[instrument(skip(self, fetcher), fields(term = %term))]
    pub async fn search(&self, fetcher: &dyn Fetch, term: &str) -> Result<Vec<Record>, SearchError> {
        let total = discover_pages(fetcher, &self.base_url, term).await?;

        let mut records = Vec::new();
        for page in page_refs(&self.base_url, term, total) {
            let page = page?;
            if page.number > 1 && !self.page_delay.is_zero() {
                tokio::time::sleep(self.page_delay).await;
            }

            let found = fetch_page(fetcher, &page.url)
                .await
                .map_err(|source| SearchError::page_fetch(term, page.number, &page.url, source))?;
            debug!(page = page.number, records = found.len(), "results page done");
            records.extend(found);
        }

        info!(pages = total, records = records.len(), "search complete");
        Ok(records)
    }
}
