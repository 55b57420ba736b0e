//! Catalog search: URL building, pagination discovery, page parsing, and the
//! multi-page search that ties them together.
//!
//! # Architecture
//!
//! - [`page_url`] builds the deterministic results URL for a term and page
//! - [`discover_pages`] reads the page count from the first results page
//! - [`page_refs`] yields each page's URL as the search reaches it
//! - [`fetch_page`] / [`parse_records`] turn one results page into records
//! - [`SearchOrchestrator`] runs all of the above sequentially

mod error;
mod orchestrator;
mod page;
mod pagination;
mod url_builder;

pub use error::SearchError;
pub use orchestrator::{DEFAULT_PAGE_DELAY, SearchOrchestrator};
pub use page::{fetch_page, parse_records};
pub use pagination::{discover_pages, page_count, pagination_script, total_pages};
pub use url_builder::{page_refs, page_url};

/// Default catalog search endpoint.
pub const DEFAULT_BASE_URL: &str = "https://libgen.is/search.php";

/// One results page to fetch: its 1-based number and full URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRef {
    /// 1-based page number.
    pub number: usize,
    /// Fully built page URL.
    pub url: String,
}
