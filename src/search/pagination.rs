//! Result-page count discovery.
//!
//! The catalog does not expose the number of result pages directly. When a
//! search spans several pages the first results page embeds a paginator
//! script whose arguments start with three `number,` entries, the first of
//! which is the total page count. A page without that script is the only page.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};
use tracing::{debug, info, instrument};

use super::SearchError;
use super::url_builder::page_url;
use crate::transport::Fetch;
use crate::transport::html::{compile_static_selector, element_text};
use crate::util::compile_static_regex;

static SCRIPT_SELECTOR: LazyLock<Selector> = LazyLock::new(|| compile_static_selector("script"));

static PAGE_INFO_RE: LazyLock<Regex> = LazyLock::new(|| compile_static_regex(r"(?-u:\b)([0-9]+),"));

/// Number of `number,` entries the paginator script must hold.
const PAGE_INFO_ENTRIES: usize = 3;

/// Text of the first `<script>` element with non-empty content.
#[must_use]
pub fn pagination_script(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    document
        .select(&SCRIPT_SELECTOR)
        .map(element_text)
        .find(|text| !text.is_empty())
}

/// Reads the total page count from a paginator script.
///
/// # Errors
///
/// Returns [`SearchError::PaginationParse`] unless the script holds exactly
/// three `number,` entries, and [`SearchError::PageCountOutOfRange`] when the
/// first one does not fit a `usize`.
pub fn total_pages(script: &str, term: &str) -> Result<usize, SearchError> {
    let entries: Vec<&str> = PAGE_INFO_RE
        .captures_iter(script)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect();

    if entries.len() != PAGE_INFO_ENTRIES {
        return Err(SearchError::pagination_parse(term, entries.len()));
    }

    let first = entries[0];
    first
        .parse::<usize>()
        .map_err(|_| SearchError::PageCountOutOfRange {
            term: term.to_string(),
            value: first.to_string(),
        })
}

/// Works out the total page count from a first results page body.
///
/// A page with no script, or whose first script carries no `number,` entries
/// at all, is a single-page result.
///
/// # Errors
///
/// See [`total_pages`].
pub fn page_count(html: &str, term: &str) -> Result<usize, SearchError> {
    let Some(script) = pagination_script(html) else {
        debug!("no pagination script; single results page");
        return Ok(1);
    };

    if !PAGE_INFO_RE.is_match(&script) {
        debug!("first script carries no page info; single results page");
        return Ok(1);
    }

    total_pages(&script, term)
}

/// Fetches the first results page for `term` and returns the total page count.
///
/// Page URLs are not built here; [`page_refs`](super::page_refs) yields them
/// one at a time.
///
/// # Errors
///
/// Returns [`SearchError::InvalidBaseUrl`] for an unusable base URL,
/// [`SearchError::Discovery`] when the first page cannot be fetched, and the
/// parse errors of [`total_pages`].
#[instrument(skip(fetcher), fields(term = %term))]
pub async fn discover_pages(
    fetcher: &dyn Fetch,
    base_url: &str,
    term: &str,
) -> Result<usize, SearchError> {
    let first = page_url(base_url, term, 1)?;
    let page = fetcher
        .fetch(&first)
        .await
        .map_err(|source| SearchError::discovery(term, source))?;

    let total = page_count(&page.text(), term)?;
    info!(pages = total, "discovered result pages");
    Ok(total)
}
