//! Search-results URL construction.

use url::Url;
use url::form_urlencoded;

use super::{PageRef, SearchError};

/// Builds the results URL for `term` at `page` (1-based).
///
/// Query keys are emitted in alphabetical order and form-encoded (space
/// becomes `+`), so identical inputs always give byte-identical output. Any
/// query already on `base_url` is replaced.
///
/// # Errors
///
/// Returns [`SearchError::InvalidBaseUrl`] when `base_url` is not an absolute
/// URL that can carry a query, and [`SearchError::InvalidPage`] for page `0`.
pub fn page_url(base_url: &str, term: &str, page: usize) -> Result<String, SearchError> {
    if page == 0 {
        return Err(SearchError::InvalidPage { page });
    }

    let mut url =
        Url::parse(base_url).map_err(|e| SearchError::invalid_base_url(base_url, e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(SearchError::invalid_base_url(
            base_url,
            "URL cannot carry a search query",
        ));
    }

    let page = page.to_string();
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("column", "def")
        .append_pair("page", &page)
        .append_pair("phrase", "1")
        .append_pair("req", term)
        .append_pair("sort", "def")
        .append_pair("sortmode", "ASC")
        .append_pair("view", "simple")
        .finish();
    url.set_query(Some(&query));

    Ok(url.into())
}

/// Lazily yields page references for pages `1..=total`, in order.
///
/// Each URL is built only when the iterator reaches it, so an inflated
/// `total` costs nothing for pages that are never requested. Items are
/// [`SearchError::InvalidBaseUrl`] when `base_url` is unusable.
pub fn page_refs<'a>(
    base_url: &'a str,
    term: &'a str,
    total: usize,
) -> impl Iterator<Item = Result<PageRef, SearchError>> + 'a {
    (1..=total).map(move |number| {
        Ok(PageRef {
            number,
            url: page_url(base_url, term, number)?,
        })
    })
}
