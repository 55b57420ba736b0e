//! Mirror page resolution into download candidates.

use std::sync::LazyLock;

use scraper::{Html, Selector};
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::catalog::Record;
use crate::transport::Fetch;
use crate::transport::html::compile_static_selector;
use crate::util::absolutize_url;

static DOWNLOAD_LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| compile_static_selector("div#download ul li a[href]"));

/// Extracts candidate download links for `extension` from a mirror page body.
///
/// An `href` qualifies when it contains `.` + `extension` anywhere
/// (case-sensitive), so `epub` also matches `file.epub?token=1`. Relative
/// links are resolved against `page_url` when it parses. Document order is kept.
#[must_use]
pub fn extract_candidates(html: &str, extension: &str, page_url: &str) -> Vec<String> {
    let needle = format!(".{}", extension.trim());
    let base = Url::parse(page_url).ok();
    let document = Html::parse_document(html);

    document
        .select(&DOWNLOAD_LINK_SELECTOR)
        .filter_map(|anchor| anchor.value().attr("href"))
        .filter(|href| href.contains(&needle))
        .map(|href| {
            base.as_ref()
                .and_then(|base| absolutize_url(href, base))
                .unwrap_or_else(|| href.to_string())
        })
        .collect()
}

/// Fetches the record's primary mirror page and returns its candidate links.
///
/// Only the first mirror is consulted. Failures never propagate: an empty
/// primary mirror or a failed fetch is logged and yields an empty list, which
/// the caller reports as "no links found".
#[instrument(skip(fetcher, record), fields(id = %record.id, extension = %record.extension))]
pub async fn resolve_candidates(fetcher: &dyn Fetch, record: &Record) -> Vec<String> {
    let Some(mirror) = record.primary_mirror() else {
        warn!("record has no primary mirror");
        return Vec::new();
    };

    let page = match fetcher.fetch(mirror).await {
        Ok(page) => page,
        Err(error) => {
            warn!(mirror, error = %error, "mirror page fetch failed");
            return Vec::new();
        }
    };

    let candidates = extract_candidates(&page.text(), &record.extension, &page.url);
    for candidate in &candidates {
        debug!(candidate = %candidate, "download candidate");
    }
    info!(mirror, candidates = candidates.len(), "mirror resolved");
    candidates
}
