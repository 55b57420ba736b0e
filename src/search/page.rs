//! Results-page retrieval and row extraction.

use std::sync::LazyLock;

use scraper::{Html, Selector};
use tracing::{debug, instrument};

use crate::catalog::{Cell, Record, parse_row};
use crate::transport::html::{child_elements, compile_static_selector};
use crate::transport::{Fetch, TransportError};

static ROW_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| compile_static_selector("tr[valign=top]"));

/// Extracts every record from a results page body, in document order.
///
/// Rows whose first cell is not numeric (the header row, separators) are skipped.
#[must_use]
pub fn parse_records(html: &str) -> Vec<Record> {
    let document = Html::parse_document(html);
    document
        .select(&ROW_SELECTOR)
        .filter_map(|row| {
            let cells: Vec<Cell> = child_elements(row, "td").map(Cell::from_element).collect();
            parse_row(&cells)
        })
        .collect()
}

/// Fetches one results page and parses its records.
///
/// # Errors
///
/// Returns the [`TransportError`] of the retrieval unchanged; there is no retry here.
#[instrument(level = "debug", skip(fetcher))]
pub async fn fetch_page(fetcher: &dyn Fetch, url: &str) -> Result<Vec<Record>, TransportError> {
    let page = fetcher.fetch(url).await?;
    let records = parse_records(&page.text());
    debug!(records = records.len(), "parsed results page");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = r##"<!doctype html><html><body><table>
        <tr valign="top"><td>ID</td><td>Author(s)</td><td>Title</td><td>Publisher</td></tr>
        <tr valign="top">
          <td>123</td>
          <td><a href="/author?a=doe">Doe</a>; <a href="/author?a=smith">Smith</a></td>
          <td><a href="book/index.php?md5=AAA">The Title <font>1234567890123</font></a></td>
          <td>Publisher Inc</td>
          <td>2024</td>
          <td>333</td>
          <td>English</td>
          <td>1 Mb</td>
          <td>epub</td>
          <td><a href="http://mirror-a.example/main/AAA" title="this mirror">[1]</a></td>
          <td><a href="http://mirror-b.example/AAA">[2]</a></td>
        </tr>
        <tr valign="top"><td>124</td><td>Roe</td><td><a href="#">Second</a></td></tr>
        <tr><td>999</td><td>not a result row</td></tr>
        </table></body></html>"##;

    #[test]
    fn test_parse_records_skips_header_and_unmarked_rows() {
        let records = parse_records(TABLE);
        let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["123", "124"]);
    }

    #[test]
    fn test_parse_records_reads_cells_by_position() {
        let records = parse_records(TABLE);
        let first = &records[0];
        assert_eq!(first.authors, "Doe; Smith");
        assert_eq!(first.title, "The Title");
        assert_eq!(first.identifiers, vec!["1234567890123"]);
        assert_eq!(first.extension, "epub");
        assert_eq!(first.mirrors[0], "http://mirror-a.example/main/AAA");
        assert_eq!(first.mirrors[1], "http://mirror-b.example/AAA");
    }

    #[test]
    fn test_parse_records_empty_document() {
        assert!(parse_records("<html><body><p>No results</p></body></html>").is_empty());
    }
}
