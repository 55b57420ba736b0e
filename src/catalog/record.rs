//! Catalog records and the row parser that produces them.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Selector};
use serde::Serialize;

use crate::transport::html::{compile_static_selector, element_text};
use crate::util::compile_static_regex;

/// Standalone runs of 9 to 13 digits (ISBN-10 without check letter, ISBN-13).
///
/// Boundaries are ASCII-only: a non-ASCII letter next to the digits still
/// separates them.
static IDENTIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_static_regex(r"(?-u:\b)[0-9]{9,13}(?-u:\b)"));

static ANCHOR_SELECTOR: LazyLock<Selector> = LazyLock::new(|| compile_static_selector("a"));

/// Number of mirror slots every record carries.
pub const MIRROR_SLOTS: usize = 2;

// 1-indexed column positions in the simple results view.
const COL_ID: usize = 1;
const COL_AUTHORS: usize = 2;
const COL_TITLE: usize = 3;
const COL_PUBLISHER: usize = 4;
const COL_YEAR: usize = 5;
const COL_PAGES: usize = 6;
const COL_LANGUAGE: usize = 7;
const COL_SIZE: usize = 8;
const COL_EXTENSION: usize = 9;
const COL_MIRROR_A: usize = 10;
const COL_MIRROR_B: usize = 11;

/// One parsed catalog entry.
///
/// Records are built once by [`parse_row`] and only handed out by shared
/// reference or clone afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Record {
    /// Catalog identifier (numeric text).
    pub id: String,
    /// Authors, semicolon separated.
    pub authors: String,
    /// Title with embedded identifiers removed.
    pub title: String,
    /// Identifiers (ISBNs) extracted from the raw title, left to right.
    pub identifiers: Vec<String>,
    /// Publisher, semicolon separated when several.
    pub publisher: String,
    /// Publication year as displayed.
    pub year: String,
    /// Page count as displayed.
    pub pages: String,
    /// Language as displayed.
    pub language: String,
    /// Human-readable size, e.g. `2 Mb`.
    pub size: String,
    /// File extension without a leading dot, e.g. `epub`.
    pub extension: String,
    /// Mirror page URLs; always [`MIRROR_SLOTS`] entries, possibly empty.
    /// The first entry is the primary mirror.
    pub mirrors: Vec<String>,
    /// Catalog edit page URL, possibly empty.
    pub edit_url: String,
}

impl Record {
    /// The primary mirror URL, when non-empty.
    #[must_use]
    pub fn primary_mirror(&self) -> Option<&str> {
        self.mirrors
            .first()
            .map(String::as_str)
            .filter(|url| !url.trim().is_empty())
    }
}

/// Content of one table cell as seen by the row parser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    /// Full text of the cell.
    pub text: String,
    /// Concatenated text of the anchors in the cell, if it has any.
    pub anchor_text: Option<String>,
    /// `href` values of the anchors in the cell, in document order.
    /// An anchor without `href` contributes an empty string.
    pub hrefs: Vec<String>,
}

impl Cell {
    /// A plain text cell without links.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// A cell holding a single anchor.
    pub fn link(text: impl Into<String>, href: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            anchor_text: Some(text.clone()),
            text,
            hrefs: vec![href.into()],
        }
    }

    /// Reads a `td` element into a cell.
    pub(crate) fn from_element(element: ElementRef<'_>) -> Self {
        let mut anchor_text: Option<String> = None;
        let mut hrefs = Vec::new();
        for anchor in element.select(&ANCHOR_SELECTOR) {
            anchor_text
                .get_or_insert_with(String::new)
                .push_str(&element_text(anchor));
            hrefs.push(anchor.value().attr("href").unwrap_or("").to_string());
        }
        Self {
            text: element_text(element),
            anchor_text,
            hrefs,
        }
    }

    fn first_href(&self) -> &str {
        self.hrefs.first().map_or("", String::as_str)
    }
}

/// Builds a [`Record`] from one result row, or `None` for header and malformed rows.
///
/// `cells` are addressed by 1-indexed column position. Only the first column
/// is validated (it must be a non-negative integer); everything else is passed
/// through as trimmed text.
#[must_use]
pub fn parse_row(cells: &[Cell]) -> Option<Record> {
    let id = column_text(cells, COL_ID);
    if id.parse::<u64>().is_err() {
        return None;
    }

    let raw_title = column(cells, COL_TITLE)
        .map(|cell| cell.anchor_text.as_deref().unwrap_or(&cell.text))
        .unwrap_or_default();
    let (title, identifiers) = extract_title_and_identifiers(raw_title);

    Some(Record {
        id,
        authors: column_text(cells, COL_AUTHORS),
        title,
        identifiers,
        publisher: column_text(cells, COL_PUBLISHER),
        year: column_text(cells, COL_YEAR),
        pages: column_text(cells, COL_PAGES),
        language: column_text(cells, COL_LANGUAGE),
        size: column_text(cells, COL_SIZE),
        extension: column_text(cells, COL_EXTENSION),
        mirrors: vec![column_href(cells, COL_MIRROR_A), column_href(cells, COL_MIRROR_B)],
        edit_url: column_href(cells, COL_MIRROR_B),
    })
}

/// Splits identifier runs out of a raw title.
///
/// Every standalone run of 9 to 13 digits is collected (left to right) and
/// removed from the text. The remaining title is trimmed, then stripped of
/// trailing commas (and the whitespace between them). Interior whitespace
/// left by the removal is kept.
#[must_use]
pub fn extract_title_and_identifiers(raw: &str) -> (String, Vec<String>) {
    let identifiers = IDENTIFIER_RE
        .find_iter(raw)
        .map(|m| m.as_str().to_string())
        .collect();
    let stripped = IDENTIFIER_RE.replace_all(raw, "");
    let title = stripped
        .trim()
        .trim_end_matches(|c: char| c == ',' || c.is_whitespace())
        .to_string();
    (title, identifiers)
}

fn column(cells: &[Cell], position: usize) -> Option<&Cell> {
    cells.get(position - 1)
}

fn column_text(cells: &[Cell], position: usize) -> String {
    column(cells, position).map_or_else(String::new, |cell| cell.text.trim().to_string())
}

fn column_href(cells: &[Cell], position: usize) -> String {
    column(cells, position).map_or_else(String::new, |cell| cell.first_href().trim().to_string())
}
