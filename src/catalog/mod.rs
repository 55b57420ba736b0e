//! Catalog data: records parsed from result rows, format filtering, and
//! output filename derivation.

mod filename;
mod record;

pub use filename::{build_filename, sanitize_component};
pub use record::{Cell, MIRROR_SLOTS, Record, extract_title_and_identifiers, parse_row};

/// Keeps the records whose extension matches `extension` (ASCII case-insensitive), in order.
#[must_use]
pub fn filter_by_extension(records: &[Record], extension: &str) -> Vec<Record> {
    let wanted = extension.trim();
    records
        .iter()
        .filter(|record| record.extension.trim().eq_ignore_ascii_case(wanted))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_ext(title: &str, ext: &str) -> Record {
        Record {
            title: title.to_string(),
            extension: ext.to_string(),
            ..Record::default()
        }
    }

    #[test]
    fn test_filter_by_extension_preserves_order() {
        let records = vec![
            with_ext("A", "pdf"),
            with_ext("B", "epub"),
            with_ext("C", "mobi"),
            with_ext("D", "EPUB"),
        ];
        let titles: Vec<_> = filter_by_extension(&records, "epub")
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["B", "D"]);
    }

    #[test]
    fn test_filter_by_extension_no_match_is_empty() {
        let records = vec![with_ext("A", "pdf")];
        assert!(filter_by_extension(&records, "djvu").is_empty());
    }
}
