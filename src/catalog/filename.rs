//! Filename derivation for downloaded books.

use super::Record;

/// Builds the output filename for a record.
///
/// Pattern: `Author - Title - Publisher (Year).ext`, where author and
/// publisher are the first entries of their semicolon-separated lists.
/// Empty parts are left out; with no author, title, publisher or year the
/// result is just `.ext`.
#[must_use]
pub fn build_filename(record: &Record) -> String {
    let mut parts: Vec<String> = Vec::new();

    let author = first_item(&record.authors);
    if !author.is_empty() {
        parts.push(author);
    }

    let title = sanitize_component(&record.title);
    if !title.is_empty() {
        parts.push(title);
    }

    let publisher = first_item(&record.publisher);
    let year = record.year.trim();
    let imprint = match (publisher.is_empty(), year.is_empty()) {
        (false, false) => format!("{publisher} ({year})"),
        (false, true) => publisher,
        (true, false) => year.to_string(),
        (true, true) => String::new(),
    };
    if !imprint.is_empty() {
        parts.push(imprint);
    }

    let stem = sanitize_component(&parts.join(" - "));
    format!("{stem}.{}", sanitize_extension(&record.extension))
}

/// Sanitized extension with dots replaced too, so it can never form `..`.
fn sanitize_extension(extension: &str) -> String {
    sanitize_component(extension).replace('.', "_")
}

/// Trims the value and replaces characters that are invalid in filenames with `_`.
#[must_use]
pub fn sanitize_component(value: &str) -> String {
    value
        .trim()
        .chars()
        .map(|ch| match ch {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

/// First entry of a semicolon-separated list, sanitized.
fn first_item(list: &str) -> String {
    list.split(';')
        .next()
        .map(sanitize_component)
        .unwrap_or_default()
}
