//! Small helpers over `scraper` shared by the result-page and mirror parsers.

use scraper::{ElementRef, Selector};

/// Compiles a CSS selector at static init; panics on invalid pattern.
pub(crate) fn compile_static_selector(pattern: &str) -> Selector {
    Selector::parse(pattern).unwrap_or_else(|e| panic!("invalid static selector '{pattern}': {e}"))
}

/// Concatenated text of an element and all its descendants.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Direct element children of `element` with the given tag name, in document order.
pub(crate) fn child_elements<'a>(element: ElementRef<'a>, tag: &'a str) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    element
        .children()
        .filter_map(ElementRef::wrap)
        .filter(move |child| child.value().name().eq_ignore_ascii_case(tag))
}
