// src/extract/links.rs
// =============================================================================
// This module extracts resource links from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// Unlike a link checker, a mirror wants the raw references exactly as the
// site wrote them (e.g. "catalogue/page-2.html"), because each reference is
// reused both as the remote fetch path and as the local file path.
//
// Rust concepts:
// - Newtype wrapper: Document hides the parser type from callers
// - Iterators: filter_map over the selected elements
// - Borrowing: extraction only needs &Document
// =============================================================================

use scraper::{Html, Selector};

// Prefix that points one directory up; collapsed so links land at the crawl root
const PARENT_SEGMENT: &str = "../";

// A parsed HTML page
//
// Owned by whoever fetched it and dropped once its links are extracted.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses raw HTML into a document
    pub fn parse(raw_html: &str) -> Self {
        Document {
            html: Html::parse_document(raw_html),
        }
    }
}

// Extracts the values of `attribute_name` on every `tag_name` element
//
// Parameters:
//   document: the parsed page
//   tag_name: element to look for ("a", "img", "script", "link")
//   attribute_name: attribute holding the reference ("href", "src")
//
// Returns: references in document order, duplicates kept
//
// Filtering rules:
//   - elements without the attribute are skipped
//   - leading "../" segments are stripped
//   - blank references are skipped
//   - <script> references that mention "http" are skipped (externally hosted)
//
// Example:
//   html = "<img src='../../media/cover.jpg'>"
//   extract_links(&doc, "img", "src") = ["media/cover.jpg"]
pub fn extract_links(document: &Document, tag_name: &str, attribute_name: &str) -> Vec<String> {
    // Tag names come from the caller, so the selector can fail to parse
    let selector = match Selector::parse(tag_name) {
        Ok(selector) => selector,
        Err(e) => {
            tracing::warn!("Cannot select <{}> elements: {:?}", tag_name, e);
            return Vec::new();
        }
    };

    let is_script = tag_name == "script";

    document
        .html
        .select(&selector)
        .filter_map(|element| element.value().attr(attribute_name))
        .map(strip_parent_segments)
        .filter(|link| !link.trim().is_empty())
        .filter(|link| !(is_script && link.contains("http")))
        .map(str::to_string)
        .collect()
}

// Removes every leading "../" from a reference
//
// "../../static/app.css" -> "static/app.css"
fn strip_parent_segments(reference: &str) -> &str {
    let mut rest = reference;
    while let Some(stripped) = rest.strip_prefix(PARENT_SEGMENT) {
        rest = stripped;
    }
    rest
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why wrap scraper::Html in our own Document type?
//    - The rest of the crate never needs to know which HTML parser we use
//    - Swapping parsers later only touches this file
//
// 2. What does filter_map do?
//    - It maps each item to an Option and keeps only the Some values
//    - attr() returns Option<&str>, so elements without the attribute vanish
//
// 3. Why return &str from strip_parent_segments?
//    - Stripping a prefix never needs a new allocation
//    - The returned slice borrows from the attribute value
//    - We only allocate (to_string) for the links we actually keep
// -----------------------------------------------------------------------------
