// src/extract/mod.rs
// =============================================================================
// This module turns fetched HTML into lists of resource paths.
//
// Submodules:
// - links: Document wrapper and the tag/attribute link extractor
// =============================================================================

mod links;

// Re-export so callers write `extract::extract_links()`
pub use links::{extract_links, Document};
