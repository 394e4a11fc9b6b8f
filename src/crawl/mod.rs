// src/crawl/mod.rs
// =============================================================================
// This module handles the mirroring crawl.
//
// Features:
// - Fetches a seed page and every page it links to (one level deep)
// - Collects stylesheets, images and local scripts from each page
// - Downloads everything concurrently, one task per batch of links
// - Never downloads the same resource twice in one run
//
// Submodules:
// - backend: the fetch/extract/download seam and its real implementation
// - orchestrator: the Crawler that drives a run
// - report: run outcome and counters
// =============================================================================

mod backend;
mod orchestrator;
mod report;

// Re-export the pieces main.rs needs
pub use backend::SiteBackend;
pub use orchestrator::{missing_input, Crawler};
pub use report::{CrawlOutcome, CrawlReport};
