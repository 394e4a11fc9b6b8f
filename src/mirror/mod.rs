// src/mirror/mod.rs
// =============================================================================
// This module writes remote resources into the local destination folder.
//
// Submodules:
// - path: splits "a/b/c.html" into ("a/b", "c.html")
// - downloader: fetches one resource and streams it to disk
// - dedup: the per-run registry that stops a resource being fetched twice
// =============================================================================

mod dedup;
mod downloader;
mod path;

pub use dedup::DedupRegistry;
pub use downloader::{DownloadOutcome, Downloader};
