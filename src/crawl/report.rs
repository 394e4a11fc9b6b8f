// src/crawl/report.rs
// =============================================================================
// Bookkeeping for one crawl run.
//
// Batches run concurrently, so they record into CrawlStats (atomic counters
// shared through Arc). When every batch has finished the counters are frozen
// into a plain CrawlReport that can be printed or serialized to JSON.
// =============================================================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use crate::mirror::DownloadOutcome;

// Which required input was blank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingInput {
    BaseUrl,
    DestinationFolder,
}

impl fmt::Display for MissingInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingInput::BaseUrl => write!(f, "base URL is not provided"),
            MissingInput::DestinationFolder => write!(f, "destination folder is not provided"),
        }
    }
}

// How a run ended (an aborted run is an Err instead)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlOutcome {
    /// Validation failed; nothing was fetched
    MissingInput(MissingInput),
    /// Every batch ran to completion
    Completed(CrawlReport),
}

/// Summary of a finished run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlReport {
    pub base_url: String,
    pub destination: String,
    /// Page links found on the seed page
    pub pages_discovered: usize,
    /// Page links whose document could not be fetched
    pub pages_failed: usize,
    pub batches_dispatched: usize,
    pub downloaded: usize,
    pub bytes_downloaded: u64,
    /// Files that were already on disk
    pub already_present: usize,
    /// Paths skipped because another batch had claimed them
    pub deduplicated: usize,
    /// Resources that could not be fetched or written
    pub failed: usize,
}

impl CrawlReport {
    pub fn has_failures(&self) -> bool {
        self.failed > 0 || self.pages_failed > 0
    }
}

// Live counters shared by the orchestrator and its batches
#[derive(Debug, Default)]
pub(crate) struct CrawlStats {
    pages_failed: AtomicUsize,
    downloaded: AtomicUsize,
    bytes_downloaded: AtomicU64,
    already_present: AtomicUsize,
    deduplicated: AtomicUsize,
    failed: AtomicUsize,
}

impl CrawlStats {
    pub(crate) fn page_failed(&self) {
        self.pages_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn deduplicated(&self) {
        self.deduplicated.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn failed(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record(&self, outcome: &DownloadOutcome) {
        match outcome {
            DownloadOutcome::Downloaded { bytes } => {
                self.downloaded.fetch_add(1, Ordering::Relaxed);
                self.bytes_downloaded.fetch_add(*bytes, Ordering::Relaxed);
            }
            DownloadOutcome::AlreadyExists => {
                self.already_present.fetch_add(1, Ordering::Relaxed);
            }
            DownloadOutcome::NotFound { .. } | DownloadOutcome::FetchFailed { .. } => {
                self.failed.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    // Freezes the counters; only meaningful once every batch has been joined
    pub(crate) fn snapshot(
        &self,
        base_url: &str,
        destination: &str,
        pages_discovered: usize,
        batches_dispatched: usize,
    ) -> CrawlReport {
        CrawlReport {
            base_url: base_url.to_string(),
            destination: destination.to_string(),
            pages_discovered,
            pages_failed: self.pages_failed.load(Ordering::Relaxed),
            batches_dispatched,
            downloaded: self.downloaded.load(Ordering::Relaxed),
            bytes_downloaded: self.bytes_downloaded.load(Ordering::Relaxed),
            already_present: self.already_present.load(Ordering::Relaxed),
            deduplicated: self.deduplicated.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}
