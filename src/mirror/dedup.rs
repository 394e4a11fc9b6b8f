// src/mirror/dedup.rs
// =============================================================================
// Remembers which resource paths have already been handled in this run.
//
// Every download batch runs as its own task, and the same stylesheet or logo
// is usually discovered on every page. The registry lets exactly one batch
// "claim" a path; every other batch sees the claim and skips it.
//
// One registry is created per crawl and shared between batches with Arc.
// Entries are never removed.
// =============================================================================

use dashmap::DashSet;

#[derive(Debug, Default)]
pub struct DedupRegistry {
    claimed: DashSet<String>,
}

impl DedupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `resource_path` for this run.
    ///
    /// Returns true for the first caller only; later (or racing) callers with
    /// the exact same string get false.
    pub fn try_claim(&self, resource_path: &str) -> bool {
        self.claimed.insert(resource_path.to_string())
    }

    /// Number of distinct paths claimed so far
    pub fn len(&self) -> usize {
        self.claimed.len()
    }
}
