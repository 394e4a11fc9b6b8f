// src/fetch/mod.rs
// =============================================================================
// This module fetches pages and files relative to the site being mirrored.
//
// Submodules:
// - http: the reqwest-backed fetcher used by the real crawl
//
// The ResourceFetcher trait is the seam between "where do bytes come from"
// and "what do we do with them". The downloader only talks to the trait, so
// tests can hand it an in-memory fetcher instead of a web server.
// =============================================================================

mod http;

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::error::Result;
use crate::extract::Document;

pub use http::HttpFetcher;

// A response body, delivered chunk by chunk
pub type ByteStream = BoxStream<'static, Result<Vec<u8>>>;

// Result of asking for a file's bytes
//
// A non-success HTTP status is an ordinary answer ("that file isn't there"),
// not an error, so it is a variant here rather than an Err.
pub enum FetchedBytes {
    /// 2xx response; the body is streamed
    Found(ByteStream),
    /// Any other status
    Missing { status: u16 },
}

#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    /// Fetches `relative_path` and parses it as HTML.
    ///
    /// Transport failures and non-success statuses are both errors here.
    async fn fetch_document(&self, relative_path: &str) -> Result<Document>;

    /// Fetches `relative_path` as raw bytes.
    async fn fetch_bytes(&self, relative_path: &str) -> Result<FetchedBytes>;
}
