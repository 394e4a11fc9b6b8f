// src/crawl/backend.rs
// =============================================================================
// The three things the crawler needs from the outside world:
// - fetch a page as a Document
// - pull links out of a Document
// - download one resource into the destination folder
//
// SiteBackend wires these to the real fetcher, the scraper-based extractor
// and the Downloader. Tests give the crawler a fake backend instead, so they
// can count calls without touching the network or the disk.
// =============================================================================

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

use crate::error::Result;
use crate::extract::{self, Document};
use crate::fetch::ResourceFetcher;
use crate::mirror::{DownloadOutcome, Downloader};

#[async_trait]
pub trait CrawlBackend: Send + Sync + 'static {
    async fn fetch_document(&self, relative_path: &str) -> Result<Document>;

    fn extract_links(&self, document: &Document, tag_name: &str, attribute_name: &str)
        -> Vec<String>;

    async fn download(&self, resource_path: &str, destination_root: &Path)
        -> Result<DownloadOutcome>;
}

pub struct SiteBackend {
    fetcher: Arc<dyn ResourceFetcher>,
    downloader: Downloader,
}

impl SiteBackend {
    pub fn new(fetcher: Arc<dyn ResourceFetcher>) -> Self {
        let downloader = Downloader::new(Arc::clone(&fetcher));
        SiteBackend { fetcher, downloader }
    }
}

#[async_trait]
impl CrawlBackend for SiteBackend {
    async fn fetch_document(&self, relative_path: &str) -> Result<Document> {
        self.fetcher.fetch_document(relative_path).await
    }

    fn extract_links(
        &self,
        document: &Document,
        tag_name: &str,
        attribute_name: &str,
    ) -> Vec<String> {
        extract::extract_links(document, tag_name, attribute_name)
    }

    async fn download(
        &self,
        resource_path: &str,
        destination_root: &Path,
    ) -> Result<DownloadOutcome> {
        self.downloader.download(resource_path, destination_root).await
    }
}
