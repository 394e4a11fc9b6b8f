// src/test_support.rs
// =============================================================================
// Helpers shared by the unit tests.
//
// - LogCapture: collects formatted log lines so tests can assert on them
// - StaticFetcher: an in-memory ResourceFetcher with request counters
// =============================================================================

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

use crate::error::{MirrorError, Result};
use crate::extract::Document;
use crate::fetch::{FetchedBytes, ResourceFetcher};

// Shared buffer that a test-local tracing subscriber writes into
#[derive(Clone, Default)]
pub struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

pub struct CaptureWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl io::Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = CaptureWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CaptureWriter {
            buffer: Arc::clone(&self.buffer),
        }
    }
}

impl LogCapture {
    // Routes this thread's logs into the buffer until the guard is dropped
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock().unwrap()).into_owned()
    }

    // Number of log lines at `level` whose text contains `needle`
    pub fn count(&self, level: &str, needle: &str) -> usize {
        self.contents()
            .lines()
            .filter(|line| line.contains(level) && line.contains(needle))
            .count()
    }
}

// Serves pages and files from memory
#[derive(Default)]
pub struct StaticFetcher {
    pages: HashMap<String, String>,
    files: HashMap<String, Vec<u8>>,
    broken: HashSet<String>,
    document_requests: AtomicUsize,
    byte_requests: AtomicUsize,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    // A page served both as a document and as downloadable bytes
    pub fn with_page(mut self, path: &str, html: &str) -> Self {
        self.pages.insert(path.to_string(), html.to_string());
        self.files.insert(path.to_string(), html.as_bytes().to_vec());
        self
    }

    pub fn with_file(mut self, path: &str, contents: &[u8]) -> Self {
        self.files.insert(path.to_string(), contents.to_vec());
        self
    }

    // Requests for this path fail with an error (HTTP 404) instead of a
    // document or a Missing body
    pub fn with_broken(mut self, path: &str) -> Self {
        self.broken.insert(path.to_string());
        self
    }

    pub fn document_requests(&self) -> usize {
        self.document_requests.load(Ordering::SeqCst)
    }

    pub fn byte_requests(&self) -> usize {
        self.byte_requests.load(Ordering::SeqCst)
    }

    fn not_found(path: &str) -> MirrorError {
        MirrorError::NonSuccessStatus {
            path: path.to_string(),
            status: 404,
        }
    }
}

#[async_trait]
impl ResourceFetcher for StaticFetcher {
    async fn fetch_document(&self, relative_path: &str) -> Result<Document> {
        self.document_requests.fetch_add(1, Ordering::SeqCst);

        if self.broken.contains(relative_path) {
            return Err(Self::not_found(relative_path));
        }
        match self.pages.get(relative_path) {
            Some(html) => Ok(Document::parse(html)),
            None => Err(Self::not_found(relative_path)),
        }
    }

    async fn fetch_bytes(&self, relative_path: &str) -> Result<FetchedBytes> {
        self.byte_requests.fetch_add(1, Ordering::SeqCst);

        if self.broken.contains(relative_path) {
            return Err(Self::not_found(relative_path));
        }
        match self.files.get(relative_path) {
            Some(contents) => {
                let body = futures::stream::iter(vec![Ok::<_, MirrorError>(contents.clone())]);
                Ok(FetchedBytes::Found(Box::pin(body)))
            }
            None => Ok(FetchedBytes::Missing { status: 404 }),
        }
    }
}
