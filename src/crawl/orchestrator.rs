// src/crawl/orchestrator.rs
// =============================================================================
// This module drives one mirroring pass over a website.
//
// How it works:
// 1. Check that we were given a base URL and a destination folder
// 2. Fetch the seed page and collect its page links (<a href>)
// 3. Start downloading those pages in the background
// 4. Visit each page link in turn and collect its stylesheets (<link href>),
//    images (<img src>) and scripts (<script src>)
// 5. Start one background batch per list
// 6. Wait for every batch to finish
//
// Discovery is sequential (one page after another), downloads are not: each
// batch is its own tokio task, so a slow image on page 1 never holds up link
// discovery on page 2.
//
// The same stylesheet or logo usually shows up on every page. All batches
// share one DedupRegistry, so the first batch to reach a path claims it and
// every other batch skips it.
//
// Rust concepts:
// - Generics: Crawler<B> works with any CrawlBackend
// - Arc: shared ownership of the backend/registry across tasks
// - JoinSet: a set of spawned tasks we can wait on together
// =============================================================================

use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinSet;

use super::backend::CrawlBackend;
use super::report::{CrawlOutcome, CrawlStats, MissingInput};
use crate::error::Result;
use crate::extract::Document;
use crate::mirror::DedupRegistry;

// The seed page is the base URL itself
const SEED_PATH: &str = "";

// What a batch holds; also decides which tag/attribute pair produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BatchKind {
    Pages,
    Stylesheets,
    Images,
    Scripts,
}

impl BatchKind {
    // Per-page batches, in the order they are extracted
    const PAGE_RESOURCES: [BatchKind; 3] =
        [BatchKind::Stylesheets, BatchKind::Images, BatchKind::Scripts];

    fn selector(self) -> (&'static str, &'static str) {
        match self {
            BatchKind::Pages => ("a", "href"),
            BatchKind::Stylesheets => ("link", "href"),
            BatchKind::Images => ("img", "src"),
            BatchKind::Scripts => ("script", "src"),
        }
    }

    fn label(self) -> &'static str {
        match self {
            BatchKind::Pages => "pages",
            BatchKind::Stylesheets => "stylesheets",
            BatchKind::Images => "images",
            BatchKind::Scripts => "scripts",
        }
    }
}

// Resource paths from one document for one tag/attribute pair
#[derive(Debug)]
struct DownloadBatch {
    kind: BatchKind,
    source_page: String,
    paths: Vec<String>,
}

// Everything a batch task needs, cheap to clone into each task
#[derive(Clone)]
struct RunContext {
    destination_root: Arc<PathBuf>,
    registry: Arc<DedupRegistry>,
    stats: Arc<CrawlStats>,
}

pub struct Crawler<B> {
    backend: Arc<B>,
}

impl<B: CrawlBackend> Crawler<B> {
    pub fn new(backend: B) -> Self {
        Crawler {
            backend: Arc::new(backend),
        }
    }

    // Mirrors `base_url` and the pages it links to into `destination`
    //
    // Returns:
    //   Ok(MissingInput) if either input is blank (nothing is fetched)
    //   Ok(Completed) once every batch has finished, even if some resources failed
    //   Err if the seed page cannot be fetched
    pub async fn run(&self, base_url: &str, destination: &str) -> Result<CrawlOutcome> {
        match missing_input(base_url, destination) {
            Some(MissingInput::BaseUrl) => {
                tracing::error!("Mirroring cannot be started as the base URL is not provided");
                return Ok(CrawlOutcome::MissingInput(MissingInput::BaseUrl));
            }
            Some(MissingInput::DestinationFolder) => {
                tracing::error!(
                    "Mirroring cannot be started for {} as the destination folder is not provided",
                    base_url
                );
                return Ok(CrawlOutcome::MissingInput(MissingInput::DestinationFolder));
            }
            None => {}
        }

        tracing::info!("Mirroring started for {}", base_url);

        // One registry per run, shared by every batch of this run only
        let context = RunContext {
            destination_root: Arc::new(PathBuf::from(destination)),
            registry: Arc::new(DedupRegistry::new()),
            stats: Arc::new(CrawlStats::default()),
        };
        let mut batches = JoinSet::new();

        let page_links = {
            let seed = self.backend.fetch_document(SEED_PATH).await?;
            self.extract(&seed, BatchKind::Pages)
        };
        tracing::info!("Found {} page link(s) on the seed page", page_links.len());

        self.dispatch(
            &mut batches,
            &context,
            DownloadBatch {
                kind: BatchKind::Pages,
                source_page: SEED_PATH.to_string(),
                paths: page_links.clone(),
            },
        );

        for page_link in &page_links {
            let resource_batches = match self.backend.fetch_document(page_link).await {
                Ok(document) => BatchKind::PAGE_RESOURCES.map(|kind| DownloadBatch {
                    kind,
                    source_page: page_link.clone(),
                    paths: self.extract(&document, kind),
                }),
                Err(e) => {
                    // One unreachable page shouldn't cost us the rest of the site
                    tracing::warn!("Skipping page {}: {}", page_link, e);
                    context.stats.page_failed();
                    continue;
                }
            };

            for batch in resource_batches {
                self.dispatch(&mut batches, &context, batch);
            }
        }

        let batches_dispatched = batches.len();
        tracing::debug!("Waiting for {} download batch(es)", batches_dispatched);

        while let Some(joined) = batches.join_next().await {
            if let Err(e) = joined {
                tracing::error!("Download batch stopped unexpectedly: {}", e);
                context.stats.failed();
            }
        }

        let report = context.stats.snapshot(
            base_url,
            destination,
            page_links.len(),
            batches_dispatched,
        );

        tracing::debug!("{} distinct resource(s) claimed", context.registry.len());
        tracing::info!("Mirroring completed for {}", base_url);
        Ok(CrawlOutcome::Completed(report))
    }

    fn extract(&self, document: &Document, kind: BatchKind) -> Vec<String> {
        let (tag_name, attribute_name) = kind.selector();
        self.backend.extract_links(document, tag_name, attribute_name)
    }

    // Starts a batch in the background; it is only awaited at the end of run()
    fn dispatch(&self, batches: &mut JoinSet<()>, context: &RunContext, batch: DownloadBatch) {
        tracing::debug!(
            "Dispatching {} {} from {:?}",
            batch.paths.len(),
            batch.kind.label(),
            batch.source_page
        );
        batches.spawn(process_batch(
            Arc::clone(&self.backend),
            context.clone(),
            batch,
        ));
    }
}

// Checks that both required inputs are present (non-blank)
pub fn missing_input(base_url: &str, destination: &str) -> Option<MissingInput> {
    if base_url.trim().is_empty() {
        Some(MissingInput::BaseUrl)
    } else if destination.trim().is_empty() {
        Some(MissingInput::DestinationFolder)
    } else {
        None
    }
}

// Claims and downloads each path of a batch, in order
//
// Nothing in here can fail the batch: every problem is logged and counted,
// then we move on to the next path.
async fn process_batch<B: CrawlBackend>(backend: Arc<B>, context: RunContext, batch: DownloadBatch) {
    for resource_path in &batch.paths {
        if !context.registry.try_claim(resource_path) {
            tracing::info!("File already downloaded: {}", resource_path);
            context.stats.deduplicated();
            continue;
        }

        match backend.download(resource_path, &context.destination_root).await {
            Ok(outcome) => context.stats.record(&outcome),
            Err(e) => {
                tracing::error!("Failed to download {}: {}", resource_path, e);
                context.stats.failed();
            }
        }
    }

    tracing::debug!(
        "Finished {} batch from {:?}",
        batch.kind.label(),
        batch.source_page
    );
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is a JoinSet?
//    - A collection of spawned tasks
//    - spawn() starts a task immediately and keeps its handle
//    - join_next() waits for whichever task finishes next
//    - Looping until it returns None waits for all of them
//
// 2. Why is the registry claimed BEFORE downloading?
//    - If we checked "already downloaded?" and marked it afterwards, two
//      batches could both pass the check while the first is still downloading
//    - Claiming first means exactly one batch ever downloads a given path
//
// 3. Why does a failed page not stop the crawl?
//    - The seed page is essential: without it there is nothing to crawl
//    - Any single linked page is not; we log it and carry on
//
// 4. What does BatchKind::PAGE_RESOURCES.map(...) do?
//    - Arrays have a map() method that returns a new array of the same size
//    - Here it turns 3 kinds into 3 batches in one expression
// -----------------------------------------------------------------------------
