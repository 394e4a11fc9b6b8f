// src/mirror/downloader.rs
// =============================================================================
// This module copies one remote resource into the destination folder.
//
// How it works:
// 1. Split the resource path into folder + file name, refusing any path
//    that would land outside the destination folder
// 2. If the file is already on disk, skip it (no network call at all)
// 3. Create the folder (and any parents) if needed
// 4. Ask the fetcher for the bytes
// 5. Missing on the server? Log it and move on, nothing is written
// 6. Otherwise stream the body straight into the file
//
// The remote layout is mirrored verbatim:
//   "catalogue/category/books/index.html"
//     -> <destination>/catalogue/category/books/index.html
// =============================================================================

use futures::StreamExt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;

use super::path::split_path;
use crate::error::{MirrorError, Result};
use crate::fetch::{ByteStream, FetchedBytes, ResourceFetcher};

// What happened to one resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The file was written; holds the number of bytes copied
    Downloaded { bytes: u64 },
    /// The destination file was already on disk
    AlreadyExists,
    /// The server answered with a non-success status
    NotFound { status: u16 },
    /// The request itself failed (connection refused, DNS, ...)
    FetchFailed { reason: String },
}

pub struct Downloader {
    fetcher: Arc<dyn ResourceFetcher>,
}

impl Downloader {
    pub fn new(fetcher: Arc<dyn ResourceFetcher>) -> Self {
        Downloader { fetcher }
    }

    // Mirrors `resource_path` under `destination_root`
    //
    // Returns:
    //   Ok(outcome) for every "normal" result, including missing files
    //   Err(InvalidArgument) if the resource path is blank, names a folder,
    //     or contains ".." (nothing is fetched in that case)
    //   Err(Io / Fetch) if writing the file fails partway
    pub async fn download(
        &self,
        resource_path: &str,
        destination_root: &Path,
    ) -> Result<DownloadOutcome> {
        let split = split_path(resource_path)?;
        let (destination_dir, destination_file) = split.locate_under(destination_root)?;

        if is_existing_file(&destination_file).await? {
            tracing::info!("Skipping download, file already exists: {}", resource_path);
            return Ok(DownloadOutcome::AlreadyExists);
        }

        // create_dir_all is fine with another batch creating the same folder
        tokio::fs::create_dir_all(&destination_dir)
            .await
            .map_err(|e| MirrorError::io(&destination_dir, e))?;

        tracing::info!("Downloading file: {}", resource_path);

        let body = match self.fetcher.fetch_bytes(resource_path).await {
            Ok(FetchedBytes::Found(body)) => body,
            Ok(FetchedBytes::Missing { status }) => {
                tracing::error!("File not found: {} (HTTP {})", resource_path, status);
                return Ok(DownloadOutcome::NotFound { status });
            }
            Err(e) => {
                tracing::error!("Failed to fetch {}: {}", resource_path, e);
                return Ok(DownloadOutcome::FetchFailed {
                    reason: e.to_string(),
                });
            }
        };

        let bytes = write_body(destination_file, body).await?;
        tracing::debug!("Wrote {} bytes for {}", bytes, resource_path);

        Ok(DownloadOutcome::Downloaded { bytes })
    }
}

// True only for a regular file; a folder at that location doesn't count
async fn is_existing_file(path: &Path) -> Result<bool> {
    match tokio::fs::metadata(path).await {
        Ok(metadata) => Ok(metadata.is_file()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(MirrorError::io(path, e)),
    }
}

// Streams `body` into `path`, creating or truncating the file
//
// The file handle lives only inside this function, so it is closed on every
// return path, including a failure halfway through the copy. A partial file
// can remain in that case.
async fn write_body(path: PathBuf, mut body: ByteStream) -> Result<u64> {
    let mut file = tokio::fs::File::create(&path)
        .await
        .map_err(|e| MirrorError::io(&path, e))?;

    let mut written = 0u64;
    while let Some(chunk) = body.next().await {
        let chunk = chunk?;
        file.write_all(&chunk)
            .await
            .map_err(|e| MirrorError::io(&path, e))?;
        written += chunk.len() as u64;
    }

    file.flush().await.map_err(|e| MirrorError::io(&path, e))?;
    Ok(written)
}
