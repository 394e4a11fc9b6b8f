// src/error.rs
// =============================================================================
// Error types for the mirroring core.
//
// The application wiring (main.rs, config.rs) uses anyhow::Result like the
// rest of a CLI would. The core modules (extract, fetch, mirror, crawl) return
// MirrorError instead, so callers can tell a bad resource path apart from a
// network failure and decide what to absorb and what to propagate.
//
// Propagation policy:
// - Per-resource download errors are always absorbed by the batch
// - Seed page errors abort the run
// - Per-page errors are logged and the page is skipped
// =============================================================================

use thiserror::Error;

// Everything that can go wrong while mirroring
#[derive(Debug, Error)]
pub enum MirrorError {
    /// A resource path was empty or only whitespace
    #[error("invalid resource path: {0:?}")]
    InvalidArgument(String),

    /// The base URL could not be parsed, or a path could not be joined onto it
    #[error("invalid URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Network or transport failure (connection refused, DNS, broken body...)
    #[error("failed to fetch {path:?}: {source}")]
    Fetch {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered a document request with a non-success status
    #[error("failed to fetch {path:?}: HTTP {status}")]
    NonSuccessStatus { path: String, status: u16 },

    /// Writing a resource to disk failed
    #[error("i/o error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// Short alias used across the core modules
pub type Result<T> = std::result::Result<T, MirrorError>;

impl MirrorError {
    // Helper to attach the file path to an io::Error
    pub fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        MirrorError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
