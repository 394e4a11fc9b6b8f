// src/fetch/http.rs
// =============================================================================
// This module fetches pages and files from the site being mirrored over HTTP.
//
// Key functionality:
// - Resolves each relative resource path against the configured base URL
// - Makes HTTP GET requests with one shared client (connection pooling)
// - Parses pages into Documents
// - Streams file bodies so large images never sit fully in memory
//
// Rust concepts:
// - async/await: For network I/O
// - Traits: HttpFetcher implements ResourceFetcher
// - Streams: For reading a response body chunk by chunk
// =============================================================================

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::{Client, Response};
use std::time::Duration;
use url::Url;

use super::{FetchedBytes, ResourceFetcher};
use crate::error::{MirrorError, Result};
use crate::extract::Document;

// Fetches resources relative to one base URL
//
// Cloning is cheap: reqwest::Client is reference counted internally.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    base: Url,
}

impl HttpFetcher {
    // Creates a fetcher for `base_url`
    //
    // Parameters:
    //   base_url: absolute URL every resource path is resolved against
    //   timeout: optional per-request timeout (None = wait as long as it takes)
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let base = Url::parse(base_url).map_err(|source| MirrorError::InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        })?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|source| MirrorError::Fetch {
            path: base_url.to_string(),
            source,
        })?;

        Ok(HttpFetcher { client, base })
    }

    // Joins a relative resource path onto the base URL
    //
    // Examples (base = "https://books.toscrape.com/"):
    //   ""                         -> "https://books.toscrape.com/"
    //   "catalogue/page-2.html"    -> "https://books.toscrape.com/catalogue/page-2.html"
    fn resolve(&self, relative_path: &str) -> Result<Url> {
        self.base
            .join(relative_path)
            .map_err(|source| MirrorError::InvalidBaseUrl {
                url: format!("{}{}", self.base, relative_path),
                source,
            })
    }

    // Sends a GET for `relative_path`, whatever the status turns out to be
    async fn get(&self, relative_path: &str) -> Result<Response> {
        let url = self.resolve(relative_path)?;
        tracing::debug!("GET {}", url);

        self.client
            .get(url)
            .send()
            .await
            .map_err(|source| MirrorError::Fetch {
                path: relative_path.to_string(),
                source,
            })
    }
}

#[async_trait]
impl ResourceFetcher for HttpFetcher {
    async fn fetch_document(&self, relative_path: &str) -> Result<Document> {
        let response = self.get(relative_path).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MirrorError::NonSuccessStatus {
                path: relative_path.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|source| MirrorError::Fetch {
            path: relative_path.to_string(),
            source,
        })?;

        Ok(Document::parse(&body))
    }

    async fn fetch_bytes(&self, relative_path: &str) -> Result<FetchedBytes> {
        let response = self.get(relative_path).await?;

        let status = response.status();
        if !status.is_success() {
            // The caller decides what a missing file means; we just report it
            tracing::warn!("GET {} returned HTTP {}", relative_path, status.as_u16());
            return Ok(FetchedBytes::Missing {
                status: status.as_u16(),
            });
        }

        let path = relative_path.to_string();
        let body = response.bytes_stream().map(move |chunk| {
            chunk
                .map(|bytes| bytes.to_vec())
                .map_err(|source| MirrorError::Fetch {
                    path: path.clone(),
                    source,
                })
        });

        Ok(FetchedBytes::Found(body.boxed()))
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why Url::join instead of string concatenation?
//    - join follows the same rules a browser uses for relative links
//    - "https://site/" + "a/b.html" and "https://site" + "a/b.html" both work
//    - It also validates the result, so bad paths fail early
//
// 2. What is bytes_stream()?
//    - It turns the response body into a Stream of chunks
//    - We can write each chunk to disk as it arrives
//    - Memory use stays flat no matter how large the file is
//
// 3. Why .boxed()?
//    - The exact stream type is long and unnameable
//    - Boxing erases it into BoxStream, which fits our ByteStream alias
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn collect(stream: crate::fetch::ByteStream) -> Vec<u8> {
        let chunks: Vec<Result<Vec<u8>>> = stream.collect().await;
        chunks.into_iter().flat_map(|chunk| chunk.unwrap()).collect()
    }

    #[tokio::test]
    async fn test_fetch_document_from_base() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"<html><a href="catalogue/page-2.html">next</a></html>"#),
            )
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&server.uri(), None).unwrap();
        let document = fetcher.fetch_document("").await.unwrap();

        let links = crate::extract::extract_links(&document, "a", "href");
        assert_eq!(links, vec!["catalogue/page-2.html"]);
    }

    #[tokio::test]
    async fn test_fetch_document_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&server.uri(), None).unwrap();
        let result = fetcher.fetch_document("catalogue/index.html").await;

        assert!(matches!(
            result,
            Err(MirrorError::NonSuccessStatus { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_bytes_relative_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/static/oscar/css/styles.css"))
            .respond_with(ResponseTemplate::new(200).set_body_string("body { margin: 0 }"))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&server.uri(), None).unwrap();
        let fetched = fetcher
            .fetch_bytes("static/oscar/css/styles.css")
            .await
            .unwrap();

        match fetched {
            FetchedBytes::Found(stream) => {
                assert_eq!(collect(stream).await, b"body { margin: 0 }".to_vec());
            }
            FetchedBytes::Missing { status } => panic!("unexpected HTTP {}", status),
        }
    }

    #[tokio::test]
    async fn test_fetch_bytes_not_found_is_not_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&server.uri(), None).unwrap();
        let fetched = fetcher.fetch_bytes("media/missing.jpg").await.unwrap();

        assert!(matches!(fetched, FetchedBytes::Missing { status: 404 }));
    }

    #[test]
    fn test_invalid_base_url() {
        let result = HttpFetcher::new("not a url", None);
        assert!(matches!(result, Err(MirrorError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn test_resolve_keeps_nested_paths() {
        let fetcher = HttpFetcher::new("https://books.toscrape.com", None).unwrap();
        assert_eq!(
            fetcher.resolve("catalogue/category/books/index.html").unwrap().as_str(),
            "https://books.toscrape.com/catalogue/category/books/index.html"
        );
        assert_eq!(
            fetcher.resolve("").unwrap().as_str(),
            "https://books.toscrape.com/"
        );
    }
}
