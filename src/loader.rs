// src/loader.rs
// =============================================================================
// Loads raw bytes for a URL, from the network or the local file system.
//
// Supported schemes:
// - http / https: fetched with a shared reqwest Client
// - file: read with tokio::fs (lets you crawl a site mirrored on disk)
//
// Both the page fetcher and the image source use this, so they share one
// connection pool and one timeout policy.
//
// Rust concepts:
// - Client is cheap to clone (it's an Arc internally), so every task can
//   hold its own copy
// - thiserror enum to say WHY a load failed, for the log line
// =============================================================================

use std::time::Duration;

use reqwest::{Client, StatusCode};
use thiserror::Error;
use url::Url;

/// Why a URL could not be loaded.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported URL scheme '{0}'")]
    UnsupportedScheme(String),

    #[error("HTTP {0}")]
    Status(StatusCode),

    #[error("request timed out")]
    Timeout,

    #[error("too many redirects")]
    TooManyRedirects,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("network error: {0}")]
    Network(reqwest::Error),

    #[error("file error: {0}")]
    Io(#[from] std::io::Error),
}

/// Fetches bytes for http(s) and file URLs.
#[derive(Debug, Clone)]
pub struct Loader {
    client: Client,
}

impl Loader {
    /// Builds a loader whose HTTP requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, LoadError> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(LoadError::Network)?;
        Ok(Self { client })
    }

    /// Loads the body at `url` as bytes.
    pub async fn bytes(&self, url: &str) -> Result<Vec<u8>, LoadError> {
        let parsed = Url::parse(url).map_err(|source| LoadError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        match parsed.scheme() {
            "http" | "https" => self.fetch_http(url).await,
            "file" => {
                let path = parsed
                    .to_file_path()
                    .map_err(|_| LoadError::UnsupportedScheme("file".to_string()))?;
                Ok(tokio::fs::read(path).await?)
            }
            other => Err(LoadError::UnsupportedScheme(other.to_string())),
        }
    }

    /// Loads the body at `url` as text (lossy UTF-8).
    pub async fn text(&self, url: &str) -> Result<String, LoadError> {
        let bytes = self.bytes(url).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    async fn fetch_http(&self, url: &str) -> Result<Vec<u8>, LoadError> {
        let response = self.client.get(url).send().await.map_err(categorize_error)?;

        if !response.status().is_success() {
            return Err(LoadError::Status(response.status()));
        }

        let body = response.bytes().await.map_err(categorize_error)?;
        Ok(body.to_vec())
    }
}

// Maps reqwest's error flags onto our own categories
fn categorize_error(error: reqwest::Error) -> LoadError {
    if error.is_timeout() {
        LoadError::Timeout
    } else if error.is_redirect() {
        LoadError::TooManyRedirects
    } else if error.is_connect() {
        LoadError::Connect(error.to_string())
    } else {
        LoadError::Network(error)
    }
}
