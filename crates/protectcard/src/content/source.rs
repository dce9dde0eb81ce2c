//! Where a client session gets its content document from.

use std::path::PathBuf;

use tracing::debug;

use super::ContentDocument;
use crate::error::{Error, Result};

/// Path of the read endpoint on the content server.
pub const SCENARIOS_PATH: &str = "/api/scenarios";

/// A provider of the content document, awaited once at session start.
#[async_trait::async_trait]
pub trait ContentSource: Send + Sync {
    /// Short description for logs.
    fn describe(&self) -> String;

    /// Fetch and parse the content document.
    ///
    /// # Errors
    ///
    /// Returns an error on any network, I/O or parse failure.
    async fn fetch(&self) -> Result<ContentDocument>;
}

/// Reads the content document straight from disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a source for the given file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl ContentSource for FileSource {
    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }

    async fn fetch(&self) -> Result<ContentDocument> {
        debug!("Reading content from {}", self.path.display());
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| Error::ContentRead {
                path: self.path.clone(),
                source,
            })?;
        ContentDocument::from_json(&text)
    }
}

/// Fetches the content document from a running content server.
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

impl HttpSource {
    /// Create a source for the server at `base_url` (e.g. `http://localhost:3000`).
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            url: format!("{}{SCENARIOS_PATH}", base_url.trim_end_matches('/')),
            client: reqwest::Client::new(),
        }
    }

    /// The full endpoint URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait::async_trait]
impl ContentSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<ContentDocument> {
        debug!("Fetching content from {}", self.url);
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::content_fetch(&self.url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::content_fetch(&self.url, format!("status {status}")));
        }

        response
            .json::<ContentDocument>()
            .await
            .map_err(|e| Error::content_fetch(&self.url, e.to_string()))
    }
}
