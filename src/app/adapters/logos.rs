//! Logo loading adapters
//!
//! The Top 10 image waits on its logos through the [`LogoSource`] seam. The
//! default source fetches URLs over HTTP and reads everything else from disk;
//! tests substitute their own sources to control timing and failures.

use std::path::Path;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::source::is_remote;
use crate::app::services::results_query::download_link;
use crate::{Error, Result};

/// Loads the raw bytes of a logo
#[async_trait]
pub trait LogoSource: Send + Sync {
    /// Fetch the encoded image behind a logo reference
    async fn load(&self, reference: &str) -> Result<Vec<u8>>;
}

/// Fetches logos over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpLogoSource {
    client: Client,
}

impl HttpLogoSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LogoSource for HttpLogoSource {
    async fn load(&self, reference: &str) -> Result<Vec<u8>> {
        let url = download_link(reference);
        debug!("Fetching logo {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::logo_load(reference, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::logo_load(reference, format!("HTTP status {}", status)));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::logo_load(reference, e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

/// Reads logos from the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FileLogoSource;

#[async_trait]
impl LogoSource for FileLogoSource {
    async fn load(&self, reference: &str) -> Result<Vec<u8>> {
        debug!("Reading logo {}", reference);
        tokio::fs::read(Path::new(reference))
            .await
            .map_err(|e| Error::logo_load(reference, e.to_string()))
    }
}

/// HTTP for URLs, filesystem for everything else
#[derive(Debug, Clone)]
pub struct DefaultLogoSource {
    http: HttpLogoSource,
    file: FileLogoSource,
}

impl DefaultLogoSource {
    pub fn new(client: Client) -> Self {
        Self {
            http: HttpLogoSource::new(client),
            file: FileLogoSource,
        }
    }
}

#[async_trait]
impl LogoSource for DefaultLogoSource {
    async fn load(&self, reference: &str) -> Result<Vec<u8>> {
        if is_remote(reference) {
            self.http.load(reference.trim()).await
        } else {
            self.file.load(reference).await
        }
    }
}
