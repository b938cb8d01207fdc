//! Sheet source adapter
//!
//! Published sheets are fetched over HTTP(S); anything that is not an HTTP URL
//! is read as a local file, which is how exported copies are processed offline.

use std::path::Path;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info};

use crate::{Error, Result};

const USER_AGENT: &str = concat!("results-processor/", env!("CARGO_PKG_VERSION"));

/// Whether a location should be fetched over HTTP
pub fn is_remote(location: &str) -> bool {
    let location = location.trim_start();
    location.starts_with("http://") || location.starts_with("https://")
}

/// Build the HTTP client shared by sheet and logo fetches
pub fn http_client(timeout_secs: u64) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {}", e)))
}

/// Reads sheet exports from URLs or local files
#[derive(Debug, Clone)]
pub struct SheetSource {
    client: Client,
}

impl SheetSource {
    pub fn new(timeout_secs: u64) -> Result<Self> {
        Ok(Self {
            client: http_client(timeout_secs)?,
        })
    }

    /// Fetch the raw text of a sheet
    pub async fn fetch_text(&self, location: &str) -> Result<String> {
        let text = if is_remote(location) {
            self.fetch_remote(location.trim()).await?
        } else {
            read_local(Path::new(location)).await?
        };

        info!("Read {} bytes from {}", text.len(), location);
        Ok(text)
    }

    async fn fetch_remote(&self, url: &str) -> Result<String> {
        debug!("Fetching {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::source_fetch(url, format!("HTTP status {}", status)));
        }

        Ok(response.text().await?)
    }
}

async fn read_local(path: &Path) -> Result<String> {
    debug!("Reading {}", path.display());
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::io(format!("Failed to read sheet {}", path.display()), e))
}
