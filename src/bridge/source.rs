//! Where schemas and the game database come from.

use crate::bridge::error::LoadError;
use crate::config::ServerConfig;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::Url;
use std::time::Duration;

/// Raw document access. Implementations return the response body untouched;
/// parsing happens in the bridge so every source fails the same way on bad
/// JSON.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Body of `GET /schema/{data_type}`.
    async fn fetch_schema(&self, data_type: &str) -> Result<String, LoadError>;

    /// Body of `GET /gdb`.
    async fn fetch_gdb(&self) -> Result<String, LoadError>;
}

/// [`DataSource`] backed by the editor server over HTTP.
pub struct HttpDataSource {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpDataSource {
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .with_context(|| format!("Invalid server base_url {:?}", config.base_url))?;
        if base_url.cannot_be_a_base() {
            bail!("Server base_url {:?} cannot carry a path", config.base_url);
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client, base_url })
    }

    /// Base URL with `segments` appended, each percent-encoded on its own.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_text(&self, url: Url) -> Result<String, LoadError> {
        tracing::debug!(%url, "GET");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| LoadError::fetch(url.as_str(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| LoadError::fetch(url.as_str(), e))
    }
}

#[async_trait]
impl DataSource for HttpDataSource {
    async fn fetch_schema(&self, data_type: &str) -> Result<String, LoadError> {
        self.get_text(self.endpoint(&["schema", data_type])).await
    }

    async fn fetch_gdb(&self) -> Result<String, LoadError> {
        self.get_text(self.endpoint(&["gdb"])).await
    }
}
