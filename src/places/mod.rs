//! Places search passthrough.
//!
//! Served by the auxiliary listener. The upstream JSON is returned to the
//! caller unchanged; only credentials and the text query are added here.

use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::config::PlacesConfig;
use crate::upstream::{UpstreamClient, UpstreamError};

/// Errors produced by the places client.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// No API key configured.
    #[error("Places API not configured")]
    NotConfigured,

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("Invalid places API URL: {0}")]
    InvalidUrl(String),
}

/// A places text search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacesQuery {
    pub destination: String,
    pub category: Option<String>,
}

impl PlacesQuery {
    /// Upstream text query: `"{category} in {destination}"` or the bare destination.
    pub fn text(&self) -> String {
        match self.category.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            Some(category) => format!("{} in {}", category, self.destination.trim()),
            None => self.destination.trim().to_string(),
        }
    }
}

/// Client for the places text-search API.
#[derive(Clone)]
pub struct PlacesClient {
    client: UpstreamClient,
    config: PlacesConfig,
}

impl PlacesClient {
    pub fn new(config: PlacesConfig) -> Result<Self, UpstreamError> {
        let client = UpstreamClient::new("places", config.timeout_secs)?;
        Ok(Self { client, config })
    }

    fn api_key(&self) -> Option<&str> {
        self.config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
    }

    pub fn build_url(&self, api_key: &str, query: &PlacesQuery) -> Result<Url, PlacesError> {
        let raw = format!("{}/textsearch/json", self.config.base_url.trim_end_matches('/'));
        let mut url = Url::parse(&raw).map_err(|e| PlacesError::InvalidUrl(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("query", &query.text())
            .append_pair("key", api_key);
        Ok(url)
    }

    /// Run a text search and return the upstream body verbatim.
    pub async fn search(&self, query: &PlacesQuery) -> Result<Value, PlacesError> {
        let api_key = self.api_key().ok_or(PlacesError::NotConfigured)?;
        let url = self.build_url(api_key, query)?;
        Ok(self.client.get_json(url).await?)
    }
}
