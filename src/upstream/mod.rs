//! Outbound HTTP to third-party APIs.
//!
//! # Responsibilities
//! - One shared `reqwest::Client` per upstream, built with a fixed timeout
//! - Issue exactly one GET per call (no retries)
//! - Classify failures: timeout, non-success status, transport, bad JSON
//!
//! # Design Decisions
//! - Timeouts are applied by the client, so every call is bounded
//! - Callers get the decoded JSON body and decide what an embedded
//!   error object means for them

use std::time::{Duration, Instant};

use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::observability::metrics;

/// Errors from a single upstream call.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The call did not complete within the configured timeout.
    #[error("upstream request timed out after {0} seconds")]
    Timeout(u64),

    /// The upstream answered with a non-success status.
    #[error("upstream returned HTTP {0}")]
    Status(u16),

    /// Connection or protocol failure.
    #[error("upstream request failed: {0}")]
    Transport(String),

    /// The body was not valid JSON.
    #[error("upstream returned an unreadable body: {0}")]
    Decode(String),

    /// Client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

/// Result type for upstream calls.
pub type UpstreamResult<T> = Result<T, UpstreamError>;

/// A named, timeout-bounded JSON client for one upstream service.
#[derive(Clone)]
pub struct UpstreamClient {
    name: &'static str,
    client: reqwest::Client,
    timeout_secs: u64,
}

impl UpstreamClient {
    /// Create a client whose every request is bounded by `timeout_secs`.
    pub fn new(name: &'static str, timeout_secs: u64) -> UpstreamResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| UpstreamError::Client(e.to_string()))?;

        Ok(Self {
            name,
            client,
            timeout_secs,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Issue a single GET and decode the JSON body.
    pub async fn get_json(&self, url: Url) -> UpstreamResult<Value> {
        let start = Instant::now();
        let result = self.send(url).await;

        let outcome = match &result {
            Ok(_) => "success",
            Err(UpstreamError::Timeout(_)) => "timeout",
            Err(UpstreamError::Status(_)) => "status",
            Err(_) => "error",
        };
        metrics::record_upstream(self.name, outcome, start);

        result
    }

    async fn send(&self, url: Url) -> UpstreamResult<Value> {
        // Never log the URL: it carries the access key.
        tracing::debug!(upstream = self.name, path = url.path(), "Calling upstream");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(upstream = self.name, status = status.as_u16(), "Upstream returned error status");
            return Err(UpstreamError::Status(status.as_u16()));
        }

        response.json::<Value>().await.map_err(|e| {
            if e.is_timeout() {
                UpstreamError::Timeout(self.timeout_secs)
            } else {
                UpstreamError::Decode(e.without_url().to_string())
            }
        })
    }

    fn classify(&self, e: reqwest::Error) -> UpstreamError {
        if e.is_timeout() {
            tracing::warn!(upstream = self.name, timeout_secs = self.timeout_secs, "Upstream timed out");
            UpstreamError::Timeout(self.timeout_secs)
        } else {
            let e = e.without_url();
            tracing::warn!(upstream = self.name, error = %e, "Upstream transport error");
            UpstreamError::Transport(e.to_string())
        }
    }
}
