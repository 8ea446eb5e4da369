//! Flight data upstream fetcher.

use serde_json::Value;
use url::Url;

use crate::config::FlightApiConfig;
use crate::flights::query::QueryTerm;
use crate::flights::types::{FlightEnvelope, FlightError, ProxyRequest};
use crate::upstream::{UpstreamClient, UpstreamError};

/// Proxies flight, airport, airline and route lookups to the upstream API.
#[derive(Clone)]
pub struct FlightTracker {
    client: UpstreamClient,
    config: FlightApiConfig,
}

impl FlightTracker {
    pub fn new(config: FlightApiConfig) -> Result<Self, UpstreamError> {
        let client = UpstreamClient::new("aviationstack", config.timeout_secs)?;
        Ok(Self { client, config })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key().is_some()
    }

    pub fn default_limit(&self) -> u32 {
        self.config.default_limit
    }

    pub fn max_limit(&self) -> u32 {
        self.config.max_limit
    }

    fn api_key(&self) -> Option<&str> {
        self.config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
    }

    /// Build the upstream URL for a request.
    pub fn build_url(&self, api_key: &str, request: &ProxyRequest) -> Result<Url, FlightError> {
        let raw = format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            request.endpoint.as_str()
        );
        let mut url = Url::parse(&raw).map_err(|e| FlightError::InvalidUrl(e.to_string()))?;

        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("access_key", api_key)
                .append_pair("limit", &request.limit.to_string());
            if let Some(term) = QueryTerm::classify(&request.query) {
                let (name, value) = term.param();
                pairs.append_pair(name, value);
            }
        }

        Ok(url)
    }

    /// Fetch one page of results. Exactly one outbound call, no retries.
    pub async fn fetch(&self, request: &ProxyRequest) -> Result<FlightEnvelope, FlightError> {
        let api_key = self.api_key().ok_or(FlightError::NotConfigured)?;
        let url = self.build_url(api_key, request)?;

        let body = self.client.get_json(url).await?;

        if let Some(err) = embedded_error(&body) {
            tracing::warn!(
                endpoint = %request.endpoint,
                code = ?err.1,
                "Flight API reported an error"
            );
            return Err(FlightError::UpstreamData {
                message: err.0,
                code: err.1,
            });
        }

        Ok(into_envelope(body, request))
    }
}

/// Extract `{ "error": { "message", "code" } }` from an upstream body.
fn embedded_error(body: &Value) -> Option<(String, Option<String>)> {
    let error = body.get("error").filter(|e| !e.is_null())?;

    let message = error
        .get("message")
        .or_else(|| error.get("info"))
        .and_then(Value::as_str)
        .unwrap_or("Unknown error from flight API")
        .to_string();

    let code = error.get("code").and_then(|c| match c {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    });

    Some((message, code))
}

fn into_envelope(mut body: Value, request: &ProxyRequest) -> FlightEnvelope {
    let data = match body.get_mut("data").map(Value::take) {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    };
    let pagination = body
        .get_mut("pagination")
        .map(Value::take)
        .filter(|p| !p.is_null());

    FlightEnvelope {
        success: true,
        data,
        pagination,
        endpoint: request.endpoint,
        query: request.query.clone(),
        limit: request.limit,
    }
}
