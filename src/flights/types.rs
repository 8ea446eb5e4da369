//! Flight tracker request and response types.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::upstream::UpstreamError;

/// Upstream collection being queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Endpoint {
    Flights,
    Airports,
    Airlines,
    Routes,
}

impl Endpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Flights => "flights",
            Endpoint::Airports => "airports",
            Endpoint::Airlines => "airlines",
            Endpoint::Routes => "routes",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Endpoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flights" => Ok(Endpoint::Flights),
            "airports" => Ok(Endpoint::Airports),
            "airlines" => Ok(Endpoint::Airlines),
            "routes" => Ok(Endpoint::Routes),
            other => Err(format!(
                "Invalid endpoint '{}'. Expected one of: flights, airports, airlines, routes",
                other
            )),
        }
    }
}

/// A validated flight tracker request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyRequest {
    pub endpoint: Endpoint,
    pub query: String,
    /// Always at least 1.
    pub limit: u32,
}

/// Successful flight tracker response.
#[derive(Debug, Clone, Serialize)]
pub struct FlightEnvelope {
    pub success: bool,
    pub data: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Value>,
    pub endpoint: Endpoint,
    pub query: String,
    pub limit: u32,
}

/// Errors produced by the flight tracker.
#[derive(Debug, Error)]
pub enum FlightError {
    /// No access key configured.
    #[error("Flight tracking API not configured")]
    NotConfigured,

    /// Timeout, bad status or unreadable body from the upstream.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// The upstream answered 2xx but its body carries an error object.
    #[error("{message}")]
    UpstreamData { message: String, code: Option<String> },

    /// Base URL could not be combined with the endpoint.
    #[error("Invalid flight API URL: {0}")]
    InvalidUrl(String),
}
