//! Error envelope and status mapping.
//!
//! # Responsibilities
//! - Convert every handler failure into `{ success: false, error, ... }`
//! - Map error classes to HTTP status codes
//! - Keep upstream details in logs, not in generic client messages
//!
//! # Status Mapping
//! ```text
//! ConfigurationMissing → 400 (+ setup_instructions)
//! Validation           → 400 (including rejected query strings and bodies)
//! PayloadTooLarge      → 413
//! UpstreamData         → 400 (upstream message and code passed through)
//! Upstream             → 500
//! Subprocess           → 500 (underlying message included)
//! request timeout      → 500 (rendered as Upstream by `envelope_timeouts`)
//! ```

use axum::{
    extract::rejection::{BytesRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::archive::ArchiveError;
use crate::config::loader::{ENV_FLIGHTS_API_KEY, ENV_PLACES_API_KEY};
use crate::flights::FlightError;
use crate::places::PlacesError;

/// Failures surfaced to API clients.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required credential is absent.
    #[error("{message}")]
    ConfigurationMissing {
        message: String,
        setup_instructions: Vec<String>,
    },

    /// Missing or invalid request fields.
    #[error("{0}")]
    Validation(String),

    /// Request body over `security.max_body_size`.
    #[error("{0}")]
    PayloadTooLarge(String),

    /// Timeout or non-success response from a third party.
    #[error("{0}")]
    Upstream(String),

    /// The third party answered with an error object in its body.
    #[error("{message}")]
    UpstreamData { message: String, code: Option<String> },

    /// Build or archive subprocess failure.
    #[error("{0}")]
    Subprocess(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::ConfigurationMissing { .. }
            | ApiError::Validation(_)
            | ApiError::UpstreamData { .. } => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Upstream(_) | ApiError::Subprocess(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> Option<String> {
        match self {
            ApiError::ConfigurationMissing { .. } => Some("NOT_CONFIGURED".into()),
            ApiError::Validation(_) => Some("VALIDATION_ERROR".into()),
            ApiError::PayloadTooLarge(_) => Some("PAYLOAD_TOO_LARGE".into()),
            ApiError::Upstream(_) => Some("UPSTREAM_ERROR".into()),
            ApiError::UpstreamData { code, .. } => code.clone(),
            ApiError::Subprocess(_) => Some("ARCHIVE_FAILED".into()),
        }
    }
}

/// Body of every failed response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub setup_instructions: Vec<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        let (error, setup_instructions) = match self {
            ApiError::ConfigurationMissing {
                message,
                setup_instructions,
            } => (message, setup_instructions),
            other => (other.to_string(), Vec::new()),
        };

        let body = ErrorBody {
            success: false,
            error,
            code,
            setup_instructions,
        };

        (status, Json(body)).into_response()
    }
}

impl From<FlightError> for ApiError {
    fn from(err: FlightError) -> Self {
        match err {
            FlightError::NotConfigured => ApiError::ConfigurationMissing {
                message: FlightError::NotConfigured.to_string(),
                setup_instructions: vec![
                    "Sign up for an API key at https://aviationstack.com".to_string(),
                    format!(
                        "Set {} in the server environment or flights.api_key in the config file",
                        ENV_FLIGHTS_API_KEY
                    ),
                    "Restart the server".to_string(),
                ],
            },
            FlightError::UpstreamData { message, code } => ApiError::UpstreamData { message, code },
            FlightError::Upstream(e) => {
                tracing::error!(error = %e, "Flight API request failed");
                ApiError::Upstream("Failed to fetch flight data".to_string())
            }
            FlightError::InvalidUrl(e) => {
                tracing::error!(error = %e, "Flight API URL invalid");
                ApiError::Upstream("Failed to fetch flight data".to_string())
            }
        }
    }
}

impl From<PlacesError> for ApiError {
    fn from(err: PlacesError) -> Self {
        match err {
            PlacesError::NotConfigured => ApiError::ConfigurationMissing {
                message: PlacesError::NotConfigured.to_string(),
                setup_instructions: vec![
                    "Enable the Places API in your Google Cloud project".to_string(),
                    format!(
                        "Set {} in the server environment or places.api_key in the config file",
                        ENV_PLACES_API_KEY
                    ),
                    "Restart the server".to_string(),
                ],
            },
            PlacesError::Upstream(e) => {
                tracing::error!(error = %e, "Places API request failed");
                ApiError::Upstream("Failed to fetch places".to_string())
            }
            PlacesError::InvalidUrl(e) => {
                tracing::error!(error = %e, "Places API URL invalid");
                ApiError::Upstream("Failed to fetch places".to_string())
            }
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(format!(
                "Request body too large: {}",
                rejection.body_text()
            ))
        } else {
            ApiError::Validation(rejection.body_text())
        }
    }
}

/// Replace the timeout layer's bare 408 with the upstream-failure envelope.
pub async fn envelope_timeouts(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        tracing::warn!("Request timed out before the handler finished");
        return ApiError::Upstream("Request timed out".to_string()).into_response();
    }
    response
}

impl From<ArchiveError> for ApiError {
    fn from(err: ArchiveError) -> Self {
        ApiError::Subprocess(format!("Failed to create archive: {}", err))
    }
}
