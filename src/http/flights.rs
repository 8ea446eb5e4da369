use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;

use crate::flights::{Endpoint, FlightEnvelope, FlightError, ProxyRequest};
use crate::http::response::ApiError;
use crate::http::server::AppState;

/// Raw query string. Parsed by hand so bad input still gets the envelope.
#[derive(Debug, Default, Deserialize)]
pub struct FlightParams {
    pub endpoint: Option<String>,
    pub query: Option<String>,
    pub limit: Option<String>,
}

impl FlightParams {
    pub fn into_request(self, default_limit: u32, max_limit: u32) -> Result<ProxyRequest, ApiError> {
        let endpoint = match self.endpoint.as_deref().map(str::trim) {
            None | Some("") => Endpoint::Flights,
            Some(raw) => raw.parse().map_err(ApiError::Validation)?,
        };

        let limit = match self.limit.as_deref().map(str::trim) {
            None | Some("") => default_limit,
            Some(raw) => match raw.parse::<u32>() {
                Ok(n) if n > 0 => n.min(max_limit),
                _ => {
                    return Err(ApiError::Validation(format!(
                        "Invalid limit '{}'. Must be a positive integer",
                        raw
                    )))
                }
            },
        };

        Ok(ProxyRequest {
            endpoint,
            query: self.query.unwrap_or_default().trim().to_string(),
            limit,
        })
    }
}

pub async fn flight_tracker(
    State(state): State<AppState>,
    params: Result<Query<FlightParams>, QueryRejection>,
) -> Result<Json<FlightEnvelope>, ApiError> {
    let tracker = &state.flights;
    if !tracker.is_configured() {
        tracing::warn!("Flight tracker called without an API key");
        return Err(FlightError::NotConfigured.into());
    }

    let Query(params) = params?;
    let request = params.into_request(tracker.default_limit(), tracker.max_limit())?;
    tracing::debug!(
        endpoint = %request.endpoint,
        query = %request.query,
        limit = request.limit,
        "Flight tracker request"
    );

    let envelope = tracker.fetch(&request).await?;
    tracing::info!(
        endpoint = %request.endpoint,
        results = envelope.data.len(),
        "Flight data fetched"
    );
    Ok(Json(envelope))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(endpoint: Option<&str>, query: Option<&str>, limit: Option<&str>) -> FlightParams {
        FlightParams {
            endpoint: endpoint.map(String::from),
            query: query.map(String::from),
            limit: limit.map(String::from),
        }
    }

    #[test]
    fn test_defaults() {
        let req = params(None, None, None).into_request(10, 100).unwrap();
        assert_eq!(req.endpoint, Endpoint::Flights);
        assert_eq!(req.query, "");
        assert_eq!(req.limit, 10);
    }

    #[test]
    fn test_limit_is_clamped() {
        let req = params(Some("airports"), Some(" LHR "), Some("250"))
            .into_request(10, 100)
            .unwrap();
        assert_eq!(req.endpoint, Endpoint::Airports);
        assert_eq!(req.query, "LHR");
        assert_eq!(req.limit, 100);
    }

    #[test]
    fn test_invalid_values() {
        for (endpoint, limit) in [(Some("cargo"), None), (None, Some("0")), (None, Some("ten"))] {
            let err = params(endpoint, None, limit).into_request(10, 100).unwrap_err();
            assert!(matches!(err, ApiError::Validation(_)));
        }
    }
}
