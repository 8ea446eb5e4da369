//! Flight tracker proxy tests against a mock upstream.

use std::time::Duration;

use axum::http::StatusCode;
use travel_proxy::config::AppConfig;
use travel_proxy::http::build_router;

mod common;

use common::{body_json, get, send, start_fixed_upstream, start_stalled_upstream, MockUpstream};

const FLIGHTS_BODY: &str = r#"{
    "pagination": {"limit": 10, "offset": 0, "count": 1, "total": 1},
    "data": [{"flight": {"iata": "BA456"}, "flight_status": "scheduled"}]
}"#;

fn config_for(upstream: &MockUpstream, api_key: Option<&str>) -> AppConfig {
    let mut config = AppConfig::default();
    config.flights.base_url = upstream.base_url("/v1");
    config.flights.api_key = api_key.map(String::from);
    config
}

fn app(config: &AppConfig) -> axum::Router {
    build_router(config, common::test_state(config))
}

#[tokio::test]
async fn test_missing_key_returns_setup_instructions_without_network() {
    let upstream = start_fixed_upstream(200, FLIGHTS_BODY).await;
    let config = config_for(&upstream, None);

    let response = send(app(&config), get("/flight-tracker?query=BA456")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert!(json["error"].as_str().unwrap().contains("not configured"));
    assert!(!json["setup_instructions"].as_array().unwrap().is_empty());
    assert_eq!(upstream.calls(), 0, "No upstream call without a key");
}

#[tokio::test]
async fn test_flight_number_query() {
    let upstream = start_fixed_upstream(200, FLIGHTS_BODY).await;
    let config = config_for(&upstream, Some("test-key"));

    let response = send(app(&config), get("/flight-tracker?endpoint=flights&query=ba456")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["endpoint"], "flights");
    assert_eq!(json["query"], "ba456");
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["pagination"]["total"], 1);

    assert_eq!(upstream.calls(), 1);
    let lines = upstream.request_lines();
    let line = &lines[0];
    assert!(
        line.starts_with("GET /v1/flights?access_key=test-key&limit=10&flight_iata=BA456 "),
        "unexpected request line: {line}"
    );
}

#[tokio::test]
async fn test_airport_code_query() {
    let upstream = start_fixed_upstream(200, r#"{"data": []}"#).await;
    let config = config_for(&upstream, Some("test-key"));

    let response = send(app(&config), get("/flight-tracker?endpoint=routes&query=LHR&limit=3")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["endpoint"], "routes");
    assert_eq!(json["limit"], 3);
    assert!(json.get("pagination").is_none());

    let lines = upstream.request_lines();
    let line = &lines[0];
    assert!(line.contains("/v1/routes?"), "{line}");
    assert!(line.contains("limit=3"), "{line}");
    assert!(line.contains("dep_iata=LHR"), "{line}");
    assert!(!line.contains("flight_iata"), "{line}");
}

#[tokio::test]
async fn test_missing_data_becomes_empty_array() {
    let upstream = start_fixed_upstream(200, r#"{"pagination": null}"#).await;
    let config = config_for(&upstream, Some("test-key"));

    let response = send(app(&config), get("/flight-tracker")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"], serde_json::json!([]));

    let lines = upstream.request_lines();
    let line = &lines[0];
    assert!(!line.contains("iata"), "empty query adds no filter: {line}");
}

#[tokio::test]
async fn test_upstream_error_object_passes_through() {
    let upstream = start_fixed_upstream(
        200,
        r#"{"error": {"code": "usage_limit_reached", "message": "Monthly usage limit reached"}}"#,
    )
    .await;
    let config = config_for(&upstream, Some("test-key"));

    let response = send(app(&config), get("/flight-tracker?query=LHR")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Monthly usage limit reached");
    assert_eq!(json["code"], "usage_limit_reached");
}

#[tokio::test]
async fn test_upstream_failure_status() {
    let upstream = start_fixed_upstream(503, r#"{"message": "down"}"#).await;
    let config = config_for(&upstream, Some("test-key"));

    let response = send(app(&config), get("/flight-tracker?query=LHR")).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Failed to fetch flight data");
    assert_eq!(upstream.calls(), 1, "No retries");
}

#[tokio::test]
async fn test_upstream_timeout() {
    let upstream = start_stalled_upstream(Duration::from_secs(5)).await;
    let mut config = config_for(&upstream, Some("test-key"));
    config.flights.timeout_secs = 1;

    let response = send(app(&config), get("/flight-tracker?query=BA456")).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_invalid_parameters_are_rejected_before_network() {
    let upstream = start_fixed_upstream(200, FLIGHTS_BODY).await;
    let config = config_for(&upstream, Some("test-key"));

    for uri in ["/flight-tracker?endpoint=cargo", "/flight-tracker?limit=0", "/flight-tracker?limit=abc"] {
        let response = send(app(&config), get(uri)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }
    assert_eq!(upstream.calls(), 0);
}

#[tokio::test]
async fn test_repeated_query_key_gets_envelope() {
    let upstream = start_fixed_upstream(200, FLIGHTS_BODY).await;
    let config = config_for(&upstream, Some("test-key"));

    let response = send(app(&config), get("/flight-tracker?limit=1&limit=2")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("limit"));
    assert_eq!(upstream.calls(), 0);
}

#[tokio::test]
async fn test_request_timeout_gets_upstream_envelope() {
    let upstream = start_stalled_upstream(Duration::from_secs(5)).await;
    let mut config = config_for(&upstream, Some("test-key"));
    config.timeouts.request_secs = 1;
    config.flights.timeout_secs = 3;

    let response = send(app(&config), get("/flight-tracker?query=BA456")).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "UPSTREAM_ERROR");
    assert_eq!(json["error"], "Request timed out");
}
