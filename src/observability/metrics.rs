//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define service metrics (requests, latency, upstream calls, archives)
//! - Expose Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `proxy_requests_total` (counter): requests by route, method, status
//! - `proxy_request_duration_seconds` (histogram): latency by route
//! - `proxy_upstream_requests_total` (counter): outbound calls by upstream, outcome
//! - `proxy_upstream_duration_seconds` (histogram): outbound latency by upstream
//! - `proxy_archives_total` (counter): archives by kind, outcome
//! - `proxy_archive_bytes` (histogram): archive sizes
//!
//! # Design Decisions
//! - Recording is a no-op until an exporter is installed, so tests need no setup
//! - Labels use the matched route template, never raw paths

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::Request,
    middleware::Next,
    response::Response,
};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one inbound request.
pub fn record_request(route: &str, method: &str, status: u16, start: Instant) {
    metrics::counter!(
        "proxy_requests_total",
        "route" => route.to_string(),
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("proxy_request_duration_seconds", "route" => route.to_string())
        .record(start.elapsed().as_secs_f64());
}

/// Record one outbound call.
pub fn record_upstream(upstream: &'static str, outcome: &'static str, start: Instant) {
    metrics::counter!(
        "proxy_upstream_requests_total",
        "upstream" => upstream,
        "outcome" => outcome
    )
    .increment(1);
    metrics::histogram!("proxy_upstream_duration_seconds", "upstream" => upstream)
        .record(start.elapsed().as_secs_f64());
}

/// Record an archive attempt; `bytes` is `None` on failure.
pub fn record_archive(kind: &'static str, bytes: Option<usize>) {
    let outcome = if bytes.is_some() { "success" } else { "failure" };
    metrics::counter!("proxy_archives_total", "kind" => kind, "outcome" => outcome).increment(1);
    if let Some(len) = bytes {
        metrics::histogram!("proxy_archive_bytes", "kind" => kind).record(len as f64);
    }
}

/// Middleware recording request count and latency per route.
pub async fn track_metrics(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());
    let method = request.method().to_string();

    let response = next.run(request).await;
    record_request(&route, &method, response.status().as_u16(), start);
    response
}
