//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Routers for the API and the auxiliary places listener
//! - Wire up middleware (request ID, tracing, timeout, body limit, metrics)
//! - Keep layer-generated failures inside the JSON error envelope
//! - Bind server to listener and serve until shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Request},
    middleware,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::archive::{Archiver, TarArchiver};
use crate::config::AppConfig;
use crate::flights::FlightTracker;
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer};
use crate::http::response::envelope_timeouts;
use crate::http::{download, flights, map, places, reminders};
use crate::lifecycle::startup::StartupError;
use crate::observability::metrics;
use crate::places::PlacesClient;
use crate::samples::{FixtureSource, SampleSource};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub flights: Arc<FlightTracker>,
    pub places: Arc<PlacesClient>,
    pub archiver: Arc<dyn Archiver>,
    pub samples: Arc<dyn SampleSource>,
    /// Label used in download filenames.
    pub project_name: Arc<str>,
}

impl AppState {
    /// Build production state: upstream clients, `tar` archiver and the
    /// bundled sample fixtures.
    pub fn from_config(config: &AppConfig) -> Result<Self, StartupError> {
        Ok(Self {
            flights: Arc::new(FlightTracker::new(config.flights.clone())?),
            places: Arc::new(PlacesClient::new(config.places.clone())?),
            archiver: Arc::new(TarArchiver::new(&config.archive)),
            samples: Arc::new(FixtureSource::bundled()?),
            project_name: Arc::from(config.archive.project_name.as_str()),
        })
    }

    pub fn with_archiver(mut self, archiver: Arc<dyn Archiver>) -> Self {
        self.archiver = archiver;
        self
    }

    pub fn with_samples(mut self, samples: Arc<dyn SampleSource>) -> Self {
        self.samples = samples;
        self
    }
}

async fn health() -> &'static str {
    "OK"
}

/// Build the main API router with all middleware layers.
#[allow(deprecated)]
pub fn build_router(config: &AppConfig, state: AppState) -> Router {
    let timed = Router::new()
        .route("/health", get(health))
        .route("/flight-tracker", get(flights::flight_tracker))
        .route("/map", get(map::map_data))
        .route(
            "/reminders",
            get(reminders::list_reminders).post(reminders::update_reminder),
        )
        .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
        .layer(middleware::map_response(envelope_timeouts));

    // The archive subprocess is unbounded, so it stays outside the timeout.
    let untimed = Router::new().route("/download", get(download::download));

    with_common_layers(config, timed.merge(untimed).with_state(state))
}

/// Build the auxiliary places router.
#[allow(deprecated)]
pub fn build_places_router(config: &AppConfig, state: AppState) -> Router {
    let router = Router::new()
        .route("/health", get(health))
        .route("/places", get(places::search_places))
        .with_state(state)
        .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
        .layer(middleware::map_response(envelope_timeouts));

    with_common_layers(config, router)
}

fn with_common_layers(config: &AppConfig, router: Router) -> Router {
    let router = router
        .layer(middleware::from_fn(metrics::track_metrics))
        .layer(DefaultBodyLimit::max(config.security.max_body_size));

    let router = if config.security.enable_headers {
        router.layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
    } else {
        router
    };

    router.layer(
        ServiceBuilder::new()
            .layer(set_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    request_id = %request_id(request),
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }))
            .layer(propagate_request_id_layer()),
    )
}

/// An HTTP listener serving one router.
pub struct HttpServer {
    name: &'static str,
    router: Router,
}

impl HttpServer {
    /// The main API server.
    pub fn new(config: &AppConfig, state: AppState) -> Self {
        Self {
            name: "api",
            router: build_router(config, state),
        }
    }

    /// The auxiliary places server.
    pub fn places(config: &AppConfig, state: AppState) -> Self {
        Self {
            name: "places",
            router: build_places_router(config, state),
        }
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(server = self.name, address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!(server = self.name, "HTTP server stopped");
        Ok(())
    }
}
