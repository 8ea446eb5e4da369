//! Startup orchestration.
//!
//! # Responsibilities
//! - Build shared state from the validated configuration
//! - Bind the API listener and, when enabled, the places listener
//! - Run both servers until the shutdown coordinator fires
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listeners bind before serving starts, so a bad port aborts startup

use std::future::Future;
use std::io;

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::config::AppConfig;
use crate::http::server::{AppState, HttpServer};
use crate::lifecycle::Shutdown;
use crate::upstream::UpstreamError;

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to build upstream client: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("bundled sample data is invalid: {0}")]
    Fixtures(#[from] serde_json::Error),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

async fn bind(address: &str) -> Result<TcpListener, StartupError> {
    TcpListener::bind(address)
        .await
        .map_err(|source| StartupError::Bind {
            address: address.to_string(),
            source,
        })
}

/// Start all listeners and serve until `shutdown` is triggered.
pub async fn run(config: AppConfig, shutdown: &Shutdown) -> Result<(), StartupError> {
    let state = AppState::from_config(&config)?;

    let api_listener = bind(&config.listener.bind_address).await?;
    let places_listener = if config.places.enabled {
        Some(bind(&config.places.bind_address).await?)
    } else {
        None
    };

    let places_task = places_listener.map(|listener| {
        let server = HttpServer::places(&config, state.clone());
        let rx = shutdown.subscribe();
        tokio::spawn(async move { server.run(listener, rx).await })
    });

    let api = HttpServer::new(&config, state);
    supervise(api.run(api_listener, shutdown.subscribe()), places_task, shutdown).await
}

/// Drive the API server, then stop and join the places server.
///
/// An API server failure triggers `shutdown` first, so the places task is
/// never left running behind the returned error.
async fn supervise<F>(
    api: F,
    places_task: Option<JoinHandle<io::Result<()>>>,
    shutdown: &Shutdown,
) -> Result<(), StartupError>
where
    F: Future<Output = io::Result<()>>,
{
    let api_result = api.await;
    if let Err(e) = &api_result {
        tracing::error!(error = %e, "API server failed, stopping remaining servers");
        shutdown.trigger();
    }

    if let Some(task) = places_task {
        match task.await {
            Ok(Err(e)) if api_result.is_ok() => return Err(e.into()),
            Ok(Err(e)) => tracing::error!(error = %e, "Places server failed"),
            Ok(Ok(())) => {}
            Err(e) => tracing::error!(error = %e, "Places server task failed"),
        }
    }

    api_result.map_err(StartupError::from)
}
