//! HTTP and WebSocket surface of the gateway

pub mod control;
pub mod health;
pub mod monitor;
pub mod websocket;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::dispatch::{ControlDispatcher, MonitorDispatcher};
use crate::registry::ConnectionRegistry;
use crate::Result;

/// Shared state for API handlers
#[derive(Clone)]
pub struct ApiState {
    pub registry: Arc<ConnectionRegistry>,
    pub control: Arc<ControlDispatcher>,
    pub monitor: Arc<MonitorDispatcher>,
}

impl ApiState {
    /// Wire the dispatchers over one shared registry
    #[must_use]
    pub fn new(registry: Arc<ConnectionRegistry>) -> Self {
        Self {
            control: Arc::new(ControlDispatcher::new(Arc::clone(&registry))),
            monitor: Arc::new(MonitorDispatcher::new(Arc::clone(&registry))),
            registry,
        }
    }
}

/// Build the router with all routes
#[must_use]
pub fn router(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(control::router())
        .merge(monitor::router())
        .merge(websocket::router())
        .merge(health::router())
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Bind and serve until `shutdown` resolves
///
/// # Errors
///
/// Returns [`crate::Error::Config`] if the listener fails to bind or the
/// server exits with an error.
pub async fn serve(
    addr: SocketAddr,
    state: ApiState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| crate::Error::Config(format!("failed to bind {addr}: {e}")))?;

    tracing::info!(%addr, "gateway listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| crate::Error::Config(format!("server error: {e}")))?;

    Ok(())
}
