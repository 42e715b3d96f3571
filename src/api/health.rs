//! Health check endpoint

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use super::ApiState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub connected_devices: usize,
}

/// Liveness probe with the current connection count
async fn health(State(state): State<ApiState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        connected_devices: state.registry.len().await,
    })
}

/// Build the health router
pub fn router() -> Router<ApiState> {
    Router::new().route("/api/health", get(health))
}
