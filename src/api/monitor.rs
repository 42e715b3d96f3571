//! Monitor endpoint for operational queries

use axum::{Json, Router, extract::State, routing::post};

use crate::messages::{MonitorRequest, MonitorResponse};

use super::ApiState;

/// Build the monitor router
pub fn router() -> Router<ApiState> {
    Router::new().route("/online-monitor", post(online_monitor))
}

/// Answer one monitor query; faults are encoded in the envelope `code`
async fn online_monitor(
    State(state): State<ApiState>,
    Json(request): Json<MonitorRequest>,
) -> Json<MonitorResponse> {
    Json(state.monitor.dispatch(&request).await)
}
