//! Cloud-facing control endpoint

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};

use crate::messages::ControlMessage;

use super::ApiState;

/// Build the control router
pub fn router() -> Router<ApiState> {
    Router::new().route("/cloud-control/{device_id}", post(cloud_control))
}

/// Forward one control command to a connected device.
///
/// The response body is always the synthesized control response; the HTTP
/// status mirrors its `code` so callers that only check the status still
/// see failures.
async fn cloud_control(
    State(state): State<ApiState>,
    Path(device_id): Path<String>,
    Json(message): Json<ControlMessage>,
) -> Response {
    match state.control.dispatch(&device_id, &message).await {
        Ok(response) if response.code == 0 => (StatusCode::OK, Json(response)).into_response(),
        Ok(response) => {
            let detail = response
                .error_msg
                .clone()
                .unwrap_or_else(|| "control command failed".to_string());
            tracing::warn!(device_id = %device_id, detail = %detail, "control command rejected");
            (StatusCode::BAD_REQUEST, Json(response)).into_response()
        }
        Err(e) => {
            tracing::error!(device_id = %device_id, error = %e, "control dispatch failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": "internal server error"})),
            )
                .into_response()
        }
    }
}
