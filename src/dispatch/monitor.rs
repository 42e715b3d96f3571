//! Read-only monitor queries over the connection registry

use std::sync::Arc;

use serde_json::Value;

use crate::messages::{MonitorQuery, MonitorRequest, MonitorResponse};
use crate::registry::ConnectionRegistry;
use crate::{Error, Result};

/// Message returned when a monitor query fails for a reason the caller
/// did not cause
pub const INTERNAL_ERROR: &str = "internal monitor error";

/// Answers monitor queries; never mutates registry state
pub struct MonitorDispatcher {
    registry: Arc<ConnectionRegistry>,
}

impl MonitorDispatcher {
    #[must_use]
    pub fn new(registry: Arc<ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// Handle one monitor query. Always produces a response envelope:
    /// caller faults come back as `code:-1` with an `info` message and
    /// internal failures as `code:500`.
    pub async fn dispatch(&self, request: &MonitorRequest) -> MonitorResponse {
        match self.run(request).await {
            Ok(response) => response,
            Err(e) => failure_envelope(&request.kind, &e),
        }
    }

    async fn run(&self, request: &MonitorRequest) -> Result<MonitorResponse> {
        match &request.kind {
            MonitorQuery::ListDevices => {
                let ids = self.registry.device_ids().await;
                Ok(MonitorResponse {
                    kind: MonitorQuery::ListDevices,
                    code: 0,
                    data: Some(Value::from(ids)),
                    info: None,
                })
            }
            MonitorQuery::GetStatus => {
                let device_id = request
                    .data
                    .as_ref()
                    .and_then(|data| data.get("deviceId"))
                    .and_then(Value::as_str)
                    .ok_or_else(|| Error::MissingField("deviceId".to_string()))?;

                match self.registry.status(device_id).await {
                    Some(status) => Ok(MonitorResponse {
                        kind: MonitorQuery::GetStatus,
                        code: 0,
                        data: Some(serde_json::to_value(status)?),
                        info: None,
                    }),
                    None => Ok(MonitorResponse {
                        kind: MonitorQuery::GetStatus,
                        code: -1,
                        data: None,
                        info: Some("device not found".to_string()),
                    }),
                }
            }
            MonitorQuery::Unknown(name) => Err(Error::UnknownEvent(name.clone())),
        }
    }
}

/// Map a query failure onto the response envelope: caller faults become
/// `code:-1` with the error text, anything else `code:500` with a fixed
/// message
fn failure_envelope(kind: &MonitorQuery, error: &Error) -> MonitorResponse {
    if error.is_request_fault() {
        MonitorResponse {
            kind: kind.clone(),
            code: -1,
            data: None,
            info: Some(error.to_string()),
        }
    } else {
        tracing::error!(error = %error, "monitor query failed");
        MonitorResponse {
            kind: kind.clone(),
            code: 500,
            data: None,
            info: Some(INTERNAL_ERROR.to_string()),
        }
    }
}
