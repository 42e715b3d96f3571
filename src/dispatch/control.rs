//! Generic control dispatch: one interpreter over the descriptor table

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::messages::{ControlMessage, ControlResponse, MessageType, OutboundControl};
use crate::registry::ConnectionRegistry;
use crate::{Error, Result};

use super::descriptor::{self, CommandDescriptor, StatusEffect};

/// Receives control requests, validates them against their descriptor,
/// forwards them to the device and synthesizes the response
pub struct ControlDispatcher {
    registry: Arc<ConnectionRegistry>,
}

impl ControlDispatcher {
    #[must_use]
    pub fn new(registry: Arc<ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// Handle one control request end to end.
    ///
    /// Validation and unknown-event faults come back as `code:-1`
    /// responses carrying an `error_msg`; they never take down the
    /// device connection.
    ///
    /// # Errors
    ///
    /// Returns only unexpected internal errors, for the HTTP boundary to
    /// surface as status 500.
    pub async fn dispatch(
        &self,
        device_id: &str,
        message: &ControlMessage,
    ) -> Result<ControlResponse> {
        match self.run(device_id, message).await {
            Ok(response) => Ok(response),
            Err(e) if e.is_request_fault() => {
                tracing::warn!(
                    device_id = %device_id,
                    event = %message.event.as_str(),
                    error = %e,
                    "control request rejected"
                );
                Ok(error_response(message, &e))
            }
            Err(e) => Err(e),
        }
    }

    async fn run(&self, device_id: &str, message: &ControlMessage) -> Result<ControlResponse> {
        let descriptor = descriptor::lookup(&message.event)
            .ok_or_else(|| Error::UnknownEvent(message.event.as_str().to_string()))?;

        let validated = validate_fields(descriptor, message.data.as_ref())?;

        for effect in descriptor.pre_send {
            self.apply_effect(device_id, *effect, &validated).await;
        }

        let outbound = OutboundControl {
            kind: MessageType::Control,
            event: message.event.clone(),
            play_id: message.play_id.clone(),
            device_id: message.device_id.clone(),
            data: if descriptor.fields.is_empty() {
                None
            } else {
                Some(validated.clone())
            },
        };
        let sent = self
            .registry
            .send(device_id, &serde_json::to_value(&outbound)?)
            .await;

        if sent {
            for effect in descriptor.post_send {
                self.apply_effect(device_id, *effect, &validated).await;
            }
        }

        Ok(build_response(message, sent, validated))
    }

    async fn apply_effect(
        &self,
        device_id: &str,
        effect: StatusEffect,
        validated: &Map<String, Value>,
    ) {
        let url = |field: &str| {
            validated
                .get(field)
                .and_then(Value::as_str)
                .map(String::from)
        };
        let rtmp_url = url("rtmp_url");
        let rtsp_url = url("rtsp_url");

        self.registry
            .update_status(device_id, |status| match effect {
                StatusEffect::Recording(v) => status.recording = v,
                StatusEffect::VideoPushing(v) => status.video_pushing = v,
                StatusEffect::AudioPulling(v) => status.audio_pulling = v,
                StatusEffect::CaptureRtmpUrl => status.rtmp_url = rtmp_url,
                StatusEffect::CaptureRtspUrl => status.rtsp_url = rtsp_url,
            })
            .await;
    }
}

/// Verify every required field is present and passes its rule, failing
/// fast on the first violation. Returns the data map with validated fields
/// replaced by their normalized values.
fn validate_fields(
    descriptor: &CommandDescriptor,
    data: Option<&Map<String, Value>>,
) -> Result<Map<String, Value>> {
    let empty = Map::new();
    let data = data.unwrap_or(&empty);
    let mut validated = data.clone();

    for (field, rule) in descriptor.fields {
        let value = data
            .get(*field)
            .ok_or_else(|| Error::MissingField((*field).to_string()))?;
        validated.insert((*field).to_string(), rule.apply(field, value)?);
    }
    Ok(validated)
}

fn build_response(
    message: &ControlMessage,
    sent: bool,
    mut data: Map<String, Value>,
) -> ControlResponse {
    data.insert(
        "status".to_string(),
        Value::from(if sent { "success" } else { "failed" }),
    );
    ControlResponse {
        code: if sent { 0 } else { -1 },
        kind: MessageType::Control,
        event: message.event.clone(),
        play_id: message.play_id.clone(),
        device_id: message.device_id.clone(),
        data: Some(data),
        error_msg: None,
    }
}

fn error_response(message: &ControlMessage, error: &Error) -> ControlResponse {
    ControlResponse {
        code: -1,
        kind: MessageType::Notify,
        event: message.event.clone(),
        play_id: message.play_id.clone(),
        device_id: message.device_id.clone(),
        data: None,
        error_msg: Some(error.to_string()),
    }
}
