//! WebSocket endpoint devices connect to

use axum::{
    Router,
    extract::{
        Path, State, WebSocketUpgrade,
        ws::{CloseFrame, Message, WebSocket},
    },
    response::IntoResponse,
    routing::get,
};
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use serde_json::Value;

use crate::messages::{DeviceMessage, EventType};
use crate::registry::{DeviceInfo, DeviceLink};
use crate::{Error, Result};

use super::ApiState;

/// Close code sent when the device's read loop ends
const CLOSE_NORMAL: u16 = 1000;

/// Path segments of a device connection URL
#[derive(Debug, Deserialize)]
struct LinkPath {
    room_id: String,
    device_sn: String,
    device_id: String,
    language: String,
}

/// Build the device WebSocket router
pub fn router() -> Router<ApiState> {
    Router::new().route(
        "/ws/{room_id}/{device_sn}/{device_id}/{language}",
        get(ws_upgrade),
    )
}

/// Handle WebSocket upgrade request
async fn ws_upgrade(
    State(state): State<ApiState>,
    Path(path): Path<LinkPath>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_device(socket, state, path))
}

/// Drive one device connection from upgrade to disconnect
async fn handle_device(socket: WebSocket, state: ApiState, path: LinkPath) {
    tracing::info!(
        device_id = %path.device_id,
        serial = %path.device_sn,
        room_id = %path.room_id,
        language = %path.language,
        "device websocket opened"
    );

    let (sink, stream) = socket.split();
    let link = Box::new(WsDeviceLink { sink });

    if let Err(e) = state
        .registry
        .register(&path.device_id, link, &path.device_sn)
        .await
    {
        tracing::error!(device_id = %path.device_id, error = %e, "device registration failed");
        return;
    }

    read_loop(stream, &state, &path.device_id).await;

    state
        .registry
        .unregister(&path.device_id, CLOSE_NORMAL, "connection closed")
        .await;
}

/// Consume inbound frames until the device disconnects
async fn read_loop(mut stream: SplitStream<WebSocket>, state: &ApiState, device_id: &str) {
    while let Some(frame) = stream.next().await {
        match frame {
            Ok(Message::Text(text)) => handle_device_message(state, device_id, &text).await,
            Ok(Message::Close(_)) => {
                tracing::info!(device_id = %device_id, "device closed the connection");
                break;
            }
            // pings are answered by axum; binary frames are not part of
            // the device protocol
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(device_id = %device_id, error = %e, "websocket read error");
                break;
            }
        }
    }
}

/// Apply one device-originated message to the registry
async fn handle_device_message(state: &ApiState, device_id: &str, text: &str) {
    let message: DeviceMessage = match serde_json::from_str(text) {
        Ok(message) => message,
        Err(e) => {
            tracing::warn!(device_id = %device_id, error = %e, "unparseable device message");
            return;
        }
    };

    match message.event {
        EventType::Heartbeat => {
            tracing::debug!(device_id = %device_id, "heartbeat");
            state.registry.update_heartbeat(device_id).await;
        }
        EventType::DeviceInfo => {
            let serial = message
                .data
                .as_ref()
                .and_then(|data| data.get("no"))
                .and_then(Value::as_str);
            match serial {
                Some(no) => {
                    state
                        .registry
                        .update_device_info(device_id, DeviceInfo { no: no.to_string() })
                        .await;
                }
                None => {
                    tracing::warn!(device_id = %device_id, "device_info without serial");
                }
            }
        }
        other => {
            tracing::debug!(
                device_id = %device_id,
                event = %other.as_str(),
                "ignoring device message"
            );
        }
    }
}

/// Device link backed by the write half of an axum WebSocket
struct WsDeviceLink {
    sink: SplitSink<WebSocket, Message>,
}

#[async_trait::async_trait]
impl DeviceLink for WsDeviceLink {
    async fn accept(&mut self) -> Result<()> {
        // the upgrade handshake completed before on_upgrade ran
        Ok(())
    }

    async fn send(&mut self, payload: &Value) -> Result<()> {
        let text = serde_json::to_string(payload)?;
        self.sink
            .send(Message::Text(text.into()))
            .await
            .map_err(|e| Error::Transport(e.to_string()))
    }

    async fn close(&mut self, code: u16, reason: &str) -> Result<()> {
        self.sink
            .send(Message::Close(Some(CloseFrame {
                code,
                reason: reason.to_string().into(),
            })))
            .await
            .map_err(|e| Error::Transport(e.to_string()))
    }
}
