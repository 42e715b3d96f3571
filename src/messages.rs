//! Wire model shared by the control, monitor and device-link surfaces

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Message `type` discriminator on synthesized messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    /// Command forwarded to a device, or its synthesized response
    Control,
    /// Server-initiated notification (join notices, error responses)
    Notify,
}

/// Control event catalog
///
/// Unknown event names deserialize into [`EventType::Unknown`] so dispatch
/// can reject them with an error response that echoes the name, instead of
/// failing at the JSON boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    DeviceInfo,
    DeviceJoin,
    Heartbeat,
    StartRtmp,
    StopRtmp,
    StartRtsp,
    StopRtsp,
    StartRecord,
    StopRecord,
    Dzoom,
    StreamRes,
    StreamBitrate,
    StreamFramerate,
    Led,
    Exposure,
    Filter,
    MicSensitivity,
    Fov,
    Screen,
    PowerOff,
    #[serde(untagged)]
    Unknown(String),
}

impl EventType {
    /// Wire name of the event
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::DeviceInfo => "device_info",
            Self::DeviceJoin => "device_join",
            Self::Heartbeat => "heartbeat",
            Self::StartRtmp => "start_rtmp",
            Self::StopRtmp => "stop_rtmp",
            Self::StartRtsp => "start_rtsp",
            Self::StopRtsp => "stop_rtsp",
            Self::StartRecord => "start_record",
            Self::StopRecord => "stop_record",
            Self::Dzoom => "dzoom",
            Self::StreamRes => "stream_res",
            Self::StreamBitrate => "stream_bitrate",
            Self::StreamFramerate => "stream_framerate",
            Self::Led => "led",
            Self::Exposure => "exposure",
            Self::Filter => "filter",
            Self::MicSensitivity => "mic_sensitivity",
            Self::Fov => "fov",
            Self::Screen => "screen",
            Self::PowerOff => "power_off",
            Self::Unknown(name) => name,
        }
    }
}

/// Inbound control request from the cloud/session service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlMessage {
    #[serde(rename = "type")]
    pub kind: String,
    pub event: EventType,
    pub play_id: String,
    pub device_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,
}

/// Command forwarded to a device over its link
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundControl {
    #[serde(rename = "type")]
    pub kind: MessageType,
    pub event: EventType,
    pub play_id: String,
    pub device_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,
}

/// Response synthesized for one control request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlResponse {
    pub code: i32,
    #[serde(rename = "type")]
    pub kind: MessageType,
    pub event: EventType,
    pub play_id: String,
    pub device_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,
    #[serde(rename = "error_msg", skip_serializing_if = "Option::is_none")]
    pub error_msg: Option<String>,
}

/// Message received from a device over its link
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceMessage {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub event: EventType,
    #[serde(default)]
    pub data: Option<Map<String, Value>>,
}

/// Monitor query type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MonitorQuery {
    #[serde(rename = "list-devices")]
    ListDevices,
    #[serde(rename = "get-status")]
    GetStatus,
    #[serde(untagged)]
    Unknown(String),
}

/// Inbound monitor query
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorRequest {
    #[serde(rename = "type")]
    pub kind: MonitorQuery,
    #[serde(default)]
    pub data: Option<Map<String, Value>>,
}

/// Uniform monitor response envelope: `{type, code, data|info}`
#[derive(Debug, Clone, Serialize)]
pub struct MonitorResponse {
    #[serde(rename = "type")]
    pub kind: MonitorQuery,
    pub code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}

/// Join notification pushed through a freshly registered link
#[must_use]
pub fn device_join_notice() -> Value {
    serde_json::json!({
        "code": 0,
        "type": "notify",
        "event": "device_join",
        "data": {}
    })
}
