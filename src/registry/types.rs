//! Per-device state tracked by the connection registry

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Static device descriptor reported at connect time
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Device serial number
    pub no: String,
}

/// Mutable per-device record of streaming/recording flags and liveness
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceStatus {
    pub device_id: String,
    pub device_info: DeviceInfo,
    pub recording: bool,
    pub video_pushing: bool,
    pub audio_pulling: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rtmp_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rtsp_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_heartbeat: Option<DateTime<Utc>>,
}

impl DeviceStatus {
    /// Fresh status at connect time: all flags false, no heartbeat yet
    #[must_use]
    pub fn new(device_id: impl Into<String>, serial: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            device_info: DeviceInfo { no: serial.into() },
            recording: false,
            video_pushing: false,
            audio_pulling: false,
            rtmp_url: None,
            rtsp_url: None,
            last_heartbeat: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_status_has_no_activity() {
        let status = DeviceStatus::new("cam-1", "SN001");
        assert!(!status.recording);
        assert!(!status.video_pushing);
        assert!(!status.audio_pulling);
        assert!(status.last_heartbeat.is_none());
        assert_eq!(status.device_info.no, "SN001");
    }

    #[test]
    fn status_serializes_camel_case_and_skips_empty_urls() {
        let status = DeviceStatus::new("cam-1", "SN001");
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["deviceId"], "cam-1");
        assert_eq!(json["videoPushing"], false);
        assert!(json.get("rtmpUrl").is_none());
        assert!(json.get("lastHeartbeat").is_none());
    }
}
