//! Registry of connected devices: link lifecycle, liveness and transport

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde_json::Value;
use tokio::sync::{Mutex, RwLock};

use crate::Result;
use crate::messages::device_join_notice;

use super::link::DeviceLink;
use super::types::{DeviceInfo, DeviceStatus};

/// Close code used when evicting a device after a failed write
const CLOSE_NORMAL: u16 = 1000;

struct DeviceEntry {
    link: Arc<Mutex<Box<dyn DeviceLink>>>,
    status: DeviceStatus,
    /// Liveness basis: set at register time and refreshed on every
    /// heartbeat, so a device that never sent one still gets a full
    /// timeout window measured from connect
    last_seen: tokio::time::Instant,
}

/// Registry of connected devices.
///
/// A device id appears in the link map iff it appears in the status map:
/// both live in one entry, created together at register time and removed
/// together at unregister time. A reconnect under the same id replaces the
/// prior entry (last-writer-wins).
#[derive(Default)]
pub struct ConnectionRegistry {
    devices: RwLock<HashMap<String, DeviceEntry>>,
}

impl ConnectionRegistry {
    /// Create a new empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept a device link, create its fresh status, and push the join
    /// notification through the new transport
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Transport`] if the accept handshake fails.
    pub async fn register(
        &self,
        device_id: &str,
        mut link: Box<dyn DeviceLink>,
        serial: &str,
    ) -> Result<()> {
        link.accept().await?;

        let entry = DeviceEntry {
            link: Arc::new(Mutex::new(link)),
            status: DeviceStatus::new(device_id, serial),
            last_seen: tokio::time::Instant::now(),
        };
        self.devices
            .write()
            .await
            .insert(device_id.to_string(), entry);

        tracing::info!(device_id = %device_id, serial = %serial, "device connected");

        self.send(device_id, &device_join_notice()).await;
        Ok(())
    }

    /// Remove a device, attempting a graceful close first. Idempotent:
    /// unknown ids are a no-op, and close errors are ignored.
    pub async fn unregister(&self, device_id: &str, code: u16, reason: &str) {
        let Some(entry) = self.devices.write().await.remove(device_id) else {
            return;
        };

        // The entry is already out of the map; the close is best-effort
        if let Err(e) = entry.link.lock().await.close(code, reason).await {
            tracing::debug!(device_id = %device_id, error = %e, "close failed during unregister");
        }

        tracing::info!(device_id = %device_id, code, reason, "device disconnected");
    }

    /// Write one payload to a device.
    ///
    /// Returns false if the device is unknown or the write fails; a failed
    /// write evicts the device. Errors never reach the caller.
    pub async fn send(&self, device_id: &str, payload: &Value) -> bool {
        let link = {
            let devices = self.devices.read().await;
            match devices.get(device_id) {
                Some(entry) => Arc::clone(&entry.link),
                None => return false,
            }
        };

        // Map lock released above; only the per-link lock is held across
        // the (potentially blocking) socket write
        let written = link.lock().await.send(payload).await;
        if let Err(e) = written {
            tracing::error!(device_id = %device_id, error = %e, "send failed, evicting device");
            self.unregister(device_id, CLOSE_NORMAL, "send failure").await;
            return false;
        }
        true
    }

    /// Record a liveness signal for a device
    pub async fn update_heartbeat(&self, device_id: &str) {
        let mut devices = self.devices.write().await;
        match devices.get_mut(device_id) {
            Some(entry) => {
                entry.last_seen = tokio::time::Instant::now();
                let now = Utc::now();
                // last_heartbeat stays monotonic even if the wall clock steps back
                if entry.status.last_heartbeat.is_none_or(|prev| prev <= now) {
                    entry.status.last_heartbeat = Some(now);
                }
            }
            None => {
                tracing::error!(device_id = %device_id, "heartbeat for unknown device");
            }
        }
    }

    /// Replace the static device descriptor reported by the device
    pub async fn update_device_info(&self, device_id: &str, info: DeviceInfo) {
        let mut devices = self.devices.write().await;
        match devices.get_mut(device_id) {
            Some(entry) => entry.status.device_info = info,
            None => {
                tracing::error!(device_id = %device_id, "device info for unknown device");
            }
        }
    }

    /// Apply one status mutation under the registry lock.
    ///
    /// Returns false if the device is unknown.
    pub async fn update_status(
        &self,
        device_id: &str,
        apply: impl FnOnce(&mut DeviceStatus),
    ) -> bool {
        let mut devices = self.devices.write().await;
        match devices.get_mut(device_id) {
            Some(entry) => {
                apply(&mut entry.status);
                true
            }
            None => false,
        }
    }

    /// Point-in-time copy of one device's status
    pub async fn status(&self, device_id: &str) -> Option<DeviceStatus> {
        self.devices
            .read()
            .await
            .get(device_id)
            .map(|entry| entry.status.clone())
    }

    /// Ids of all connected devices
    pub async fn device_ids(&self) -> Vec<String> {
        self.devices.read().await.keys().cloned().collect()
    }

    /// Number of connected devices
    pub async fn len(&self) -> usize {
        self.devices.read().await.len()
    }

    /// Whether no devices are connected
    pub async fn is_empty(&self) -> bool {
        self.devices.read().await.is_empty()
    }

    /// Ids of devices whose liveness signal has lapsed beyond `timeout`,
    /// measured from the last heartbeat or from connect time for devices
    /// that have not sent one yet
    pub async fn idle_devices(&self, timeout: Duration) -> Vec<String> {
        self.devices
            .read()
            .await
            .iter()
            .filter(|(_, entry)| entry.last_seen.elapsed() > timeout)
            .map(|(id, _)| id.clone())
            .collect()
    }
}
