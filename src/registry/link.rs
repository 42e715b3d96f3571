//! Transport seam between the registry and concrete device links

use async_trait::async_trait;
use serde_json::Value;

use crate::Result;

/// A bidirectional persistent link to one device.
///
/// Links are owned exclusively by the registry and destroyed on disconnect.
/// The production implementation wraps the axum WebSocket sink; tests plug
/// in an in-memory double.
#[async_trait]
pub trait DeviceLink: Send + Sync {
    /// Complete the accept handshake for a freshly established link
    async fn accept(&mut self) -> Result<()>;

    /// Write one JSON payload to the device
    async fn send(&mut self, payload: &Value) -> Result<()>;

    /// Close the link with a WebSocket close code and reason
    async fn close(&mut self, code: u16, reason: &str) -> Result<()>;
}
