//! Connection registry for device links
//!
//! Owns the map from device id to transport handle and mutable status;
//! the heartbeat monitor sweeps it on a fixed interval and evicts devices
//! whose liveness signal has lapsed.

pub mod connections;
pub mod heartbeat;
pub mod link;
pub mod types;

pub use connections::ConnectionRegistry;
pub use heartbeat::HeartbeatMonitor;
pub use link::DeviceLink;
pub use types::{DeviceInfo, DeviceStatus};
