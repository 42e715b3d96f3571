//! Drift gateway - control plane between cloud services and camera devices
//!
//! Devices hold a persistent WebSocket to the gateway; cloud services drive
//! them through plain HTTP. The gateway validates commands against a
//! per-event descriptor table, forwards them over the device link, tracks
//! per-device streaming and recording status, and evicts devices whose
//! heartbeat lapses.

pub mod api;
pub mod config;
pub mod daemon;
pub mod dispatch;
pub mod error;
pub mod messages;
pub mod registry;

pub use config::Config;
pub use daemon::Daemon;
pub use error::{Error, Result};
