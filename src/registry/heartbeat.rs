//! Periodic sweep that evicts devices whose liveness signal has lapsed

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::ConnectionRegistry;

/// WebSocket policy-violation close code sent on eviction
const CLOSE_HEARTBEAT_TIMEOUT: u16 = 1008;

/// Background sweep task with an explicit stop handle.
///
/// Owned by the daemon and stopped during shutdown; no sweep is left
/// running once [`HeartbeatMonitor::stop`] resolves.
pub struct HeartbeatMonitor {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl HeartbeatMonitor {
    /// Spawn the sweep task
    #[must_use]
    pub fn start(registry: Arc<ConnectionRegistry>, interval: Duration, timeout: Duration) -> Self {
        let (shutdown, mut stopped) = watch::channel(false);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // the first tick of an interval completes immediately
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => sweep(&registry, timeout).await,
                    _ = stopped.changed() => break,
                }
            }
        });

        tracing::info!(
            interval_secs = interval.as_secs(),
            timeout_secs = timeout.as_secs(),
            "heartbeat monitor started"
        );
        Self { shutdown, handle }
    }

    /// Stop the sweep; resolves once the task has exited
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.handle.await {
            tracing::error!(error = %e, "heartbeat monitor task failed");
        }
        tracing::info!("heartbeat monitor stopped");
    }
}

/// One sweep cycle: evict every device whose liveness has lapsed.
///
/// Eviction of one device never blocks or fails the sweep for others, and
/// unregister is idempotent, so a device that disconnected between the scan
/// and its eviction call is a harmless no-op.
async fn sweep(registry: &ConnectionRegistry, timeout: Duration) {
    for device_id in registry.idle_devices(timeout).await {
        tracing::warn!(device_id = %device_id, "heartbeat timeout");
        registry
            .unregister(&device_id, CLOSE_HEARTBEAT_TIMEOUT, "heartbeat timeout")
            .await;
    }
}
