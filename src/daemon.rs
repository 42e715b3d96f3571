//! Gateway daemon wiring the registry, heartbeat sweep and API server

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use crate::api::{self, ApiState};
use crate::config::Config;
use crate::registry::{ConnectionRegistry, HeartbeatMonitor};
use crate::{Error, Result};

/// The gateway daemon
pub struct Daemon {
    config: Config,
}

impl Daemon {
    /// Create a daemon from configuration
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run until `shutdown` resolves, then stop the heartbeat sweep and
    /// return once the server has drained
    ///
    /// # Errors
    ///
    /// Returns an error if the bind address is invalid or the server fails.
    pub async fn run(self, shutdown: impl Future<Output = ()> + Send + 'static) -> Result<()> {
        let addr: SocketAddr = format!("{}:{}", self.config.server.host, self.config.server.port)
            .parse()
            .map_err(|e| Error::Config(format!("invalid bind address: {e}")))?;

        let registry = Arc::new(ConnectionRegistry::new());
        let monitor = HeartbeatMonitor::start(
            Arc::clone(&registry),
            self.config.heartbeat.interval(),
            self.config.heartbeat.timeout(),
        );

        let result = api::serve(addr, ApiState::new(registry), shutdown).await;

        monitor.stop().await;
        result
    }
}
