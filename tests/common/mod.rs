//! Shared test utilities

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, header};
use serde_json::Value;

use drift_gateway::api::{ApiState, router};
use drift_gateway::registry::{ConnectionRegistry, DeviceLink};
use drift_gateway::{Error, Result};

/// Everything a [`RecordingLink`] observed
#[derive(Debug, Default)]
pub struct LinkLog {
    pub sent: Vec<Value>,
    pub closed: Option<(u16, String)>,
}

/// In-memory device link that records traffic
pub struct RecordingLink {
    log: Arc<Mutex<LinkLog>>,
}

impl RecordingLink {
    #[must_use]
    pub fn new() -> (Box<Self>, Arc<Mutex<LinkLog>>) {
        let log = Arc::new(Mutex::new(LinkLog::default()));
        let link = Box::new(Self {
            log: Arc::clone(&log),
        });
        (link, log)
    }
}

#[async_trait]
impl DeviceLink for RecordingLink {
    async fn accept(&mut self) -> Result<()> {
        Ok(())
    }

    async fn send(&mut self, payload: &Value) -> Result<()> {
        self.log
            .lock()
            .map_err(|e| Error::Transport(e.to_string()))?
            .sent
            .push(payload.clone());
        Ok(())
    }

    async fn close(&mut self, code: u16, reason: &str) -> Result<()> {
        self.log
            .lock()
            .map_err(|e| Error::Transport(e.to_string()))?
            .closed = Some((code, reason.to_string()));
        Ok(())
    }
}

/// Router over a fresh registry
#[must_use]
pub fn test_router() -> (axum::Router, Arc<ConnectionRegistry>) {
    let registry = Arc::new(ConnectionRegistry::new());
    let app = router(ApiState::new(Arc::clone(&registry)));
    (app, registry)
}

/// Router with one recording device already connected
pub async fn router_with_device(device_id: &str) -> (axum::Router, Arc<Mutex<LinkLog>>) {
    let (app, registry) = test_router();
    let (link, log) = RecordingLink::new();
    registry
        .register(device_id, link, "SN001")
        .await
        .expect("failed to register test device");
    (app, log)
}

/// Build a JSON POST request
#[must_use]
pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

/// Read a response body as JSON
pub async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    serde_json::from_slice(&bytes).expect("body is not json")
}
