//! Monitor and health endpoint integration tests

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

mod common;
use common::{body_json, post_json, router_with_device, test_router};

#[tokio::test]
async fn list_devices_returns_connected_ids() {
    let (app, _log) = router_with_device("cam-1").await;

    let response = app
        .oneshot(post_json("/online-monitor", &json!({"type": "list-devices"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["type"], "list-devices");
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"], json!(["cam-1"]));
}

#[tokio::test]
async fn get_status_returns_the_device_record() {
    let (app, _log) = router_with_device("cam-1").await;

    let response = app
        .oneshot(post_json(
            "/online-monitor",
            &json!({"type": "get-status", "data": {"deviceId": "cam-1"}}),
        ))
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["deviceId"], "cam-1");
    assert_eq!(body["data"]["deviceInfo"]["no"], "SN001");
    assert_eq!(body["data"]["recording"], false);
}

#[tokio::test]
async fn get_status_without_device_id() {
    let (app, _registry) = test_router();

    let response = app
        .oneshot(post_json("/online-monitor", &json!({"type": "get-status"})))
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["code"], -1);
    assert!(body["info"].as_str().unwrap().contains("deviceId"));
}

#[tokio::test]
async fn get_status_for_unknown_device() {
    let (app, _registry) = test_router();

    let response = app
        .oneshot(post_json(
            "/online-monitor",
            &json!({"type": "get-status", "data": {"deviceId": "ghost"}}),
        ))
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["code"], -1);
    assert_eq!(body["info"], "device not found");
}

#[tokio::test]
async fn unknown_query_type_is_rejected() {
    let (app, _registry) = test_router();

    let response = app
        .oneshot(post_json("/online-monitor", &json!({"type": "drop-tables"})))
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["code"], -1);
    assert!(body["info"].as_str().unwrap().contains("drop-tables"));
}

#[tokio::test]
async fn health_reports_the_connection_count() {
    let (app, _log) = router_with_device("cam-1").await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "drift-gateway");
    assert_eq!(body["connected_devices"], 1);
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn health_on_empty_registry() {
    let (app, _registry) = test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["connected_devices"], 0);
}
