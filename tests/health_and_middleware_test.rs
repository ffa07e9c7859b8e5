mod common;

use axum::http::{Method, StatusCode};
use common::TestApp;

#[tokio::test]
async fn liveness_and_readiness() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], "up");

    let (status, body) = app.get("/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["database"], "healthy");
}

#[tokio::test]
async fn status_names_the_service() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["service"], "eshop-api");
    assert_eq!(body["data"]["environment"], "development");
}

#[tokio::test]
async fn every_response_carries_a_request_id() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/api/status", None).await;
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn error_body_echoes_the_request_id() {
    let app = TestApp::new().await;

    let response = app
        .request(Method::GET, &format!("/api/customers/{}", uuid::Uuid::new_v4()), None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let header = response
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .expect("request id header");

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["request_id"], header.as_str());
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api-docs/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/invoices/search"].is_object());
}
