//! Root, health, and fallback routes

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::*;

#[tokio::test]
async fn test_root_welcome_message() {
    let app = TestApp::new().await;
    let response = app.get("/", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "message": "Welcome to the Product Management API" }));
}

#[tokio::test]
async fn test_health_reports_database() {
    let app = TestApp::new().await;
    let response = app.get("/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "status": "ok", "database": true }));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = TestApp::new().await;
    let response = app.get("/does-not-exist", None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.detail(), Some("Not Found"));
}
