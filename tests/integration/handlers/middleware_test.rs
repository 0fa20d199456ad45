//! Response headers and request ids added by the middleware stack

use axum::http::StatusCode;

use product_hub::middleware::SECURITY_HEADERS;

use crate::helpers::*;

#[tokio::test]
async fn test_security_headers_on_every_response() {
    let app = TestApp::new().await;

    let responses = [
        app.get("/", None).await,
        app.get("/products", None).await,
        app.get("/missing", None).await,
    ];

    for response in responses {
        for (name, value) in SECURITY_HEADERS {
            assert_eq!(response.header(name), Some(value), "{name} on {}", response.status);
        }
    }
}

#[tokio::test]
async fn test_request_id_is_generated() {
    let app = TestApp::new().await;

    let first = app.get("/", None).await;
    let second = app.get("/", None).await;

    let first_id = first.header("x-request-id").expect("request id missing");
    let second_id = second.header("x-request-id").expect("request id missing");
    assert!(!first_id.is_empty());
    assert_ne!(first_id, second_id);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let app = TestApp::new().await;

    let request = axum::http::Request::builder()
        .uri("/")
        .header("x-request-id", "trace-me-123")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.request(request).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header("x-request-id"), Some("trace-me-123"));
}

#[tokio::test]
async fn test_activity_is_tracked_per_client_and_endpoint() {
    let app = TestApp::new().await;

    app.get("/", None).await;
    app.get("/", None).await;
    app.get("/health", None).await;

    assert_eq!(app.state.activity.tracked_keys(), 2);
}
