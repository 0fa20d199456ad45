//! A new user signs up and manages a product end to end

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::*;

#[tokio::test]
async fn test_complete_product_lifecycle() {
    let app = TestApp::new().await;

    assert_eq!(app.signup("shopkeeper", "s3cret").await.status, StatusCode::OK);
    let token = app.token_for("shopkeeper", "s3cret").await;

    let created = app
        .create_product(&token, &product_payload("Widget", 12.5, 3))
        .await;
    let id = created["id"].as_i64().unwrap();

    let response = app.get("/products", Some(&token)).await;
    assert_eq!(names(&response.body), ["Widget"]);

    let response = app
        .put_json(&format!("/products/{id}"), &product_payload("Widget Pro", 15.0, 2), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.get(&format!("/products/{id}"), Some(&token)).await;
    assert_eq!(response.body["name"], "Widget Pro");
    assert_eq!(response.body["price"], 15.0);

    let response = app.delete(&format!("/products/{id}"), Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.get("/products", Some(&token)).await;
    assert_eq!(response.body, json!([]));
}

#[tokio::test]
async fn test_tokens_from_different_users_share_the_catalog() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;

    app.signup("viewer", "viewer").await;
    let viewer = app.token_for("viewer", "viewer").await;

    app.create_product(&admin, &product_payload("Shared", 1.0, 1)).await;
    let response = app.get("/products", Some(&viewer)).await;
    assert_eq!(names(&response.body), ["Shared"]);
}
