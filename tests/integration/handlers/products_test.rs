//! Product CRUD and listing endpoints

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::*;

async fn app_with_catalog() -> (TestApp, String) {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    for product in sample_catalog() {
        app.create_product(&token, &product).await;
    }
    (app, token)
}

#[tokio::test]
async fn test_create_returns_stored_product() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let body = json!({
        "id": 999,
        "name": "  Test Product ",
        "description": "A test product",
        "price": 9.999,
        "quantity": 100,
    });
    let created = app.create_product(&token, &body).await;

    assert_eq!(created["name"], "Test Product");
    assert_eq!(created["description"], "A test product");
    assert_eq!(created["price"], 10.0);
    assert_eq!(created["quantity"], 100);
    // Ids are assigned by the store
    assert_ne!(created["id"], 999);

    let id = created["id"].as_i64().unwrap();
    let fetched = app.get(&format!("/products/{id}"), Some(&token)).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body, created);
}

#[tokio::test]
async fn test_description_is_optional() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let created = app
        .create_product(&token, &json!({ "name": "Plain", "price": 1.0, "quantity": 1 }))
        .await;
    assert_eq!(created["description"], "");
}

#[tokio::test]
async fn test_create_rejects_invalid_products() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let cases = [
        product_payload("", 1.0, 1),
        product_payload("Negative", -1.0, 1),
        product_payload("Too much", 2_000_000.0, 1),
        product_payload("Negative stock", 1.0, -5),
        json!({ "name": "Missing price", "quantity": 1 }),
        json!({ "name": "Wrong type", "price": "cheap", "quantity": 1 }),
    ];

    for body in cases {
        let response = app.post_json("/products", &body, Some(&token)).await;
        assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY, "{body}");
        assert!(response.detail().is_some());
    }

    let response = app.get("/products", Some(&token)).await;
    assert_eq!(response.body, json!([]));
}

#[tokio::test]
async fn test_update_replaces_fields() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    let created = app.create_product(&token, &product_payload("Old", 1.0, 1)).await;
    let id = created["id"].as_i64().unwrap();

    let response = app
        .put_json(&format!("/products/{id}"), &product_payload("New", 2.5, 7), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "message": "Product updated" }));

    let fetched = app.get(&format!("/products/{id}"), Some(&token)).await;
    assert_eq!(fetched.body["name"], "New");
    assert_eq!(fetched.body["price"], 2.5);
    assert_eq!(fetched.body["quantity"], 7);
    assert_eq!(fetched.body["created_at"], created["created_at"]);
}

#[tokio::test]
async fn test_delete_removes_product() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    let created = app.create_product(&token, &product_payload("Doomed", 1.0, 1)).await;
    let id = created["id"].as_i64().unwrap();

    let response = app.delete(&format!("/products/{id}"), Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "message": "Product deleted" }));

    let response = app.get(&format!("/products/{id}"), Some(&token)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_missing_product_is_not_found() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let response = app.get("/products/42", Some(&token)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.detail(), Some("Product not found"));

    let response = app
        .put_json("/products/42", &product_payload("Ghost", 1.0, 1), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app.delete("/products/42", Some(&token)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_numeric_id_is_unprocessable() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let response = app.get("/products/abc", Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_list_defaults_to_price_ascending() {
    let (app, token) = app_with_catalog().await;

    let response = app.get("/products", Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(names(&response.body), ["Cable", "Mouse", "Keyboard", "Monitor", "Laptop"]);
}

#[tokio::test]
async fn test_list_filters_by_price_range() {
    let (app, token) = app_with_catalog().await;

    let response = app
        .get("/products?min_price=10&max_price=200", Some(&token))
        .await;
    assert_eq!(names(&response.body), ["Mouse", "Keyboard", "Monitor"]);

    // Bounds are inclusive
    let response = app
        .get("/products?min_price=19.5&max_price=19.5", Some(&token))
        .await;
    assert_eq!(names(&response.body), ["Mouse"]);
}

#[tokio::test]
async fn test_list_sorting() {
    let (app, token) = app_with_catalog().await;

    let response = app
        .get("/products?sort_by=quantity&sort_order=desc", Some(&token))
        .await;
    assert_eq!(names(&response.body), ["Cable", "Mouse", "Keyboard", "Monitor", "Laptop"]);

    let response = app.get("/products?sort_by=name", Some(&token)).await;
    assert_eq!(names(&response.body), ["Cable", "Keyboard", "Laptop", "Monitor", "Mouse"]);

    let response = app
        .get("/products?sort_by=price&sort_order=DESC", Some(&token))
        .await;
    assert_eq!(names(&response.body)[0], "Laptop");
}

#[tokio::test]
async fn test_list_pagination() {
    let (app, token) = app_with_catalog().await;

    let response = app.get("/products?skip=1&limit=2", Some(&token)).await;
    assert_eq!(names(&response.body), ["Mouse", "Keyboard"]);

    let response = app.get("/products?skip=10", Some(&token)).await;
    assert_eq!(response.body, json!([]));
}

#[tokio::test]
async fn test_list_rejects_bad_parameters() {
    let (app, token) = app_with_catalog().await;

    let response = app.get("/products?sort_by=id", Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        response.detail(),
        Some("Invalid sort field. Allowed: price, quantity, name")
    );

    for query in [
        "sort_order=sideways",
        "limit=0",
        "limit=101",
        "skip=-1",
        "min_price=cheap",
    ] {
        let response = app.get(&format!("/products?{query}"), Some(&token)).await;
        assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY, "{query}");
    }
}
