//! HTTP handlers module
//!
//! Route handlers grouped by concern. Each handler delegates to a service
//! and maps failures onto [`ApiError`](crate::utils::errors::ApiError).

pub mod auth;
pub mod performance;
pub mod products;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use crate::app::AppState;
use crate::models::MessageResponse;

pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse::new("Welcome to the Product Management API"))
}

/// Liveness and database reachability
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    if state.services.database_healthy().await {
        (StatusCode::OK, Json(json!({ "status": "ok", "database": true })))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "degraded", "database": false })),
        )
    }
}

pub async fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not Found" })))
}
