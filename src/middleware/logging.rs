//! Logging middleware
//!
//! This module tags every request with a request id, records its outcome and
//! latency, and feeds the suspicious activity tracker.

use std::time::Instant;

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderValue, Request};
use axum::middleware::Next;
use axum::response::Response;
use tracing::Instrument;

use crate::app::AppState;
use crate::middleware::rate_limit::client_ip;
use crate::utils::helpers::generate_request_id;
use crate::utils::logging::log_request;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Incoming request id when the caller supplied a usable one
fn incoming_request_id(request: &Request<Body>) -> Option<String> {
    request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty() && v.len() <= 128)
        .map(ToString::to_string)
}

pub async fn request_logging_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let started = Instant::now();
    let method = request.method().to_string();
    let endpoint = request.uri().path().to_string();
    let client = client_ip(&request);
    let request_id = incoming_request_id(&request).unwrap_or_else(generate_request_id);
    let user = state
        .services
        .auth
        .peek_subject(request.headers())
        .unwrap_or_else(|| "anonymous".to_string());

    state.activity.check_suspicious_activity(&client, &endpoint);

    let span = tracing::info_span!(
        "http.request",
        request_id = %request_id,
        method = %method,
        route = %endpoint,
        client = %client,
    );

    let mut response = next.run(request).instrument(span.clone()).await;

    span.in_scope(|| {
        log_request(&endpoint, &user, response.status().as_u16(), started.elapsed().as_secs_f64());
    });

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
