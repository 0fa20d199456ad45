//! Application state and router assembly

use std::sync::Arc;

use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::Settings;
use crate::handlers;
use crate::middleware::{
    rate_limit_middleware, request_logging_middleware, security_headers_middleware,
    RateLimitMiddleware, SuspiciousActivityTracker,
};
use crate::services::ServiceFactory;
use crate::utils::errors::Result;

/// Shared state handed to every handler and middleware
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub services: ServiceFactory,
    pub rate_limiter: Arc<RateLimitMiddleware>,
    pub activity: Arc<SuspiciousActivityTracker>,
}

impl AppState {
    pub fn new(settings: Settings, services: ServiceFactory) -> Result<Self> {
        let rate_limiter = RateLimitMiddleware::new(&settings.rate_limit)?;
        let activity = SuspiciousActivityTracker::new(settings.rate_limit.suspicious_threshold);

        Ok(Self {
            settings: Arc::new(settings),
            services,
            rate_limiter: Arc::new(rate_limiter),
            activity: Arc::new(activity),
        })
    }
}

/// Build the HTTP application
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/signup", post(handlers::auth::signup))
        .route("/token", post(handlers::auth::login))
        .route(
            "/products",
            get(handlers::products::list_products).post(handlers::products::create_product),
        )
        .route(
            "/products/:product_id",
            get(handlers::products::get_product)
                .put(handlers::products::update_product)
                .delete(handlers::products::delete_product),
        )
        .route("/async-products", get(handlers::performance::async_products))
        .route("/cached-products", get(handlers::performance::cached_products))
        .route("/benchmark", get(handlers::performance::benchmark))
        .fallback(handlers::not_found)
        .layer(from_fn_with_state(state.clone(), rate_limit_middleware))
        .layer(from_fn_with_state(state.clone(), request_logging_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
