//! Test context for unified test setup
//!
//! Every [`TestApp`] owns its own in-memory database, seeded admin account,
//! and fresh rate limiters, so tests never share state.

use std::sync::Once;

use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use product_hub::config::Settings;
use product_hub::database::{create_pool, run_migrations, DatabaseConfig, DatabaseService};
use product_hub::{build_router, AppState, ServiceFactory};

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin123";

static INIT: Once = Once::new();

/// Initialize logging for tests (called once)
pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("warn")
            .with_test_writer()
            .try_init();
    });
}

/// Default settings with a cheap bcrypt cost
pub fn test_settings() -> Settings {
    let mut settings = Settings::default();
    settings.auth.bcrypt_cost = 4;
    settings
}

/// Decoded response of a single request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn detail(&self) -> Option<&str> {
        self.body.get("detail").and_then(Value::as_str)
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_settings(test_settings()).await
    }

    pub async fn with_settings(settings: Settings) -> Self {
        init_test_logging();

        let pool = create_pool(&DatabaseConfig::in_memory())
            .await
            .expect("Failed to create test database");
        run_migrations(&pool).await.expect("Failed to run migrations");

        let services = ServiceFactory::new(&settings, DatabaseService::new(pool))
            .expect("Failed to create services");
        services.auth.seed_admin().await.expect("Failed to seed admin");

        let state = AppState::new(settings, services).expect("Failed to create app state");
        let router = build_router(state.clone());

        Self { router, state }
    }

    pub async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        TestResponse { status, headers, body }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(build_request(Method::GET, uri, token, None)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(build_request(Method::DELETE, uri, token, None)).await
    }

    pub async fn post_json(&self, uri: &str, body: &Value, token: Option<&str>) -> TestResponse {
        self.request(build_request(Method::POST, uri, token, Some(body))).await
    }

    pub async fn put_json(&self, uri: &str, body: &Value, token: Option<&str>) -> TestResponse {
        self.request(build_request(Method::PUT, uri, token, Some(body))).await
    }

    /// POST /token with form-encoded credentials
    pub async fn login(&self, username: &str, password: &str) -> TestResponse {
        self.request(login_request(username, password, None)).await
    }

    pub async fn login_from(&self, client: &str, username: &str, password: &str) -> TestResponse {
        self.request(login_request(username, password, Some(client))).await
    }

    pub async fn signup(&self, username: &str, password: &str) -> TestResponse {
        let body = serde_json::json!({ "username": username, "password": password });
        self.post_json("/signup", &body, None).await
    }

    pub async fn token_for(&self, username: &str, password: &str) -> String {
        let response = self.login(username, password).await;
        assert_eq!(response.status, StatusCode::OK, "login failed: {:?}", response.body);
        response.body["access_token"]
            .as_str()
            .expect("access_token missing")
            .to_string()
    }

    pub async fn admin_token(&self) -> String {
        self.token_for(ADMIN_USERNAME, ADMIN_PASSWORD).await
    }

    /// Create a product and return its response body
    pub async fn create_product(&self, token: &str, body: &Value) -> Value {
        let response = self.post_json("/products", body, Some(token)).await;
        assert_eq!(response.status, StatusCode::OK, "create failed: {:?}", response.body);
        response.body
    }
}

pub fn build_request(method: Method, uri: &str, token: Option<&str>, body: Option<&Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    };
    request.expect("Failed to build request")
}

fn login_request(username: &str, password: &str, client: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri("/token")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(client) = client {
        builder = builder.header("x-forwarded-for", client);
    }

    builder
        .body(Body::from(format!("username={username}&password={password}")))
        .expect("Failed to build request")
}
