//! Product Hub
//!
//! A JWT-secured product management HTTP API. This library provides the
//! configuration, persistence, services, and router; the `product-hub`
//! binary wires them together and serves them on `0.0.0.0:8000`.

pub mod app;
pub mod config;
pub mod database;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use app::{build_router, AppState};
pub use config::Settings;
pub use utils::errors::{ApiError, Result};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use services::ServiceFactory;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
