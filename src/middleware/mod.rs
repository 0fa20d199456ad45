//! Middleware module
//!
//! Request extractors and tower layers shared by all routes

pub mod auth;
pub mod logging;
pub mod rate_limit;
pub mod security;

pub use auth::CurrentUser;
pub use logging::{request_logging_middleware, REQUEST_ID_HEADER};
pub use rate_limit::{rate_limit_middleware, RateLimitMiddleware, RateLimitScope, SuspiciousActivityTracker};
pub use security::{security_headers_middleware, SECURITY_HEADERS};
