//! Error handling for Product Hub
//!
//! This module defines the main error type used throughout the application
//! and how each variant is rendered as an HTTP response.

use axum::extract::rejection::{FormRejection, JsonRejection, PathRejection, QueryRejection};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error, warn};

/// Main error type for Product Hub
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    #[error("Background task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Token expired or invalid")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("Invalid token")]
    MissingSubject,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Username already exists")]
    UsernameTaken,

    #[error("Product not found")]
    ProductNotFound { product_id: i64 },

    #[error("{0}")]
    InvalidInput(String),

    #[error("Rate limit exceeded: {limit}")]
    RateLimitExceeded { limit: String, retry_after_secs: u64 },
}

macro_rules! impl_from_rejection {
    ($($rejection:ty),* $(,)?) => {
        $(
            impl From<$rejection> for ApiError {
                fn from(rejection: $rejection) -> Self {
                    ApiError::InvalidInput(rejection.body_text())
                }
            }
        )*
    };
}

impl_from_rejection!(JsonRejection, FormRejection, QueryRejection, PathRejection);

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::Config(err.to_string())
    }
}

/// Result type alias for Product Hub operations
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Check if the error is recoverable by retrying the same request later
    pub fn is_recoverable(&self) -> bool {
        match self {
            ApiError::Database(_) => true,
            ApiError::Migration(_) => false,
            ApiError::Config(_) => false,
            ApiError::PasswordHash(_) => false,
            ApiError::TaskJoin(_) => true,
            ApiError::Serialization(_) => false,
            ApiError::Io(_) => true,
            ApiError::NotAuthenticated => false,
            ApiError::InvalidToken(_) => false,
            ApiError::MissingSubject => false,
            ApiError::InvalidCredentials => false,
            ApiError::UsernameTaken => false,
            ApiError::ProductNotFound { .. } => false,
            ApiError::InvalidInput(_) => false,
            ApiError::RateLimitExceeded { .. } => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ApiError::Migration(_) => ErrorSeverity::Critical,
            ApiError::Config(_) => ErrorSeverity::Critical,
            ApiError::NotAuthenticated => ErrorSeverity::Warning,
            ApiError::InvalidToken(_) => ErrorSeverity::Warning,
            ApiError::MissingSubject => ErrorSeverity::Warning,
            ApiError::InvalidCredentials => ErrorSeverity::Warning,
            ApiError::RateLimitExceeded { .. } => ErrorSeverity::Warning,
            ApiError::UsernameTaken => ErrorSeverity::Info,
            ApiError::ProductNotFound { .. } => ErrorSeverity::Info,
            ApiError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }

    /// HTTP status this error is reported with
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotAuthenticated
            | ApiError::InvalidToken(_)
            | ApiError::MissingSubject
            | ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::UsernameTaken => StatusCode::BAD_REQUEST,
            ApiError::ProductNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::RateLimitExceeded { .. } => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing detail message. Server-side failures are not described.
    pub fn detail(&self) -> String {
        if self.status_code().is_server_error() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self.severity() {
            ErrorSeverity::Critical | ErrorSeverity::Error => {
                error!(error = %self, status = status.as_u16(), "Request failed")
            }
            ErrorSeverity::Warning => {
                warn!(error = %self, status = status.as_u16(), "Request rejected")
            }
            ErrorSeverity::Info => {
                debug!(error = %self, status = status.as_u16(), "Request rejected")
            }
        }

        let mut response = (status, Json(json!({ "detail": self.detail() }))).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        if let ApiError::RateLimitExceeded { retry_after_secs, .. } = self {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(retry_after_secs));
        }
        response
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
