//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use std::str::FromStr;

use jsonwebtoken::Algorithm;

use crate::utils::errors::{ApiError, Result};
use super::Settings;

/// HMAC algorithms accepted for access tokens
pub const SUPPORTED_ALGORITHMS: [&str; 3] = ["HS256", "HS384", "HS512"];

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_server_config(&settings.server)?;
    validate_database_config(&settings.database)?;
    validate_auth_config(&settings.auth)?;
    validate_rate_limit_config(&settings.rate_limit)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate listener configuration
fn validate_server_config(config: &super::ServerConfig) -> Result<()> {
    if config.host.trim().is_empty() {
        return Err(ApiError::Config("Server host is required".to_string()));
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(ApiError::Config("Database URL is required".to_string()));
    }

    if config.max_connections == 0 {
        return Err(ApiError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(ApiError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }

    Ok(())
}

/// Validate token and password settings
fn validate_auth_config(config: &super::AuthConfig) -> Result<()> {
    if config.secret_key.is_empty() {
        return Err(ApiError::Config("Secret key is required".to_string()));
    }

    parse_algorithm(&config.algorithm)?;

    if config.access_token_expire_minutes <= 0 {
        return Err(ApiError::Config(
            "Access token expiry must be greater than 0 minutes".to_string()
        ));
    }

    if !(4..=31).contains(&config.bcrypt_cost) {
        return Err(ApiError::Config(
            format!("Invalid bcrypt cost: {}. Must be between 4 and 31", config.bcrypt_cost)
        ));
    }

    if config.admin_username.is_some() != config.admin_password.is_some() {
        return Err(ApiError::Config(
            "Admin username and password must be configured together".to_string()
        ));
    }

    Ok(())
}

/// Validate request limits
fn validate_rate_limit_config(config: &super::RateLimitConfig) -> Result<()> {
    let limits = [
        ("signup_per_minute", config.signup_per_minute),
        ("login_per_minute", config.login_per_minute),
        ("product_writes_per_minute", config.product_writes_per_minute),
        ("product_reads_per_minute", config.product_reads_per_minute),
    ];

    for (name, value) in limits {
        if value == 0 {
            return Err(ApiError::Config(format!("Rate limit {} must be greater than 0", name)));
        }
    }

    if config.suspicious_threshold == 0 {
        return Err(ApiError::Config(
            "Suspicious activity threshold must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(ApiError::Config("Log level is required".to_string()));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(ApiError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}

/// Parse a configured token algorithm, accepting only HMAC variants
pub fn parse_algorithm(name: &str) -> Result<Algorithm> {
    if !SUPPORTED_ALGORITHMS.contains(&name) {
        return Err(ApiError::Config(
            format!("Unsupported token algorithm: {}. Supported: {:?}", name, SUPPORTED_ALGORITHMS)
        ));
    }

    Algorithm::from_str(name).map_err(|e| ApiError::Config(e.to_string()))
}
