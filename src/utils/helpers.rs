//! Helper functions and utilities
//!
//! Input sanitization and validation shared by the services, plus small
//! helpers used by the request middleware.

use std::sync::OnceLock;

use regex::Regex;
use uuid::Uuid;

use crate::utils::errors::{ApiError, Result};

/// Upper bound for prices and quantities
pub const MAX_AMOUNT: f64 = 1_000_000.0;

pub const MAX_USERNAME_LENGTH: usize = 50;

/// bcrypt ignores everything past this many bytes
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Generate a new request identifier
pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}

/// Remove NUL bytes, cap the length in characters, and trim surrounding whitespace
pub fn sanitize_string(value: &str, max_length: usize) -> String {
    let truncated: String = value
        .chars()
        .filter(|&c| c != '\0')
        .take(max_length)
        .collect();

    truncated.trim().to_string()
}

/// Validate a price and round it to cents
pub fn validate_price(price: f64) -> Result<f64> {
    if !price.is_finite() {
        return Err(ApiError::InvalidInput("Price must be a number".to_string()));
    }
    if price < 0.0 {
        return Err(ApiError::InvalidInput("Price cannot be negative".to_string()));
    }
    if price > MAX_AMOUNT {
        return Err(ApiError::InvalidInput(
            "Price exceeds maximum limit of 1,000,000".to_string()
        ));
    }

    Ok((price * 100.0).round() / 100.0)
}

/// Validate a stock quantity
pub fn validate_quantity(quantity: i64) -> Result<i64> {
    if quantity < 0 {
        return Err(ApiError::InvalidInput("Quantity cannot be negative".to_string()));
    }
    if quantity > MAX_AMOUNT as i64 {
        return Err(ApiError::InvalidInput(
            "Quantity exceeds maximum limit of 1,000,000".to_string()
        ));
    }

    Ok(quantity)
}

/// Ensure a sort parameter names one of the allowed columns
pub fn validate_sort_parameter<'a>(sort_by: &'a str, allowed_fields: &[&str]) -> Result<&'a str> {
    if !allowed_fields.contains(&sort_by) {
        return Err(ApiError::InvalidInput(format!(
            "Invalid sort field. Allowed: {}",
            allowed_fields.join(", ")
        )));
    }

    Ok(sort_by)
}

/// Normalize a sort order to `asc` or `desc`
pub fn validate_sort_order(order: &str) -> Result<String> {
    let order = order.to_lowercase();
    if order != "asc" && order != "desc" {
        return Err(ApiError::InvalidInput(
            "Sort order must be 'asc' or 'desc'".to_string()
        ));
    }

    Ok(order)
}

fn username_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9_.@-]{3,50}$").expect("static username pattern"))
}

/// Strip and validate a username. Overlong names are rejected, never shortened.
pub fn validate_username(username: &str) -> Result<String> {
    let username: String = username.chars().filter(|&c| c != '\0').collect();
    let username = username.trim().to_string();
    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(ApiError::InvalidInput(format!(
            "Username cannot exceed {} characters",
            MAX_USERNAME_LENGTH
        )));
    }
    if !username_pattern().is_match(&username) {
        return Err(ApiError::InvalidInput(
            "Username must be 3-50 characters of letters, digits, '_', '.', '@' or '-'".to_string()
        ));
    }

    Ok(username)
}

/// Validate a plain-text password before hashing
pub fn validate_password(password: &str) -> Result<()> {
    if password.is_empty() {
        return Err(ApiError::InvalidInput("Password cannot be empty".to_string()));
    }
    if password.contains('\0') {
        return Err(ApiError::InvalidInput("Password contains invalid characters".to_string()));
    }
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(ApiError::InvalidInput(
            format!("Password cannot exceed {} bytes", MAX_PASSWORD_BYTES)
        ));
    }

    Ok(())
}
