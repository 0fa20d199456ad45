//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the Product Hub application.

use std::ffi::OsStr;
use std::path::Path;

use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::{LogFormat, LoggingConfig};
use crate::utils::errors::{ApiError, Result};

/// Initialize logging based on configuration.
///
/// The returned guard flushes the file writer on drop and must be held for
/// the lifetime of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| ApiError::Config(e.to_string()))?;

    let stdout_layer = match config.format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stdout)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stdout)
            .boxed(),
    };

    let mut guard = None;
    let file_layer = config.file_path.as_deref().map(|path| {
        let path = Path::new(path);
        let directory = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
        let file_name = path.file_name().unwrap_or(OsStr::new("product-hub.log"));
        let file_appender = tracing_appender::rolling::daily(directory, file_name);
        let (non_blocking, worker_guard) = tracing_appender::non_blocking(file_appender);
        guard = Some(worker_guard);
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(non_blocking)
    });

    tracing_subscriber::registry()
        .with(stdout_layer)
        .with(file_layer)
        .with(filter)
        .try_init()
        .map_err(|e| ApiError::Config(e.to_string()))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log user actions with structured data
pub fn log_user_action(username: &str, action: &str, details: Option<&str>) {
    info!(
        username = username,
        action = action,
        details = details,
        "User action performed"
    );
}

/// Log product management actions
pub fn log_product_action(product_id: i64, action: &str, username: &str) {
    info!(
        product_id = product_id,
        action = action,
        username = username,
        "Product action performed"
    );
}

/// Log a completed HTTP request
pub fn log_request(endpoint: &str, user: &str, status_code: u16, duration_secs: f64) {
    if status_code >= 500 {
        warn!(
            endpoint = endpoint,
            user = user,
            status = status_code,
            duration = %format!("{:.3}s", duration_secs),
            "Request completed with server error"
        );
    } else {
        info!(
            endpoint = endpoint,
            user = user,
            status = status_code,
            duration = %format!("{:.3}s", duration_secs),
            "Request completed"
        );
    }
}

/// Log performance metrics
pub fn log_performance_metric(metric_name: &str, value: f64, unit: &str) {
    debug!(
        metric = metric_name,
        value = value,
        unit = unit,
        "Performance metric recorded"
    );
}
