//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Prefix for environment variable overrides, e.g. `PRODUCT_HUB_SERVER__PORT`
pub const ENV_PREFIX: &str = "PRODUCT_HUB";

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub cache: CacheConfig,
    pub rate_limit: RateLimitConfig,
    pub logging: LoggingConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Token and password configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    pub secret_key: String,
    pub algorithm: String,
    pub access_token_expire_minutes: i64,
    pub bcrypt_cost: u32,
    /// Account created at startup when it does not exist yet
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
}

/// Product snapshot cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    pub ttl_seconds: u64,
}

/// Per-client request limits, all expressed per minute
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    pub enabled: bool,
    pub signup_per_minute: u32,
    pub login_per_minute: u32,
    pub product_writes_per_minute: u32,
    pub product_reads_per_minute: u32,
    /// Requests per minute to a single endpoint that get reported as suspicious
    pub suspicious_threshold: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    /// Log file path; rolled daily with a date suffix in its parent directory. Stdout only when unset
    pub file_path: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Settings {
    /// Load settings from the optional `config` file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::load(config::File::with_name("config").required(false))
    }

    /// Load settings from an explicit file, still honoring environment overrides
    pub fn from_file(path: &Path) -> Result<Self, config::ConfigError> {
        Self::load(config::File::from(path).required(true))
    }

    fn load<S>(file: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Settings::default())?)
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Apply command line `--host` / `--port`, which win over file and environment
    pub fn apply_overrides(&mut self, host: Option<String>, port: Option<u16>) {
        if let Some(host) = host {
            self.server.host = host;
        }
        if let Some(port) = port {
            self.server.port = port;
        }
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::ApiError> {
        super::validation::validate_settings(self)
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String, crate::utils::errors::ApiError> {
        toml::to_string_pretty(self)
            .map_err(|e| crate::utils::errors::ApiError::Config(e.to_string()))
    }

    /// Socket address string the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
            },
            database: DatabaseConfig {
                url: "sqlite://products.db".to_string(),
                max_connections: 5,
                min_connections: 1,
            },
            auth: AuthConfig {
                secret_key: "supersecretkey".to_string(),
                algorithm: "HS256".to_string(),
                access_token_expire_minutes: 30,
                bcrypt_cost: bcrypt::DEFAULT_COST,
                admin_username: Some("admin".to_string()),
                admin_password: Some("admin123".to_string()),
            },
            cache: CacheConfig { ttl_seconds: 60 },
            rate_limit: RateLimitConfig {
                enabled: true,
                signup_per_minute: 5,
                login_per_minute: 10,
                product_writes_per_minute: 30,
                product_reads_per_minute: 60,
                suspicious_threshold: 100,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: LogFormat::Pretty,
                file_path: None,
            },
        }
    }
}
