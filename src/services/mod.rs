//! Services module
//!
//! This module contains business logic services

pub mod auth;
pub mod cache;
pub mod product;

// Re-export commonly used services
pub use auth::AuthService;
pub use cache::{CacheStats, ProductCache};
pub use product::ProductService;

use std::time::Duration;

use crate::config::settings::Settings;
use crate::database::DatabaseService;
use crate::utils::errors::Result;

/// Service factory for creating and sharing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub auth: AuthService,
    pub products: ProductService,
    database: DatabaseService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(settings: &Settings, database: DatabaseService) -> Result<Self> {
        let auth = AuthService::new(database.users.clone(), settings.auth.clone())?;
        let cache = ProductCache::new(Duration::from_secs(settings.cache.ttl_seconds));
        let products = ProductService::new(database.products.clone(), cache);

        Ok(Self {
            auth,
            products,
            database,
        })
    }

    /// Whether the database answers queries
    pub async fn database_healthy(&self) -> bool {
        crate::database::health_check(self.database.pool()).await.is_ok()
    }
}
