//! Database service layer
//!
//! This module bundles the repositories behind one cloneable handle

use crate::database::{DatabasePool, ProductRepository, UserRepository};

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub users: UserRepository,
    pub products: ProductRepository,
    pool: DatabasePool,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            products: ProductRepository::new(pool.clone()),
            pool,
        }
    }

    /// Underlying connection pool
    pub fn pool(&self) -> &DatabasePool {
        &self.pool
    }
}
