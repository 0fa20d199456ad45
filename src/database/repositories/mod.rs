//! Database repositories module
//!
//! This module contains all repository implementations for data access

pub mod product;
pub mod user;

// Re-export repositories
pub use product::ProductRepository;
pub use user::UserRepository;
