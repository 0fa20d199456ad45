//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod auth;
pub mod product;
pub mod user;

// Re-export commonly used models
pub use auth::{BenchmarkResponse, Claims, MessageResponse, TokenForm, TokenResponse};
pub use product::{Product, ProductCreate, ProductFilter, ProductQueryParams, ProductUpdate, SortField, SortOrder};
pub use user::{User, UserCreate};
