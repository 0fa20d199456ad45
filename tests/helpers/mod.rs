//! Test helpers module
//!
//! Utilities for driving the Product Hub router in-process: an application
//! context backed by an in-memory database, request builders, and test data.
#![allow(dead_code)]

pub mod test_context;
pub mod test_data;

pub use test_context::*;
pub use test_data::*;
