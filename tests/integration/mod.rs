//! Integration tests module
//!
//! Endpoint-level tests live under `handlers`, multi-step flows under
//! `scenarios`.

pub mod handlers;
