//! # Tasklane Shared Library
//!
//! This crate contains the domain types and business logic shared by the
//! Tasklane API server and its tests.
//!
//! ## Module Organization
//!
//! - `auth`: Credential issuance/verification, password hashing, and the
//!   bearer-token access guard
//! - `models`: Database models, ownership-scoped CRUD, and the task listing
//!   query builder
//! - `db`: Connection pool and migration runner

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the Tasklane shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
