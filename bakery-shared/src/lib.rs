//! # Bakery Shared Library
//!
//! Domain types and persistence used by the bakery API server.
//!
//! ## Module Organization
//!
//! - `catalog`: Static menu table loaded at startup
//! - `cart`: Session cart value and its operations
//! - `upload`: Gallery upload filename policy
//! - `auth`: Password hashing
//! - `db`: Connection pool and migrations
//! - `models`: Database models and data structures

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod db;
pub mod models;
pub mod upload;

/// Current version of the bakery shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
