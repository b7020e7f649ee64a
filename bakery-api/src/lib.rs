//! # Bakery API Server Library
//!
//! HTTP surface of the bakery storefront: menu views, the session cart,
//! order submission, the photo gallery and the admin area.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `extract`: Body extractors with JSON rejections
//! - `middleware`: Admin guard and security headers
//! - `routes`: Route handlers
//! - `session`: Typed session access (cart, admin flag, flashes)
//! - `storage`: Gallery image files

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod session;
pub mod storage;
