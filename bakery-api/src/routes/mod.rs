/// HTTP route handlers
///
/// Organized by resource:
///
/// - `health`: Health check endpoint
/// - `pages`: Home, menu, customize and contact views
/// - `cart`: Session cart
/// - `orders`: Order submission and status updates
/// - `auth`: Admin login and logout
/// - `admin`: Order dashboard
/// - `gallery`: Public gallery and photo management

pub mod admin;
pub mod auth;
pub mod cart;
pub mod gallery;
pub mod health;
pub mod orders;
pub mod pages;
