/// Middleware modules for the API server
///
/// - `security`: Security response headers
/// - `admin`: Admin session guard

pub mod admin;
pub mod security;
