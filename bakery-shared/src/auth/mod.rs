/// Authentication utilities
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification for the admin
///   login

pub mod password;
