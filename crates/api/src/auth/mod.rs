//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- staff token issuance plus staff/session token validation.

pub mod jwt;
pub mod password;
