//! Password hashing.
//!
//! Argon2id with default parameters and a per-password random salt, stored
//! as a PHC string. Verification goes through the hashing primitive, which
//! compares in constant time. Plaintext passwords are never persisted or
//! logged.

use crate::{AuthError, Result as AuthErrorResult};

use std::panic::Location;

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use error_location::ErrorLocation;

/// Hash a plaintext password with a fresh random salt.
#[track_caller]
pub fn hash(plain: &str) -> AuthErrorResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::PasswordHash {
            message: format!("failed to hash password: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
}

/// Verify a plaintext password against a stored PHC string.
///
/// A malformed stored hash is an error; a clean mismatch is `Ok(false)`.
#[track_caller]
pub fn verify(plain: &str, stored: &str) -> AuthErrorResult<bool> {
    let parsed = PasswordHash::new(stored).map_err(|e| AuthError::PasswordHash {
        message: format!("stored password hash is malformed: {}", e),
        location: ErrorLocation::from(Location::caller()),
    })?;

    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}
