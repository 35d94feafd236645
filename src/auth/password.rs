// Password hashing and verification service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::auth::error::AuthError;

/// Password service for hashing and verification
///
/// Uses Argon2id with a fresh random salt per hash. Verification runs in
/// time independent of where a mismatch occurs.
pub struct PasswordService;

impl PasswordService {
    /// Hash a password using Argon2id with a random salt
    ///
    /// Salting makes the function non-deterministic: hashing the same
    /// password twice yields different strings.
    pub fn hash_password(password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|_| AuthError::PasswordHashError)?;

        Ok(hash.to_string())
    }

    /// Verify a password against a stored hash
    ///
    /// Returns Ok(false) on mismatch; a malformed stored hash is an internal
    /// error, not a mismatch.
    pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::PasswordHashError)?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(_) => Err(AuthError::PasswordHashError),
        }
    }

    /// Validate password strength requirements
    pub fn validate_password_strength(password: &str) -> Result<(), AuthError> {
        if password.len() < 8 {
            return Err(AuthError::ValidationError(
                "Password must be at least 8 characters".to_string(),
            ));
        }
        Ok(())
    }
}
