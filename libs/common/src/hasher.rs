//! Password hashing behind a capability trait
//!
//! The authentication service never touches a concrete hashing algorithm
//! directly; it goes through [`Hasher`] so the scheme can be swapped (and
//! faked in tests) without touching the login logic.

use argon2::{
    Argon2, PasswordHash, PasswordVerifier,
    password_hash::{PasswordHasher as _, SaltString},
};
use tracing::debug;

use crate::error::{HashError, HashResult};

/// Capability for deriving and checking password hashes
pub trait Hasher: Send + Sync {
    /// Derive a storable hash from a plaintext password
    fn hash(&self, password: &str) -> HashResult<String>;

    /// Check a plaintext password against a stored hash
    ///
    /// Returns `Ok(false)` on mismatch; `Err` is reserved for a hash that
    /// cannot be parsed at all.
    fn verify(&self, password: &str, hash: &str) -> HashResult<bool>;
}

/// Salted argon2 hashing with the crate's default parameters
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Hasher;

impl Hasher for Argon2Hasher {
    fn hash(&self, password: &str) -> HashResult<String> {
        debug!("Hashing password with argon2");

        let salt = SaltString::generate(&mut rand::thread_rng());
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| HashError::Hash(e.to_string()))?
            .to_string();

        Ok(hash)
    }

    fn verify(&self, password: &str, hash: &str) -> HashResult<bool> {
        let parsed_hash = PasswordHash::new(hash).map_err(|e| HashError::Parse(e.to_string()))?;

        let argon2 = Argon2::default();
        Ok(argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}
