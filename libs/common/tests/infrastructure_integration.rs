//! Integration tests for the infrastructure components
//!
//! These tests verify that the shared hashing and sanitization utilities
//! compose the way the authentication service relies on.

use common::{
    hasher::{Argon2Hasher, Hasher},
    sanitize::sanitize_input,
};

/// Test that a sanitized credential survives a hash/verify round trip
#[test]
fn test_infrastructure_integration() -> Result<(), Box<dyn std::error::Error>> {
    let hasher = Argon2Hasher;

    // Sanitization runs before anything is stored
    let username = sanitize_input(" <b>alice</b> ").trim().to_string();
    assert_eq!(username, "balice/b", "Sanitization failed");

    // Hash a password and verify it the way the login path does
    let hash = hasher.hash("Abcdef1!")?;
    assert!(hasher.verify("Abcdef1!", &hash)?, "Verify failed");
    assert!(!hasher.verify("Abcdef2!", &hash)?, "Mismatch not detected");

    // Two users with the same password must not share a hash
    let other = hasher.hash("Abcdef1!")?;
    assert_ne!(hash, other, "Hashes are not salted");

    Ok(())
}
