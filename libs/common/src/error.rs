//! Custom error types for the common library
//!
//! This module defines application-specific error types that can be used
//! throughout the application.

use thiserror::Error;

/// Custom error type for password hashing operations
#[derive(Error, Debug)]
pub enum HashError {
    /// Error occurred while deriving a password hash
    #[error("Password hashing error: {0}")]
    Hash(String),

    /// The stored password hash could not be parsed
    #[error("Malformed password hash: {0}")]
    Parse(String),
}

/// Type alias for Result with HashError
pub type HashResult<T> = Result<T, HashError>;
