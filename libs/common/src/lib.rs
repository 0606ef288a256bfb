//! Common library for the Gatehouse application
//!
//! This crate provides shared infrastructure used by the authentication
//! service: password hashing, input sanitization, and error handling.

pub mod error;
pub mod hasher;
pub mod sanitize;

#[cfg(test)]
mod tests {
    #[test]
    fn it_works() {
        let result = 2 + 2;
        assert_eq!(result, 4);
    }
}

/// Example usage of the hasher module
///
/// ```rust,no_run
/// use common::hasher::{Argon2Hasher, Hasher};
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let hasher = Argon2Hasher;
///     let hash = hasher.hash("Abcdef1!")?;
///     println!("Password matches: {}", hasher.verify("Abcdef1!", &hash)?);
///     Ok(())
/// }
/// ```
pub fn example_usage() {}
