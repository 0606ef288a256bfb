//! Input validation utilities

use regex::Regex;
use std::sync::OnceLock;

use crate::error::{PasswordRule, ValidationError};

/// Symbols accepted for the special-character password rule
pub const PASSWORD_SYMBOLS: &str = "!@#$%^&*";

/// Validate username shape: 3-20 characters, letters, digits, underscores
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    static USERNAME_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = USERNAME_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9_]{3,20}$").expect("Failed to compile username regex")
    });

    if !regex.is_match(username) {
        return Err(ValidationError::UsernameInvalid);
    }

    Ok(())
}

/// Validate email shape: something@domain.tld, no whitespace
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err(ValidationError::EmailInvalid);
    }

    Ok(())
}

/// Check a candidate password against every rule, returning all that fail
///
/// Rules are checked independently so the caller can report every missing
/// class at once instead of stopping at the first.
pub fn missing_password_rules(password: &str) -> Vec<PasswordRule> {
    let mut missing = Vec::new();

    if password.len() < 8 {
        missing.push(PasswordRule::MinLength);
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        missing.push(PasswordRule::Uppercase);
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        missing.push(PasswordRule::Lowercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        missing.push(PasswordRule::Digit);
    }
    if !password.chars().any(|c| PASSWORD_SYMBOLS.contains(c)) {
        missing.push(PasswordRule::Symbol);
    }

    missing
}
