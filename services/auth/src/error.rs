//! Typed errors surfaced to the presentation layer
//!
//! Everything here is recoverable by the caller: validation failures are
//! collected per field, lockout is transient, and invalid credentials carry
//! the remaining-attempts counter.

use std::fmt;

use thiserror::Error;

use common::error::HashError;

/// Form field an error is scoped to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Username,
    Email,
    Password,
    ConfirmPassword,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::Username => "username",
            Field::Email => "email",
            Field::Password => "password",
            Field::ConfirmPassword => "confirm password",
        }
    }
}

/// Password rules, listed in the order they are checked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordRule {
    MinLength,
    Uppercase,
    Lowercase,
    Digit,
    Symbol,
}

impl PasswordRule {
    pub fn describe(self) -> &'static str {
        match self {
            PasswordRule::MinLength => "at least 8 characters",
            PasswordRule::Uppercase => "one uppercase letter",
            PasswordRule::Lowercase => "one lowercase letter",
            PasswordRule::Digit => "one number",
            PasswordRule::Symbol => "one special character (!@#$%^&*)",
        }
    }
}

fn join_rules(rules: &[PasswordRule]) -> String {
    rules
        .iter()
        .map(|r| r.describe())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Field-scoped registration failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Username must be 3-20 characters and contain only letters, numbers, and underscores")]
    UsernameInvalid,

    #[error("Username already exists")]
    UsernameTaken,

    #[error("Please enter a valid email address")]
    EmailInvalid,

    #[error("Email already registered")]
    EmailTaken,

    /// Every password rule the candidate failed, reported together
    #[error("Password must contain {}", join_rules(.0))]
    PasswordWeak(Vec<PasswordRule>),

    #[error("Passwords do not match")]
    PasswordMismatch,
}

impl ValidationError {
    /// Which form field this error belongs to
    pub fn field(&self) -> Field {
        match self {
            ValidationError::UsernameInvalid | ValidationError::UsernameTaken => Field::Username,
            ValidationError::EmailInvalid | ValidationError::EmailTaken => Field::Email,
            ValidationError::PasswordWeak(_) => Field::Password,
            ValidationError::PasswordMismatch => Field::ConfirmPassword,
        }
    }
}

/// All registration failures, collected rather than short-circuited
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// Whether any collected error is scoped to the given field
    pub fn has_field(&self, field: Field) -> bool {
        self.0.iter().any(|e| e.field() == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Registration outcome when the user record could not be created
#[derive(Error, Debug)]
pub enum RegisterError {
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),

    #[error("Internal error: {0}")]
    Hash(#[from] HashError),
}

/// Which login fields were left empty
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MissingFields {
    pub username: bool,
    pub password: bool,
}

impl MissingFields {
    pub fn any(self) -> bool {
        self.username || self.password
    }
}

impl fmt::Display for MissingFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.username {
            parts.push("Username is required");
        }
        if self.password {
            parts.push("Password is required");
        }
        write!(f, "{}", parts.join("; "))
    }
}

/// Login outcome when no session was created
#[derive(Error, Debug)]
pub enum LoginError {
    /// Rejected without a credential check; seconds until the window elapses
    #[error("Account locked due to too many failed attempts. Try again in {0} seconds.")]
    LockedOut(u64),

    /// Credentials did not match; attempts left before lockout
    #[error("Invalid credentials. {0} attempts remaining.")]
    InvalidCredentials(u32),

    /// Empty fields; no attempt was counted
    #[error("{0}")]
    MissingFields(MissingFields),

    #[error("Internal error: {0}")]
    Hash(#[from] HashError),
}
