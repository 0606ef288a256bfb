//! Authentication state shared with the presentation layer
//!
//! [`AuthState`] owns the user directory, the sole active session, and the
//! lockout tracker. The presentation layer calls in and renders the typed
//! results; it holds no authentication logic of its own.

use std::sync::Arc;

use tracing::{info, warn};

use common::hasher::{Argon2Hasher, Hasher};
use common::sanitize::sanitize_input;

use crate::config::AuthConfig;
use crate::directory::UserDirectory;
use crate::error::{LoginError, MissingFields, RegisterError, ValidationError, ValidationErrors};
use crate::lockout::{FailureOutcome, LockoutStatus, LockoutTracker};
use crate::models::{NewUser, Session, User};
use crate::session::SessionManager;
use crate::validation;

/// Authentication state shared across the presentation layer
#[derive(Clone)]
pub struct AuthState {
    directory: UserDirectory,
    sessions: SessionManager,
    lockout: LockoutTracker,
    hasher: Arc<dyn Hasher>,
}

impl AuthState {
    /// Create authentication state with the default argon2 hasher
    pub fn new(config: &AuthConfig) -> Self {
        Self::with_hasher(config, Arc::new(Argon2Hasher))
    }

    /// Create authentication state over a specific hashing scheme
    pub fn with_hasher(config: &AuthConfig, hasher: Arc<dyn Hasher>) -> Self {
        Self {
            directory: UserDirectory::new(),
            sessions: SessionManager::new(config.session_ttl()),
            lockout: LockoutTracker::new(config.lockout()),
            hasher,
        }
    }

    /// Register a new user
    ///
    /// Username and email are sanitized and trimmed before validation. Every
    /// failing rule is collected and reported together. Success appends the
    /// record and does not create a session.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<User, RegisterError> {
        let username = sanitize_input(username).trim().to_string();
        let email = sanitize_input(email).trim().to_string();

        let mut errors = ValidationErrors::new();

        if let Err(error) = validation::validate_username(&username) {
            errors.push(error);
        } else if self.directory.username_exists(&username).await {
            errors.push(ValidationError::UsernameTaken);
        }

        if let Err(error) = validation::validate_email(&email) {
            errors.push(error);
        } else if self.directory.email_exists(&email).await {
            errors.push(ValidationError::EmailTaken);
        }

        let missing_rules = validation::missing_password_rules(password);
        if !missing_rules.is_empty() {
            errors.push(ValidationError::PasswordWeak(missing_rules));
        }

        if password != confirm_password {
            errors.push(ValidationError::PasswordMismatch);
        }

        if !errors.is_empty() {
            warn!("Registration rejected: {}", errors);
            return Err(errors.into());
        }

        let password_hash = self.hasher.hash(password)?;
        let user = self
            .directory
            .create(NewUser {
                username,
                email,
                password_hash,
            })
            .await;

        Ok(user)
    }

    /// Attempt a login, driving the lockout state machine
    ///
    /// While locked out the attempt is rejected before any credential check.
    /// Empty fields are reported without counting an attempt. A match creates
    /// the session and resets the lockout; a mismatch counts toward it.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, LoginError> {
        if let LockoutStatus::Locked { remaining_seconds } = self.lockout.status().await {
            info!("Login rejected while locked out ({remaining_seconds}s remaining)");
            return Err(LoginError::LockedOut(remaining_seconds));
        }

        let username = sanitize_input(username).trim().to_string();
        let missing = MissingFields {
            username: username.is_empty(),
            password: password.is_empty(),
        };
        if missing.any() {
            return Err(LoginError::MissingFields(missing));
        }

        let matched = match self.directory.find_by_username(&username).await {
            Some(user) => self
                .hasher
                .verify(password, &user.password_hash)?
                .then_some(user),
            None => None,
        };

        match matched {
            Some(user) => {
                let session = self.sessions.create_session(&user).await;
                self.lockout.reset().await;
                info!("Login successful for user: {}", user.username);
                Ok(session)
            }
            None => {
                warn!("Failed login attempt for user: {username}");
                match self.lockout.record_failure().await {
                    FailureOutcome::LockedOut(seconds) => Err(LoginError::LockedOut(seconds)),
                    FailureOutcome::AttemptsRemaining(remaining) => {
                        Err(LoginError::InvalidCredentials(remaining))
                    }
                }
            }
        }
    }

    /// Destroy the active session; idempotent
    pub async fn logout(&self) {
        self.sessions.destroy_session().await;
    }

    /// Restore the active session if one exists and has not expired
    pub async fn restore_session(&self) -> Option<Session> {
        self.sessions.restore_session().await
    }
}
