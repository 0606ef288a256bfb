//! Authentication configuration

use anyhow::Result;
use chrono::Duration;

use crate::lockout::LockoutConfig;

/// Authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Failed attempts allowed before the lockout engages
    pub max_login_attempts: u32,
    /// Lockout duration in seconds
    pub lockout_seconds: u64,
    /// Session lifetime in minutes
    pub session_ttl_minutes: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            max_login_attempts: 5,
            lockout_seconds: 30,
            session_ttl_minutes: 30,
        }
    }
}

impl AuthConfig {
    /// Create a new AuthConfig from environment variables
    ///
    /// # Environment Variables
    /// - `AUTH_MAX_LOGIN_ATTEMPTS`: Failed attempts before lockout (default: 5)
    /// - `AUTH_LOCKOUT_SECONDS`: Lockout duration in seconds (default: 30)
    /// - `AUTH_SESSION_TTL_MINUTES`: Session lifetime in minutes (default: 30)
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let max_login_attempts = std::env::var("AUTH_MAX_LOGIN_ATTEMPTS")
            .unwrap_or_else(|_| defaults.max_login_attempts.to_string())
            .parse()
            .unwrap_or(defaults.max_login_attempts);

        let lockout_seconds = std::env::var("AUTH_LOCKOUT_SECONDS")
            .unwrap_or_else(|_| defaults.lockout_seconds.to_string())
            .parse()
            .unwrap_or(defaults.lockout_seconds);

        let session_ttl_minutes = std::env::var("AUTH_SESSION_TTL_MINUTES")
            .unwrap_or_else(|_| defaults.session_ttl_minutes.to_string())
            .parse()
            .unwrap_or(defaults.session_ttl_minutes);

        Ok(AuthConfig {
            max_login_attempts,
            lockout_seconds,
            session_ttl_minutes,
        })
    }

    /// Lockout tracker configuration derived from this config
    pub fn lockout(&self) -> LockoutConfig {
        LockoutConfig {
            max_attempts: self.max_login_attempts,
            lockout_seconds: self.lockout_seconds,
        }
    }

    /// Session lifetime as a duration
    pub fn session_ttl(&self) -> Duration {
        Duration::minutes(self.session_ttl_minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_auth_config_from_env_defaults() {
        unsafe {
            std::env::remove_var("AUTH_MAX_LOGIN_ATTEMPTS");
            std::env::remove_var("AUTH_LOCKOUT_SECONDS");
            std::env::remove_var("AUTH_SESSION_TTL_MINUTES");
        }

        let config = AuthConfig::from_env().unwrap();
        assert_eq!(config.max_login_attempts, 5);
        assert_eq!(config.lockout_seconds, 30);
        assert_eq!(config.session_ttl_minutes, 30);
        assert_eq!(config.session_ttl(), Duration::minutes(30));
    }

    #[test]
    #[serial]
    fn test_auth_config_from_env_with_custom_values() {
        // Set environment variables for testing
        unsafe {
            std::env::set_var("AUTH_MAX_LOGIN_ATTEMPTS", "3");
            std::env::set_var("AUTH_LOCKOUT_SECONDS", "60");
            std::env::set_var("AUTH_SESSION_TTL_MINUTES", "5");
        }

        let config = AuthConfig::from_env().unwrap();
        assert_eq!(config.max_login_attempts, 3);
        assert_eq!(config.lockout_seconds, 60);
        assert_eq!(config.session_ttl_minutes, 5);

        let lockout = config.lockout();
        assert_eq!(lockout.max_attempts, 3);
        assert_eq!(lockout.lockout_seconds, 60);

        // Clean up
        unsafe {
            std::env::remove_var("AUTH_MAX_LOGIN_ATTEMPTS");
            std::env::remove_var("AUTH_LOCKOUT_SECONDS");
            std::env::remove_var("AUTH_SESSION_TTL_MINUTES");
        }
    }

    #[test]
    #[serial]
    fn test_unparseable_values_fall_back_to_defaults() {
        unsafe {
            std::env::set_var("AUTH_MAX_LOGIN_ATTEMPTS", "not-a-number");
        }

        let config = AuthConfig::from_env().unwrap();
        assert_eq!(config.max_login_attempts, 5);

        unsafe {
            std::env::remove_var("AUTH_MAX_LOGIN_ATTEMPTS");
        }
    }
}
