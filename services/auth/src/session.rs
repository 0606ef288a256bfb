//! Session management held in process memory
//!
//! At most one session is live at a time; creating a new one replaces the
//! previous session. Nothing survives process shutdown.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use crate::models::{Session, SessionUser, User};

/// Session manager for the single active session
#[derive(Debug, Clone)]
pub struct SessionManager {
    ttl: Duration,
    current: Arc<Mutex<Option<Session>>>,
}

impl SessionManager {
    /// Create a new session manager with the given session lifetime
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            current: Arc::new(Mutex::new(None)),
        }
    }

    /// Create a new session for a user, replacing any previous one
    pub async fn create_session(&self, user: &User) -> Session {
        info!("Creating session for user: {}", user.username);

        let created_at = Utc::now();
        let session = Session {
            token: generate_token(),
            user: SessionUser::from(user),
            created_at,
            expires_at: created_at + self.ttl,
        };

        *self.current.lock().await = Some(session.clone());
        session
    }

    /// Return the active session if it has not expired
    ///
    /// An expired session is purged eagerly rather than left around.
    pub async fn restore_session(&self) -> Option<Session> {
        let mut current = self.current.lock().await;

        match current.as_ref() {
            Some(session) if session.expires_at > Utc::now() => Some(session.clone()),
            Some(_) => {
                info!("Discarding expired session");
                *current = None;
                None
            }
            None => None,
        }
    }

    /// Clear all session state; safe to call when already logged out
    pub async fn destroy_session(&self) {
        let mut current = self.current.lock().await;
        if current.take().is_some() {
            info!("Session destroyed");
        }
    }

    /// Get the configured session lifetime
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

/// Opaque token, unique within process lifetime
fn generate_token() -> String {
    format!("session_{}", Uuid::new_v4().simple())
}
