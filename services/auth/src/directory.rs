//! In-memory user directory

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::info;

use crate::models::{NewUser, User};

#[derive(Debug, Default)]
struct DirectoryInner {
    users: Vec<User>,
    last_id: u64,
}

/// Append-only user store held in process memory
///
/// Records are immutable once created and are lost when the process ends.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    inner: Arc<Mutex<DirectoryInner>>,
}

impl UserDirectory {
    /// Create an empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a validated user, assigning the next monotonic id
    ///
    /// Uniqueness of username and email is the caller's responsibility;
    /// registration checks both before building the payload.
    pub async fn create(&self, new_user: NewUser) -> User {
        let mut inner = self.inner.lock().await;
        inner.last_id += 1;

        let user = User {
            id: inner.last_id,
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            created_at: Utc::now(),
        };

        info!("Creating new user: {} (id {})", user.username, user.id);
        inner.users.push(user.clone());
        user
    }

    /// Find a user by exact username
    pub async fn find_by_username(&self, username: &str) -> Option<User> {
        let inner = self.inner.lock().await;
        inner.users.iter().find(|u| u.username == username).cloned()
    }

    /// Whether a username is already registered (case-sensitive)
    pub async fn username_exists(&self, username: &str) -> bool {
        let inner = self.inner.lock().await;
        inner.users.iter().any(|u| u.username == username)
    }

    /// Whether an email is already registered (case-sensitive)
    pub async fn email_exists(&self, email: &str) -> bool {
        let inner = self.inner.lock().await;
        inner.users.iter().any(|u| u.email == email)
    }

    /// Number of registered users
    pub async fn len(&self) -> usize {
        self.inner.lock().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
