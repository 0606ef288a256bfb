//! In-memory authentication core
//!
//! User registration, login with temporary lockout, and single-session
//! management, all held in transient process memory. The binary in
//! `main.rs` is a thin presentation layer over [`state::AuthState`].

pub mod config;
pub mod directory;
pub mod error;
pub mod lockout;
pub mod models;
pub mod session;
pub mod state;
pub mod validation;

pub use config::AuthConfig;
pub use state::AuthState;
