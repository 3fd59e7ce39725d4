//! Registered user record.
//!
//! # Invariants
//! - `username` is unique across the store (enforced by the user repository).
//! - `password` is stored verbatim and compared as an opaque string.

use crate::model::identity::UserId;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter};
use uuid::Uuid;

/// Registered user. Created once at registration, never mutated.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    /// Case-sensitive login name.
    pub username: String,
    /// Plaintext credential. Known weakness kept for storage compatibility.
    pub password: String,
}

impl User {
    /// Creates a user with a generated id.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), username, password)
    }

    pub fn with_id(id: UserId, username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            password: password.into(),
        }
    }

    /// Compares a submitted credential against the stored one.
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password == candidate
    }
}

// Keep credentials out of debug output and logs.
impl Debug for User {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::User;

    #[test]
    fn debug_output_redacts_password() {
        let user = User::new("alice", "hunter2");
        let rendered = format!("{user:?}");
        assert!(rendered.contains("alice"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn password_match_is_exact() {
        let user = User::new("alice", "Secret");
        assert!(user.password_matches("Secret"));
        assert!(!user.password_matches("secret"));
        assert!(!user.password_matches("Secret "));
    }
}
