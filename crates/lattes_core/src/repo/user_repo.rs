//! User repository contract and document-backed implementation.
//!
//! # Invariants
//! - `create` rejects a username that is already registered. The check and
//!   the append happen under the same store borrow that performs the flush.

use super::{fresh_id, RepoError, RepoResult, StoreRepository};
use crate::model::identity::UserId;
use crate::model::user::User;
use log::debug;

pub trait UserRepository {
    /// Linear scan; returns the first user with exactly this username.
    fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;
    fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;
    /// Appends a new user and flushes.
    fn create(&mut self, username: &str, password: &str) -> RepoResult<User>;
}

impl UserRepository for StoreRepository<'_> {
    fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        Ok(self
            .document()
            .users
            .iter()
            .find(|user| user.username == username)
            .cloned())
    }

    fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        Ok(self
            .document()
            .users
            .iter()
            .find(|user| user.id == id)
            .cloned())
    }

    fn create(&mut self, username: &str, password: &str) -> RepoResult<User> {
        let users = &self.document().users;
        if users.iter().any(|user| user.username == username) {
            return Err(RepoError::UsernameTaken(username.to_string()));
        }

        let id = fresh_id(|candidate| users.iter().any(|user| user.id == candidate));
        let user = User::with_id(id, username, password);
        let stored = user.clone();
        self.commit(move |document| document.users.push(stored))?;

        debug!("event=user_create module=repo status=ok user_id={}", user.id);
        Ok(user)
    }
}
