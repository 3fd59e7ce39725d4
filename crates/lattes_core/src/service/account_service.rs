//! Registration and login use-cases.
//!
//! # Invariants
//! - Usernames are trimmed before storage and lookup; comparison is
//!   case-sensitive.
//! - Passwords are compared verbatim.

use super::{ServiceError, ServiceResult};
use crate::model::identity::UserId;
use crate::model::user::User;
use crate::repo::user_repo::UserRepository;
use log::info;

pub struct AccountService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> AccountService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers a new user.
    ///
    /// # Errors
    /// - `InvalidInput` for an empty username or password.
    /// - `UsernameTaken` when the username already exists.
    pub fn register(&mut self, username: &str, password: &str) -> ServiceResult<User> {
        let username = username.trim();
        if username.is_empty() {
            return Err(ServiceError::InvalidInput("username"));
        }
        if password.is_empty() {
            return Err(ServiceError::InvalidInput("password"));
        }

        let user = self.repo.create(username, password)?;
        info!(
            "event=user_register module=service status=ok user_id={}",
            user.id
        );
        Ok(user)
    }

    /// Returns the user when `username` exists and `password` matches.
    ///
    /// Unknown users and wrong passwords both yield `None` so callers cannot
    /// tell them apart.
    pub fn login(&self, username: &str, password: &str) -> ServiceResult<Option<User>> {
        let user = self
            .repo
            .find_by_username(username.trim())?
            .filter(|user| user.password_matches(password));
        info!(
            "event=user_login module=service status={}",
            if user.is_some() { "ok" } else { "rejected" }
        );
        Ok(user)
    }

    pub fn find_user(&self, id: UserId) -> ServiceResult<Option<User>> {
        Ok(self.repo.find_by_id(id)?)
    }
}
