//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into the entry points the web layer needs.
//! - Validate caller input and identity before anything is persisted.
//!
//! # Invariants
//! - Services never bypass repository flush contracts.
//! - Store failures propagate unchanged inside `ServiceError::Repo`.

use crate::model::identity::ShopId;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod account_service;
pub mod catalog_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub enum ServiceError {
    /// Required text input is empty after trimming.
    InvalidInput(&'static str),
    /// Throughput value is negative or not finite.
    InvalidMeasurement { field: &'static str, value: f64 },
    /// Operation requires an authenticated identity.
    Unauthenticated,
    ShopNotFound(ShopId),
    UsernameTaken(String),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(field) => write!(f, "{field} must not be empty"),
            Self::InvalidMeasurement { field, value } => {
                write!(f, "{field} must be a non-negative number, got {value}")
            }
            Self::Unauthenticated => f.write_str("operation requires a signed-in user"),
            Self::ShopNotFound(id) => write!(f, "coffee shop not found: {id}"),
            Self::UsernameTaken(username) => write!(f, "username already taken: {username}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::UsernameTaken(username) => Self::UsernameTaken(username),
            other => Self::Repo(other),
        }
    }
}
