//! Repository layer over the durable store.
//!
//! # Responsibility
//! - Define use-case oriented access contracts per record collection.
//! - Apply read-then-mutate-then-flush semantics against the store document.
//!
//! # Invariants
//! - Every mutation is flushed before it is returned to the caller.
//! - Lookups return `None` for absent records; absence is not an error.
//! - Generated ids are distinct from every id already in the collection.

use crate::db::{Store, StoreError};
use crate::model::document::StoreDocument;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod coffee_shop_repo;
pub mod speed_test_repo;
pub mod user_repo;

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    Store(StoreError),
    /// Registration attempted with a username that already exists.
    UsernameTaken(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::UsernameTaken(username) => write!(f, "username already taken: {username}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::UsernameTaken(_) => None,
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Document-backed implementation of all three repository contracts.
///
/// Holds the store mutably for its lifetime, so a lookup and the write that
/// depends on it cannot interleave with another writer.
pub struct StoreRepository<'store> {
    store: &'store mut Store,
}

impl<'store> StoreRepository<'store> {
    /// Wraps `store`, loading it first if needed.
    ///
    /// # Errors
    /// - `RepoError::Store` when the backing document is unavailable.
    pub fn try_new(store: &'store mut Store) -> RepoResult<Self> {
        store.load()?;
        Ok(Self { store })
    }

    fn document(&self) -> &StoreDocument {
        self.store.loaded_document()
    }

    /// Applies `mutate` to the document and flushes the result.
    fn commit<T>(&mut self, mutate: impl FnOnce(&mut StoreDocument) -> T) -> RepoResult<T> {
        let output = mutate(self.store.document_mut());
        self.store.flush()?;
        Ok(output)
    }
}

/// Generates a v4 id not present in `taken`.
fn fresh_id(taken: impl Fn(Uuid) -> bool) -> Uuid {
    loop {
        let candidate = Uuid::new_v4();
        if !taken(candidate) {
            return candidate;
        }
    }
}
