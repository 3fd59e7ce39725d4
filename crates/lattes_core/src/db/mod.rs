//! Durable single-document store.
//!
//! # Responsibility
//! - Load the backing JSON document into memory once per store handle.
//! - Flush the whole document back after every mutation.
//!
//! # Invariants
//! - Repositories must not read application data before `load()` succeeds.
//! - An unloaded handle never writes; flushing it is `StoreError::NotLoaded`.
//! - Only the store writes the backing file, and always as a full overwrite.
//! - A failed flush leaves the in-memory mutation in place (no rollback) and
//!   marks the handle dirty until a later flush succeeds.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod file;
mod open;

pub use open::Store;

pub type StoreResult<T> = Result<T, StoreError>;

/// Underlying reason for a store failure.
#[derive(Debug)]
pub enum StoreCause {
    Io(std::io::Error),
    /// Backing document is not valid store JSON.
    Corrupt(serde_json::Error),
    /// In-memory document could not be encoded.
    Encode(serde_json::Error),
}

impl Display for StoreCause {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Corrupt(err) => write!(f, "corrupt document: {err}"),
            Self::Encode(err) => write!(f, "failed to encode document: {err}"),
        }
    }
}

#[derive(Debug)]
pub enum StoreError {
    /// Backing document could not be read or parsed at load time.
    Unavailable { location: String, cause: StoreCause },
    /// Document write failed; the last mutation is not durable.
    FlushFailed { location: String, cause: StoreCause },
    /// Handle has no successfully loaded document to read or write.
    NotLoaded { location: String },
}

impl StoreError {
    pub fn cause(&self) -> Option<&StoreCause> {
        match self {
            Self::Unavailable { cause, .. } | Self::FlushFailed { cause, .. } => Some(cause),
            Self::NotLoaded { .. } => None,
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable { location, cause } => {
                write!(f, "store unavailable at `{location}`: {cause}")
            }
            Self::FlushFailed { location, cause } => {
                write!(f, "store flush failed at `{location}`: {cause}")
            }
            Self::NotLoaded { location } => {
                write!(f, "store at `{location}` has not been loaded")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self.cause()? {
            StoreCause::Io(err) => Some(err),
            StoreCause::Corrupt(err) | StoreCause::Encode(err) => Some(err),
        }
    }
}
