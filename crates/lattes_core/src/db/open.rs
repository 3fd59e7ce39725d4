//! Store handle lifecycle: open, load, flush, close.
//!
//! # Responsibility
//! - Own the in-memory `StoreDocument` for one backing file.
//! - Read the file at most once per handle and overwrite it on flush.
//!
//! # Invariants
//! - `load()` is a no-op once it has succeeded.
//! - A failed `load()` leaves the handle unloaded; no partial document is kept.
//! - `flush()` always writes the full document, and only from a loaded handle.
//!
//! # See also
//! - crate::config::StoreConfig

use super::file::{read_document, write_atomic, write_in_place};
use super::{StoreCause, StoreError, StoreResult};
use crate::config::StoreConfig;
use crate::model::document::StoreDocument;
use log::{debug, error, info};
use std::path::{Path, PathBuf};
use std::time::Instant;

const MEMORY_LOCATION: &str = ":memory:";

#[derive(Debug)]
enum Backing {
    File { path: PathBuf, atomic_flush: bool },
    Memory,
}

/// Explicit store handle owned by the composition root.
///
/// Repositories borrow it mutably, which serializes writers at compile time.
#[derive(Debug)]
pub struct Store {
    backing: Backing,
    document: StoreDocument,
    loaded: bool,
    dirty: bool,
}

impl Store {
    /// Creates an unloaded handle for the configured backing file.
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            backing: Backing::File {
                path: config.path.clone(),
                atomic_flush: config.atomic_flush,
            },
            document: StoreDocument::default(),
            loaded: false,
            dirty: false,
        }
    }

    /// Creates a handle and loads the backing document.
    ///
    /// # Errors
    /// - `StoreError::Unavailable` when the file is unreadable or corrupt.
    pub fn open(config: &StoreConfig) -> StoreResult<Self> {
        let mut store = Self::new(config);
        store.load()?;
        Ok(store)
    }

    /// Creates a loaded, empty store without a backing file.
    ///
    /// Flushes still encode the document so encoding failures surface the
    /// same way as for file-backed stores.
    pub fn open_in_memory() -> Self {
        info!("event=store_load module=db status=ok mode=memory");
        Self {
            backing: Backing::Memory,
            document: StoreDocument::default(),
            loaded: true,
            dirty: false,
        }
    }

    /// Reads the backing document into memory once.
    ///
    /// A missing file yields an empty document. Subsequent calls after a
    /// successful load do nothing.
    pub fn load(&mut self) -> StoreResult<()> {
        if self.loaded {
            return Ok(());
        }

        let Backing::File { path, .. } = &self.backing else {
            self.loaded = true;
            return Ok(());
        };

        let started_at = Instant::now();
        info!(
            "event=store_load module=db status=start mode=file path={}",
            path.display()
        );

        match read_and_parse(path) {
            Ok(document) => {
                info!(
                    "event=store_load module=db status=ok mode=file duration_ms={} users={} shops={} speed_tests={}",
                    started_at.elapsed().as_millis(),
                    document.users.len(),
                    document.coffee_shops.len(),
                    document.speed_tests.len()
                );
                self.document = document;
                self.loaded = true;
                Ok(())
            }
            Err(cause) => {
                error!(
                    "event=store_load module=db status=error mode=file duration_ms={} error_code=store_unavailable error={}",
                    started_at.elapsed().as_millis(),
                    cause
                );
                Err(StoreError::Unavailable {
                    location: path.display().to_string(),
                    cause,
                })
            }
        }
    }

    /// Serializes the full document and overwrites the backing file.
    ///
    /// # Errors
    /// - `StoreError::NotLoaded` when `load()` has not succeeded. Nothing is
    ///   written, so an unread or corrupt backing file is left untouched.
    /// - `StoreError::FlushFailed` when encoding or writing fails. The
    ///   in-memory document keeps its state and the handle stays dirty.
    pub fn flush(&mut self) -> StoreResult<()> {
        if !self.loaded {
            error!(
                "event=store_flush module=db status=error location={} error_code=not_loaded",
                self.location()
            );
            return Err(self.not_loaded());
        }

        let started_at = Instant::now();
        let result = self.write_document();
        let duration_ms = started_at.elapsed().as_millis();

        match result {
            Ok(bytes) => {
                self.dirty = false;
                debug!(
                    "event=store_flush module=db status=ok location={} bytes={} duration_ms={}",
                    self.location(),
                    bytes,
                    duration_ms
                );
                Ok(())
            }
            Err(cause) => {
                self.dirty = true;
                error!(
                    "event=store_flush module=db status=error location={} duration_ms={} error_code=flush_failed error={}",
                    self.location(),
                    duration_ms,
                    cause
                );
                Err(StoreError::FlushFailed {
                    location: self.location(),
                    cause,
                })
            }
        }
    }

    /// Releases the handle, retrying the flush first if the last one failed.
    ///
    /// An unloaded handle is released without touching the backing file.
    pub fn close(mut self) -> StoreResult<()> {
        if self.dirty {
            self.flush()?;
        }
        info!(
            "event=store_close module=db status=ok location={}",
            self.location()
        );
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Whether the in-memory document holds mutations that are not durable.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Backing file path, or `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        match &self.backing {
            Backing::File { path, .. } => Some(path.as_path()),
            Backing::Memory => None,
        }
    }

    /// Human-readable backing location used in logs and errors.
    pub fn location(&self) -> String {
        self.path()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| MEMORY_LOCATION.to_string())
    }

    /// Read access to the loaded document.
    ///
    /// # Errors
    /// - `StoreError::NotLoaded` until `load()` has succeeded.
    pub fn document(&self) -> StoreResult<&StoreDocument> {
        if self.loaded {
            Ok(&self.document)
        } else {
            Err(self.not_loaded())
        }
    }

    /// Document access for repositories, which only exist over a loaded
    /// handle.
    pub(crate) fn loaded_document(&self) -> &StoreDocument {
        debug_assert!(self.loaded);
        &self.document
    }

    pub(crate) fn document_mut(&mut self) -> &mut StoreDocument {
        debug_assert!(self.loaded);
        &mut self.document
    }

    fn not_loaded(&self) -> StoreError {
        StoreError::NotLoaded {
            location: self.location(),
        }
    }

    fn write_document(&self) -> Result<usize, StoreCause> {
        let bytes = serde_json::to_vec_pretty(&self.document).map_err(StoreCause::Encode)?;
        match &self.backing {
            Backing::File { path, atomic_flush } => {
                let written = if *atomic_flush {
                    write_atomic(path, &bytes)
                } else {
                    write_in_place(path, &bytes)
                };
                written.map_err(StoreCause::Io)?;
            }
            Backing::Memory => {}
        }
        Ok(bytes.len())
    }
}

fn read_and_parse(path: &Path) -> Result<StoreDocument, StoreCause> {
    match read_document(path).map_err(StoreCause::Io)? {
        Some(bytes) => serde_json::from_slice(&bytes).map_err(StoreCause::Corrupt),
        None => Ok(StoreDocument::default()),
    }
}
