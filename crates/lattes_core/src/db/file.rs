//! Filesystem reads and writes for the backing document.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

/// Reads the document bytes, or `None` when the file does not exist yet.
pub(super) fn read_document(path: &Path) -> io::Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}

/// Truncates and rewrites the file in place.
pub(super) fn write_in_place(path: &Path, bytes: &[u8]) -> io::Result<()> {
    ensure_parent(path)?;
    write_synced(path, bytes)
}

/// Writes to a sibling temp file, syncs it, then renames over `path`.
///
/// A crash mid-write leaves either the old or the new document, never a
/// truncated one.
pub(super) fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let parent = ensure_parent(path)?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("db.json");
    let tmp = parent.join(format!(".{file_name}.tmp.{}", std::process::id()));

    if let Err(err) = write_synced(&tmp, bytes).and_then(|()| fs::rename(&tmp, path)) {
        let _ = fs::remove_file(&tmp);
        return Err(err);
    }

    if let Ok(dir) = File::open(parent) {
        let _ = dir.sync_all();
    }
    Ok(())
}

fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

fn ensure_parent(path: &Path) -> io::Result<&Path> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent)?;
            Ok(parent)
        }
        _ => Ok(Path::new(".")),
    }
}
