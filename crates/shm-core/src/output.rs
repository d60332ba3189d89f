//! File output.
//!
//! Writes are all-or-nothing: content goes to a temporary file in the
//! destination directory, which is then renamed over the target. A failed
//! write leaves no partial file behind.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::ShmError;

/// Extension appended to save paths that have none.
pub const DEFAULT_EXTENSION: &str = "txt";

/// Returns `path` with the default `.txt` extension if it has no extension.
pub fn with_default_extension(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(DEFAULT_EXTENSION)
    }
}

/// Atomically writes `contents` to `path`.
///
/// The parent directory must already exist; a missing directory is reported
/// as [`ShmError::Io`].
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), ShmError> {
    let io_err = |source| ShmError::Io {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
    tmp.write_all(contents.as_bytes()).map_err(io_err)?;
    tmp.flush().map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;

    tracing::debug!(path = %path.display(), bytes = contents.len(), "file_written");
    Ok(())
}
