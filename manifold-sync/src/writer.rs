//! Hash-gated atomic writer.
//!
//! ## `atomic_write` protocol
//!
//! 1. Normalise the rendered content to LF.
//! 2. SHA-256 hash it.
//! 3. Hash the file already on disk, if any.
//! 4. Equal hashes → `Unchanged`, nothing touched.
//! 5. Write to `<path>.manifold.tmp`.
//! 6. Rename to the final path (atomic on POSIX).
//!
//! The comparison is against the file itself rather than a side store, so a
//! hand-edited manifest is always restored on the next run.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::{io_err, SyncError};

/// Suffix of the temporary file written next to the target.
pub const TMP_SUFFIX: &str = ".manifold.tmp";

/// Outcome of an individual file write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WriteResult {
    /// File was written (content changed or did not previously exist).
    Written { path: PathBuf },
    /// File was skipped; content on disk already matches.
    Unchanged { path: PathBuf },
    /// `--dry-run` mode: the file *would* have been written.
    WouldWrite { path: PathBuf },
}

impl WriteResult {
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written { path }
            | WriteResult::Unchanged { path }
            | WriteResult::WouldWrite { path } => path,
        }
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self, WriteResult::Unchanged { .. })
    }
}

pub(crate) fn normalize_line_endings(content: &str) -> String {
    content.replace("\r\n", "\n")
}

fn digest(content: &str) -> String {
    let mut h = Sha256::new();
    h.update(content.as_bytes());
    hex::encode(h.finalize())
}

/// Hash of the LF-normalised file at `path`, or `None` if it does not exist.
fn existing_digest(path: &Path) -> Result<Option<String>, SyncError> {
    match std::fs::read_to_string(path) {
        Ok(existing) => Ok(Some(digest(&normalize_line_endings(&existing)))),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        // Non-UTF-8 content can never match a rendered manifest.
        Err(err) if err.kind() == ErrorKind::InvalidData => Ok(None),
        Err(err) => Err(io_err(path, err)),
    }
}

/// Atomically write a single rendered file.
///
/// Returns [`WriteResult`] indicating whether the file was written or skipped.
pub fn atomic_write(path: &Path, content: &str, dry_run: bool) -> Result<WriteResult, SyncError> {
    let tmp = PathBuf::from(format!("{}{TMP_SUFFIX}", path.display()));
    atomic_write_with_tmp(path, content, dry_run, &tmp)
}

fn atomic_write_with_tmp(
    path: &Path,
    content: &str,
    dry_run: bool,
    tmp: &Path,
) -> Result<WriteResult, SyncError> {
    let normalized = normalize_line_endings(content);

    if existing_digest(path)?.as_deref() == Some(digest(&normalized).as_str()) {
        tracing::debug!("unchanged: {}", path.display());
        return Ok(WriteResult::Unchanged {
            path: path.to_path_buf(),
        });
    }

    if dry_run {
        tracing::info!("[dry-run] would write: {}", path.display());
        return Ok(WriteResult::WouldWrite {
            path: path.to_path_buf(),
        });
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }
    if let Some(tmp_parent) = tmp.parent() {
        std::fs::create_dir_all(tmp_parent).map_err(|e| io_err(tmp_parent, e))?;
    }
    std::fs::write(tmp, &normalized).map_err(|e| io_err(tmp, e))?;

    if let Err(e) = std::fs::rename(tmp, path) {
        let _ = std::fs::remove_file(tmp);
        return Err(io_err(path, e));
    }

    tracing::info!("wrote: {}", path.display());
    Ok(WriteResult::Written {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
