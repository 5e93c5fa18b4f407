//! Error types for manifold-sync.

use std::path::PathBuf;

use thiserror::Error;

use manifold_detector::DetectError;
use manifold_renderer::RenderError;

/// All errors that can arise from generation.
///
/// Gate failures and rejected registry entries are not errors; they are
/// reported in [`crate::GenerateReport`].
#[derive(Debug, Error)]
pub enum SyncError {
    /// An error from the rendering engine.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// An error while scanning output directories.
    #[error("detect error: {0}")]
    Detect(#[from] DetectError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
