//! Filesystem detection for `manifold-detector`.
//!
//! Everything here is a read-only look at directories owned by someone else:
//!
//! - [`source`]: the agent source tree gate (directory + `Dockerfile` per slug)
//! - [`namespace`]: marker-file feature flags and staging registration in a
//!   GitOps `apps/` tree
//!
//! Nothing is cached; every call re-reads the disk.

use std::path::PathBuf;

use thiserror::Error;

pub mod namespace;
pub mod source;

pub use namespace::{
    extract_image, scan_namespaces, staging_registration, yaml_files, Feature,
    NamespaceDescriptor, NamespaceFeatures, NAMESPACE_MARKER,
};
pub use source::{check_source, SourceCheck, BUILD_DESCRIPTOR};

/// Errors from filesystem detection.
#[derive(Debug, Error)]
pub enum DetectError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> DetectError {
    DetectError::Io { path: path.into(), source }
}
