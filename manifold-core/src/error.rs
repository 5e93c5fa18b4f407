//! Error types for manifold-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Reading the registry file failed (permission denied, not a file, etc.).
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error on load; includes file path and line context from serde_yaml.
    #[error("failed to parse registry at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The document parsed but has no top-level `agents` mapping.
    #[error("registry at {path} has no `agents` mapping")]
    MissingAgents { path: PathBuf },

    /// `dirs::home_dir()` returned `None`; cannot locate the default registry.
    #[error("cannot determine home directory; set $HOME or pass --registry")]
    HomeNotFound,

    /// The registry YAML file did not exist at the expected path.
    #[error("registry not found at {path}")]
    RegistryNotFound { path: PathBuf },
}
