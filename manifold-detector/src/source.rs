//! Source tree gate.
//!
//! An agent is only generated when `<source_root>/<slug>/Dockerfile` exists.
//! The raw registry slug (underscores kept) names the directory.

use std::path::{Path, PathBuf};

use manifold_core::AgentSlug;

/// File that marks an agent directory as buildable.
pub const BUILD_DESCRIPTOR: &str = "Dockerfile";

/// Outcome of checking one agent against the source tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceCheck {
    /// Directory and build descriptor both present.
    Ready { dir: PathBuf },
    /// `<source_root>/<slug>` does not exist.
    MissingDirectory { dir: PathBuf },
    /// Directory exists but has no build descriptor.
    MissingBuildDescriptor { dir: PathBuf },
}

impl SourceCheck {
    pub fn is_ready(&self) -> bool {
        matches!(self, SourceCheck::Ready { .. })
    }

    /// Short human reason for a skip; `None` when ready.
    pub fn skip_reason(&self) -> Option<&'static str> {
        match self {
            SourceCheck::Ready { .. } => None,
            SourceCheck::MissingDirectory { .. } => Some("no directory in source tree"),
            SourceCheck::MissingBuildDescriptor { .. } => Some("no Dockerfile"),
        }
    }
}

/// Check whether `slug` has a buildable directory under `source_root`.
pub fn check_source(source_root: &Path, slug: &AgentSlug) -> SourceCheck {
    let dir = source_root.join(slug.as_str());
    if !dir.is_dir() {
        return SourceCheck::MissingDirectory { dir };
    }
    if !dir.join(BUILD_DESCRIPTOR).is_file() {
        return SourceCheck::MissingBuildDescriptor { dir };
    }
    SourceCheck::Ready { dir }
}
