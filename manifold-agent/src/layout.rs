//! Where things live inside the GitOps repository.

use std::path::{Component, Path, PathBuf};

/// Resolved paths of the repository the tools operate on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoLayout {
    pub repo_root: PathBuf,
    /// Holds `create-namespace.sh`.
    pub automation_dir: PathBuf,
    pub apps_base: PathBuf,
    pub apps_staging: PathBuf,
}

impl RepoLayout {
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        let repo_root = repo_root.into();
        RepoLayout {
            automation_dir: repo_root.join("automation"),
            apps_base: repo_root.join("apps").join("base"),
            apps_staging: repo_root.join("apps").join("staging"),
            repo_root,
        }
    }

    /// Nearest ancestor of `start` (inclusive) containing `.git`, else `start`.
    pub fn discover(start: &Path) -> Self {
        let root = start
            .ancestors()
            .find(|dir| dir.join(".git").exists())
            .unwrap_or(start);
        Self::new(root)
    }

    /// `apps/base/<name>`, or `None` unless `name` is a single plain path component.
    pub fn namespace_dir(&self, name: &str) -> Option<PathBuf> {
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(part)), None) if part == name => Some(self.apps_base.join(name)),
            _ => None,
        }
    }

    pub fn staging_kustomization(&self) -> PathBuf {
        self.apps_staging.join("kustomization.yaml")
    }

    pub fn create_script(&self) -> PathBuf {
        self.automation_dir.join("create-namespace.sh")
    }
}
