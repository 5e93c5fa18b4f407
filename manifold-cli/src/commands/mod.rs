//! Subcommand implementations and the argument groups they share.

pub mod agents;
pub mod diff;
pub mod generate;
pub mod namespaces;
pub mod tool;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use manifold_agent::RepoLayout;
use manifold_core::{registry, LoadedRegistry};

/// Where the agent registry comes from.
#[derive(Args, Debug, Clone)]
pub struct RegistryArgs {
    /// Registry YAML file [default: ~/dev/zi/agents/registry.yaml].
    #[arg(long, env = "MANIFOLD_REGISTRY")]
    pub registry: Option<PathBuf>,

    /// Use the compiled-in agent table instead of a registry file.
    #[arg(long)]
    pub builtin: bool,
}

impl RegistryArgs {
    /// The registry file that would be read, `None` for `--builtin`.
    fn registry_path(&self) -> Result<Option<PathBuf>> {
        if self.builtin {
            return Ok(None);
        }
        match &self.registry {
            Some(path) => Ok(Some(path.clone())),
            None => Ok(Some(
                registry::default_registry_path().context("could not determine home directory")?,
            )),
        }
    }

    pub fn load(&self) -> Result<LoadedRegistry> {
        match self.registry_path()? {
            None => Ok(registry::builtin()),
            Some(path) => registry::load_at(&path)
                .with_context(|| format!("failed to load registry {}", path.display())),
        }
    }

    /// Explicit source root, else the registry's directory.
    pub fn source_root(&self, explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(root) = explicit {
            return Ok(root.to_path_buf());
        }
        let registry = match self.registry_path()? {
            Some(path) => path,
            None => registry::default_registry_path()
                .context("could not determine home directory; pass --source-root")?,
        };
        Ok(registry
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")))
    }
}

/// Which GitOps repository the namespace tools operate on.
#[derive(Args, Debug, Clone)]
pub struct RepoArgs {
    /// Repository root [default: nearest ancestor containing .git].
    #[arg(long, env = "MANIFOLD_REPO_ROOT")]
    pub repo_root: Option<PathBuf>,
}

impl RepoArgs {
    pub fn layout(&self) -> Result<RepoLayout> {
        match &self.repo_root {
            Some(root) => Ok(RepoLayout::new(root)),
            None => {
                let cwd = std::env::current_dir().context("could not read current directory")?;
                Ok(RepoLayout::discover(&cwd))
            }
        }
    }
}
