//! `manifold diff`: show unified diffs for what generate would write.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use manifold_renderer::Renderer;
use manifold_sync::{diff_manifests, GenerateOptions};

use super::RegistryArgs;

/// Arguments for `manifold diff`.
#[derive(Args, Debug)]
pub struct DiffArgs {
    #[command(flatten)]
    pub registry: RegistryArgs,

    #[arg(long, env = "MANIFOLD_SOURCE_ROOT")]
    pub source_root: Option<PathBuf>,

    #[arg(long, env = "MANIFOLD_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    #[arg(long)]
    pub templates: Option<PathBuf>,
}

impl DiffArgs {
    pub fn run(self) -> Result<()> {
        let registry = self.registry.load()?;
        let renderer = Renderer::with_overrides(self.templates.as_deref())
            .context("failed to load templates")?;
        let opts = GenerateOptions {
            source_root: self.registry.source_root(self.source_root.as_deref())?,
            output_dir: self.output_dir.clone(),
            dry_run: true,
        };

        let diffs = diff_manifests(&registry, &renderer, &opts).context("diff failed")?;
        if diffs.is_empty() {
            println!("No differences.");
            return Ok(());
        }

        for diff in diffs {
            print!("{}", diff.unified_diff);
            if !diff.unified_diff.ends_with('\n') {
                println!();
            }
        }
        Ok(())
    }
}
