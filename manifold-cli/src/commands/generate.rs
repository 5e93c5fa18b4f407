//! `manifold generate`: render and write manifests for every agent.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use manifold_renderer::Renderer;
use manifold_sync::{generate, GenerateOptions, GenerateReport, WriteResult};

use super::RegistryArgs;

/// Arguments for `manifold generate`.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub registry: RegistryArgs,

    /// Directory holding one sub-directory per agent [default: registry's directory].
    #[arg(long, env = "MANIFOLD_SOURCE_ROOT")]
    pub source_root: Option<PathBuf>,

    /// Root for `deployments/` and `services/`.
    #[arg(long, env = "MANIFOLD_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Directory of template overrides (deployment.yaml.tera, service.yaml.tera, …).
    #[arg(long)]
    pub templates: Option<PathBuf>,

    /// Show what would be written without writing any files.
    #[arg(long)]
    pub dry_run: bool,

    /// Emit the run report as JSON.
    #[arg(long)]
    pub json: bool,
}

impl GenerateArgs {
    pub fn run(self) -> Result<()> {
        let registry = self.registry.load()?;
        let renderer = Renderer::with_overrides(self.templates.as_deref())
            .context("failed to load templates")?;
        let opts = GenerateOptions {
            source_root: self.registry.source_root(self.source_root.as_deref())?,
            output_dir: self.output_dir.clone(),
            dry_run: self.dry_run,
        };

        let report = generate(&registry, &renderer, &opts).context("generate failed")?;

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("failed to serialize report")?
            );
            return Ok(());
        }
        print_report(&report);
        Ok(())
    }
}

fn print_report(report: &GenerateReport) {
    let prefix = if report.dry_run { "[dry-run] " } else { "" };

    for agent in &report.generated {
        let changed = agent.writes.iter().filter(|w| !w.is_unchanged()).count();
        let status = if changed == 0 {
            "unchanged".dimmed().to_string()
        } else {
            format!("{changed} written")
        };
        println!(
            "{prefix}{} {} [{}] {status}",
            "✓".green().bold(),
            agent.slug,
            agent.tier
        );
        for write in &agent.writes {
            match write {
                WriteResult::Written { path } => println!("    ✎  {}", path.display()),
                WriteResult::WouldWrite { path } => println!("    ~  {}", path.display()),
                WriteResult::Unchanged { .. } => {}
            }
        }
    }
    for skipped in &report.skipped {
        println!(
            "{prefix}{} {} skipped: {}",
            "–".yellow().bold(),
            skipped.slug,
            skipped.reason
        );
    }
    for rejected in &report.rejected {
        println!(
            "{prefix}{} {} rejected: {}",
            "✗".red().bold(),
            rejected.key,
            rejected.reason
        );
    }
    for orphan in &report.orphaned {
        println!("{prefix}{} orphaned: {}", "?".yellow(), orphan.display());
    }

    println!(
        "{prefix}Generated {} agents ({} files written, {} unchanged). Skipped {}.",
        report.generated.len(),
        report.writes().filter(|w| !w.is_unchanged()).count(),
        report.unchanged_count(),
        report.skipped.len()
    );
}
