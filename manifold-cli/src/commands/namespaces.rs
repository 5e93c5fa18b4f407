//! `manifold namespaces`: table view of `apps/base`.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use manifold_agent::{tools, ToolContext};
use manifold_renderer::Renderer;

use super::RepoArgs;

/// Arguments for `manifold namespaces`.
#[derive(Args, Debug)]
pub struct NamespacesArgs {
    /// Glob over namespace names, e.g. `agent-*`.
    #[arg(long)]
    pub filter: Option<String>,

    /// Only namespaces registered in staging.
    #[arg(long)]
    pub registered: bool,

    #[command(flatten)]
    pub repo: RepoArgs,
}

#[derive(Tabled)]
struct NamespaceRow {
    #[tabled(rename = "namespace")]
    name: String,
    #[tabled(rename = "ingress")]
    ingress: String,
    #[tabled(rename = "secrets")]
    secrets: String,
    #[tabled(rename = "storage")]
    storage: String,
    #[tabled(rename = "redis")]
    redis: String,
    #[tabled(rename = "staging")]
    registered: String,
}

fn mark(on: bool) -> String {
    if on {
        "■".green().bold().to_string()
    } else {
        "·".dimmed().to_string()
    }
}

impl NamespacesArgs {
    pub fn run(self) -> Result<()> {
        let layout = self.repo.layout()?;
        let renderer = Renderer::new()?;
        let ctx = ToolContext {
            layout: &layout,
            renderer: &renderer,
        };
        let found = tools::list(&ctx, self.filter.as_deref(), self.registered)
            .with_context(|| format!("failed to scan {}", layout.apps_base.display()))?;

        if found.is_empty() {
            println!("No namespaces under {}.", layout.apps_base.display());
            return Ok(());
        }

        let rows: Vec<NamespaceRow> = found
            .into_iter()
            .map(|ns| NamespaceRow {
                ingress: mark(ns.has_ingress),
                secrets: mark(ns.has_secrets),
                storage: mark(ns.has_storage),
                redis: mark(ns.has_redis),
                registered: mark(ns.registered),
                name: ns.name,
            })
            .collect();
        let count = rows.len();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
        println!("{count} namespaces");
        Ok(())
    }
}
