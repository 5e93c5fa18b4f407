//! `manifold agents`: the resolved registry.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use manifold_core::{AgentSpec, ResourceTier};

use super::RegistryArgs;

/// Arguments for `manifold agents`.
#[derive(Args, Debug)]
pub struct AgentsArgs {
    #[command(flatten)]
    pub registry: RegistryArgs,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct AgentJson<'a> {
    #[serde(flatten)]
    spec: &'a AgentSpec,
    resources: &'static ResourceTier,
}

#[derive(Tabled)]
struct AgentRow {
    #[tabled(rename = "agent")]
    slug: String,
    #[tabled(rename = "team")]
    team: String,
    #[tabled(rename = "tier")]
    tier: String,
    #[tabled(rename = "cpu")]
    cpu: String,
    #[tabled(rename = "memory")]
    memory: String,
    #[tabled(rename = "max iter")]
    max_iterations: u32,
}

impl AgentsArgs {
    pub fn run(self) -> Result<()> {
        let registry = self.registry.load()?;

        if self.json {
            let payload: Vec<AgentJson<'_>> = registry
                .agents
                .iter()
                .map(|spec| AgentJson {
                    spec,
                    resources: spec.resources(),
                })
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&payload).context("failed to serialize agents")?
            );
            return Ok(());
        }

        if registry.agents.is_empty() {
            println!("No agents registered.");
        } else {
            let rows: Vec<AgentRow> = registry
                .agents
                .iter()
                .map(|spec| {
                    let r = spec.resources();
                    AgentRow {
                        slug: spec.slug.to_string(),
                        team: spec.team.clone().unwrap_or_else(|| "-".to_string()),
                        tier: spec.tier.to_string(),
                        cpu: format!("{} / {}", r.requests_cpu, r.limits_cpu),
                        memory: format!("{} / {}", r.requests_memory, r.limits_memory),
                        max_iterations: spec.max_iterations,
                    }
                })
                .collect();
            let mut table = Table::new(rows);
            table.with(Style::rounded());
            println!("{table}");
        }

        for rejected in &registry.rejected {
            tracing::warn!("registry entry '{}' rejected: {}", rejected.key, rejected.reason);
        }
        Ok(())
    }
}
