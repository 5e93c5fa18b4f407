//! `manifold tool list|call`: drive the namespace dispatcher directly.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use serde_json::Value;
use tabled::{settings::Style, Table, Tabled};

use manifold_agent::Dispatcher;
use manifold_renderer::Renderer;

use super::RepoArgs;

/// Subcommands for `manifold tool`.
#[derive(Subcommand, Debug)]
pub enum ToolCommand {
    /// List available tools.
    List {
        /// Emit tool definitions (name, description, input_schema) as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Call one tool and print its JSON result.
    Call(CallArgs),
}

/// Arguments for `manifold tool call`.
#[derive(Args, Debug)]
pub struct CallArgs {
    /// Tool name, e.g. `validate_namespace`.
    pub name: String,

    /// Parameters as a JSON object.
    #[arg(long, conflicts_with = "input_file")]
    pub input: Option<String>,

    /// Read parameters from a JSON file.
    #[arg(long)]
    pub input_file: Option<PathBuf>,

    #[command(flatten)]
    pub repo: RepoArgs,
}

#[derive(Tabled)]
struct ToolRow {
    #[tabled(rename = "tool")]
    name: &'static str,
    #[tabled(rename = "description")]
    description: &'static str,
}

pub fn run(command: ToolCommand) -> Result<()> {
    match command {
        ToolCommand::List { json } => list(json),
        ToolCommand::Call(args) => args.run(),
    }
}

fn list(json: bool) -> Result<()> {
    let definitions = Dispatcher::definitions();
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&definitions)
                .context("failed to serialize tool definitions")?
        );
        return Ok(());
    }

    let rows: Vec<ToolRow> = definitions
        .iter()
        .map(|d| ToolRow {
            name: d.name,
            description: d.description,
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
    Ok(())
}

impl CallArgs {
    fn parse_input(&self) -> Result<Value> {
        let raw = match (&self.input, &self.input_file) {
            (Some(inline), _) => inline.clone(),
            (None, Some(path)) => std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?,
            (None, None) => return Ok(Value::Null),
        };
        serde_json::from_str(&raw).context("tool input is not valid JSON")
    }

    pub fn run(self) -> Result<()> {
        let input = self.parse_input()?;
        let dispatcher = Dispatcher::new(self.repo.layout()?, Renderer::new()?);
        let result = dispatcher.execute(&self.name, input);

        println!(
            "{}",
            serde_json::to_string_pretty(&result).context("failed to serialize tool result")?
        );
        if let Some(message) = result.get("error").and_then(Value::as_str) {
            if result.get("success").is_none() {
                bail!("{} failed: {message}", self.name);
            }
        }
        Ok(())
    }
}
