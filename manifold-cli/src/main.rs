//! Manifold: agent manifest generator and namespace tool runner.
//!
//! # Usage
//!
//! ```text
//! manifold generate [--registry PATH | --builtin] [--source-root DIR]
//!                   [--output-dir DIR] [--templates DIR] [--dry-run] [--json]
//! manifold diff     [--registry PATH | --builtin] [--source-root DIR] [--output-dir DIR]
//! manifold agents   [--registry PATH | --builtin] [--json]
//! manifold tool list [--json]
//! manifold tool call <NAME> [--input JSON | --input-file PATH] [--repo-root DIR]
//! manifold namespaces [--filter GLOB] [--registered] [--repo-root DIR]
//! ```
//!
//! Logs go to stderr; `-v` for info, `-vv` for debug, or set `RUST_LOG`.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    agents::AgentsArgs, diff::DiffArgs, generate::GenerateArgs, namespaces::NamespacesArgs,
    tool::ToolCommand,
};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "manifold",
    version,
    about = "Generate Kubernetes manifests for the agent fleet and scaffold namespaces",
    long_about = None,
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render and write Deployment and Service manifests for every agent.
    Generate(GenerateArgs),

    /// Show unified diff of what generate would write.
    Diff(DiffArgs),

    /// Show the resolved agent registry with resource tiers.
    Agents(AgentsArgs),

    /// List or call namespace tools.
    Tool {
        #[command(subcommand)]
        command: ToolCommand,
    },

    /// List namespaces in the GitOps repository.
    Namespaces(NamespacesArgs),
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

fn init_tracing(verbose: u8) {
    use tracing_subscriber::{fmt, EnvFilter};

    let fallback = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Commands::Generate(args) => args.run(),
        Commands::Diff(args) => args.run(),
        Commands::Agents(args) => args.run(),
        Commands::Tool { command } => commands::tool::run(command),
        Commands::Namespaces(args) => args.run(),
    }
}
