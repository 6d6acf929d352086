//! Devsync — dev-mode sync CLI.
//!
//! # Usage
//!
//! ```text
//! devsync plan  --project devsync.yaml --module <name> [--json]
//! devsync patch --project devsync.yaml --module <name> --manifest deploy.yaml [-o out.yaml]
//! devsync start --project devsync.yaml --module <name> --manifest deploy.yaml \
//!               --module-root <dir> [--namespace <ns>] --dry-run
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{patch::PatchArgs, plan::PlanArgs, start::StartArgs};

#[derive(Parser, Debug)]
#[command(
    name = "devsync",
    version,
    about = "Keep local source paths continuously synchronized into running workloads",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Preview the merged, engine-ready sync configuration for a module.
    Plan(PlanArgs),

    /// Inject the sync agent into a workload manifest.
    Patch(PatchArgs),

    /// Establish sync sessions for a module's sync rules.
    Start(StartArgs),
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Commands::Plan(args) => args.run(),
        Commands::Patch(args) => args.run(),
        Commands::Start(args) => args.run(),
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}
