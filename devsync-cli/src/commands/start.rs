//! `devsync start` — establish sync sessions for a module.
//!
//! Only `--dry-run` is wired up for now: sessions are recorded by the
//! in-process logging engine instead of a live sync daemon. The manifest
//! must already be patched (`devsync patch`) or the orchestrator refuses
//! to start.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;

use devsync_engine::{ExecTunnelResolver, LoggingSyncEngine, NamedLocks, SyncOrchestrator};
use devsync_workload::load_workload_at;

use super::{load_module, load_project};

/// Arguments for `devsync start`.
#[derive(Args, Debug)]
pub struct StartArgs {
    /// Path to the project config file.
    #[arg(long, default_value = "devsync.yaml")]
    pub project: PathBuf,

    /// Module whose sync rules to start.
    #[arg(long)]
    pub module: String,

    /// Patched workload manifest describing the running resource.
    #[arg(long)]
    pub manifest: PathBuf,

    /// Local module root; defaults to the module's root under the project
    /// config's directory.
    #[arg(long)]
    pub module_root: Option<PathBuf>,

    /// Namespace used when the manifest does not set one.
    #[arg(long, default_value = "default")]
    pub namespace: String,

    /// Record and print sessions instead of talking to a sync daemon.
    #[arg(long)]
    pub dry_run: bool,
}

impl StartArgs {
    pub fn run(self) -> Result<()> {
        if !self.dry_run {
            bail!("only --dry-run is supported; a live engine transport is not wired up yet");
        }

        let config = load_project(&self.project)?;
        let module = load_module(&config, &self.module, &self.project)?;
        let dev_mode = module
            .dev_mode
            .as_ref()
            .with_context(|| format!("module '{}' has no devMode block", self.module))?;

        let project_dir = self
            .project
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        let module_root = self
            .module_root
            .clone()
            .unwrap_or_else(|| module.root_at(&project_dir));

        let workload = load_workload_at(&self.manifest)
            .with_context(|| format!("loading manifest {}", self.manifest.display()))?;

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .context("building tokio runtime")?;

        let engine = Arc::new(LoggingSyncEngine::new());
        let orchestrator = SyncOrchestrator::new(
            engine.clone(),
            Arc::new(ExecTunnelResolver),
            Arc::new(NamedLocks::new()),
        );

        let sessions = runtime.block_on(async {
            orchestrator
                .start_syncs(
                    &workload,
                    dev_mode,
                    module.container_name.as_deref(),
                    &self.namespace,
                    &module_root,
                    config.dev_mode_defaults(),
                    &self.module,
                )
                .await?;
            Ok::<_, devsync_engine::EngineError>(engine.sessions().await)
        })?;

        if sessions.is_empty() {
            println!("Module '{}' has no sync rules; nothing to start.", self.module);
            return Ok(());
        }

        println!(
            "{} {} session{} for module '{}':",
            "[dry-run]".yellow(),
            sessions.len(),
            if sessions.len() == 1 { "" } else { "s" },
            self.module
        );
        for session in &sessions {
            println!(
                "  {}  {} {} {}",
                session.key.as_str().bold(),
                session.source_description,
                "→".dimmed(),
                session.target_description
            );
        }
        Ok(())
    }
}
