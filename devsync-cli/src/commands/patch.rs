//! `devsync patch` — inject the sync agent into a workload manifest.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use devsync_core::types::DevModeSpec;
use devsync_workload::{inject_sync_agent, load_workload_at, SyncTarget};

use super::{load_module, load_project};

/// Arguments for `devsync patch`.
#[derive(Args, Debug)]
pub struct PatchArgs {
    /// Path to the project config file.
    #[arg(long, default_value = "devsync.yaml")]
    pub project: PathBuf,

    /// Module whose dev-mode spec drives the patch.
    #[arg(long)]
    pub module: String,

    /// Workload manifest to patch.
    #[arg(long)]
    pub manifest: PathBuf,

    /// Write the patched manifest here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Target container; overrides the module's containerName.
    #[arg(long)]
    pub container: Option<String>,
}

impl PatchArgs {
    pub fn run(self) -> Result<()> {
        let config = load_project(&self.project)?;
        let module = load_module(&config, &self.module, &self.project)?;
        let empty = DevModeSpec::default();
        let dev_mode = module.dev_mode.as_ref().unwrap_or(&empty);
        let container = self
            .container
            .as_deref()
            .or(module.container_name.as_deref());

        let mut workload = load_workload_at(&self.manifest)
            .with_context(|| format!("loading manifest {}", self.manifest.display()))?;
        let identity = workload.identity();

        let summary = inject_sync_agent(&mut workload, dev_mode, container)
            .with_context(|| format!("patching {identity}"))?;

        let yaml = serde_yaml::to_string(&workload).context("serializing patched manifest")?;
        match &self.output {
            Some(path) => {
                std::fs::write(path, &yaml)
                    .with_context(|| format!("writing {}", path.display()))?;
                let mut applied = vec!["dev-mode annotation"];
                if summary.command_replaced {
                    applied.push("command");
                }
                if summary.args_replaced {
                    applied.push("args");
                }
                if summary.agent_installed {
                    applied.push("sync agent");
                }
                eprintln!(
                    "{} {} → {} ({})",
                    "patched".green().bold(),
                    identity,
                    path.display(),
                    applied.join(", ")
                );
            }
            None => print!("{yaml}"),
        }
        Ok(())
    }
}
