//! `devsync plan` — preview the merged engine configuration per sync rule.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use devsync_core::merge::resolve_sync_config;

use super::{load_module, load_project};

/// Arguments for `devsync plan`.
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Path to the project config file.
    #[arg(long, default_value = "devsync.yaml")]
    pub project: PathBuf,

    /// Module whose sync rules to preview.
    #[arg(long)]
    pub module: String,

    /// Module root used for the local side of each rule.
    #[arg(long, default_value = ".")]
    pub module_root: PathBuf,

    /// Emit the resolved configs as JSON instead of the summary.
    #[arg(long)]
    pub json: bool,
}

impl PlanArgs {
    pub fn run(self) -> Result<()> {
        let config = load_project(&self.project)?;
        let module = load_module(&config, &self.module, &self.project)?;
        let defaults = config.dev_mode_defaults();

        let syncs = module
            .dev_mode
            .as_ref()
            .map(|dm| dm.sync.as_slice())
            .unwrap_or_default();

        let module_root = self.module_root.to_string_lossy();
        let module_root = module_root.trim_end_matches('/');

        let resolved: Vec<_> = syncs
            .iter()
            .map(|rule| {
                let local = format!("{}/{}", module_root, rule.source);
                let remote = format!("container:{}", rule.target);
                resolve_sync_config(defaults, rule, &local, &remote)
            })
            .collect();

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&resolved).context("serializing plan")?
            );
            return Ok(());
        }

        if resolved.is_empty() {
            println!("Module '{}' has no sync rules.", self.module);
            return Ok(());
        }

        println!(
            "Sync plan for module '{}' ({} rule{}):",
            self.module.bold(),
            resolved.len(),
            if resolved.len() == 1 { "" } else { "s" }
        );
        for (index, config) in resolved.iter().enumerate() {
            println!(
                "  [{index}] {} {} {} {}",
                config.mode.to_string().cyan(),
                config.alpha,
                "→".dimmed(),
                config.beta
            );
            println!("      ignore: {}", config.ignore.join(", "));
            if let Some(mode) = config.default_file_mode {
                println!("      fileMode: {mode:o}");
            }
            if let Some(mode) = config.default_directory_mode {
                println!("      directoryMode: {mode:o}");
            }
            if let Some(owner) = &config.default_owner {
                println!("      owner: {owner}");
            }
            if let Some(group) = &config.default_group {
                println!("      group: {group}");
            }
        }
        Ok(())
    }
}
