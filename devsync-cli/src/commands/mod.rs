pub mod patch;
pub mod plan;
pub mod start;

use std::path::Path;

use anyhow::{Context, Result};

use devsync_core::{config, ModuleConfig, ProjectConfig};

/// Load the project config and look up the requested module.
pub(crate) fn load_module<'a>(
    config: &'a ProjectConfig,
    module_name: &str,
    project_path: &Path,
) -> Result<&'a ModuleConfig> {
    config::require_module(config, module_name, project_path)
        .with_context(|| format!("loading module '{module_name}'"))
}

pub(crate) fn load_project(project_path: &Path) -> Result<ProjectConfig> {
    config::load_project_at(project_path)
        .with_context(|| format!("loading project config {}", project_path.display()))
}
