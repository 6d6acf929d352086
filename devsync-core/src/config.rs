//! Project configuration: `devsync.yaml`.
//!
//! # Layout
//!
//! ```yaml
//! provider:
//!   devMode:
//!     defaults:
//!       exclude: ["**/node_modules/**"]
//!       fileMode: 0o644          # YAML integer
//! modules:
//!   - name: api
//!     root: services/api        # optional, defaults to the module name
//!     containerName: api        # optional, defaults to the first container
//!     devMode:
//!       command: ["npm", "run", "dev"]
//!       sync:
//!         - source: src
//!           target: /app/src
//!           mode: one-way-safe
//! ```
//!
//! Loading is layered: provider-level defaults under `provider.devMode.defaults`
//! apply to every module sync rule that does not override them (see
//! [`crate::merge::resolve_sync_config`]). Schema validation beyond serde's
//! structural checks is out of scope here.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{DevModeDefaults, DevModeSpec};

// ---------------------------------------------------------------------------
// Config types
// ---------------------------------------------------------------------------

/// Root of a `devsync.yaml` project file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub modules: Vec<ModuleConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev_mode: Option<ProviderDevMode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProviderDevMode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DevModeDefaults>,
}

/// One deployable module declared in the project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleConfig {
    pub name: String,
    /// Module root relative to the project root; defaults to the name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
    /// Target container inside the workload's pod template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev_mode: Option<DevModeSpec>,
}

impl ProjectConfig {
    /// Provider-level dev-mode defaults, if configured.
    pub fn dev_mode_defaults(&self) -> Option<&DevModeDefaults> {
        self.provider
            .dev_mode
            .as_ref()
            .and_then(|dm| dm.defaults.as_ref())
    }

    /// Look up a module by name.
    pub fn module(&self, name: &str) -> Option<&ModuleConfig> {
        self.modules.iter().find(|m| m.name == name)
    }
}

impl ModuleConfig {
    /// `<project_root>/<module root or name>`.
    pub fn root_at(&self, project_root: &Path) -> PathBuf {
        match &self.root {
            Some(root) => project_root.join(root),
            None => project_root.join(&self.name),
        }
    }
}

// ---------------------------------------------------------------------------
// Load
// ---------------------------------------------------------------------------

/// Load a project config from an explicit path.
///
/// Returns `ConfigError::NotFound` if absent, `ConfigError::Parse` (with
/// path + line context) if malformed YAML.
pub fn load_project_at(path: &Path) -> Result<ProjectConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path)?;
    serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Look up a module by name, erroring with the config path for context.
pub fn require_module<'a>(
    config: &'a ProjectConfig,
    name: &str,
    path: &Path,
) -> Result<&'a ModuleConfig, ConfigError> {
    config.module(name).ok_or_else(|| ConfigError::UnknownModule {
        name: name.to_string(),
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
