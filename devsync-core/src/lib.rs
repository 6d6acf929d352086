//! Devsync core library — sync spec model, defaults merger, project config.
//!
//! Public API surface:
//! - [`types`] — sync modes, path specs, defaults, resolved configs
//! - [`merge`] — [`merge::resolve_sync_config`], the pure defaults merger
//! - [`config`] — `devsync.yaml` loading
//! - [`error`] — [`ConfigError`]

pub mod config;
pub mod error;
pub mod merge;
pub mod types;

pub use config::{load_project_at, ModuleConfig, ProjectConfig};
pub use error::ConfigError;
pub use merge::resolve_sync_config;
pub use types::{
    DevModeDefaults, DevModeSpec, Override, OwnerId, ResolvedSyncConfig, SyncMode,
    SyncPathSpec, BUILTIN_EXCLUDES,
};
