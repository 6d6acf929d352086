//! Defaults merger: one sync rule + provider defaults → engine-ready config.
//!
//! Pure function, no I/O. Side assignment is mode-dependent: reverse modes
//! put the remote destination on the alpha side.

use crate::types::{
    DevModeDefaults, ResolvedSyncConfig, SyncPathSpec, BUILTIN_EXCLUDES,
};

/// Merge provider-level defaults with a per-path sync spec.
///
/// - `ignore` = built-in excludes, then `defaults.exclude`, then
///   `spec.exclude`; order preserved, duplicates kept.
/// - For owner/group/fileMode/directoryMode an explicit per-path value
///   wins, else the default's value, else the field stays unset and the
///   engine applies its own default.
pub fn resolve_sync_config(
    defaults: Option<&DevModeDefaults>,
    spec: &SyncPathSpec,
    local_path: &str,
    remote_destination: &str,
) -> ResolvedSyncConfig {
    let empty = DevModeDefaults::default();
    let defaults = defaults.unwrap_or(&empty);

    let (alpha, beta) = if spec.mode.is_reverse() {
        (remote_destination.to_string(), local_path.to_string())
    } else {
        (local_path.to_string(), remote_destination.to_string())
    };

    let mut ignore: Vec<String> =
        BUILTIN_EXCLUDES.iter().map(|s| s.to_string()).collect();
    ignore.extend(defaults.exclude.iter().cloned());
    ignore.extend(spec.exclude.iter().cloned());

    ResolvedSyncConfig {
        alpha,
        beta,
        mode: spec.mode,
        ignore,
        default_file_mode: spec.default_file_mode.resolve(defaults.file_mode),
        default_directory_mode: spec
            .default_directory_mode
            .resolve(defaults.directory_mode),
        default_owner: spec.default_owner.resolve(defaults.owner.clone()),
        default_group: spec.default_group.resolve(defaults.group.clone()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
