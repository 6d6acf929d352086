//! Session-establishment orchestration.
//!
//! `start_syncs` turns a module's dev-mode spec into one engine session per
//! sync rule. The whole operation runs under the process-wide
//! [`START_SYNC_LOCK`]: the external engine's session registry is shared
//! across every resource in the process, so establishment never runs
//! concurrently, even for unrelated workloads. Rules are processed strictly
//! in declared order; the first failure aborts the remainder.

use std::path::Path;
use std::sync::Arc;

use devsync_core::merge::resolve_sync_config;
use devsync_core::types::{DevModeDefaults, DevModeSpec, SyncPathSpec};
use devsync_workload::{is_dev_mode_enabled, main_container_index, SyncTarget};

use crate::adapter::{DestinationResolver, SyncEngine};
use crate::error::EngineError;
use crate::lock::NamedLocks;
use crate::session::{key_base, SessionKey};

/// Name of the lock serializing all session establishment in this process.
pub const START_SYNC_LOCK: &str = "start-sync";

pub struct SyncOrchestrator {
    engine: Arc<dyn SyncEngine>,
    resolver: Arc<dyn DestinationResolver>,
    locks: Arc<NamedLocks>,
}

impl SyncOrchestrator {
    pub fn new(
        engine: Arc<dyn SyncEngine>,
        resolver: Arc<dyn DestinationResolver>,
        locks: Arc<NamedLocks>,
    ) -> Self {
        Self {
            engine,
            resolver,
            locks,
        }
    }

    /// Establish (or update) one sync session per rule in `spec.sync`.
    ///
    /// Returns the session keys in rule order. Pod-spec patching is a
    /// separate, earlier pipeline step; this call fails if the workload
    /// does not carry the dev-mode annotation.
    #[allow(clippy::too_many_arguments)]
    pub async fn start_syncs(
        &self,
        target: &dyn SyncTarget,
        spec: &DevModeSpec,
        container_name: Option<&str>,
        namespace: &str,
        module_root: &Path,
        defaults: Option<&DevModeDefaults>,
        resource_label: &str,
    ) -> Result<Vec<SessionKey>, EngineError> {
        if spec.sync.is_empty() {
            return Ok(Vec::new());
        }

        let identity = target.identity();
        // The workload's own namespace wins over the caller-supplied one.
        let namespace = target.namespace().unwrap_or(namespace);
        let base = key_base(&identity, namespace);

        let _guard = self.locks.acquire(START_SYNC_LOCK).await;
        tracing::debug!(resource = %identity, "acquired {START_SYNC_LOCK} lock");

        if !is_dev_mode_enabled(target) {
            return Err(EngineError::NotDevMode { resource: identity });
        }

        let pod = target.pod_spec();
        let main_idx = main_container_index(pod, container_name, &identity)?;
        let container = pod.containers[main_idx].name.as_str();

        let mut keys = Vec::with_capacity(spec.sync.len());
        for (index, rule) in spec.sync.iter().enumerate() {
            let local_path = join_module_path(module_root, &rule.source);
            let remote = self
                .resolver
                .resolve_destination(namespace, container, &identity, &rule.target)
                .await?;
            let (source_description, target_description) =
                describe_direction(rule, &local_path, resource_label);
            let config = resolve_sync_config(defaults, rule, &local_path, &remote);
            let key = SessionKey::indexed(&base, index);

            tracing::info!(
                key = %key,
                mode = %rule.mode,
                "establishing sync: {source_description} → {target_description}",
            );
            self.engine
                .ensure_sync(&key, &config, &source_description, &target_description)
                .await?;
            keys.push(key);
        }

        Ok(keys)
    }
}

/// Join a module root and a source path with forward-slash semantics,
/// escaping embedded spaces for the engine's endpoint syntax.
fn join_module_path(module_root: &Path, source: &str) -> String {
    let root = module_root.to_string_lossy();
    let root = root.trim_end_matches('/');
    let joined = if source.is_empty() {
        root.to_string()
    } else {
        format!("{root}/{source}")
    };
    joined.replace(' ', "\\ ")
}

/// Source/target descriptions oriented by direction: reverse modes sync
/// remote-to-local, everything else local-to-remote.
fn describe_direction(
    rule: &SyncPathSpec,
    local_path: &str,
    resource_label: &str,
) -> (String, String) {
    let remote = format!("{}:{}", resource_label, rule.target);
    if rule.mode.is_reverse() {
        (remote, local_path.to_string())
    } else {
        (local_path.to_string(), remote)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
