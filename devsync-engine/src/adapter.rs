//! Boundary traits for the external sync engine and the exec-based tunnel,
//! plus the in-process implementations used by dry runs and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use devsync_core::ResolvedSyncConfig;
use devsync_workload::ResourceIdentity;

use crate::error::EngineError;
use crate::session::{SessionKey, SyncSession};

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// The external sync engine's session registry.
///
/// `ensure_sync` is idempotent create-or-update keyed by `key`; calling it
/// again for an existing key updates that session instead of failing.
#[async_trait]
pub trait SyncEngine: Send + Sync {
    async fn ensure_sync(
        &self,
        key: &SessionKey,
        config: &ResolvedSyncConfig,
        source_description: &str,
        target_description: &str,
    ) -> Result<(), EngineError>;
}

/// Resolves the engine-facing destination string for a path inside a
/// running container, reachable over an exec-based tunnel.
#[async_trait]
pub trait DestinationResolver: Send + Sync {
    async fn resolve_destination(
        &self,
        namespace: &str,
        container_name: &str,
        resource: &ResourceIdentity,
        target_path: &str,
    ) -> Result<String, EngineError>;
}

// ---------------------------------------------------------------------------
// LoggingSyncEngine
// ---------------------------------------------------------------------------

/// Dry-run engine: records sessions in memory and logs what a real engine
/// would establish. Backs `devsync start --dry-run` and tests.
#[derive(Debug, Default)]
pub struct LoggingSyncEngine {
    sessions: RwLock<HashMap<SessionKey, SyncSession>>,
}

impl LoggingSyncEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the tracked sessions, sorted by key.
    pub async fn sessions(&self) -> Vec<SyncSession> {
        let map = self.sessions.read().await;
        let mut sessions: Vec<_> = map.values().cloned().collect();
        sessions.sort_by(|a, b| a.key.as_str().cmp(b.key.as_str()));
        sessions
    }
}

#[async_trait]
impl SyncEngine for LoggingSyncEngine {
    async fn ensure_sync(
        &self,
        key: &SessionKey,
        config: &ResolvedSyncConfig,
        source_description: &str,
        target_description: &str,
    ) -> Result<(), EngineError> {
        let now = Utc::now();
        let mut map = self.sessions.write().await;
        match map.get_mut(key) {
            Some(session) => {
                session.config = config.clone();
                session.source_description = source_description.to_string();
                session.target_description = target_description.to_string();
                session.updated_at = now;
                session.establish_count += 1;
                tracing::info!(key = %key, mode = %config.mode, "updated sync session");
            }
            None => {
                map.insert(
                    key.clone(),
                    SyncSession {
                        key: key.clone(),
                        config: config.clone(),
                        source_description: source_description.to_string(),
                        target_description: target_description.to_string(),
                        created_at: now,
                        updated_at: now,
                        establish_count: 1,
                    },
                );
                tracing::info!(
                    key = %key,
                    mode = %config.mode,
                    "syncing {source_description} to {target_description}",
                );
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ExecTunnelResolver
// ---------------------------------------------------------------------------

/// Formats exec-tunnel destinations:
/// `exec://{kind}/{namespace}/{name}/{container}:{path}`. The tunnel
/// transport itself lives outside this crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecTunnelResolver;

#[async_trait]
impl DestinationResolver for ExecTunnelResolver {
    async fn resolve_destination(
        &self,
        namespace: &str,
        container_name: &str,
        resource: &ResourceIdentity,
        target_path: &str,
    ) -> Result<String, EngineError> {
        Ok(format!(
            "exec://{}/{}/{}/{}:{}",
            resource.kind.as_lower(),
            namespace,
            resource.name,
            container_name,
            target_path,
        ))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
