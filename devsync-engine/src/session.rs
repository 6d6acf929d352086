//! Sync session keys and the record adapters keep per session.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use devsync_core::ResolvedSyncConfig;
use devsync_workload::ResourceIdentity;

/// Deterministic key addressing one sync session in the external engine:
/// `{kind}--{namespace}--{name}-{index}`, kind lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SessionKey(pub String);

/// `{kind}--{namespace}--{name}` — shared prefix of all of a workload's
/// session keys.
pub fn key_base(resource: &ResourceIdentity, namespace: &str) -> String {
    format!(
        "{}--{}--{}",
        resource.kind.as_lower(),
        namespace,
        resource.name
    )
}

impl SessionKey {
    /// Key of the sync rule at `index` within the workload's sync list.
    pub fn indexed(base: &str, index: usize) -> Self {
        Self(format!("{base}-{index}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// What the in-process adapters track per established session.
#[derive(Debug, Clone, Serialize)]
pub struct SyncSession {
    pub key: SessionKey,
    pub config: ResolvedSyncConfig,
    pub source_description: String,
    pub target_description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Number of ensure calls seen for this key (1 = created, >1 = updated).
    pub establish_count: u32,
}
