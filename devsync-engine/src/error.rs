//! Error types for devsync-engine.

use thiserror::Error;

use devsync_core::ConfigError;
use devsync_workload::{ResourceIdentity, WorkloadError};

/// Error surface for sync-session orchestration.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Sync start was requested for a workload that was never patched for
    /// dev mode. User-facing, non-retriable.
    #[error("{resource} is not running in dev mode; re-deploy it with dev mode enabled before starting syncs")]
    NotDevMode { resource: ResourceIdentity },

    /// Container resolution or manifest inspection failed.
    #[error("workload error: {0}")]
    Workload(#[from] WorkloadError),

    /// Project configuration failed to load.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Failure reported by the external sync engine; propagated unchanged,
    /// never retried here.
    #[error("sync engine failure: {0}")]
    Engine(String),
}
