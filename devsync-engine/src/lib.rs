//! # devsync-engine
//!
//! Sync-session orchestration against the external sync engine.
//!
//! [`SyncOrchestrator::start_syncs`] resolves remote destinations, merges
//! defaults into engine-ready configs, and establishes one session per sync
//! rule — all under the process-wide [`orchestrator::START_SYNC_LOCK`].
//! The engine and tunnel themselves sit behind the [`adapter`] traits.

pub mod adapter;
pub mod error;
pub mod lock;
pub mod orchestrator;
pub mod session;

pub use adapter::{DestinationResolver, ExecTunnelResolver, LoggingSyncEngine, SyncEngine};
pub use error::EngineError;
pub use lock::{NamedLockGuard, NamedLocks};
pub use orchestrator::{SyncOrchestrator, START_SYNC_LOCK};
pub use session::{key_base, SessionKey, SyncSession};
