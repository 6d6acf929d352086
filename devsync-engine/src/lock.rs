//! Named process-wide locks for session-mutating operations.
//!
//! The external engine's session registry is process-global shared state,
//! so everything that mutates sessions serializes through one named lock.
//! Acquisition suspends the calling task with no timeout; release happens
//! on guard drop, which covers every exit path including errors.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Registry of named async locks. Cheap to share via `Arc`; locks are
/// created on first acquisition and live for the registry's lifetime.
#[derive(Debug, Default)]
pub struct NamedLocks {
    inner: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

/// Guard for a named lock; dropping it releases the lock.
pub type NamedLockGuard = OwnedMutexGuard<()>;

impl NamedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock with the given name, suspending until it is free.
    pub async fn acquire(&self, name: &str) -> NamedLockGuard {
        let lock = {
            let mut map = match self.inner.lock() {
                Ok(map) => map,
                // A poisoned registry map only means another thread panicked
                // while inserting; the map itself is still usable.
                Err(poisoned) => poisoned.into_inner(),
            };
            Arc::clone(
                map.entry(name.to_string())
                    .or_insert_with(|| Arc::new(AsyncMutex::new(()))),
            )
        };
        lock.lock_owned().await
    }
}
