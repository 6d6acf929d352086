//! # devsync-workload
//!
//! Workload manifest model and dev-mode sync-agent injection.
//!
//! [`inject_sync_agent`] prepares a Deployment/StatefulSet/DaemonSet pod
//! template for dev mode; [`SyncTarget`] is the capability view the rest of
//! devsync uses to read and mutate workloads uniformly across kinds.

pub mod error;
pub mod manifest;
pub mod patch;
pub mod target;

pub use error::WorkloadError;
pub use manifest::{load_workload_at, Container, PodSpec, Workload, WorkloadKind};
pub use patch::{
    inject_sync_agent, main_container_index, PatchSummary, AGENT_MOUNT_PATH,
    DEV_MODE_ANNOTATION, INIT_CONTAINER_NAME, SYNC_VOLUME_NAME, UTIL_IMAGE,
};
pub use target::{is_dev_mode_enabled, ResourceIdentity, SyncTarget};
