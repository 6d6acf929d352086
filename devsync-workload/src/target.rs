//! Capability view over the workload kinds devsync can sync into.
//!
//! The orchestrator and patcher never match on a concrete manifest type;
//! they go through [`SyncTarget`], which exposes exactly the fields they
//! are allowed to touch: metadata annotations and the pod template's
//! containers / init containers / volumes.

use std::collections::BTreeMap;
use std::fmt;

use crate::manifest::{PodSpec, Workload, WorkloadKind};
use crate::patch::DEV_MODE_ANNOTATION;

// ---------------------------------------------------------------------------
// ResourceIdentity
// ---------------------------------------------------------------------------

/// Kind/namespace/name triple identifying a workload; displayed as
/// `{kind}/{name}` in user-facing errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceIdentity {
    pub kind: WorkloadKind,
    pub namespace: Option<String>,
    pub name: String,
}

impl fmt::Display for ResourceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.name)
    }
}

// ---------------------------------------------------------------------------
// SyncTarget
// ---------------------------------------------------------------------------

/// Uniform access to the parts of a workload that dev-mode orchestration
/// reads and mutates.
pub trait SyncTarget: Send + Sync {
    fn kind(&self) -> WorkloadKind;
    fn name(&self) -> &str;
    fn namespace(&self) -> Option<&str>;
    fn annotations(&self) -> &BTreeMap<String, String>;
    fn annotations_mut(&mut self) -> &mut BTreeMap<String, String>;
    fn pod_spec(&self) -> &PodSpec;
    fn pod_spec_mut(&mut self) -> &mut PodSpec;

    fn identity(&self) -> ResourceIdentity {
        ResourceIdentity {
            kind: self.kind(),
            namespace: self.namespace().map(str::to_owned),
            name: self.name().to_string(),
        }
    }
}

impl SyncTarget for Workload {
    fn kind(&self) -> WorkloadKind {
        self.kind
    }

    fn name(&self) -> &str {
        &self.metadata.name
    }

    fn namespace(&self) -> Option<&str> {
        self.metadata.namespace.as_deref()
    }

    fn annotations(&self) -> &BTreeMap<String, String> {
        &self.metadata.annotations
    }

    fn annotations_mut(&mut self) -> &mut BTreeMap<String, String> {
        &mut self.metadata.annotations
    }

    fn pod_spec(&self) -> &PodSpec {
        &self.spec.template.spec
    }

    fn pod_spec_mut(&mut self) -> &mut PodSpec {
        &mut self.spec.template.spec
    }
}

/// Whether the workload carries the dev-mode annotation set by the patcher.
pub fn is_dev_mode_enabled(target: &dyn SyncTarget) -> bool {
    target
        .annotations()
        .get(DEV_MODE_ANNOTATION)
        .map(|v| v == "true")
        .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
