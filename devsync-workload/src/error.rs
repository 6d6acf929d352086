//! Error types for devsync-workload.

use std::path::PathBuf;

use thiserror::Error;

use crate::target::ResourceIdentity;

/// All errors that can arise from workload inspection and patching.
#[derive(Debug, Error)]
pub enum WorkloadError {
    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Manifest parse error, with file path and line context from serde_yaml.
    #[error("failed to parse workload manifest at {path}: {source}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Manifest serialization error (patch output path).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The pod template declares no containers at all.
    #[error("{resource} has no containers in its pod template")]
    NoContainers { resource: ResourceIdentity },

    /// A container was requested by name but is not in the pod template.
    #[error("container '{container}' not found in {resource}")]
    ContainerNotFound {
        container: String,
        resource: ResourceIdentity,
    },
}

/// Convenience constructor for [`WorkloadError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> WorkloadError {
    WorkloadError::Io {
        path: path.into(),
        source,
    }
}
