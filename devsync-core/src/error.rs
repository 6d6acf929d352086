//! Error types for devsync-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from project configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure (file not found, permission denied, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error (write path).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// YAML parse error on load — includes file path and line context from serde_yaml.
    #[error("failed to parse project config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The project config file did not exist at the expected path.
    #[error("project config not found at {path}")]
    NotFound { path: PathBuf },

    /// The named module is not declared in the project config.
    #[error("module '{name}' not found in {path}")]
    UnknownModule { name: String, path: PathBuf },
}
