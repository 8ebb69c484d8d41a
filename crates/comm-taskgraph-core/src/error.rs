//! Error types for comm-taskgraph

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using TaskgraphError
pub type Result<T> = std::result::Result<T, TaskgraphError>;

/// Main error type for comm-taskgraph operations
#[derive(Debug, Error)]
pub enum TaskgraphError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Changed-file lookup errors
    #[error(transparent)]
    Files(#[from] FilesError),

    /// Optimization strategy errors
    #[error(transparent)]
    Optimize(#[from] OptimizeError),

    /// Target task selection errors
    #[error(transparent)]
    Target(#[from] TargetError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found at {0}")]
    NotFound(PathBuf),

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while fetching the files changed by a revision
#[derive(Debug, Error)]
pub enum FilesError {
    /// Repository not found
    #[error("Repository not found: {0}")]
    RepositoryNotFound(String),

    /// Failed to open repository
    #[error("Failed to open repository: {0}")]
    OpenFailed(String),

    /// Revision does not exist in the repository
    #[error("Revision {revision} not found in {repository}")]
    RevisionNotFound { repository: String, revision: String },

    /// No change set recorded for a repository/revision pair
    #[error("No changed files recorded for {repository}@{revision}")]
    NotRecorded { repository: String, revision: String },

    /// Failed to load a recorded change set
    #[error("Failed to load changed files: {0}")]
    LoadFailed(String),

    /// Git2 library error
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),
}

/// Optimization strategy errors
#[derive(Debug, Error)]
pub enum OptimizeError {
    /// No strategy registered under this name
    #[error("Unknown optimization strategy: {0}")]
    UnknownStrategy(String),

    /// A strategy with this name is already registered
    #[error("Optimization strategy already registered: {0}")]
    DuplicateStrategy(String),

    /// Strategy arguments do not match the schema
    #[error("Invalid arguments for optimization '{strategy}': {message}")]
    InvalidArguments { strategy: String, message: String },

    /// Malformed optimization value on a task
    #[error("Invalid optimization for task '{label}': {message}")]
    InvalidOptimization { label: String, message: String },

    /// Changed files could not be determined
    #[error(transparent)]
    Files(#[from] FilesError),
}

/// Target task selection errors
#[derive(Debug, Error)]
pub enum TargetError {
    /// No target task method registered under this name
    #[error("Unknown target task method: {0}")]
    UnknownMethod(String),

    /// A method with this name is already registered
    #[error("Target task method already registered: {0}")]
    DuplicateMethod(String),

    /// A selector returned a label that is not in the graph
    #[error("Target task method '{method}' selected unknown task '{label}'")]
    UnknownLabel { method: String, label: String },

    /// A required parameter is missing or has the wrong shape
    #[error("Invalid parameter '{name}': {message}")]
    InvalidParameter { name: String, message: String },
}

impl TaskgraphError {
    /// Create a new "other" error with a message
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Self::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_error_display() {
        let err = FilesError::RevisionNotFound {
            repository: "https://hg.example.org/comm-central".to_string(),
            revision: "abc123".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Revision abc123 not found in https://hg.example.org/comm-central"
        );
    }

    #[test]
    fn test_files_error_wraps_into_optimize_error() {
        let err: OptimizeError = FilesError::OpenFailed("boom".to_string()).into();
        assert!(matches!(err, OptimizeError::Files(_)));
        assert_eq!(err.to_string(), "Failed to open repository: boom");
    }

    #[test]
    fn test_top_level_conversion() {
        let err: TaskgraphError = TargetError::UnknownMethod("nope".to_string()).into();
        assert_eq!(err.to_string(), "Unknown target task method: nope");
    }
}
