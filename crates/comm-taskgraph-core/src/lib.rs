//! comm-taskgraph core - shared types for the comm task-graph extensions
//!
//! This crate provides the task graph and parameter types, error handling,
//! configuration loading and path pattern matching used by the optimization
//! and target-task crates.

pub mod config;
pub mod error;
pub mod path;
pub mod types;

pub use config::{GraphConfig, OptimizeSettings, ProjectSets};
pub use error::{
    ConfigError, FilesError, OptimizeError, Result, TargetError, TaskgraphError,
};
pub use path::{match_any, match_path};
pub use types::{Parameters, Task, TaskGraph};
