//! Optimization strategy traits

use serde_json::Value;

use comm_taskgraph_core::error::OptimizeError;
use comm_taskgraph_core::types::{Parameters, Task};

/// Result type for optimization decisions
pub type Result<T> = std::result::Result<T, OptimizeError>;

/// Trait for optimization strategies
///
/// A strategy decides whether a task can be dropped from the graph without
/// affecting what the run is meant to verify. Implementations must not have
/// side effects beyond logging and cached change-set lookups.
pub trait OptimizationStrategy: Send + Sync {
    /// Whether `task` should be removed, given the run parameters and the
    /// arguments attached to the task's optimization
    fn should_remove_task(&self, task: &Task, params: &Parameters, args: &Value) -> Result<bool>;
}

/// Read strategy arguments as a list of path patterns
pub fn pattern_args<'a>(strategy: &str, args: &'a Value) -> Result<Vec<&'a str>> {
    let invalid = |message: &str| OptimizeError::InvalidArguments {
        strategy: strategy.to_string(),
        message: message.to_string(),
    };

    args.as_array()
        .ok_or_else(|| invalid("expected a list of file patterns"))?
        .iter()
        .map(|item| item.as_str().ok_or_else(|| invalid("file patterns must be strings")))
        .collect()
}
