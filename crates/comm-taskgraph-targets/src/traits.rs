//! Target task selector trait

use comm_taskgraph_core::config::GraphConfig;
use comm_taskgraph_core::error::TargetError;
use comm_taskgraph_core::types::{Parameters, TaskGraph};

/// Result type for target task selection
pub type Result<T> = std::result::Result<T, TargetError>;

/// Chooses which labels of the full task graph run for a trigger
pub trait TargetTaskSelector: Send + Sync {
    /// Labels to run, in the order they should be reported
    fn select(
        &self,
        full_task_graph: &TaskGraph,
        params: &Parameters,
        config: &GraphConfig,
    ) -> Result<Vec<String>>;
}

impl<F> TargetTaskSelector for F
where
    F: Fn(&TaskGraph, &Parameters, &GraphConfig) -> Result<Vec<String>> + Send + Sync,
{
    fn select(
        &self,
        full_task_graph: &TaskGraph,
        params: &Parameters,
        config: &GraphConfig,
    ) -> Result<Vec<String>> {
        self(full_task_graph, params, config)
    }
}
