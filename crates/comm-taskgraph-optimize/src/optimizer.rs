//! Apply registered strategies across a task graph

use serde::Serialize;
use tracing::{debug, info};

use comm_taskgraph_core::types::{Parameters, Task, TaskGraph};

use crate::registry::StrategyRegistry;
use crate::schema::OptimizationSchema;
use crate::traits::Result;

/// Outcome of optimizing one task
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decision {
    /// Task label
    pub label: String,
    /// Strategy named by the task, if any
    pub strategy: Option<String>,
    /// Whether the task is removed from the graph
    pub remove: bool,
}

/// Runs each task's optimization against the registry
pub struct Optimizer<'a> {
    registry: &'a StrategyRegistry,
    schema: &'a OptimizationSchema,
}

impl<'a> Optimizer<'a> {
    /// Create an optimizer
    pub fn new(registry: &'a StrategyRegistry, schema: &'a OptimizationSchema) -> Self {
        Self { registry, schema }
    }

    /// Decide whether a single task is removed
    pub fn decide(&self, task: &Task, params: &Parameters) -> Result<Decision> {
        let Some(optimization) = &task.optimization else {
            return Ok(Decision {
                label: task.label.clone(),
                strategy: None,
                remove: false,
            });
        };

        let (name, args) = self.schema.validate(&task.label, optimization)?;
        let remove = self.registry.should_remove_task(name, task, params, args)?;
        debug!(task = %task.label, strategy = name, remove, "optimization decision");

        Ok(Decision {
            label: task.label.clone(),
            strategy: Some(name.to_string()),
            remove,
        })
    }

    /// Decide every task of the graph, in graph order
    pub fn optimize(&self, graph: &TaskGraph, params: &Parameters) -> Result<Vec<Decision>> {
        info!(tasks = graph.len(), "optimizing task graph");
        let decisions = graph
            .tasks()
            .map(|(_, task)| self.decide(task, params))
            .collect::<Result<Vec<_>>>()?;

        let removed = decisions.iter().filter(|d| d.remove).count();
        info!(removed, kept = decisions.len() - removed, "optimization complete");
        Ok(decisions)
    }

    /// Labels removed from the graph
    pub fn removed_labels(&self, graph: &TaskGraph, params: &Parameters) -> Result<Vec<String>> {
        Ok(self
            .optimize(graph, params)?
            .into_iter()
            .filter(|d| d.remove)
            .map(|d| d.label)
            .collect())
    }
}
