//! Delegates used by the try selector

use std::collections::HashSet;

use serde_json::Value;
use tracing::{debug, warn};

use comm_taskgraph_core::config::GraphConfig;
use comm_taskgraph_core::error::TargetError;
use comm_taskgraph_core::types::{Parameters, TaskGraph};

use crate::traits::{Result, TargetTaskSelector};

/// Selects the tasks listed in the `try_task_config` parameter
#[derive(Debug, Clone, Copy, Default)]
pub struct TryTaskConfig;

impl TargetTaskSelector for TryTaskConfig {
    fn select(
        &self,
        full_task_graph: &TaskGraph,
        params: &Parameters,
        _config: &GraphConfig,
    ) -> Result<Vec<String>> {
        let requested = match params.get("try_task_config").and_then(|c| c.get("tasks")) {
            None | Some(Value::Null) => {
                debug!("try_task_config requests no tasks");
                return Ok(Vec::new());
            }
            Some(Value::Array(tasks)) => tasks,
            Some(_) => {
                return Err(TargetError::InvalidParameter {
                    name: "try_task_config.tasks".to_string(),
                    message: "expected a list of task labels".to_string(),
                })
            }
        };

        let mut seen = HashSet::new();
        let mut labels = Vec::new();
        for item in requested {
            let Some(label) = item.as_str() else {
                return Err(TargetError::InvalidParameter {
                    name: "try_task_config.tasks".to_string(),
                    message: format!("task labels must be strings, found {}", item),
                });
            };

            if !full_task_graph.contains(label) {
                warn!(label, "requested try task is not in the graph");
                continue;
            }
            if seen.insert(label) {
                labels.push(label.to_string());
            }
        }

        Ok(labels)
    }
}

/// Placeholder for try option syntax: selects nothing.
///
/// Parsing try option syntax lives outside this crate; install a real
/// selector with [`TryTasks::with_option_syntax`](crate::TryTasks::with_option_syntax).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOptionSyntax;

impl TargetTaskSelector for NoOptionSyntax {
    fn select(
        &self,
        _full_task_graph: &TaskGraph,
        _params: &Parameters,
        _config: &GraphConfig,
    ) -> Result<Vec<String>> {
        warn!("try option syntax requested but no parser is installed; selecting nothing");
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use comm_taskgraph_core::types::Task;

    fn graph() -> TaskGraph {
        TaskGraph::from_tasks(vec![Task::new("build-linux64/opt"), Task::new("test-linux64/opt-xpcshell")])
    }

    fn select(params: &Parameters) -> Result<Vec<String>> {
        TryTaskConfig.select(&graph(), params, &GraphConfig::default())
    }

    #[test]
    fn test_keeps_request_order_and_dedups() {
        let params = Parameters::new().with(
            "try_task_config",
            json!({"tasks": ["test-linux64/opt-xpcshell", "build-linux64/opt", "test-linux64/opt-xpcshell"]}),
        );
        assert_eq!(
            select(&params).unwrap(),
            vec!["test-linux64/opt-xpcshell", "build-linux64/opt"]
        );
    }

    #[test]
    fn test_drops_unknown_labels() {
        let params = Parameters::new().with(
            "try_task_config",
            json!({"tasks": ["build-win64/opt", "build-linux64/opt"]}),
        );
        assert_eq!(select(&params).unwrap(), vec!["build-linux64/opt"]);
    }

    #[test]
    fn test_missing_config_selects_nothing() {
        assert!(select(&Parameters::new()).unwrap().is_empty());
        let params = Parameters::new().with("try_task_config", json!({}));
        assert!(select(&params).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_tasks_rejected() {
        let params = Parameters::new().with("try_task_config", json!({"tasks": "build"}));
        assert!(matches!(
            select(&params),
            Err(TargetError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_option_syntax_placeholder() {
        let params = Parameters::new().with("try_mode", "try_option_syntax");
        assert!(NoOptionSyntax
            .select(&graph(), &params, &GraphConfig::default())
            .unwrap()
            .is_empty());
    }
}
