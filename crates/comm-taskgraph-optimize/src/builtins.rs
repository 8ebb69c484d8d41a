//! Strategies every graph can use regardless of product

use serde_json::Value;
use tracing::debug;

use comm_taskgraph_core::types::{Parameters, Task};

use crate::traits::{OptimizationStrategy, Result};

/// Never removes the task
#[derive(Debug, Clone, Copy, Default)]
pub struct Always;

impl OptimizationStrategy for Always {
    fn should_remove_task(&self, _task: &Task, _params: &Parameters, _args: &Value) -> Result<bool> {
        Ok(false)
    }
}

/// Always removes the task
#[derive(Debug, Clone, Copy, Default)]
pub struct Never;

impl OptimizationStrategy for Never {
    fn should_remove_task(&self, _task: &Task, _params: &Parameters, _args: &Value) -> Result<bool> {
        Ok(true)
    }
}

/// Removes the task unless the push is a backstop push
#[derive(Debug, Clone, Copy, Default)]
pub struct SkipUnlessBackstop;

impl OptimizationStrategy for SkipUnlessBackstop {
    fn should_remove_task(&self, task: &Task, params: &Parameters, _args: &Value) -> Result<bool> {
        let remove = !params.backstop();
        if remove {
            debug!(task = %task.label, "not a backstop push");
        }
        Ok(remove)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_always_and_never() {
        let task = Task::new("lint");
        let params = Parameters::new();
        assert!(!Always.should_remove_task(&task, &params, &Value::Null).unwrap());
        assert!(Never.should_remove_task(&task, &params, &Value::Null).unwrap());
    }

    #[test]
    fn test_backstop() {
        let task = Task::new("build-linux64/opt");
        let backstop = Parameters::new().with("backstop", true);
        let regular = Parameters::new().with("backstop", false);

        assert!(!SkipUnlessBackstop
            .should_remove_task(&task, &backstop, &Value::Null)
            .unwrap());
        assert!(SkipUnlessBackstop
            .should_remove_task(&task, &regular, &Value::Null)
            .unwrap());
        assert!(SkipUnlessBackstop
            .should_remove_task(&task, &Parameters::new(), &Value::Null)
            .unwrap());
    }
}
