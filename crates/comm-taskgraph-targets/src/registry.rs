//! Target task method registry

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info};

use comm_taskgraph_core::config::GraphConfig;
use comm_taskgraph_core::error::TargetError;
use comm_taskgraph_core::types::{Parameters, TaskGraph};

use crate::selectors::{target_tasks_default, target_tasks_searchfox, TryTasks};
use crate::traits::{Result, TargetTaskSelector};

/// Registry of target task methods by name
pub struct TargetTaskRegistry {
    methods: BTreeMap<String, Arc<dyn TargetTaskSelector>>,
}

impl TargetTaskRegistry {
    /// Create a registry with the comm target task methods
    pub fn new() -> Self {
        Self::with_try_tasks(TryTasks::default())
    }

    /// Create a registry with the comm methods and a custom try selector
    pub fn with_try_tasks(try_tasks: TryTasks) -> Self {
        let mut methods: BTreeMap<String, Arc<dyn TargetTaskSelector>> = BTreeMap::new();
        methods.insert(
            crate::COMM_SEARCHFOX_INDEX.to_string(),
            Arc::new(target_tasks_searchfox),
        );
        methods.insert(
            crate::COMM_CENTRAL_TASKS.to_string(),
            Arc::new(target_tasks_default),
        );
        methods.insert(crate::TRY_CC_TASKS.to_string(), Arc::new(try_tasks));
        Self { methods }
    }

    /// Create an empty registry
    pub fn empty() -> Self {
        Self {
            methods: BTreeMap::new(),
        }
    }

    /// Register a target task method
    pub fn register<S: TargetTaskSelector + 'static>(
        &mut self,
        name: impl Into<String>,
        selector: S,
    ) -> Result<()> {
        let name = name.into();
        if self.methods.contains_key(&name) {
            return Err(TargetError::DuplicateMethod(name));
        }
        debug!(method = %name, "registering target task method");
        self.methods.insert(name, Arc::new(selector));
        Ok(())
    }

    /// Get a method by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn TargetTaskSelector>> {
        self.methods.get(name).cloned()
    }

    /// Get method names
    pub fn names(&self) -> Vec<&str> {
        self.methods.keys().map(String::as_str).collect()
    }

    /// Run the method registered under `name`.
    ///
    /// Fails if the method selects a label that is not in the graph.
    pub fn select(
        &self,
        name: &str,
        full_task_graph: &TaskGraph,
        params: &Parameters,
        config: &GraphConfig,
    ) -> Result<Vec<String>> {
        let method = self
            .get(name)
            .ok_or_else(|| TargetError::UnknownMethod(name.to_string()))?;

        let labels = method.select(full_task_graph, params, config)?;
        if let Some(missing) = labels.iter().find(|l| !full_task_graph.contains(l)) {
            return Err(TargetError::UnknownLabel {
                method: name.to_string(),
                label: missing.clone(),
            });
        }

        info!(method = name, selected = labels.len(), "target tasks selected");
        Ok(labels)
    }
}

impl Default for TargetTaskRegistry {
    fn default() -> Self {
        Self::new()
    }
}
