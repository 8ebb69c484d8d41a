//! Target task selectors for comm triggers

use std::sync::Arc;

use tracing::{debug, info};

use comm_taskgraph_core::config::GraphConfig;
use comm_taskgraph_core::types::{Parameters, TaskGraph};

use crate::filters::{filter_out_shipping_phase, standard_filter};
use crate::traits::{Result, TargetTaskSelector};
use crate::try_config::{NoOptionSyntax, TryTaskConfig};

/// Searchfox indexing jobs, one per platform
pub const SEARCHFOX_TASKS: [&str; 3] = [
    "searchfox-linux64-searchfox/debug",
    "searchfox-macosx64-searchfox/debug",
    "searchfox-win64-searchfox/debug",
];

/// Select the tasks required for the daily Searchfox index
pub fn target_tasks_searchfox(
    _full_task_graph: &TaskGraph,
    _params: &Parameters,
    _config: &GraphConfig,
) -> Result<Vec<String>> {
    Ok(SEARCHFOX_TASKS.iter().map(|l| l.to_string()).collect())
}

/// Select the tasks which indicated, via `run_on_projects`, that they run on this project
pub fn target_tasks_default(
    full_task_graph: &TaskGraph,
    params: &Parameters,
    config: &GraphConfig,
) -> Result<Vec<String>> {
    let labels: Vec<String> = full_task_graph
        .tasks()
        .filter(|(_, task)| {
            standard_filter(task, params, config) && filter_out_shipping_phase(task, params, config)
        })
        .map(|(label, _)| label.to_string())
        .collect();

    info!(
        project = params.project().unwrap_or_default(),
        selected = labels.len(),
        total = full_task_graph.len(),
        "selected default target tasks"
    );
    Ok(labels)
}

/// Try mode that reads the requested tasks from `try_task_config`
pub const TRY_TASK_CONFIG: &str = "try_task_config";

/// Try mode driven by try option syntax in the commit message
pub const TRY_OPTION_SYNTAX: &str = "try_option_syntax";

/// Select tasks for a try push according to its `try_mode`.
///
/// Pushes without a recognized try mode select nothing; tasks can be added
/// to them afterwards by hand.
#[derive(Clone)]
pub struct TryTasks {
    task_config: Arc<dyn TargetTaskSelector>,
    option_syntax: Arc<dyn TargetTaskSelector>,
}

impl TryTasks {
    /// Create the selector with explicit delegates
    pub fn new(
        task_config: Arc<dyn TargetTaskSelector>,
        option_syntax: Arc<dyn TargetTaskSelector>,
    ) -> Self {
        Self {
            task_config,
            option_syntax,
        }
    }

    /// Replace the try option syntax delegate
    pub fn with_option_syntax(mut self, option_syntax: Arc<dyn TargetTaskSelector>) -> Self {
        self.option_syntax = option_syntax;
        self
    }
}

impl Default for TryTasks {
    fn default() -> Self {
        Self::new(Arc::new(TryTaskConfig), Arc::new(NoOptionSyntax))
    }
}

impl TargetTaskSelector for TryTasks {
    fn select(
        &self,
        full_task_graph: &TaskGraph,
        params: &Parameters,
        config: &GraphConfig,
    ) -> Result<Vec<String>> {
        match params.try_mode() {
            Some(TRY_TASK_CONFIG) => self.task_config.select(full_task_graph, params, config),
            Some(TRY_OPTION_SYNTAX) => self.option_syntax.select(full_task_graph, params, config),
            mode => {
                debug!(try_mode = mode.unwrap_or("none"), "no try mode, selecting nothing");
                Ok(Vec::new())
            }
        }
    }
}
