//! Skip tasks whose files were not touched by the push

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use comm_taskgraph_core::config::OptimizeSettings;
use comm_taskgraph_core::types::{Parameters, Task};
use comm_taskgraph_files::{ChangeSetResolver, RepositoryKeys};

use crate::traits::{pattern_args, OptimizationStrategy, Result};

/// Removes a task unless a file changed by the push matches one of its patterns.
///
/// Scheduled graphs (the cron `pushlog_id`) have no push to compare against
/// and always keep the task.
pub struct SkipUnlessChanged {
    name: &'static str,
    resolver: Arc<ChangeSetResolver>,
    repositories: Vec<RepositoryKeys>,
    cron_pushlog_id: i64,
}

impl SkipUnlessChanged {
    /// Check both the gecko and the comm repository of the push
    pub fn new(resolver: Arc<ChangeSetResolver>, settings: &OptimizeSettings) -> Self {
        let repositories = vec![
            resolver.head_repository().clone(),
            resolver.project_repository().clone(),
        ];
        Self {
            name: crate::COMM_SKIP_UNLESS_CHANGED,
            resolver,
            repositories,
            cron_pushlog_id: settings.cron_pushlog_id,
        }
    }

    /// Check only the head (gecko) repository of the push
    pub fn head_only(resolver: Arc<ChangeSetResolver>, settings: &OptimizeSettings) -> Self {
        let repositories = vec![resolver.head_repository().clone()];
        Self {
            name: crate::SKIP_UNLESS_CHANGED,
            resolver,
            repositories,
            cron_pushlog_id: settings.cron_pushlog_id,
        }
    }
}

impl OptimizationStrategy for SkipUnlessChanged {
    fn should_remove_task(&self, task: &Task, params: &Parameters, args: &Value) -> Result<bool> {
        if params.pushlog_id() == Some(self.cron_pushlog_id) {
            return Ok(false);
        }

        let patterns = pattern_args(self.name, args)?;
        let changed = self
            .resolver
            .check_repositories(params, patterns.as_slice(), &self.repositories)?;

        if !changed {
            debug!(
                task = %task.label,
                strategy = self.name,
                "no files found matching a pattern"
            );
        }
        Ok(!changed)
    }
}
