//! Skip tasks on pushes that only touch the suite product

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use comm_taskgraph_core::config::OptimizeSettings;
use comm_taskgraph_core::types::{Parameters, Task};
use comm_taskgraph_files::ChangeSetResolver;

use crate::traits::{OptimizationStrategy, Result};

/// Removes a task when every file changed in the comm repository belongs to the suite.
///
/// Never applies to scheduled graphs or to the full-validation project.
pub struct SkipSuiteOnly {
    resolver: Arc<ChangeSetResolver>,
    settings: OptimizeSettings,
}

impl SkipSuiteOnly {
    /// Create the strategy
    pub fn new(resolver: Arc<ChangeSetResolver>, settings: &OptimizeSettings) -> Self {
        Self {
            resolver,
            settings: settings.clone(),
        }
    }
}

impl OptimizationStrategy for SkipSuiteOnly {
    fn should_remove_task(&self, task: &Task, params: &Parameters, _args: &Value) -> Result<bool> {
        if params.pushlog_id() == Some(self.settings.cron_pushlog_id) {
            return Ok(false);
        }

        if params.project() == Some(self.settings.full_validation_project.as_str()) {
            return Ok(false);
        }

        let keys = self.resolver.project_repository();
        let Some((repository, revision)) = params.repository_revision(&keys.repository, &keys.revision)
        else {
            warn!(task = %task.label, "missing comm repository or revision; keeping task");
            return Ok(false);
        };

        let non_suite = self.resolver.non_suite_changed_files(repository, revision)?;
        if non_suite.is_empty() {
            debug!(task = %task.label, "suite-only push");
            return Ok(true);
        }
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use comm_taskgraph_core::config::GraphConfig;
    use comm_taskgraph_core::error::OptimizeError;
    use comm_taskgraph_files::StaticChangedFiles;

    fn strategy() -> SkipSuiteOnly {
        let source = StaticChangedFiles::new()
            .with_change("comm", "suite-only", ["suite/foo.txt"])
            .with_change("comm", "editor-and-suite", ["suite/foo.txt", "editor/ui/x.js"])
            .with_change("comm", "mail", ["mail/base.cpp"])
            .with_change("comm", "empty", Vec::<String>::new());
        let resolver = Arc::new(ChangeSetResolver::new(Arc::new(source)));
        SkipSuiteOnly::new(resolver, &OptimizeSettings::default())
    }

    fn push(project: &str, rev: &str) -> Parameters {
        Parameters::new()
            .with("project", project)
            .with("pushlog_id", 77)
            .with("comm_head_repository", "comm")
            .with("comm_head_rev", rev)
    }

    fn removes(params: &Parameters) -> bool {
        strategy()
            .should_remove_task(&Task::new("build-linux64/opt"), params, &Value::Null)
            .unwrap()
    }

    #[test]
    fn test_suite_only_push_removes() {
        assert!(removes(&push("comm-central", "suite-only")));
        assert!(removes(&push("comm-central", "editor-and-suite")));
    }

    #[test]
    fn test_product_change_keeps() {
        assert!(!removes(&push("comm-central", "mail")));
    }

    #[test]
    fn test_empty_push_removes() {
        assert!(removes(&push("comm-central", "empty")));
    }

    #[test]
    fn test_full_validation_project_keeps() {
        assert!(!removes(&push("try-comm-central", "suite-only")));
    }

    #[test]
    fn test_cron_keeps() {
        let params = push("comm-central", "suite-only").with("pushlog_id", -1);
        assert!(!removes(&params));
    }

    #[test]
    fn test_missing_comm_revision_keeps() {
        let params = Parameters::new().with("project", "comm-central");
        assert!(!removes(&params));
    }

    #[test]
    fn test_reads_configured_project_keys() {
        let source = StaticChangedFiles::new().with_change("comm", "suite-only", ["suite/foo.txt"]);
        let mut config = GraphConfig::default();
        config.project_repo_param_prefix = "cc_".to_string();
        let resolver = Arc::new(ChangeSetResolver::with_config(Arc::new(source), &config));
        let strategy = SkipSuiteOnly::new(resolver, &config.optimize);

        let params = Parameters::new()
            .with("project", "comm-central")
            .with("pushlog_id", 77)
            .with("cc_head_repository", "comm")
            .with("cc_head_rev", "suite-only");
        assert!(strategy
            .should_remove_task(&Task::new("t"), &params, &Value::Null)
            .unwrap());
    }

    #[test]
    fn test_fetch_failure_propagates() {
        let err = strategy()
            .should_remove_task(&Task::new("t"), &push("comm-central", "unknown"), &Value::Null)
            .unwrap_err();
        assert!(matches!(err, OptimizeError::Files(_)));
    }
}
