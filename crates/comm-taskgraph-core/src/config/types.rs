//! Configuration types

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Graph-wide configuration handed to optimization strategies and target task selectors
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Prefix of the parameters that describe the project (comm) repository,
    /// e.g. `comm_` for `comm_head_repository` and `comm_head_rev`
    pub project_repo_param_prefix: String,

    /// Optimization settings
    pub optimize: OptimizeSettings,

    /// Project groupings used by `run_on_projects` aliases
    pub projects: ProjectSets,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            project_repo_param_prefix: "comm_".to_string(),
            optimize: OptimizeSettings::default(),
            projects: ProjectSets::default(),
        }
    }
}

/// Settings for the change-driven optimization strategies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizeSettings {
    /// `pushlog_id` value used by scheduled (cron) graphs that have no push
    pub cron_pushlog_id: i64,

    /// Project on which suite-only optimizations never apply
    pub full_validation_project: String,

    /// Top-level directories that belong to the suite product
    pub suite_dirs: Vec<String>,

    /// Prefix applied to comm repository paths when merged with gecko paths
    pub comm_prefix: String,
}

impl Default for OptimizeSettings {
    fn default() -> Self {
        Self {
            cron_pushlog_id: -1,
            full_validation_project: "try-comm-central".to_string(),
            suite_dirs: vec!["editor".to_string(), "suite".to_string()],
            comm_prefix: "comm/".to_string(),
        }
    }
}

/// Named groups of projects that `run_on_projects` can refer to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSets {
    /// Projects matched by the `release` alias
    pub release: BTreeSet<String>,

    /// Projects matched by the `trunk` alias
    pub trunk: BTreeSet<String>,

    /// Projects matched by the `integration` alias
    pub integration: BTreeSet<String>,
}

impl Default for ProjectSets {
    fn default() -> Self {
        let set = |names: &[&str]| names.iter().map(|n| n.to_string()).collect();
        Self {
            release: set(&[
                "mozilla-central",
                "mozilla-beta",
                "mozilla-release",
                "comm-central",
                "comm-beta",
                "comm-release",
                "comm-esr115",
                "comm-esr128",
            ]),
            trunk: set(&["autoland", "mozilla-central", "comm-central"]),
            integration: set(&["autoland"]),
        }
    }
}

impl ProjectSets {
    /// Whether `project` is selected by a task's `run_on_projects` list
    pub fn matches<S: AsRef<str>>(&self, project: &str, run_on_projects: &[S]) -> bool {
        run_on_projects.iter().any(|entry| match entry.as_ref() {
            "all" => true,
            "release" => self.release.contains(project),
            "trunk" => self.trunk.contains(project),
            "integration" => self.integration.contains(project),
            name => name == project,
        })
    }
}
