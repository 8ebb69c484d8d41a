//! Task filters shared by the target task selectors

use std::collections::HashMap;
use std::sync::{LazyLock, Mutex};

use regex::Regex;
use tracing::warn;

use comm_taskgraph_core::config::GraphConfig;
use comm_taskgraph_core::types::{Parameters, Task};

/// Shipping phases that belong to a regular (non-release) run
const BUILD_SHIPPING_PHASES: [&str; 1] = ["build"];

/// Compiled `run_on_hg_branches` entries; `None` marks an invalid entry
static BRANCH_PATTERNS: LazyLock<Mutex<HashMap<String, Option<Regex>>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// Regex for a `run_on_hg_branches` entry, anchored at the start of the branch
fn branch_pattern(entry: &str) -> Option<Regex> {
    let mut cache = match BRANCH_PATTERNS.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    if let Some(compiled) = cache.get(entry) {
        return compiled.clone();
    }

    let compiled = match Regex::new(&format!("^(?:{})", entry)) {
        Ok(re) => Some(re),
        Err(e) => {
            warn!(pattern = entry, error = %e, "invalid run_on_hg_branches entry");
            None
        }
    };
    cache.insert(entry.to_string(), compiled.clone());
    compiled
}

/// Keep tasks that should run on this project and branch and are not cron-only
pub fn standard_filter(task: &Task, params: &Parameters, config: &GraphConfig) -> bool {
    filter_out_cron(task, params, config)
        && filter_for_project(task, params, config)
        && filter_for_hg_branch(task, params, config)
}

/// Drop tasks that only run from scheduled (cron) graphs
pub fn filter_out_cron(task: &Task, _params: &Parameters, _config: &GraphConfig) -> bool {
    !task.attribute_flag("cron")
}

/// Keep tasks whose `run_on_projects` includes the current project
pub fn filter_for_project(task: &Task, params: &Parameters, config: &GraphConfig) -> bool {
    let run_on_projects = task.attribute_list("run_on_projects").unwrap_or_default();
    let project = params.project().unwrap_or_default();
    config.projects.matches(project, run_on_projects.as_slice())
}

/// Keep tasks whose `run_on_hg_branches` matches the current branch
pub fn filter_for_hg_branch(task: &Task, params: &Parameters, _config: &GraphConfig) -> bool {
    let branches = task
        .attribute_list("run_on_hg_branches")
        .unwrap_or_else(|| vec!["all"]);
    if branches.contains(&"all") {
        return true;
    }

    let hg_branch = params.hg_branch();
    branches
        .iter()
        .any(|entry| branch_pattern(entry).is_some_and(|re| re.is_match(hg_branch)))
}

/// Drop tasks that belong to a later release-shipping phase
pub fn filter_out_shipping_phase(task: &Task, _params: &Parameters, _config: &GraphConfig) -> bool {
    match task.attribute_str("shipping_phase") {
        None => true,
        Some(phase) => BUILD_SHIPPING_PHASES.contains(&phase),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(project: &str) -> Parameters {
        Parameters::new().with("project", project)
    }

    #[test]
    fn test_filter_for_project() {
        let config = GraphConfig::default();
        let task = Task::new("a").with_attribute("run_on_projects", json!(["mozilla-central"]));
        assert!(filter_for_project(&task, &params("mozilla-central"), &config));
        assert!(!filter_for_project(&task, &params("try"), &config));

        let untagged = Task::new("b");
        assert!(!filter_for_project(&untagged, &params("comm-central"), &config));

        let everywhere = Task::new("c").with_attribute("run_on_projects", json!(["all"]));
        assert!(filter_for_project(&everywhere, &Parameters::new(), &config));
    }

    #[test]
    fn test_filter_out_cron() {
        let config = GraphConfig::default();
        let cron = Task::new("a").with_attribute("cron", json!(true));
        assert!(!filter_out_cron(&cron, &Parameters::new(), &config));
        assert!(filter_out_cron(&Task::new("b"), &Parameters::new(), &config));
    }

    #[test]
    fn test_filter_for_hg_branch() {
        let config = GraphConfig::default();
        let release = Task::new("a").with_attribute("run_on_hg_branches", json!(["release", "^GECKO"]));

        let on_release = Parameters::new().with("hg_branch", "release");
        let on_relbranch = Parameters::new().with("hg_branch", "GECKO_128_0_RELBRANCH");
        assert!(filter_for_hg_branch(&release, &on_release, &config));
        assert!(filter_for_hg_branch(&release, &on_relbranch, &config));
        assert!(!filter_for_hg_branch(&release, &Parameters::new(), &config));

        assert!(filter_for_hg_branch(&Task::new("b"), &Parameters::new(), &config));
    }

    #[test]
    fn test_branch_patterns_are_cached() {
        let first = branch_pattern("comm-esr[0-9]+").unwrap();
        let second = branch_pattern("comm-esr[0-9]+").unwrap();
        assert_eq!(first.as_str(), "^(?:comm-esr[0-9]+)");
        assert_eq!(first.as_str(), second.as_str());
        assert!(BRANCH_PATTERNS
            .lock()
            .unwrap()
            .contains_key("comm-esr[0-9]+"));
    }

    #[test]
    fn test_invalid_branch_entry_never_matches() {
        let config = GraphConfig::default();
        let task = Task::new("a").with_attribute("run_on_hg_branches", json!(["(unclosed", "default"]));
        let on_default = Parameters::new();
        let on_other = Parameters::new().with("hg_branch", "(unclosed");

        assert!(filter_for_hg_branch(&task, &on_default, &config));
        assert!(!filter_for_hg_branch(&task, &on_other, &config));
        assert!(branch_pattern("(unclosed").is_none());
        assert!(branch_pattern("(unclosed").is_none());
    }

    #[test]
    fn test_filter_out_shipping_phase() {
        let config = GraphConfig::default();
        let p = Parameters::new();
        assert!(filter_out_shipping_phase(&Task::new("a"), &p, &config));
        let build = Task::new("b").with_attribute("shipping_phase", json!("build"));
        assert!(filter_out_shipping_phase(&build, &p, &config));
        let promote = Task::new("c").with_attribute("shipping_phase", json!("promote"));
        assert!(!filter_out_shipping_phase(&promote, &p, &config));
    }

    #[test]
    fn test_standard_filter_combines() {
        let config = GraphConfig::default();
        let p = params("comm-central");
        let task = Task::new("a").with_attribute("run_on_projects", json!(["trunk"]));
        assert!(standard_filter(&task, &p, &config));

        let cron = task.clone().with_attribute("cron", json!(true));
        assert!(!standard_filter(&cron, &p, &config));

        let branch = task.with_attribute("run_on_hg_branches", json!(["release"]));
        assert!(!standard_filter(&branch, &p, &config));
    }
}
