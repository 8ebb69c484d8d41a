//! Task graph and parameter types shared by the optimization and target-task crates

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::Result;

/// A single task of the full task graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique label within the graph
    #[serde(default)]
    pub label: String,

    /// Kind the task was generated from
    #[serde(default)]
    pub kind: Option<String>,

    /// Free-form attributes (`run_on_projects`, `shipping_phase`, ...)
    #[serde(default)]
    pub attributes: Map<String, Value>,

    /// Optimization, as a single-key mapping of strategy name to arguments
    #[serde(default)]
    pub optimization: Option<Value>,

    /// Dependencies by edge name
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
}

impl Task {
    /// Create a new task with the given label
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// Set an attribute
    pub fn with_attribute(mut self, name: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    /// Set the optimization
    pub fn with_optimization(mut self, optimization: Value) -> Self {
        self.optimization = Some(optimization);
        self
    }

    /// Get an attribute
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Get a string attribute
    pub fn attribute_str(&self, name: &str) -> Option<&str> {
        self.attribute(name).and_then(Value::as_str)
    }

    /// Get a list-of-strings attribute, skipping non-string entries
    pub fn attribute_list(&self, name: &str) -> Option<Vec<&str>> {
        self.attribute(name)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
    }

    /// Get a boolean attribute, absent counts as false
    pub fn attribute_flag(&self, name: &str) -> bool {
        self.attribute(name).and_then(Value::as_bool).unwrap_or(false)
    }
}

/// The full set of candidate tasks for one run, keyed by label
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskGraph {
    tasks: BTreeMap<String, Task>,
}

impl TaskGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from tasks, keyed by their labels
    pub fn from_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        Self {
            tasks: tasks.into_iter().map(|t| (t.label.clone(), t)).collect(),
        }
    }

    /// Load a graph from a `full-task-graph.json` style file
    pub fn load(path: &Path) -> Result<Self> {
        info!(path = %path.display(), "loading task graph");
        let content = std::fs::read_to_string(path)?;
        let mut graph: TaskGraph = serde_json::from_str(&content)?;

        // Labels are the map keys; fill in tasks that omit the field.
        for (label, task) in graph.tasks.iter_mut() {
            if task.label.is_empty() {
                task.label = label.clone();
            }
        }

        debug!(tasks = graph.len(), "task graph loaded");
        Ok(graph)
    }

    /// Look up a task by label
    pub fn get(&self, label: &str) -> Option<&Task> {
        self.tasks.get(label)
    }

    /// Whether the graph has a task with this label
    pub fn contains(&self, label: &str) -> bool {
        self.tasks.contains_key(label)
    }

    /// Iterate tasks in graph order
    pub fn tasks(&self) -> impl Iterator<Item = (&str, &Task)> {
        self.tasks.iter().map(|(l, t)| (l.as_str(), t))
    }

    /// Iterate labels in graph order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.tasks.keys().map(String::as_str)
    }

    /// Number of tasks
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the graph is empty
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Run-time parameters for one graph generation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Parameters {
    values: Map<String, Value>,
}

impl Parameters {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Load parameters from a YAML or JSON file
    pub fn load(path: &Path) -> Result<Self> {
        info!(path = %path.display(), "loading parameters");
        let content = std::fs::read_to_string(path)?;
        let params = if path.extension().is_some_and(|e| e == "json") {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };
        Ok(params)
    }

    /// Set a parameter
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Get a raw parameter
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Get a string parameter, empty strings count as absent
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str).filter(|s| !s.is_empty())
    }

    /// Get a boolean parameter, absent counts as false
    pub fn get_flag(&self, name: &str) -> bool {
        self.get(name).and_then(Value::as_bool).unwrap_or(false)
    }

    /// The project (branch) this graph is generated for
    pub fn project(&self) -> Option<&str> {
        self.get_str("project")
    }

    /// The push log id, accepting both numeric and string encodings
    pub fn pushlog_id(&self) -> Option<i64> {
        match self.get("pushlog_id")? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Selected try mode, if any
    pub fn try_mode(&self) -> Option<&str> {
        self.get_str("try_mode")
    }

    /// Branch name used by `run_on_hg_branches`
    pub fn hg_branch(&self) -> &str {
        self.get_str("hg_branch").unwrap_or("default")
    }

    /// Whether this is a backstop push
    pub fn backstop(&self) -> bool {
        self.get_flag("backstop")
    }

    /// Repository and revision under the given key names, when both are set
    pub fn repository_revision(&self, repo_key: &str, rev_key: &str) -> Option<(&str, &str)> {
        Some((self.get_str(repo_key)?, self.get_str(rev_key)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_task_attributes() {
        let task = Task::new("build-linux64/opt")
            .with_attribute("run_on_projects", json!(["all", 3]))
            .with_attribute("shipping_phase", json!("build"))
            .with_attribute("cron", json!(true));

        assert_eq!(task.attribute_list("run_on_projects"), Some(vec!["all"]));
        assert_eq!(task.attribute_str("shipping_phase"), Some("build"));
        assert!(task.attribute_flag("cron"));
        assert!(!task.attribute_flag("nightly"));
        assert!(task.attribute_list("missing").is_none());
    }

    #[test]
    fn test_graph_iteration_order() {
        let graph = TaskGraph::from_tasks(vec![Task::new("b"), Task::new("a"), Task::new("c")]);
        let labels: Vec<_> = graph.labels().collect();
        assert_eq!(labels, vec!["a", "b", "c"]);
        assert!(graph.contains("b"));
        assert!(!graph.contains("d"));
    }

    #[test]
    fn test_load_graph_fills_labels() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("full-task-graph.json");
        std::fs::write(
            &path,
            r#"{
                "build-linux64/opt": {"attributes": {"run_on_projects": ["all"]}},
                "lint": {"label": "lint", "optimization": {"skip-unless-changed": ["**/*.js"]}}
            }"#,
        )
        .unwrap();

        let graph = TaskGraph::load(&path).unwrap();
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.get("build-linux64/opt").unwrap().label, "build-linux64/opt");
        assert_eq!(
            graph.get("lint").unwrap().optimization,
            Some(json!({"skip-unless-changed": ["**/*.js"]}))
        );
    }

    #[test]
    fn test_pushlog_id_encodings() {
        assert_eq!(Parameters::new().with("pushlog_id", -1).pushlog_id(), Some(-1));
        assert_eq!(Parameters::new().with("pushlog_id", "1234").pushlog_id(), Some(1234));
        assert_eq!(Parameters::new().with("pushlog_id", "abc").pushlog_id(), None);
        assert_eq!(Parameters::new().pushlog_id(), None);
    }

    #[test]
    fn test_missing_parameters_are_falsy() {
        let params = Parameters::new().with("project", "");
        assert!(params.project().is_none());
        assert!(params.try_mode().is_none());
        assert!(!params.backstop());
        assert_eq!(params.hg_branch(), "default");
        assert!(params.repository_revision("head_repository", "head_rev").is_none());
    }

    #[test]
    fn test_load_yaml_parameters() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("parameters.yml");
        std::fs::write(
            &path,
            "project: comm-central\npushlog_id: '42'\ncomm_head_repository: https://hg.example.org/comm-central\ncomm_head_rev: abc123\n",
        )
        .unwrap();

        let params = Parameters::load(&path).unwrap();
        assert_eq!(params.project(), Some("comm-central"));
        assert_eq!(params.pushlog_id(), Some(42));
        assert_eq!(
            params.repository_revision("comm_head_repository", "comm_head_rev"),
            Some(("https://hg.example.org/comm-central", "abc123"))
        );
    }
}
