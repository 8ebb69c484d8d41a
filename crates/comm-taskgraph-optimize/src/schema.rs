//! Optimization table used to validate task definitions

use serde::Serialize;
use serde_json::Value;

use comm_taskgraph_core::error::OptimizeError;

use crate::traits::Result;

/// Shape of the arguments an optimization accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArgSchema {
    /// No arguments (`null`)
    None,
    /// A list of strings, e.g. file patterns
    StringList,
}

impl ArgSchema {
    fn accepts(&self, args: &Value) -> bool {
        match self {
            Self::None => args.is_null(),
            Self::StringList => args
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
        }
    }
}

/// One optimization name with its argument schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptimizationEntry {
    /// Strategy name
    pub name: String,
    /// Accepted arguments
    pub args: ArgSchema,
}

fn entries(table: &[(&str, ArgSchema)]) -> Vec<OptimizationEntry> {
    table
        .iter()
        .map(|(name, args)| OptimizationEntry {
            name: name.to_string(),
            args: *args,
        })
        .collect()
}

/// Optimizations every graph accepts
pub fn default_optimizations() -> Vec<OptimizationEntry> {
    entries(&[
        (crate::ALWAYS, ArgSchema::None),
        (crate::NEVER, ArgSchema::None),
        (crate::SKIP_UNLESS_CHANGED, ArgSchema::StringList),
        (crate::SKIP_UNLESS_BACKSTOP, ArgSchema::None),
    ])
}

/// Optimizations added for comm graphs
pub fn comm_optimizations() -> Vec<OptimizationEntry> {
    entries(&[
        (crate::SKIP_SUITE_ONLY, ArgSchema::None),
        (crate::SKIP_UNLESS_BACKSTOP_NO_SUITE, ArgSchema::None),
        (crate::SKIP_UNLESS_CHANGED_NO_SUITE, ArgSchema::StringList),
    ])
}

/// The optimizations a task definition may use
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OptimizationSchema {
    entries: Vec<OptimizationEntry>,
}

impl OptimizationSchema {
    /// Build a schema from explicit entries
    pub fn new(entries: Vec<OptimizationEntry>) -> Self {
        Self { entries }
    }

    /// Default optimizations followed by the comm additions
    pub fn comm() -> Self {
        let mut entries = default_optimizations();
        entries.extend(comm_optimizations());
        Self::new(entries)
    }

    /// All entries, in table order
    pub fn entries(&self) -> &[OptimizationEntry] {
        &self.entries
    }

    /// Look up an entry by name
    pub fn get(&self, name: &str) -> Option<&OptimizationEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Check a task's `optimization` value, returning the strategy name and its arguments
    pub fn validate<'a>(&self, label: &str, optimization: &'a Value) -> Result<(&'a str, &'a Value)> {
        let invalid = |message: String| OptimizeError::InvalidOptimization {
            label: label.to_string(),
            message,
        };

        let map = optimization
            .as_object()
            .ok_or_else(|| invalid("expected a mapping of strategy name to arguments".to_string()))?;

        let mut items = map.iter();
        let (name, args) = match (items.next(), items.next()) {
            (Some(item), None) => item,
            _ => {
                return Err(invalid(format!(
                    "expected exactly one strategy, found {}",
                    map.len()
                )))
            }
        };

        let entry = self
            .get(name)
            .ok_or_else(|| invalid(format!("unknown optimization '{}'", name)))?;

        if !entry.args.accepts(args) {
            return Err(OptimizeError::InvalidArguments {
                strategy: name.clone(),
                message: format!("expected {:?}", entry.args),
            });
        }

        Ok((name.as_str(), args))
    }
}

impl Default for OptimizationSchema {
    fn default() -> Self {
        Self::comm()
    }
}
