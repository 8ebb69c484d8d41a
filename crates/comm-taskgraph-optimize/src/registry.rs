//! Strategy registry

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use comm_taskgraph_core::config::OptimizeSettings;
use comm_taskgraph_core::error::OptimizeError;
use comm_taskgraph_core::types::{Parameters, Task};
use comm_taskgraph_files::ChangeSetResolver;

use crate::builtins::{Always, Never, SkipUnlessBackstop};
use crate::changed::SkipUnlessChanged;
use crate::suite::SkipSuiteOnly;
use crate::traits::{OptimizationStrategy, Result};

/// A registered strategy: a single predicate or an OR over other strategies
#[derive(Clone)]
pub enum Strategy {
    /// One strategy
    Single(Arc<dyn OptimizationStrategy>),
    /// Removes the task if any of the sub-strategies would
    Any(Vec<Strategy>),
}

impl Strategy {
    /// Evaluate the strategy; `Any` passes the same arguments to every sub-strategy
    pub fn should_remove_task(&self, task: &Task, params: &Parameters, args: &Value) -> Result<bool> {
        match self {
            Self::Single(strategy) => strategy.should_remove_task(task, params, args),
            Self::Any(strategies) => {
                for strategy in strategies {
                    if strategy.should_remove_task(task, params, args)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }
}

impl fmt::Debug for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(_) => write!(f, "Single"),
            Self::Any(subs) => f.debug_tuple("Any").field(subs).finish(),
        }
    }
}

/// Registry of optimization strategies by name
#[derive(Debug, Default)]
pub struct StrategyRegistry {
    strategies: BTreeMap<String, Strategy>,
}

impl StrategyRegistry {
    /// Create a registry with the built-in and comm strategies
    pub fn new(resolver: Arc<ChangeSetResolver>, settings: &OptimizeSettings) -> Result<Self> {
        let mut registry = Self::empty();
        register_default_strategies(&mut registry, Arc::clone(&resolver), settings)?;
        register_comm_strategies(&mut registry, resolver, settings)?;
        Ok(registry)
    }

    /// Create an empty registry
    pub fn empty() -> Self {
        Self::default()
    }

    /// Register a strategy under `name`
    pub fn register<S: OptimizationStrategy + 'static>(
        &mut self,
        name: impl Into<String>,
        strategy: S,
    ) -> Result<()> {
        self.insert(name.into(), Strategy::Single(Arc::new(strategy)))
    }

    /// Register `name` as the OR of already-registered strategies
    pub fn register_any(&mut self, name: impl Into<String>, sub_strategies: &[&str]) -> Result<()> {
        let subs = sub_strategies
            .iter()
            .map(|sub| {
                self.get(sub)
                    .cloned()
                    .ok_or_else(|| OptimizeError::UnknownStrategy(sub.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;
        self.insert(name.into(), Strategy::Any(subs))
    }

    fn insert(&mut self, name: String, strategy: Strategy) -> Result<()> {
        if self.strategies.contains_key(&name) {
            return Err(OptimizeError::DuplicateStrategy(name));
        }
        debug!(strategy = %name, "registering optimization strategy");
        self.strategies.insert(name, strategy);
        Ok(())
    }

    /// Get strategy by name
    pub fn get(&self, name: &str) -> Option<&Strategy> {
        let result = self.strategies.get(name);
        debug!(
            strategy = name,
            found = result.is_some(),
            "strategy registry lookup"
        );
        result
    }

    /// Get strategy names
    pub fn names(&self) -> Vec<&str> {
        self.strategies.keys().map(String::as_str).collect()
    }

    /// Evaluate the strategy registered under `name`
    pub fn should_remove_task(
        &self,
        name: &str,
        task: &Task,
        params: &Parameters,
        args: &Value,
    ) -> Result<bool> {
        self.get(name)
            .ok_or_else(|| OptimizeError::UnknownStrategy(name.to_string()))?
            .should_remove_task(task, params, args)
    }
}

/// Register the product-independent strategies
pub fn register_default_strategies(
    registry: &mut StrategyRegistry,
    resolver: Arc<ChangeSetResolver>,
    settings: &OptimizeSettings,
) -> Result<()> {
    registry.register(crate::ALWAYS, Always)?;
    registry.register(crate::NEVER, Never)?;
    registry.register(crate::SKIP_UNLESS_BACKSTOP, SkipUnlessBackstop)?;
    registry.register(
        crate::SKIP_UNLESS_CHANGED,
        SkipUnlessChanged::head_only(resolver, settings),
    )?;
    Ok(())
}

/// Register the comm strategies and their combinations
///
/// `skip-unless-backstop-no-suite` needs `skip-unless-backstop` to be
/// registered first.
pub fn register_comm_strategies(
    registry: &mut StrategyRegistry,
    resolver: Arc<ChangeSetResolver>,
    settings: &OptimizeSettings,
) -> Result<()> {
    registry.register(
        crate::COMM_SKIP_UNLESS_CHANGED,
        SkipUnlessChanged::new(Arc::clone(&resolver), settings),
    )?;
    registry.register(crate::SKIP_SUITE_ONLY, SkipSuiteOnly::new(resolver, settings))?;
    registry.register_any(
        crate::SKIP_UNLESS_BACKSTOP_NO_SUITE,
        &[crate::SKIP_UNLESS_BACKSTOP, crate::SKIP_SUITE_ONLY],
    )?;
    registry.register_any(
        crate::SKIP_UNLESS_CHANGED_NO_SUITE,
        &[crate::COMM_SKIP_UNLESS_CHANGED, crate::SKIP_SUITE_ONLY],
    )?;
    Ok(())
}
