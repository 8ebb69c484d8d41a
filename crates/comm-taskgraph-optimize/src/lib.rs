//! comm-taskgraph optimize - decide which tasks a push can skip
//!
//! This crate provides the optimization strategies used by comm graphs,
//! a name-based registry with OR combinators, the optimization schema
//! table, and an optimizer that applies them across a task graph.

mod builtins;
mod changed;
mod optimizer;
mod registry;
mod schema;
mod suite;
mod traits;

pub use builtins::{Always, Never, SkipUnlessBackstop};
pub use changed::SkipUnlessChanged;
pub use optimizer::{Decision, Optimizer};
pub use registry::{
    register_comm_strategies, register_default_strategies, Strategy, StrategyRegistry,
};
pub use schema::{
    comm_optimizations, default_optimizations, ArgSchema, OptimizationEntry, OptimizationSchema,
};
pub use suite::SkipSuiteOnly;
pub use traits::{pattern_args, OptimizationStrategy, Result};

/// Keep the task
pub const ALWAYS: &str = "always";
/// Drop the task
pub const NEVER: &str = "never";
/// Drop the task unless the push is a backstop push
pub const SKIP_UNLESS_BACKSTOP: &str = "skip-unless-backstop";
/// Drop the task unless matching files changed in the head repository
pub const SKIP_UNLESS_CHANGED: &str = "skip-unless-changed";
/// Drop the task unless matching files changed in the gecko or comm repository
pub const COMM_SKIP_UNLESS_CHANGED: &str = "comm-skip-unless-changed";
/// Drop the task on suite-only pushes
pub const SKIP_SUITE_ONLY: &str = "skip-suite-only";
/// `skip-unless-backstop` or `skip-suite-only`
pub const SKIP_UNLESS_BACKSTOP_NO_SUITE: &str = "skip-unless-backstop-no-suite";
/// `comm-skip-unless-changed` or `skip-suite-only`
pub const SKIP_UNLESS_CHANGED_NO_SUITE: &str = "skip-unless-changed-no-suite";
