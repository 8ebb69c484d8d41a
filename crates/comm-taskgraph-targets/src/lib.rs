//! comm-taskgraph targets - pick the tasks a trigger runs
//!
//! This crate provides the target task methods for comm graphs: the daily
//! Searchfox index, regular pushes, and try pushes, plus the task filters
//! and registry they are looked up from.

pub mod filters;
mod registry;
mod selectors;
mod traits;
mod try_config;

pub use filters::{
    filter_for_hg_branch, filter_for_project, filter_out_cron, filter_out_shipping_phase,
    standard_filter,
};
pub use registry::TargetTaskRegistry;
pub use selectors::{
    target_tasks_default, target_tasks_searchfox, TryTasks, SEARCHFOX_TASKS, TRY_OPTION_SYNTAX,
    TRY_TASK_CONFIG,
};
pub use traits::{Result, TargetTaskSelector};
pub use try_config::{NoOptionSyntax, TryTaskConfig};

/// Daily Searchfox indexing
pub const COMM_SEARCHFOX_INDEX: &str = "comm_searchfox_index";
/// Regular pushes to comm repositories
pub const COMM_CENTRAL_TASKS: &str = "comm_central_tasks";
/// Try pushes
pub const TRY_CC_TASKS: &str = "try_cc_tasks";
