//! CLI definition and command handling

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;

use comm_taskgraph_core::config::{load_config, load_config_or_default};
use comm_taskgraph_core::GraphConfig;

use commands::{
    ChangedCommand, CompletionsCommand, OptimizeCommand, SchemaCommand, TargetsCommand,
};

/// comm-taskgraph - decide which tasks of a comm graph run
#[derive(Debug, Parser)]
#[command(name = "comm-taskgraph")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Configuration file (searched for from the working directory by default)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run a target task method over a task graph
    Targets(TargetsCommand),

    /// Decide which tasks of a graph are optimized away
    Optimize(OptimizeCommand),

    /// List the files changed by a revision
    Changed(ChangedCommand),

    /// Print the optimization schema table
    Schema(SchemaCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> anyhow::Result<()> {
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)?;
        }

        match self.command {
            Commands::Targets(ref cmd) => cmd.execute(&self),
            Commands::Optimize(ref cmd) => cmd.execute(&self),
            Commands::Changed(ref cmd) => cmd.execute(&self),
            Commands::Schema(ref cmd) => cmd.execute(&self),
            Commands::Completions(ref cmd) => cmd.execute(&self),
        }
    }

    /// Load the graph configuration from `--config` or the working directory
    pub fn graph_config(&self) -> anyhow::Result<GraphConfig> {
        match &self.config {
            Some(path) => Ok(load_config(path)?),
            None => {
                let (config, path) = load_config_or_default(&std::env::current_dir()?)?;
                debug!(path = ?path, "graph config resolved");
                Ok(config)
            }
        }
    }
}
