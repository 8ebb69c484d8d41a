//! Optimize command

use std::path::PathBuf;

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::info;

use comm_taskgraph_core::types::{Parameters, TaskGraph};
use comm_taskgraph_optimize::{Decision, OptimizationSchema, Optimizer, StrategyRegistry};

use super::ChangedFilesArgs;
use crate::cli::output;
use crate::cli::{Cli, OutputFormat};

/// Decide which tasks of a graph are optimized away
#[derive(Debug, Args)]
pub struct OptimizeCommand {
    /// Task graph (JSON mapping of label to task)
    #[arg(short, long, value_name = "FILE")]
    pub graph: PathBuf,

    /// Decision parameters (JSON or YAML)
    #[arg(short, long, value_name = "FILE")]
    pub parameters: PathBuf,

    /// Only show removed tasks
    #[arg(long)]
    pub removed_only: bool,

    #[command(flatten)]
    pub files: ChangedFilesArgs,
}

#[derive(Debug, Serialize)]
struct OptimizeOutput<'a> {
    removed: usize,
    kept: usize,
    decisions: Vec<&'a Decision>,
}

impl OptimizeCommand {
    /// Execute the optimize command
    #[tracing::instrument(skip_all)]
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(graph = %self.graph.display(), "executing optimize command");
        let config = cli.graph_config()?;
        let graph = TaskGraph::load(&self.graph)?;
        let params = Parameters::load(&self.parameters)?;

        let resolver = self.files.resolver(&config)?;
        let registry = StrategyRegistry::new(resolver, &config.optimize)?;
        let schema = OptimizationSchema::comm();
        let decisions = Optimizer::new(&registry, &schema).optimize(&graph, &params)?;

        let removed = decisions.iter().filter(|d| d.remove).count();
        let kept = decisions.len() - removed;
        let shown: Vec<&Decision> = decisions
            .iter()
            .filter(|d| d.remove || !self.removed_only)
            .collect();

        if cli.format == OutputFormat::Json {
            return output::json(&OptimizeOutput {
                removed,
                kept,
                decisions: shown,
            });
        }

        if cli.quiet {
            return Ok(());
        }

        println!("{}", output::header("Optimization decisions"));
        println!();
        for decision in &shown {
            let strategy = decision.strategy.as_deref().unwrap_or("-");
            println!(
                "{}  {}",
                output::decision(&decision.label, decision.remove),
                style(strategy).dim()
            );
        }
        println!();
        output::info(&format!("{} removed, {} kept", removed, kept));

        Ok(())
    }
}
