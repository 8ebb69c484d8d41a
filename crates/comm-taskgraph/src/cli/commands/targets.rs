//! Target tasks command

use std::path::PathBuf;

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::info;

use comm_taskgraph_core::types::{Parameters, TaskGraph};
use comm_taskgraph_targets::TargetTaskRegistry;

use crate::cli::output;
use crate::cli::{Cli, OutputFormat};

/// Run a target task method over a task graph
#[derive(Debug, Args)]
pub struct TargetsCommand {
    /// Target task method name
    #[arg(short, long, default_value = comm_taskgraph_targets::COMM_CENTRAL_TASKS)]
    pub method: String,

    /// Full task graph (JSON mapping of label to task)
    #[arg(short, long, value_name = "FILE")]
    pub graph: PathBuf,

    /// Decision parameters (JSON or YAML)
    #[arg(short, long, value_name = "FILE")]
    pub parameters: PathBuf,

    /// List the available methods and exit
    #[arg(long)]
    pub list: bool,
}

#[derive(Debug, Serialize)]
struct TargetsOutput<'a> {
    method: &'a str,
    count: usize,
    labels: &'a [String],
}

impl TargetsCommand {
    /// Execute the targets command
    #[tracing::instrument(skip_all, fields(method = %self.method))]
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(graph = %self.graph.display(), "executing targets command");
        let registry = TargetTaskRegistry::new();

        if self.list {
            return output::names(cli, "Target task methods", &registry.names());
        }

        let config = cli.graph_config()?;
        let graph = TaskGraph::load(&self.graph)?;
        let params = Parameters::load(&self.parameters)?;

        let labels = registry.select(&self.method, &graph, &params, &config)?;

        if cli.format == OutputFormat::Json {
            let out = TargetsOutput {
                method: &self.method,
                count: labels.len(),
                labels: &labels,
            };
            return output::json(&out);
        }

        if cli.quiet {
            return Ok(());
        }

        println!(
            "{} {}",
            output::header("Target tasks for"),
            style(&self.method).cyan()
        );
        println!();
        for label in &labels {
            println!("  {}", label);
        }
        println!();
        output::info(&format!(
            "{} of {} tasks selected",
            labels.len(),
            graph.len()
        ));

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_unknown_method_fails() {
        let temp = tempfile::TempDir::new().unwrap();
        let config = temp.path().join("comm-taskgraph.yaml");
        let graph = temp.path().join("graph.json");
        let params = temp.path().join("parameters.yml");
        std::fs::write(&config, "project_repo_param_prefix: comm_\n").unwrap();
        std::fs::write(&graph, r#"{"decision": {"kind": "decision"}}"#).unwrap();
        std::fs::write(&params, "project: comm-central\n").unwrap();

        let cli = Cli::try_parse_from([
            "comm-taskgraph",
            "--quiet",
            "--config",
            config.to_str().unwrap(),
            "targets",
            "--method",
            "nightly_desktop",
            "--graph",
            graph.to_str().unwrap(),
            "--parameters",
            params.to_str().unwrap(),
        ])
        .unwrap();

        let crate::cli::Commands::Targets(cmd) = &cli.command else {
            panic!("expected targets command");
        };
        let err = cmd.execute(&cli).unwrap_err();
        assert!(err.to_string().contains("nightly_desktop"));
    }
}
