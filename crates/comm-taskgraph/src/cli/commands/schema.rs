//! Optimization schema command

use clap::Args;
use console::style;
use tracing::info;

use comm_taskgraph_optimize::{ArgSchema, OptimizationSchema};

use crate::cli::output;
use crate::cli::{Cli, OutputFormat};

/// Print the optimization schema table
#[derive(Debug, Args)]
pub struct SchemaCommand {}

impl SchemaCommand {
    /// Execute the schema command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!("executing schema command");
        let schema = OptimizationSchema::comm();

        if cli.format == OutputFormat::Json {
            return output::json(&schema);
        }

        if cli.quiet {
            return Ok(());
        }

        println!("{}", output::header("Optimizations"));
        println!();
        for entry in schema.entries() {
            let args = match entry.args {
                ArgSchema::None => "none",
                ArgSchema::StringList => "list of file patterns",
            };
            println!("  {:<32} {}", style(&entry.name).cyan(), style(args).dim());
        }

        Ok(())
    }
}
