//! Changed files command

use clap::Args;
use serde::Serialize;
use tracing::info;

use super::ChangedFilesArgs;
use crate::cli::output;
use crate::cli::{Cli, OutputFormat};

/// List the files changed by a revision
#[derive(Debug, Args)]
pub struct ChangedCommand {
    /// Repository URL or local checkout path
    #[arg(short, long)]
    pub repository: String,

    /// Revision to inspect
    #[arg(long, default_value = "HEAD")]
    pub revision: String,

    /// Leave out files under suite directories
    #[arg(long)]
    pub non_suite: bool,

    #[command(flatten)]
    pub files: ChangedFilesArgs,
}

#[derive(Debug, Serialize)]
struct ChangedOutput<'a> {
    repository: &'a str,
    revision: &'a str,
    non_suite: bool,
    files: Vec<&'a str>,
}

impl ChangedCommand {
    /// Execute the changed command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(repository = %self.repository, revision = %self.revision, "executing changed command");
        let config = cli.graph_config()?;
        let resolver = self.files.resolver(&config)?;

        let files = if self.non_suite {
            resolver.non_suite_changed_files(&self.repository, &self.revision)?
        } else {
            resolver.changed_files(&self.repository, &self.revision)?
        };

        if cli.format == OutputFormat::Json {
            return output::json(&ChangedOutput {
                repository: &self.repository,
                revision: &self.revision,
                non_suite: self.non_suite,
                files: files.iter().map(String::as_str).collect(),
            });
        }

        if cli.quiet {
            return Ok(());
        }

        for file in files.iter() {
            println!("{}", file);
        }
        if files.is_empty() {
            output::info("No changed files");
        }

        Ok(())
    }
}
