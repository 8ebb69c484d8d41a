//! CLI commands

mod changed;
mod completions;
mod optimize;
mod schema;
mod targets;

pub use changed::ChangedCommand;
pub use completions::CompletionsCommand;
pub use optimize::OptimizeCommand;
pub use schema::SchemaCommand;
pub use targets::TargetsCommand;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;

use comm_taskgraph_core::config::GraphConfig;
use comm_taskgraph_files::{
    ChangeSetResolver, ChangedFilesSource, GitChangedFiles, StaticChangedFiles,
};

/// Where changed-file information comes from
#[derive(Debug, Args)]
pub struct ChangedFilesArgs {
    /// Recorded changes (YAML or JSON list of repository/revision/files)
    #[arg(long, value_name = "FILE")]
    pub changed_files: Option<PathBuf>,

    /// Map a repository URL to a local git checkout
    #[arg(long, value_name = "URL=PATH", value_parser = parse_checkout)]
    pub checkout: Vec<(String, PathBuf)>,
}

impl ChangedFilesArgs {
    /// Build the changed-files source these arguments describe
    pub fn source(&self) -> anyhow::Result<Arc<dyn ChangedFilesSource>> {
        if let Some(path) = &self.changed_files {
            return Ok(Arc::new(StaticChangedFiles::load(path)?));
        }

        let source = self
            .checkout
            .iter()
            .fold(GitChangedFiles::new(), |source, (url, path)| {
                source.with_checkout(url.clone(), path.clone())
            });
        Ok(Arc::new(source))
    }

    /// Build a resolver shared by every strategy of one run
    pub fn resolver(&self, config: &GraphConfig) -> anyhow::Result<Arc<ChangeSetResolver>> {
        Ok(Arc::new(ChangeSetResolver::with_config(self.source()?, config)))
    }
}

fn parse_checkout(value: &str) -> Result<(String, PathBuf), String> {
    let (url, path) = value
        .rsplit_once('=')
        .ok_or_else(|| format!("expected URL=PATH, got '{}'", value))?;
    if url.is_empty() || path.is_empty() {
        return Err(format!("expected URL=PATH, got '{}'", value));
    }
    Ok((url.to_string(), PathBuf::from(path)))
}
