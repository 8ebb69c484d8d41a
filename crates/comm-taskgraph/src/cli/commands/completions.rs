//! Shell completions command

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, CommandFactory};
use clap_complete::Shell;
use tracing::info;

use crate::cli::{output, Cli};

/// Generate shell completions
#[derive(Debug, Args)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,

    /// Write the script to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl CompletionsCommand {
    /// Execute the completions command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(shell = %self.shell, "generating completions");
        let script = self.script();

        let Some(path) = &self.output else {
            std::io::stdout().write_all(&script)?;
            return Ok(());
        };

        std::fs::write(path, &script)?;
        if !cli.quiet {
            output::success(&format!(
                "{} completions written to {}",
                self.shell,
                path.display()
            ));
        }
        Ok(())
    }

    fn script(&self) -> Vec<u8> {
        let mut command = Cli::command();
        let name = command.get_name().to_string();
        let mut script = Vec::new();
        clap_complete::generate(self.shell, &mut command, name, &mut script);
        script
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    use crate::cli::Commands;

    #[test]
    fn test_parse_shell() {
        let cli = Cli::try_parse_from(["comm-taskgraph", "completions", "zsh"]).unwrap();
        let Commands::Completions(cmd) = &cli.command else {
            panic!("expected completions command");
        };
        assert_eq!(cmd.shell, Shell::Zsh);
        assert!(Cli::try_parse_from(["comm-taskgraph", "completions", "tcsh"]).is_err());
    }

    #[test]
    fn test_completions_to_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("comm-taskgraph.bash");

        let cli = Cli::try_parse_from(["comm-taskgraph", "--quiet", "completions", "bash"]).unwrap();
        let cmd = CompletionsCommand {
            shell: Shell::Bash,
            output: Some(path.clone()),
        };
        cmd.execute(&cli).unwrap();

        let script = std::fs::read_to_string(&path).unwrap();
        assert!(script.contains("comm-taskgraph"));
        assert!(script.contains("optimize"));
    }
}
