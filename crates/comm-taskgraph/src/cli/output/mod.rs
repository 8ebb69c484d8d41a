//! Output formatting utilities

use console::style;
use serde::Serialize;

use crate::cli::{Cli, OutputFormat};

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", style("→").blue(), message);
}

/// Create a styled header
pub fn header(text: &str) -> String {
    style(text).bold().to_string()
}

/// Print a value as pretty JSON
pub fn json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a list of registered names
pub fn names(cli: &Cli, title: &str, names: &[&str]) -> anyhow::Result<()> {
    if cli.format == OutputFormat::Json {
        return json(names);
    }
    if !cli.quiet {
        println!("{}", header(title));
        for name in names {
            println!("  {}", style(name).cyan());
        }
    }
    Ok(())
}

/// Format a task label as removed or kept
pub fn decision(label: &str, remove: bool) -> String {
    if remove {
        format!("  {} {}", style("-").red().bold(), style(label).dim())
    } else {
        format!("  {} {}", style("+").green().bold(), label)
    }
}
