//! comm-taskgraph - optimization and target task decisions for comm graphs

mod cli;

use std::path::{Path, PathBuf};

use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use cli::Cli;

const LOG_FILE_PREFIX: &str = "comm-taskgraph.log";

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_tracing(cli.quiet);
    cli.execute()
}

/// Console logs follow `RUST_LOG`, falling back to `warn` (`error` with
/// `--quiet`). Every decision is also written as JSON to a daily log file
/// when a home directory is available.
fn init_tracing(quiet: bool) -> Option<WorkerGuard> {
    let console_level = if quiet { "error" } else { "warn" };
    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(console_level)),
        );

    let (decision_log, guard) = match dirs::home_dir().and_then(|home| log_directory(&home)) {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .json()
                .with_writer(writer)
                .with_filter(EnvFilter::new("debug"));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(console)
        .with(decision_log)
        .init();

    guard
}

/// `<home>/.comm-taskgraph/logs`, created on first use
fn log_directory(home: &Path) -> Option<PathBuf> {
    let dir = home.join(".comm-taskgraph").join("logs");
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir)
}
