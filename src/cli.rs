//! CLI interface for Minimat
//!
//! Parses the command line, installs logging, builds the session and hands
//! stdin/stdout to the interactive shell.

use crate::config::MinimatConfig;
use crate::session::{Reply, Session, HELP};
use crate::shell;
use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "minimat")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Minimalistic calculator for named three-component vectors")]
#[command(
    long_about = "Minimat - an interactive calculator for three-component vectors\n\n\
    Vectors are assigned to short names and combined with +, -, x (cross),\n\
    . (dot) and * (scalar). The whole set can be saved to and loaded from CSV.\n\n\
    Examples:\n\
      minimat\n\
      minimat -h\n\
      minimat --load vectors.csv --verbose"
)]
#[command(disable_help_flag = true)]
pub struct Cli {
    /// Print the command reference, then start the calculator
    #[arg(short = 'h', long = "help")]
    pub help: bool,

    /// JSON configuration file (prompt, capacities, length limits)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// CSV file to load before the first prompt
    #[arg(short, long, value_name = "FILE")]
    pub load: Option<String>,

    /// Enable debug logging on stderr (RUST_LOG overrides)
    #[arg(short, long)]
    pub verbose: bool,
}

fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}

/// Install the stderr log subscriber.
fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    // A subscriber may already be installed when embedded; keep that one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => MinimatConfig::from_json_file(path)
            .with_context(|| format!("failed to read configuration {}", path.display()))?,
        None => MinimatConfig::default(),
    };
    info!(?config, "starting session");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.help {
        out.write_all(HELP.as_bytes())?;
    }

    let mut session = Session::new(config);

    if let Some(path) = &cli.load {
        match session.load(path) {
            Ok(report) => write!(out, "{}", Reply::Loaded(report))?,
            Err(e) => writeln!(out, "{e}")?,
        }
    }

    let stdin = io::stdin();
    shell::run(&mut session, stdin.lock(), &mut out).context("terminal I/O failed")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_short_help_is_a_flag() {
        let cli = Cli::try_parse_from(["minimat", "-h", "-l", "data"]).unwrap();
        assert!(cli.help);
        assert_eq!(cli.load.as_deref(), Some("data"));
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_default_log_filter() {
        assert_eq!(default_filter(false), "warn");
        assert_eq!(default_filter(true), "debug");
    }
}
