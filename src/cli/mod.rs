//! Command-line interface for repo-ingest
//!
//! Parses arguments, installs logging, and drives a single ingestion run.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{load_config, merge_cli_with_config, CliOverrides};
use crate::domain::RunSummary;
use crate::ingest::Ingester;

/// Concatenate every text file in a repository into a single ingestion file
#[derive(Parser, Debug)]
#[command(name = "repo-ingest")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to ingest
    #[arg(value_name = "DIRECTORY", default_value = ".")]
    pub directory: PathBuf,

    /// Output file name [default: repository_ingestion.txt]
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Additional patterns to skip: names or '*.ext' (repeatable or comma-separated)
    #[arg(long, value_name = "PATTERN", value_delimiter = ',')]
    pub skip: Vec<String>,

    /// Path to a config file (.toml, .yml or .yaml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Follow symbolic links when walking
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);
    execute(cli).map(|_| ())
}

/// Wire the verbosity flags to the tracing log level.
fn init_logging(cli: &Cli) {
    let level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::WARN
    } else {
        Level::INFO
    };
    let filter = EnvFilter::default().add_directive(level.into());
    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false)
                .without_time(),
        )
        .with(filter)
        .try_init();
}

/// Resolve configuration, ingest, and report the summary on stderr.
pub fn execute(cli: Cli) -> Result<RunSummary> {
    tracing::debug!(
        "Arguments parsed: directory={}, output={:?}, skip={:?}",
        cli.directory.display(),
        cli.output,
        cli.skip
    );

    let file_config = load_config(cli.config.as_deref())?;
    let config = merge_cli_with_config(
        file_config,
        CliOverrides { output: cli.output, skip: cli.skip, follow_symlinks: cli.follow_symlinks },
    );

    let ingester = Ingester::new(&cli.directory, &config)?;
    tracing::info!("Starting ingestion of directory: {}", ingester.root().display());
    tracing::info!("Output file: {}", ingester.output().display());

    let summary = ingester
        .run()
        .with_context(|| format!("Error during ingestion of {}", ingester.root().display()))?;

    print_summary(&summary, &config.output);
    Ok(summary)
}

fn print_summary(summary: &RunSummary, output: &Path) {
    eprintln!();
    eprintln!("Ingestion complete!");
    eprintln!("Files processed: {}", summary.files_processed);
    eprintln!("Files skipped: {}", summary.files_skipped);
    if summary.files_skipped > 0 {
        eprintln!("  by pattern: {}", summary.skipped_pattern);
        eprintln!("  binary: {}", summary.skipped_binary);
        eprintln!("  unreadable: {}", summary.skipped_error);
    }
    eprintln!("Output written to: {}", output.display());
}
