mod commands;
mod render;
mod tui;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "scenarioflow")]
#[command(about = "Run documented scenarios against a live control plane", long_about = None)]
struct Cli {
    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario and verify every code block
    Test(commands::test::TestArgs),
    /// Load a scenario file and print its steps
    Validate {
        /// Scenario file (.yaml, .yml or .json)
        file: PathBuf,
    },
    /// Compare an output against an expectation once
    Compare {
        /// Output produced by a command
        #[arg(long)]
        actual: String,
        /// Expected output
        #[arg(long, default_value = "")]
        expected: String,
        /// Minimum similarity (0.0 - 1.0)
        #[arg(long, default_value_t = scenarioflow_core::DEFAULT_EXPECTED_SIMILARITY)]
        similarity: f64,
        /// Pattern the output must match; overrides everything else
        #[arg(long)]
        regex: Option<String>,
        /// Language of the expected output ("json" compares structurally)
        #[arg(long, default_value = "")]
        language: String,
    },
    /// Show version information
    Version,
}

/// Logs go to stderr, except in TUI mode where the terminal is taken and
/// they go to `<config dir>/scenarioflow.log`.
fn init_logging(verbose: bool, tui: bool) -> anyhow::Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if tui {
        use std::fs::OpenOptions;
        let log_path = scenarioflow_config::get_config_dir()?.join("scenarioflow.log");
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(file)
            .with_env_filter(filter)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let tui = matches!(&cli.command, Commands::Test(args) if args.tui);
    init_logging(cli.verbose, tui)?;

    match cli.command {
        Commands::Test(args) => {
            commands::test::handle(args, cli.verbose).await?;
        }
        Commands::Validate { file } => {
            commands::validate::handle(&file)?;
        }
        Commands::Compare {
            actual,
            expected,
            similarity,
            regex,
            language,
        } => {
            commands::compare::handle(&actual, &expected, similarity, regex.as_deref(), &language)?;
        }
        Commands::Version => {
            println!("scenarioflow {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
