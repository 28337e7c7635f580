//! gitsweep — batch repository synchronization.
//!
//! # Usage
//!
//! ```text
//! gitsweep [--config <path>] [push-all] [--json]
//! gitsweep [--config <path>] list
//! gitsweep help
//! ```

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{list::ListArgs, push_all::PushAllArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "gitsweep",
    version,
    about = "Initialize, commit and push every registered project",
    long_about = None,
)]
struct Cli {
    /// Registry file (default: ~/.gitsweep/config.yaml).
    #[arg(long, global = true, env = "GITSWEEP_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Push every registered project to its remote (default).
    PushAll(PushAllArgs),

    /// Show the registry with resolved paths and remote URLs.
    List(ListArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    gitsweep_cli::init_tracing();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            gitsweep_cli::report_fatal(&err, None);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = cli.config.as_deref();
    match cli.command.unwrap_or(Commands::PushAll(PushAllArgs::default())) {
        Commands::PushAll(args) => args.run(config),
        Commands::List(args) => args.run(config),
    }
}
