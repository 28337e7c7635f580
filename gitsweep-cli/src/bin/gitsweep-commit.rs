//! gitsweep-commit — commit and push the current directory with a message
//! built from the original request and a summary of the work done.
//!
//! ```text
//! gitsweep-commit --message "add login" --summary "added auth module"
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use gitsweep_cli::Console;
use gitsweep_core::config;
use gitsweep_sync::{commit_and_push, CommitRequest, GitRunner};

#[derive(Parser, Debug)]
#[command(
    name = "gitsweep-commit",
    version,
    about = "Commit and push the current directory with a generated message",
    long_about = None,
)]
struct Cli {
    /// Original request that prompted the change.
    #[arg(long, short = 'm', default_value = "")]
    message: String,

    /// Summary of the work performed.
    #[arg(long, short = 's', default_value = "")]
    summary: String,

    /// Event log file (default: ~/.gitsweep/gitsweep.log).
    #[arg(long, env = "GITSWEEP_LOG", value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    gitsweep_cli::init_tracing();
    let cli = Cli::parse();
    let log_path = cli.log_file.clone().or_else(|| {
        config::home()
            .ok()
            .map(|home| config::default_log_path_at(&home))
    });

    match run(cli, log_path.clone()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            gitsweep_cli::report_fatal(&err, log_path);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, log_path: Option<PathBuf>) -> Result<()> {
    let cwd = std::env::current_dir().context("could not determine current directory")?;
    let console = Console::new(log_path);
    let request = CommitRequest {
        origin: cli.message,
        summary: cli.summary,
    };

    commit_and_push(&GitRunner::default(), &console, &cwd, &request)
        .with_context(|| format!("auto-commit failed in {}", cwd.display()))?;
    Ok(())
}
