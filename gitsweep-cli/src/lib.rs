//! Shared plumbing for the `gitsweep` and `gitsweep-commit` binaries.

pub mod console;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use gitsweep_core::{config, Config};

pub use console::Console;

/// Install the stderr diagnostics subscriber (`RUST_LOG`, default `warn`).
pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Load the registry from `explicit`, or from `~/.gitsweep/config.yaml`.
pub fn load_config(explicit: Option<&Path>) -> Result<(Config, PathBuf)> {
    let home = config::home().context("could not determine home directory")?;
    let cfg = match explicit {
        Some(path) => config::load_from(path),
        None => config::load_at(&home),
    }
    .context("failed to load gitsweep config")?;
    Ok((cfg, home))
}

/// Report an error that ends the process, to the console and the default event log.
pub fn report_fatal(err: &anyhow::Error, log_path: Option<PathBuf>) {
    let log_path = log_path.or_else(|| {
        config::home()
            .ok()
            .map(|home| config::default_log_path_at(&home))
    });
    Console::new(log_path).fatal(err);
}
