//! Console [`Reporter`]: colored `[LEVEL] message` lines, mirrored to the event log.

use std::cell::Cell;
use std::path::PathBuf;

use colored::Colorize;
use gitsweep_sync::{EventLog, Level, Reporter};

pub struct Console {
    log: Option<EventLog>,
    quiet: bool,
    log_warned: Cell<bool>,
}

impl Console {
    pub fn new(log_path: Option<PathBuf>) -> Self {
        Self {
            log: log_path.map(EventLog::new),
            quiet: false,
            log_warned: Cell::new(false),
        }
    }

    /// Keep logging to file but print nothing (machine-readable output mode).
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn fatal(&self, err: &anyhow::Error) {
        self.report(Level::Error, &format!("error: {err:#}"));
    }
}

fn tag(level: Level) -> String {
    let label = format!("[{}]", level.label());
    match level {
        Level::Info => label.cyan().to_string(),
        Level::Success => label.green().to_string(),
        Level::Warn => label.yellow().to_string(),
        Level::Error => label.red().to_string(),
    }
}

impl Reporter for Console {
    fn report(&self, level: Level, message: &str) {
        if !self.quiet {
            println!("{} {message}", tag(level));
        }
        if let Some(log) = &self.log {
            if let Err(err) = log.append(level, message) {
                // One warning per process is enough.
                if !self.log_warned.replace(true) {
                    tracing::warn!("event log unavailable: {err}");
                }
            }
        }
    }

    fn rule(&self) {
        if !self.quiet {
            println!("{}", "=".repeat(60).bright_black());
        }
    }
}
