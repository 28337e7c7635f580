//! Operator-facing event reporting and the append-only event log.
//!
//! Log line format: `[<RFC 3339 UTC, millis>] [LEVEL] message`

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::{io_err, SyncError};

/// Severity of an operator event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Warn,
    Error,
}

impl Level {
    pub fn label(self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Success => "SUCCESS",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sink for progress events emitted by the committers and the orchestrator.
pub trait Reporter {
    fn report(&self, level: Level, message: &str);

    /// Visual separator between batch items. Console-only; defaults to nothing.
    fn rule(&self) {}
}

/// Append-only plain-text log shared across runs. No rotation.
#[derive(Debug, Clone)]
pub struct EventLog {
    path: PathBuf,
}

impl EventLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one event stamped with the current time.
    pub fn append(&self, level: Level, message: &str) -> Result<(), SyncError> {
        self.append_at(Utc::now(), level, message)
    }

    pub fn append_at(
        &self,
        at: DateTime<Utc>,
        level: Level,
        message: &str,
    ) -> Result<(), SyncError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
            }
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| io_err(&self.path, e))?;
        writeln!(file, "{}", format_line(at, level, message)).map_err(|e| io_err(&self.path, e))
    }
}

/// One log line, without the trailing newline. Embedded newlines are flattened.
pub fn format_line(at: DateTime<Utc>, level: Level, message: &str) -> String {
    let flat = message.replace(['\r', '\n'], " ");
    format!(
        "[{}] [{}] {}",
        at.to_rfc3339_opts(SecondsFormat::Millis, true),
        level,
        flat.trim()
    )
}
