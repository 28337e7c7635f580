//! Command runner — the single seam between gitsweep and the `git` binary.
//!
//! Every invocation returns a tagged [`CommandOutput`]. Only calls made with
//! [`RunOptions::check`] turn a non-zero exit into [`SyncError::CommandFailed`];
//! everything else leaves the decision to the caller.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::SyncError;

/// How a single command is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Escalate a non-zero exit into an error.
    pub check: bool,
    /// Capture stdout/stderr instead of streaming them to the console.
    pub capture: bool,
}

impl RunOptions {
    /// Read-only probes: captured, non-zero is a normal answer.
    pub const QUERY: Self = Self {
        check: false,
        capture: true,
    };
    /// Mutating steps whose failure aborts the enclosing operation.
    pub const STEP: Self = Self {
        check: true,
        capture: false,
    };
    /// Checked, but silent (output is parsed by the caller).
    pub const CHECKED_QUERY: Self = Self {
        check: true,
        capture: true,
    };
    /// Streamed, failure reported back but never escalated.
    pub const BEST_EFFORT: Self = Self {
        check: false,
        capture: false,
    };
}

/// Tagged result of one command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    /// Exit code, `None` when killed by a signal.
    pub code: Option<i32>,
    /// Empty unless the command was captured.
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn status_label(&self) -> String {
        match self.code {
            Some(code) => format!("exit status {code}"),
            None => "terminated by signal".to_string(),
        }
    }
}

/// Executes version-control commands against a working directory.
pub trait CommandRunner {
    /// Run the tool with `args` inside `cwd`.
    ///
    /// Errors only when the process cannot be spawned, or when `opts.check`
    /// is set and the command exits non-zero.
    fn run(&self, args: &[&str], cwd: &Path, opts: RunOptions) -> Result<CommandOutput, SyncError>;
}

/// [`CommandRunner`] backed by the system `git` binary.
#[derive(Debug, Clone)]
pub struct GitRunner {
    program: PathBuf,
    env: Vec<(String, String)>,
    quiet: bool,
}

impl Default for GitRunner {
    fn default() -> Self {
        Self::new("git")
    }
}

impl GitRunner {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            env: Vec::new(),
            quiet: false,
        }
    }

    /// Extra environment passed to every invocation.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Capture every command, even those that would normally stream, so
    /// nothing reaches the process's own stdout.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }
}

impl CommandRunner for GitRunner {
    fn run(&self, args: &[&str], cwd: &Path, opts: RunOptions) -> Result<CommandOutput, SyncError> {
        let display = display_command(&self.program.to_string_lossy(), args);

        let mut cmd = Command::new(&self.program);
        cmd.args(args).current_dir(cwd);
        // Never block the pipeline on a credential prompt.
        cmd.env("GIT_TERMINAL_PROMPT", "0");
        for (k, v) in &self.env {
            cmd.env(k, v);
        }
        cmd.stdin(Stdio::null());
        if opts.capture || self.quiet {
            cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
        } else {
            cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        }

        tracing::debug!("running `{display}` in {}", cwd.display());
        let output = cmd.output().map_err(|source| SyncError::Spawn {
            command: display.clone(),
            source,
        })?;

        let result = CommandOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if !result.success {
            if opts.check {
                return Err(SyncError::CommandFailed {
                    command: display,
                    status: result.status_label(),
                    stderr: result.stderr,
                });
            }
            tracing::debug!(
                "`{display}` exited unsuccessfully ({}), continuing",
                result.status_label()
            );
        }
        Ok(result)
    }
}

/// Human-readable command line; multi-line arguments collapse to their first line.
pub fn display_command(program: &str, args: &[&str]) -> String {
    let mut parts = vec![program.to_string()];
    for arg in args {
        let part = match arg.split_once('\n') {
            Some((first, _)) => format!("\"{first}…\""),
            None if arg.contains(' ') => format!("\"{arg}\""),
            None => (*arg).to_string(),
        };
        parts.push(part);
    }
    parts.join(" ")
}
