//! Idempotent repository and remote reconciliation.
//!
//! Both operations are safe to call on every run regardless of prior state.

use std::path::Path;

use crate::error::SyncError;
use crate::probe::{current_remote_url, has_git_dir, REMOTE};
use crate::runner::{CommandRunner, RunOptions};

/// What [`ensure_remote`] had to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteChange {
    /// No remote was configured; it was added.
    Added,
    /// A different URL was configured; it was replaced.
    Updated { previous: String },
    /// Already pointing at the desired URL.
    Unchanged,
}

/// Initialize a repository in `path` unless one already exists there.
///
/// Returns `true` when this call created it. The default branch rename is
/// best-effort; its failure is ignored.
pub fn ensure_repository(
    runner: &dyn CommandRunner,
    path: &Path,
    branch: &str,
) -> Result<bool, SyncError> {
    if has_git_dir(path) {
        return Ok(false);
    }
    runner.run(&["init"], path, RunOptions::STEP)?;
    match runner.run(&["branch", "-M", branch], path, RunOptions::QUERY) {
        Ok(out) if out.success => {}
        Ok(out) => tracing::debug!("branch rename to {branch} skipped: {}", out.stderr.trim()),
        Err(err) => tracing::debug!("branch rename to {branch} skipped: {err}"),
    }
    Ok(true)
}

/// Point [`REMOTE`] at `desired_url`: add when absent, update when different.
/// Never removes a remote.
pub fn ensure_remote(
    runner: &dyn CommandRunner,
    path: &Path,
    desired_url: &str,
) -> Result<RemoteChange, SyncError> {
    match current_remote_url(runner, path)? {
        None => {
            runner.run(&["remote", "add", REMOTE, desired_url], path, RunOptions::STEP)?;
            Ok(RemoteChange::Added)
        }
        Some(current) if current != desired_url => {
            runner.run(&["remote", "set-url", REMOTE, desired_url], path, RunOptions::STEP)?;
            Ok(RemoteChange::Updated { previous: current })
        }
        Some(_) => Ok(RemoteChange::Unchanged),
    }
}
