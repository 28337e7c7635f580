//! Single-project mode: commit the current working tree with a synthesized
//! message and push it.

use std::path::Path;

use chrono::Utc;

use crate::error::SyncError;
use crate::message::task_message;
use crate::probe::{changed_files, is_repository};
use crate::report::{Level, Reporter};
use crate::runner::{CommandRunner, RunOptions};

/// Caller-supplied change metadata. Both fields may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitRequest {
    /// The original request that triggered the work.
    pub origin: String,
    /// What was done about it.
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// `path` is not inside a working tree; nothing was touched.
    NotARepository,
    /// Working tree is clean; nothing was committed.
    NoChanges,
    /// Committed and pushed `files` changed paths.
    Committed { files: usize },
}

/// Stage, commit and push everything under `path`.
///
/// Skips are reported and returned as outcomes; failures of the add, commit
/// or push steps are returned as errors.
pub fn commit_and_push(
    runner: &dyn CommandRunner,
    reporter: &dyn Reporter,
    path: &Path,
    request: &CommitRequest,
) -> Result<CommitOutcome, SyncError> {
    let project = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    reporter.report(Level::Info, &format!("processing project: {project}"));

    if !is_repository(runner, path) {
        reporter.report(
            Level::Warn,
            "current directory is not a repository, skipping",
        );
        return Ok(CommitOutcome::NotARepository);
    }

    let files = changed_files(runner, path)?;
    if files.is_empty() {
        reporter.report(Level::Info, "no changes detected, skipping commit");
        return Ok(CommitOutcome::NoChanges);
    }
    reporter.report(
        Level::Info,
        &format!("detected {} changed file(s)", files.len()),
    );

    reporter.report(Level::Info, "staging files...");
    runner.run(&["add", "-A"], path, RunOptions::STEP)?;

    let message = task_message(&request.origin, &request.summary, &files, Utc::now());
    reporter.report(Level::Info, "creating commit...");
    runner.run(&["commit", "-m", message.as_str()], path, RunOptions::STEP)?;

    reporter.report(Level::Info, "pushing to remote...");
    runner.run(&["push"], path, RunOptions::STEP)?;

    reporter.report(Level::Success, "✓ commit and push complete");
    Ok(CommitOutcome::Committed { files: files.len() })
}
