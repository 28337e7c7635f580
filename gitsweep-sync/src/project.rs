//! Per-project reconciliation used by batch runs.
//!
//! ```text
//! start ─► initializing? ─► reconciling remote ─► staging (add -A)
//!            ─► deciding ─┬─ nothing staged, not new ─► sync push (best effort) ─► up to date
//!                         └─ changes or new repo ─► commit ─► push ─► pushed | push failed
//! ```
//!
//! Errors from any step before pushing become a failed [`ProjectOutcome`];
//! nothing escapes [`ProjectSyncer::sync`].

use std::path::Path;

use chrono::Utc;
use gitsweep_core::LocalName;

use crate::error::SyncError;
use crate::message::setup_message;
use crate::probe::{changed_files, has_git_dir, REMOTE};
use crate::reconcile::{ensure_remote, ensure_repository, RemoteChange};
use crate::report::{Level, Reporter};
use crate::runner::{CommandRunner, RunOptions};

pub const PUSH_FAILED: &str = "push failed";

/// Terminal state of one project's reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeKind {
    /// A commit was created (or the repository was new) and the push succeeded.
    Pushed,
    /// Nothing to commit; a best-effort push was attempted.
    UpToDate,
    Failed { reason: String },
}

/// Per-project result of one batch pass. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectOutcome {
    pub project: LocalName,
    pub kind: OutcomeKind,
}

impl ProjectOutcome {
    pub fn new(project: LocalName, kind: OutcomeKind) -> Self {
        Self { project, kind }
    }

    pub fn failed(project: LocalName, reason: impl Into<String>) -> Self {
        Self::new(
            project,
            OutcomeKind::Failed {
                reason: reason.into(),
            },
        )
    }

    pub fn success(&self) -> bool {
        !matches!(self.kind, OutcomeKind::Failed { .. })
    }

    pub fn reason(&self) -> Option<&str> {
        match &self.kind {
            OutcomeKind::Failed { reason } => Some(reason),
            _ => None,
        }
    }
}

/// Takes one directory from "dirty or uninitialized" to "committed and pushed".
pub struct ProjectSyncer<'a> {
    runner: &'a dyn CommandRunner,
    reporter: &'a dyn Reporter,
    branch: &'a str,
}

impl<'a> ProjectSyncer<'a> {
    pub fn new(runner: &'a dyn CommandRunner, reporter: &'a dyn Reporter, branch: &'a str) -> Self {
        Self {
            runner,
            reporter,
            branch,
        }
    }

    /// Reconcile `path` against `remote_url`. The directory must exist.
    pub fn sync(&self, project: &LocalName, path: &Path, remote_url: &str) -> ProjectOutcome {
        match self.reconcile(project, path, remote_url) {
            Ok(kind) => ProjectOutcome::new(project.clone(), kind),
            Err(err) => {
                self.reporter
                    .report(Level::Error, &format!("✗ {project} failed: {err}"));
                ProjectOutcome::failed(project.clone(), err.to_string())
            }
        }
    }

    fn reconcile(
        &self,
        project: &LocalName,
        path: &Path,
        remote_url: &str,
    ) -> Result<OutcomeKind, SyncError> {
        if !has_git_dir(path) {
            self.reporter.report(Level::Info, "initializing repository...");
        }
        let newly_initialized = ensure_repository(self.runner, path, self.branch)?;

        match ensure_remote(self.runner, path, remote_url)? {
            RemoteChange::Added => self
                .reporter
                .report(Level::Info, &format!("added remote {REMOTE}: {remote_url}")),
            RemoteChange::Updated { previous } => self.reporter.report(
                Level::Warn,
                &format!("updated remote URL: {previous} -> {remote_url}"),
            ),
            RemoteChange::Unchanged => {}
        }

        // Stage first so the status check below is authoritative.
        self.runner.run(&["add", "-A"], path, RunOptions::STEP)?;
        let staged = changed_files(self.runner, path)?;

        if staged.is_empty() && !newly_initialized {
            self.reporter
                .report(Level::Success, &format!("✓ {project} is already up to date"));
            // Keep the remote aligned; the outcome does not depend on it.
            match self.push(path) {
                Ok(true) => {}
                Ok(false) => tracing::debug!("sync push for {project} did not succeed"),
                Err(err) => tracing::debug!("sync push for {project} failed: {err}"),
            }
            return Ok(OutcomeKind::UpToDate);
        }

        let message = setup_message(Utc::now());
        self.runner
            .run(&["commit", "-m", message.as_str()], path, RunOptions::STEP)?;

        self.reporter.report(Level::Info, "pushing to remote...");
        if self.push(path)? {
            self.reporter
                .report(Level::Success, &format!("✓ {project} pushed"));
            Ok(OutcomeKind::Pushed)
        } else {
            self.reporter
                .report(Level::Error, &format!("✗ {project}: {PUSH_FAILED}"));
            Ok(OutcomeKind::Failed {
                reason: PUSH_FAILED.to_string(),
            })
        }
    }

    fn push(&self, path: &Path) -> Result<bool, SyncError> {
        let out = self.runner.run(
            &["push", "-u", REMOTE, self.branch],
            path,
            RunOptions::BEST_EFFORT,
        )?;
        Ok(out.success)
    }
}
