//! # gitsweep-sync
//!
//! Repository reconciliation against a remote host.
//!
//! - [`batch::BatchOrchestrator`] walks the configured registry and brings
//!   every project to "committed and pushed", collecting one
//!   [`ProjectOutcome`] per entry.
//! - [`commit::commit_and_push`] does the same for a single working tree with
//!   a message synthesized from caller-supplied metadata.
//!
//! All version-control access goes through [`CommandRunner`].

pub mod batch;
pub mod commit;
pub mod error;
pub mod message;
pub mod probe;
pub mod project;
pub mod reconcile;
pub mod report;
pub mod runner;

#[cfg(test)]
pub(crate) mod testing;

pub use batch::{BatchOrchestrator, BatchReport};
pub use commit::{commit_and_push, CommitOutcome, CommitRequest};
pub use error::SyncError;
pub use project::{OutcomeKind, ProjectOutcome, ProjectSyncer};
pub use report::{EventLog, Level, Reporter};
pub use runner::{CommandOutput, CommandRunner, GitRunner, RunOptions};
