//! Commit message synthesis.
//!
//! Pure functions: the only input that varies between identical calls is the
//! timestamp, and callers pass that in.

use std::fmt::Write;

use chrono::{DateTime, SecondsFormat, Utc};

/// File listing cap; anything beyond is summarized as a count.
pub const MAX_LISTED_FILES: usize = 20;

/// Headline used when no processing summary was supplied.
pub const DEFAULT_HEADLINE: &str = "update project files";

/// Sortable absolute time, e.g. `2024-03-09T14:05:07.000Z`.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Message for single-project mode.
///
/// ```text
/// task completed: <summary headline | default>
///
/// origin message:          (only when non-blank; kept verbatim)
/// <origin>
///
/// processing summary:      (only when non-empty; repeats the headline on purpose)
/// <summary>
///
/// file changes:            (only when files is non-empty)
/// - <first 20 paths>
/// ... and <n> more files
///
/// completed at: <timestamp>
/// ```
pub fn task_message(
    origin: &str,
    summary: &str,
    files: &[String],
    completed_at: DateTime<Utc>,
) -> String {
    let summary = summary.trim();
    // The header stays one line even for a multi-line summary.
    let headline = summary
        .lines()
        .next()
        .filter(|line| !line.trim().is_empty())
        .unwrap_or(DEFAULT_HEADLINE);

    let mut message = format!("task completed: {headline}\n\n");

    if !origin.trim().is_empty() {
        let _ = write!(message, "origin message:\n{origin}\n\n");
    }
    if !summary.is_empty() {
        let _ = write!(message, "processing summary:\n{summary}\n\n");
    }
    if !files.is_empty() {
        message.push_str("file changes:\n");
        for file in files.iter().take(MAX_LISTED_FILES) {
            let _ = writeln!(message, "- {file}");
        }
        if files.len() > MAX_LISTED_FILES {
            let _ = writeln!(
                message,
                "... and {} more files",
                files.len() - MAX_LISTED_FILES
            );
        }
        message.push('\n');
    }

    let _ = write!(message, "completed at: {}", format_timestamp(completed_at));
    message
}

/// Fixed message for batch project setup commits.
pub fn setup_message(at: DateTime<Utc>) -> String {
    format!(
        "Initial commit: Setup project structure and documentation\n\
         \n\
         - Initialize project structure\n\
         - Add core functionality\n\
         - Complete project documentation\n\
         - Configure development environment\n\
         \n\
         Date: {}",
        format_timestamp(at)
    )
}
