//! Test doubles: a scripted [`CommandRunner`] and a recording [`Reporter`].

use std::cell::RefCell;
use std::path::Path;

use crate::error::SyncError;
use crate::report::{Level, Reporter};
use crate::runner::{display_command, CommandOutput, CommandRunner, RunOptions};

/// Replies to commands by prefix match. When several replies share a prefix
/// they are consumed in order; the last one sticks.
#[derive(Default)]
pub struct ScriptedRunner {
    replies: RefCell<Vec<(String, CommandOutput)>>,
    calls: RefCell<Vec<String>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, prefix: &str, success: bool, stdout: &str) -> Self {
        self.replies.borrow_mut().push((
            prefix.to_string(),
            CommandOutput {
                success,
                code: Some(if success { 0 } else { 1 }),
                stdout: stdout.to_string(),
                stderr: if success { String::new() } else { format!("{prefix}: scripted failure") },
            },
        ));
        self
    }

    /// Every command seen so far, joined with spaces (without the program).
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn called(&self, prefix: &str) -> bool {
        self.calls.borrow().iter().any(|c| c.starts_with(prefix))
    }

    fn next_reply(&self, line: &str) -> CommandOutput {
        let mut replies = self.replies.borrow_mut();
        let matching: Vec<usize> = replies
            .iter()
            .enumerate()
            .filter(|(_, (prefix, _))| line.starts_with(prefix.as_str()))
            .map(|(i, _)| i)
            .collect();
        match matching.as_slice() {
            [] => CommandOutput {
                success: true,
                code: Some(0),
                ..CommandOutput::default()
            },
            [only] => replies[*only].1.clone(),
            [first, ..] => replies.remove(*first).1,
        }
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, args: &[&str], _cwd: &Path, opts: RunOptions) -> Result<CommandOutput, SyncError> {
        let line = args.join(" ");
        self.calls.borrow_mut().push(line.clone());
        let output = self.next_reply(&line);
        if !output.success && opts.check {
            return Err(SyncError::CommandFailed {
                command: display_command("git", args),
                status: output.status_label(),
                stderr: output.stderr,
            });
        }
        Ok(output)
    }
}

/// Collects every reported event.
#[derive(Default)]
pub struct RecordingReporter {
    events: RefCell<Vec<(Level, String)>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.events
            .borrow()
            .iter()
            .any(|(l, m)| *l == level && m.contains(needle))
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, level: Level, message: &str) {
        self.events.borrow_mut().push((level, message.to_string()));
    }
}
