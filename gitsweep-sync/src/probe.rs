//! Read-only repository queries.
//!
//! None of these mutate the repository. "Not a repository" and "no remote"
//! are ordinary answers, not errors.

use std::path::Path;

use crate::error::SyncError;
use crate::runner::{CommandRunner, RunOptions};

/// Name of the single remote gitsweep manages.
pub const REMOTE: &str = "origin";

/// True iff `path` is inside a working tree. Never fails.
pub fn is_repository(runner: &dyn CommandRunner, path: &Path) -> bool {
    match runner.run(&["rev-parse", "--is-inside-work-tree"], path, RunOptions::QUERY) {
        Ok(out) => out.success && out.stdout.trim() == "true",
        Err(err) => {
            tracing::debug!("repository probe failed in {}: {err}", path.display());
            false
        }
    }
}

/// True iff `path` itself carries repository structure (a `.git` entry).
///
/// Unlike [`is_repository`] this ignores enclosing working trees, so a
/// project directory nested in another repository still counts as bare.
pub fn has_git_dir(path: &Path) -> bool {
    path.join(".git").exists()
}

/// Relative paths of every modified, added, deleted or untracked entry.
///
/// Untracked directories are expanded to the files inside them.
pub fn changed_files(runner: &dyn CommandRunner, path: &Path) -> Result<Vec<String>, SyncError> {
    let out = runner.run(
        &["status", "--porcelain", "--untracked-files=all"],
        path,
        RunOptions::CHECKED_QUERY,
    )?;
    Ok(parse_porcelain(&out.stdout))
}

/// URL of [`REMOTE`], or `None` when it is not configured.
pub fn current_remote_url(
    runner: &dyn CommandRunner,
    path: &Path,
) -> Result<Option<String>, SyncError> {
    let out = runner.run(&["remote", "get-url", REMOTE], path, RunOptions::QUERY)?;
    let url = out.stdout.trim();
    if !out.success || url.is_empty() {
        return Ok(None);
    }
    Ok(Some(url.to_string()))
}

/// Parse short-form status output (`XY path` per line).
///
/// Renames and copies (`R  old -> new`) yield the new path. C-style quoting
/// is removed, including octal escapes for non-ASCII bytes.
pub fn parse_porcelain(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| Some((line.get(..2)?, line.get(3..)?)))
        .map(|(code, entry)| {
            let moved = code.contains(['R', 'C']);
            match entry.rsplit_once(" -> ") {
                Some((_, target)) if moved => target,
                _ => entry,
            }
        })
        .map(unquote)
        .filter(|path| !path.is_empty())
        .collect()
}

fn unquote(path: &str) -> String {
    let Some(inner) = path
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    else {
        return path.to_string();
    };

    let bytes = inner.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'\\' {
            out.push(bytes[i]);
            i += 1;
            continue;
        }
        let Some(&next) = bytes.get(i + 1) else {
            out.push(b'\\');
            break;
        };
        if let Some(byte) = octal_byte(&bytes[i + 1..]) {
            out.push(byte);
            i += 4;
            continue;
        }
        out.push(match next {
            b'n' => b'\n',
            b't' => b'\t',
            b'r' => b'\r',
            b'a' => 0x07,
            b'b' => 0x08,
            b'f' => 0x0c,
            b'v' => 0x0b,
            other => other,
        });
        i += 2;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Three octal digits (`\303`) as one byte.
fn octal_byte(digits: &[u8]) -> Option<u8> {
    let digits = digits.get(..3)?;
    if !digits.iter().all(|d| (b'0'..=b'7').contains(d)) {
        return None;
    }
    let value = digits
        .iter()
        .fold(0u32, |acc, d| acc * 8 + u32::from(d - b'0'));
    u8::try_from(value).ok()
}
