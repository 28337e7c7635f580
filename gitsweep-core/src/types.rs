//! Domain types for the gitsweep registry.

use std::fmt;

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Directory name of a project, resolved under the configured projects root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocalName(pub String);

impl fmt::Display for LocalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for LocalName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for LocalName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Repository name on the remote hosting account.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoName(pub String);

impl fmt::Display for RepoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for RepoName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RepoName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// One registry entry: a local directory and the remote repository it pushes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDescriptor {
    pub local: LocalName,
    pub remote: RepoName,
}

impl ProjectDescriptor {
    pub fn new(local: impl Into<LocalName>, remote: impl Into<RepoName>) -> Self {
        Self {
            local: local.into(),
            remote: remote.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
