//! YAML configuration registry.
//!
//! # Storage layout
//!
//! ```text
//! ~/.gitsweep/
//!   config.yaml     (registry + hosting account)
//!   gitsweep.log    (append-only event log, unless `log_file` overrides it)
//! ```
//!
//! # File format
//!
//! ```yaml
//! account: acme
//! projects_root: /home/acme/projects
//! remote_host: https://github.com   # optional
//! branch: main                      # optional
//! delay_ms: 500                     # optional
//! log_file: /var/log/gitsweep.log   # optional
//! projects:
//!   backup-manager: acme-backup-manager
//!   rules: acme-rules
//! ```
//!
//! `projects` keeps the order it was written in; batch runs and reports
//! follow it.
//!
//! # API pattern
//!
//! Loaders take the home directory explicitly (`load_at(home)`), so tests
//! point them at a `TempDir`. [`home`] resolves the real one via `dirs`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::types::{LocalName, ProjectDescriptor, RepoName};

pub const DEFAULT_REMOTE_HOST: &str = "https://github.com";
pub const DEFAULT_BRANCH: &str = "main";
pub const DEFAULT_DELAY_MS: u64 = 500;

const CONFIG_DIR: &str = ".gitsweep";
const CONFIG_FILE: &str = "config.yaml";
const LOG_FILE: &str = "gitsweep.log";

// ---------------------------------------------------------------------------
// 1. Types
// ---------------------------------------------------------------------------

/// Validated registry: hosting account, roots, and the ordered project list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub account: String,
    pub projects_root: PathBuf,
    pub remote_host: String,
    pub branch: String,
    /// Pause between batch items.
    pub delay: Duration,
    pub log_file: Option<PathBuf>,
    pub projects: Vec<ProjectDescriptor>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    account: String,
    projects_root: PathBuf,
    #[serde(default = "default_remote_host")]
    remote_host: String,
    #[serde(default = "default_branch")]
    branch: String,
    #[serde(default = "default_delay_ms")]
    delay_ms: u64,
    #[serde(default)]
    log_file: Option<PathBuf>,
    #[serde(default)]
    projects: Option<serde_yaml::Mapping>,
}

fn default_remote_host() -> String {
    DEFAULT_REMOTE_HOST.to_string()
}

fn default_branch() -> String {
    DEFAULT_BRANCH.to_string()
}

fn default_delay_ms() -> u64 {
    DEFAULT_DELAY_MS
}

impl Config {
    /// Empty registry with default host, branch and delay.
    pub fn new(account: impl Into<String>, projects_root: impl Into<PathBuf>) -> Self {
        Self {
            account: account.into(),
            projects_root: projects_root.into(),
            remote_host: default_remote_host(),
            branch: default_branch(),
            delay: Duration::from_millis(DEFAULT_DELAY_MS),
            log_file: None,
            projects: Vec::new(),
        }
    }

    /// Append a registry entry (builder style).
    pub fn with_project(mut self, local: &str, remote: &str) -> Self {
        self.projects.push(ProjectDescriptor::new(local, remote));
        self
    }

    /// `<projects_root>/<local>` — pure, no I/O.
    pub fn project_path(&self, project: &ProjectDescriptor) -> PathBuf {
        self.projects_root.join(&project.local.0)
    }

    /// `<remote_host>/<account>/<repo>.git`
    pub fn remote_url(&self, repo: &RepoName) -> String {
        format!(
            "{}/{}/{}.git",
            self.remote_host.trim_end_matches('/'),
            self.account,
            repo.0
        )
    }

    /// Event log location: the configured `log_file`, else `<home>/.gitsweep/gitsweep.log`.
    pub fn log_path_at(&self, home: &Path) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| default_log_path_at(home))
    }

    /// Parse and validate YAML. `path` is only used for error context.
    pub fn from_yaml(path: &Path, contents: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_yaml::from_str(contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        let invalid = |reason: String| ConfigError::Invalid {
            path: path.to_path_buf(),
            reason,
        };

        let account = raw.account.trim().to_string();
        if account.is_empty() || account.contains('/') {
            return Err(invalid(format!("account '{}' is not a valid name", raw.account)));
        }
        if raw.branch.trim().is_empty() {
            return Err(invalid("branch must not be empty".to_string()));
        }

        let entries = raw.projects.unwrap_or_default();
        let mut projects = Vec::with_capacity(entries.len());
        for (key, value) in &entries {
            let (Some(local), Some(remote)) = (key.as_str(), value.as_str()) else {
                return Err(invalid(format!(
                    "project entries must map a directory name to a repository name, got {key:?}: {value:?}"
                )));
            };
            if !is_plain_name(local) {
                return Err(invalid(format!("'{local}' is not a plain directory name")));
            }
            if !is_plain_name(remote) {
                return Err(invalid(format!(
                    "'{remote}' (for '{local}') is not a plain repository name"
                )));
            }
            projects.push(ProjectDescriptor {
                local: LocalName::from(local),
                remote: RepoName::from(remote),
            });
        }

        Ok(Self {
            account,
            projects_root: raw.projects_root,
            remote_host: raw.remote_host,
            branch: raw.branch.trim().to_string(),
            delay: Duration::from_millis(raw.delay_ms),
            log_file: raw.log_file,
            projects,
        })
    }
}

fn is_plain_name(name: &str) -> bool {
    !name.trim().is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

// ---------------------------------------------------------------------------
// 2. Path helpers
// ---------------------------------------------------------------------------

/// `<home>/.gitsweep/config.yaml` — pure, no I/O.
pub fn config_path_at(home: &Path) -> PathBuf {
    home.join(CONFIG_DIR).join(CONFIG_FILE)
}

/// `<home>/.gitsweep/gitsweep.log` — pure, no I/O.
pub fn default_log_path_at(home: &Path) -> PathBuf {
    home.join(CONFIG_DIR).join(LOG_FILE)
}

// ---------------------------------------------------------------------------
// 3. Load
// ---------------------------------------------------------------------------

/// Load the registry from an explicit file.
///
/// Returns `ConfigError::NotFound` if absent,
/// `ConfigError::Parse` (with path + line context) if malformed YAML,
/// `ConfigError::Invalid` if the entries cannot be used.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path)?;
    Config::from_yaml(path, &contents)
}

/// Load `<home>/.gitsweep/config.yaml`.
pub fn load_at(home: &Path) -> Result<Config, ConfigError> {
    load_from(&config_path_at(home))
}

/// Home directory, or `ConfigError::HomeNotFound`.
pub fn home() -> Result<PathBuf, ConfigError> {
    dirs::home_dir().ok_or(ConfigError::HomeNotFound)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MINIMAL: &str = "account: acme\nprojects_root: /srv/projects\n";

    fn parse(yaml: &str) -> Result<Config, ConfigError> {
        Config::from_yaml(Path::new("config.yaml"), yaml)
    }

    #[test]
    fn defaults_applied_for_optional_fields() {
        let cfg = parse(MINIMAL).expect("parse");
        assert_eq!(cfg.remote_host, DEFAULT_REMOTE_HOST);
        assert_eq!(cfg.branch, "main");
        assert_eq!(cfg.delay, Duration::from_millis(500));
        assert!(cfg.log_file.is_none());
        assert!(cfg.projects.is_empty());
    }

    #[test]
    fn projects_keep_insertion_order() {
        let yaml = format!("{MINIMAL}projects:\n  zeta: acme-zeta\n  alpha: acme-alpha\n  mid: acme-mid\n");
        let cfg = parse(&yaml).expect("parse");
        let locals: Vec<&str> = cfg.projects.iter().map(|p| p.local.0.as_str()).collect();
        assert_eq!(locals, ["zeta", "alpha", "mid"]);
        assert_eq!(cfg.projects[1].remote, RepoName::from("acme-alpha"));
    }

    #[test]
    fn empty_projects_key_is_an_empty_registry() {
        let cfg = parse(&format!("{MINIMAL}projects:\n")).expect("parse");
        assert!(cfg.projects.is_empty());
    }

    #[test]
    fn remote_url_and_project_path() {
        let cfg = Config::new("acme", "/srv/projects").with_project("rules", "acme-rules");
        let project = &cfg.projects[0];
        assert_eq!(
            cfg.remote_url(&project.remote),
            "https://github.com/acme/acme-rules.git"
        );
        assert_eq!(cfg.project_path(project), PathBuf::from("/srv/projects/rules"));
    }

    #[test]
    fn remote_url_tolerates_trailing_slash_on_host() {
        let mut cfg = Config::new("acme", "/srv");
        cfg.remote_host = "https://git.example.com/".to_string();
        assert_eq!(
            cfg.remote_url(&RepoName::from("x")),
            "https://git.example.com/acme/x.git"
        );
    }

    #[test]
    fn empty_account_is_invalid() {
        let err = parse("account: '  '\nprojects_root: /srv\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }), "got: {err}");
    }

    #[test]
    fn path_like_local_name_is_invalid() {
        let yaml = format!("{MINIMAL}projects:\n  ../escape: acme-escape\n");
        let err = parse(&yaml).unwrap_err();
        assert!(err.to_string().contains("../escape"), "got: {err}");
    }

    #[test]
    fn non_string_remote_is_invalid() {
        let yaml = format!("{MINIMAL}projects:\n  rules: [a, b]\n");
        let err = parse(&yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }), "got: {err}");
    }

    #[test]
    fn unknown_field_is_parse_error() {
        let yaml = format!("{MINIMAL}colour: blue\n");
        let err = parse(&yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }), "got: {err}");
    }

    #[test]
    fn load_missing_returns_not_found() {
        let home = TempDir::new().expect("tempdir");
        let err = load_at(home.path()).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
        assert!(err.to_string().contains("config.yaml"));
    }

    #[test]
    fn log_path_falls_back_to_home() {
        let home = TempDir::new().expect("tempdir");
        let cfg = Config::new("acme", "/srv");
        assert_eq!(
            cfg.log_path_at(home.path()),
            home.path().join(".gitsweep").join("gitsweep.log")
        );
    }
}
