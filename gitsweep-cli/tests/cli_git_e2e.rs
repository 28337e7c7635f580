//! Both binaries against a real `git`, with a local bare repository standing
//! in for the hosting service. Skipped when `git` is not installed.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

fn isolate(cmd: &mut Command, home: &Path) {
    cmd.env("HOME", home)
        .env("USERPROFILE", home)
        .env("NO_COLOR", "1")
        .env_remove("GITSWEEP_CONFIG")
        .env_remove("GITSWEEP_LOG")
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env("GIT_CONFIG_COUNT", "1")
        .env("GIT_CONFIG_KEY_0", "init.defaultBranch")
        .env("GIT_CONFIG_VALUE_0", "main")
        .env("GIT_AUTHOR_NAME", "gitsweep")
        .env("GIT_AUTHOR_EMAIL", "gitsweep@example.com")
        .env("GIT_COMMITTER_NAME", "gitsweep")
        .env("GIT_COMMITTER_EMAIL", "gitsweep@example.com");
}

fn gitsweep_cmd(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("gitsweep"));
    isolate(&mut cmd, home);
    cmd
}

fn commit_cmd(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("gitsweep-commit"));
    isolate(&mut cmd, home);
    cmd
}

fn git_in(dir: &Path, args: &[&str]) -> String {
    let out = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("run git");
    assert!(out.status.success(), "git {args:?} failed");
    String::from_utf8_lossy(&out.stdout).into_owned()
}

#[test]
fn batch_then_single_project_commit() {
    if !git_available() {
        return;
    }
    let home = TempDir::new().expect("home");
    let host = TempDir::new().expect("host");
    let root = TempDir::new().expect("root");

    let remote = host.path().join("acme").join("acme-site.git");
    fs::create_dir_all(&remote).expect("mkdir remote");
    git_in(&remote, &["init", "--bare", "--quiet"]);

    let project = root.path().join("site");
    fs::create_dir(&project).expect("mkdir project");
    fs::write(project.join("index.html"), "<h1>hi</h1>\n").expect("write");

    let config = home.path().join("config.yaml");
    fs::write(
        &config,
        format!(
            "account: acme\nprojects_root: {}\nremote_host: {}\ndelay_ms: 0\nprojects:\n  site: acme-site\n",
            root.path().display(),
            host.path().display()
        ),
    )
    .expect("write config");

    gitsweep_cmd(home.path())
        .arg("--config")
        .arg(&config)
        .arg("push-all")
        .assert()
        .success()
        .stdout(contains("1 projects | 1 succeeded | 0 failed"));
    assert!(git_in(&remote, &["log", "-1", "--format=%s", "main"]).starts_with("Initial commit"));

    fs::create_dir(project.join("src")).expect("mkdir src");
    fs::write(project.join("src").join("auth.js"), "export {}\n").expect("write");

    commit_cmd(home.path())
        .current_dir(&project)
        .args(["--message", "add login", "--summary", "added auth module"])
        .assert()
        .success()
        .stdout(contains("commit and push complete"));

    let body = git_in(&remote, &["log", "-1", "--format=%B", "main"]);
    assert!(body.starts_with("task completed: added auth module"), "body: {body}");
    assert!(body.contains("origin message:\nadd login"), "body: {body}");
    assert!(body.contains("- src/auth.js"), "body: {body}");
    assert!(body.contains("completed at: "), "body: {body}");
}

#[test]
fn json_report_stays_parseable_when_git_runs() {
    if !git_available() {
        return;
    }
    let home = TempDir::new().expect("home");
    let host = TempDir::new().expect("host");
    let root = TempDir::new().expect("root");

    let remote = host.path().join("acme").join("acme-docs.git");
    fs::create_dir_all(&remote).expect("mkdir remote");
    git_in(&remote, &["init", "--bare", "--quiet"]);

    let project = root.path().join("docs");
    fs::create_dir(&project).expect("mkdir project");
    fs::write(project.join("guide.md"), "# guide\n").expect("write");

    let config = home.path().join("config.yaml");
    fs::write(
        &config,
        format!(
            "account: acme\nprojects_root: {}\nremote_host: {}\ndelay_ms: 0\nprojects:\n  docs: acme-docs\n",
            root.path().display(),
            host.path().display()
        ),
    )
    .expect("write config");

    let assert = gitsweep_cmd(home.path())
        .arg("--config")
        .arg(&config)
        .args(["push-all", "--json"])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8");
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("stdout is pure JSON");

    assert_eq!(json["summary"]["succeeded"], 1, "stdout: {stdout}");
    assert_eq!(json["projects"][0]["status"], "pushed");
    assert!(git_in(&remote, &["log", "-1", "--format=%s", "main"]).starts_with("Initial commit"));
}

#[test]
fn single_project_outside_repository_is_a_skip() {
    let home = TempDir::new().expect("home");
    let dir = TempDir::new().expect("dir");
    let ceiling = dir.path().parent().expect("parent").display().to_string();

    commit_cmd(home.path())
        .current_dir(dir.path())
        .env("GIT_CEILING_DIRECTORIES", ceiling)
        .assert()
        .success()
        .stdout(contains("not a repository"));
}
