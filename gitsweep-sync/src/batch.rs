//! Batch orchestration over the configured registry.
//!
//! Projects are processed strictly one after another, in registry order, with
//! the configured pause between items. A failing project never stops the run.

use gitsweep_core::{Config, ProjectDescriptor};

use crate::project::{ProjectOutcome, ProjectSyncer};
use crate::report::{Level, Reporter};
use crate::runner::CommandRunner;

pub const DIRECTORY_NOT_FOUND: &str = "directory not found";

/// Outcomes of one batch run, in registry order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub outcomes: Vec<ProjectOutcome>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.success()).count()
    }

    pub fn failed(&self) -> impl Iterator<Item = &ProjectOutcome> {
        self.outcomes.iter().filter(|o| !o.success())
    }

    pub fn failed_count(&self) -> usize {
        self.failed().count()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed_count() == 0
    }
}

/// Drives [`ProjectSyncer`] across every registry entry.
pub struct BatchOrchestrator<'a> {
    config: &'a Config,
    runner: &'a dyn CommandRunner,
    reporter: &'a dyn Reporter,
}

impl<'a> BatchOrchestrator<'a> {
    pub fn new(
        config: &'a Config,
        runner: &'a dyn CommandRunner,
        reporter: &'a dyn Reporter,
    ) -> Self {
        Self {
            config,
            runner,
            reporter,
        }
    }

    /// Process the whole registry and summarize.
    pub fn run(&self) -> BatchReport {
        let projects = &self.config.projects;
        self.reporter.report(Level::Info, "starting batch push of all projects...");
        self.reporter
            .report(Level::Info, &format!("project count: {}", projects.len()));

        let syncer = ProjectSyncer::new(self.runner, self.reporter, &self.config.branch);
        let mut report = BatchReport::default();
        for (index, project) in projects.iter().enumerate() {
            if index > 0 && !self.config.delay.is_zero() {
                std::thread::sleep(self.config.delay);
            }
            report.outcomes.push(self.process(&syncer, project));
        }

        self.summarize(&report);
        report
    }

    fn process(&self, syncer: &ProjectSyncer<'_>, project: &ProjectDescriptor) -> ProjectOutcome {
        let path = self.config.project_path(project);

        self.reporter.rule();
        self.reporter
            .report(Level::Info, &format!("configuring project: {}", project.local));
        self.reporter
            .report(Level::Info, &format!("remote repository: {}", project.remote));
        self.reporter.rule();

        if !path.is_dir() {
            self.reporter.report(
                Level::Warn,
                &format!("project directory does not exist: {}", path.display()),
            );
            return ProjectOutcome::failed(project.local.clone(), DIRECTORY_NOT_FOUND);
        }

        let url = self.config.remote_url(&project.remote);
        syncer.sync(&project.local, &path, &url)
    }

    fn summarize(&self, report: &BatchReport) {
        self.reporter.rule();
        self.reporter.report(Level::Success, "batch push complete");
        self.reporter
            .report(Level::Info, &format!("total: {} projects", report.total()));
        self.reporter
            .report(Level::Success, &format!("succeeded: {}", report.succeeded()));
        let failed = report.failed_count();
        let level = if failed > 0 { Level::Error } else { Level::Info };
        self.reporter.report(level, &format!("failed: {failed}"));
        self.reporter.rule();

        for outcome in report.failed() {
            self.reporter.report(
                Level::Error,
                &format!(
                    "- {}: {}",
                    outcome.project,
                    outcome.reason().unwrap_or_default()
                ),
            );
        }
    }
}
