//! `gitsweep push-all` — reconcile and push every registered project.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use clap::Args;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use gitsweep_cli::{load_config, Console};
use gitsweep_sync::{BatchOrchestrator, BatchReport, GitRunner, OutcomeKind, ProjectOutcome};

/// Arguments for `gitsweep push-all`.
#[derive(Args, Debug, Default)]
pub struct PushAllArgs {
    /// Emit the batch report as JSON instead of progress output.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct BatchReportJson {
    finished_at: String,
    summary: BatchSummaryJson,
    projects: Vec<ProjectOutcomeJson>,
}

#[derive(Serialize)]
struct BatchSummaryJson {
    total: usize,
    succeeded: usize,
    failed: usize,
}

#[derive(Serialize)]
struct ProjectOutcomeJson {
    project: String,
    success: bool,
    status: &'static str,
    reason: Option<String>,
}

#[derive(Tabled)]
struct OutcomeTableRow {
    #[tabled(rename = "project")]
    project: String,
    #[tabled(rename = "status")]
    status: String,
    #[tabled(rename = "detail")]
    detail: String,
}

impl PushAllArgs {
    pub fn run(self, config_path: Option<&Path>) -> Result<()> {
        let (config, home) = load_config(config_path)?;
        let console = Console::new(Some(config.log_path_at(&home))).quiet(self.json);
        // In JSON mode stdout carries only the report.
        let runner = GitRunner::default().quiet(self.json);

        let report = BatchOrchestrator::new(&config, &runner, &console).run();

        if self.json {
            print_json(&report)?;
        } else {
            print_table(&report);
        }
        Ok(())
    }
}

fn status_key(outcome: &ProjectOutcome) -> &'static str {
    match outcome.kind {
        OutcomeKind::Pushed => "pushed",
        OutcomeKind::UpToDate => "up_to_date",
        OutcomeKind::Failed { .. } => "failed",
    }
}

fn status_label(outcome: &ProjectOutcome) -> &'static str {
    match outcome.kind {
        OutcomeKind::Pushed => "PUSHED",
        OutcomeKind::UpToDate => "UP TO DATE",
        OutcomeKind::Failed { .. } => "FAILED",
    }
}

fn print_json(report: &BatchReport) -> Result<()> {
    let payload = BatchReportJson {
        finished_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        summary: BatchSummaryJson {
            total: report.total(),
            succeeded: report.succeeded(),
            failed: report.failed_count(),
        },
        projects: report
            .outcomes
            .iter()
            .map(|o| ProjectOutcomeJson {
                project: o.project.0.clone(),
                success: o.success(),
                status: status_key(o),
                reason: o.reason().map(str::to_string),
            })
            .collect(),
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&payload).context("failed to serialize batch report JSON")?
    );
    Ok(())
}

fn print_table(report: &BatchReport) {
    if report.outcomes.is_empty() {
        println!("No projects registered.");
        return;
    }

    let rows: Vec<OutcomeTableRow> = report
        .outcomes
        .iter()
        .map(|o| OutcomeTableRow {
            project: o.project.0.clone(),
            status: status_label(o).to_string(),
            detail: match &o.kind {
                OutcomeKind::Pushed => "committed and pushed".to_string(),
                OutcomeKind::UpToDate => "nothing to commit".to_string(),
                OutcomeKind::Failed { reason } => reason.clone(),
            },
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
    println!(
        "{} projects | {} succeeded | {} failed",
        report.total(),
        report.succeeded(),
        report.failed_count()
    );
}
