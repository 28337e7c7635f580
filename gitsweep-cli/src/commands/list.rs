//! `gitsweep list` — show what a batch run would touch.

use std::path::Path;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use gitsweep_cli::load_config;

/// Arguments for `gitsweep list`.
#[derive(Args, Debug, Default)]
pub struct ListArgs {}

#[derive(Tabled)]
struct RegistryRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "directory")]
    directory: String,
    #[tabled(rename = "remote")]
    remote: String,
    #[tabled(rename = "exists")]
    exists: &'static str,
}

impl ListArgs {
    pub fn run(self, config_path: Option<&Path>) -> Result<()> {
        let (config, _) = load_config(config_path)?;

        println!(
            "gitsweep v{} | account {} | root {}",
            env!("CARGO_PKG_VERSION"),
            config.account.bold(),
            config.projects_root.display(),
        );

        if config.projects.is_empty() {
            println!("No projects registered.");
            return Ok(());
        }

        let rows: Vec<RegistryRow> = config
            .projects
            .iter()
            .enumerate()
            .map(|(i, project)| RegistryRow {
                index: i + 1,
                directory: config.project_path(project).display().to_string(),
                remote: config.remote_url(&project.remote),
                exists: if config.project_path(project).is_dir() {
                    "yes"
                } else {
                    "no"
                },
            })
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
        Ok(())
    }
}
