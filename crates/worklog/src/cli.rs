// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! The report command: generate, render, optionally optimize, then write

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;
use worklog_git::GitCli;
use worklog_report::{ReportGenerator, render};

use crate::config::Config;
use crate::optimize::Optimizer;

/// Generate and render the report described by `config`
///
/// # Errors
///
/// Returns an error if the repository cannot be opened, its history cannot
/// be read, or the template fails.
pub fn build_report(config: &Config) -> Result<String> {
    let repo = config.repo_path();
    let date = config.report_date();

    let source = GitCli::open(&repo)
        .with_context(|| format!("Failed to open repository {}", repo.display()))?;
    let generator = ReportGenerator::new(source, config.author.clone());
    let report = generator
        .generate(config.kind, date)
        .with_context(|| format!("Failed to generate {} report for {date}", config.kind))?;

    render(&report, config.template_path()).context("Failed to render report")
}

/// Run the report command end to end
///
/// # Errors
///
/// Returns an error if any step fails; nothing is written in that case.
pub async fn run_report(config: &Config) -> Result<()> {
    let mut content = build_report(config)?;

    if config.optimize {
        let optimizer = Optimizer::new(config.optimizer_config())
            .context("Failed to set up the optimization client")?;
        content = optimizer
            .optimize(&content)
            .await
            .context("Failed to optimize report")?;
    }

    write_output(&content, config.output.as_deref())
}

/// Write report text to a file, or to standard output when `output` is `None`
///
/// # Errors
///
/// Returns an error if the file or standard output cannot be written.
pub fn write_output(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            info!(path = %path.display(), "report saved");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
