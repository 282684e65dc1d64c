// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! worklog: daily and weekly work reports from git history
//!
//! Prints a report for the configured repository, or serves reports over
//! HTTP with the `serve` subcommand.

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use worklog::cli;
use worklog::config::{Command, Config};
use worklog::optimize::Optimizer;
use worklog::server::ReportServer;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    // Logs go to stderr; stdout carries the report
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(config.log_level().into()))
        .init();

    config.validate()?;

    match config.command {
        Some(Command::Serve { port, bind }) => {
            let optimizer = Optimizer::new(config.optimizer_config())
                .context("Failed to set up the optimization client")?;
            let server = ReportServer::new(optimizer, config.template.clone());
            let listener = TcpListener::bind((bind, port))
                .await
                .with_context(|| format!("Failed to bind {bind}:{port}"))?;
            server.serve(listener).await.context("Server error")
        }
        None => cli::run_report(&config).await,
    }
}
