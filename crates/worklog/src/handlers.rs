// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Request handlers for the HTTP surface
//!
//! Handlers take typed inputs parsed from request bodies and return typed
//! outputs; the server module owns routing and transport.

use std::path::{Path, PathBuf};

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};
use worklog_git::GitCli;
use worklog_report::{ReportError, ReportGenerator, ReportKind, render};

use crate::optimize::{OptimizeError, Optimizer};

// ============================================================================
// Error Types
// ============================================================================

/// Handler errors
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Malformed or missing input
    #[error("{0}")]
    InvalidInput(String),

    /// The repository path does not exist
    #[error("Repository path does not exist: {0}")]
    RepositoryNotFound(String),

    /// The path exists but holds no git repository
    #[error("Path is not a Git repository: {0}")]
    NotARepository(String),

    /// Report generation or rendering failed
    #[error("Failed to generate report: {0}")]
    Report(#[from] ReportError),

    /// The optimization service failed
    #[error("Failed to optimize report: {0}")]
    Optimize(#[from] OptimizeError),

    /// The blocking report task panicked or was cancelled
    #[error("Report task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl HandlerError {
    /// HTTP status for this error: 400 for bad input, 500 otherwise
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) | Self::RepositoryNotFound(_) | Self::NotARepository(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Report(_) | Self::Optimize(_) | Self::Task(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Error body returned for every failed request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message
    pub error: String,
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warn!(error = %self, "request failed");
        }
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

// ============================================================================
// Input / Output Types
// ============================================================================

/// Body of `POST /api/generate-report`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReportInput {
    /// Repository to report on
    #[serde(default)]
    pub repo_path: String,
    /// `daily` or `weekly`; daily when absent
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// `YYYY-MM-DD`; today when absent or empty
    #[serde(default)]
    pub date: Option<String>,
    /// Author filter; the repository's configured user when absent
    #[serde(default)]
    pub author: Option<String>,
}

/// Body of a successful `POST /api/generate-report`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateReportOutput {
    /// Rendered report
    pub content: String,
    /// Kind of report generated
    #[serde(rename = "type")]
    pub kind: ReportKind,
    /// Reference date, `YYYY-MM-DD`
    pub date: String,
}

/// Body of `POST /api/optimize-report`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OptimizeReportInput {
    /// Report text to rewrite
    #[serde(default)]
    pub content: String,
}

/// Body of a successful `POST /api/optimize-report`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeReportOutput {
    /// Rewritten report text
    pub optimized_content: String,
}

/// Body of `GET /api/health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `ok`
    pub status: String,
}

/// A generate request that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    /// Repository root
    pub repo: PathBuf,
    /// Kind of report
    pub kind: ReportKind,
    /// Reference date
    pub date: NaiveDate,
    /// Author filter as given
    pub author: Option<String>,
}

// ============================================================================
// Handler Functions
// ============================================================================

/// Parse a JSON request body into a typed input
///
/// # Errors
///
/// Returns `HandlerError::InvalidInput` if the body is not valid JSON for `T`.
pub fn parse_input<T: for<'de> Deserialize<'de>>(body: &[u8]) -> Result<T, HandlerError> {
    serde_json::from_slice(body)
        .map_err(|e| HandlerError::InvalidInput(format!("Invalid JSON format: {e}")))
}

/// Parse a `YYYY-MM-DD` date; empty means today in local time
///
/// # Errors
///
/// Returns `HandlerError::InvalidInput` if the date is malformed.
pub fn parse_date(date: Option<&str>) -> Result<NaiveDate, HandlerError> {
    match date.map(str::trim) {
        None | Some("") => Ok(Local::now().date_naive()),
        Some(date) => NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|e| HandlerError::InvalidInput(format!("Invalid date format: {e}"))),
    }
}

/// Check a generate request in the order a caller can fix it
///
/// # Errors
///
/// Returns `HandlerError` for an empty or missing repository path, a path
/// without a git repository, a malformed date, or an unknown report type.
pub fn validate_generate_input(input: &GenerateReportInput) -> Result<ValidatedRequest, HandlerError> {
    let repo_path = input.repo_path.trim();
    if repo_path.is_empty() {
        return Err(HandlerError::InvalidInput(
            "Repository path is required".to_string(),
        ));
    }

    let repo = PathBuf::from(repo_path);
    if !repo.exists() {
        return Err(HandlerError::RepositoryNotFound(repo_path.to_string()));
    }
    if !GitCli::is_repository(&repo) {
        return Err(HandlerError::NotARepository(repo_path.to_string()));
    }

    let date = parse_date(input.date.as_deref())?;
    let kind = match input.kind.as_deref().map(str::trim) {
        None | Some("") => ReportKind::default(),
        Some(kind) => kind
            .parse::<ReportKind>()
            .map_err(|e| HandlerError::InvalidInput(e.to_string()))?,
    };

    Ok(ValidatedRequest {
        repo,
        kind,
        date,
        author: input.author.clone(),
    })
}

/// Generate and render a report
///
/// Runs git synchronously; call it from a blocking context.
///
/// # Errors
///
/// Returns `HandlerError` if validation, generation or rendering fails.
pub fn generate_report(
    input: &GenerateReportInput,
    template: Option<&Path>,
) -> Result<GenerateReportOutput, HandlerError> {
    let request = validate_generate_input(input)?;

    let source = GitCli::open(&request.repo).map_err(ReportError::from)?;
    let report = ReportGenerator::new(source, request.author)
        .generate(request.kind, request.date)
        .map_err(ReportError::from)?;
    let content = render(&report, template).map_err(ReportError::from)?;

    info!(
        repo = %request.repo.display(),
        kind = %request.kind,
        commits = report.commits.len(),
        "served report"
    );

    Ok(GenerateReportOutput {
        content,
        kind: request.kind,
        date: request.date.format("%Y-%m-%d").to_string(),
    })
}

/// Rewrite report text with the optimization service
///
/// # Errors
///
/// Returns `HandlerError::InvalidInput` for empty content and
/// `HandlerError::Optimize` if the service fails.
pub async fn optimize_report(
    optimizer: &Optimizer,
    input: OptimizeReportInput,
) -> Result<OptimizeReportOutput, HandlerError> {
    if input.content.trim().is_empty() {
        return Err(HandlerError::InvalidInput("Content is required".to_string()));
    }
    let optimized_content = optimizer.optimize(&input.content).await?;
    Ok(OptimizeReportOutput { optimized_content })
}

/// Liveness probe
#[must_use]
pub fn health() -> HealthResponse {
    HealthResponse {
        status: "ok".to_string(),
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: every calendar date is accepted in YYYY-MM-DD form
        #[test]
        fn prop_parse_date_accepts_iso_dates(offset in 0i64..40_000) {
            let date = NaiveDate::from_ymd_opt(1970, 1, 1).expect("valid date")
                + chrono::TimeDelta::days(offset);
            let parsed = parse_date(Some(&date.format("%Y-%m-%d").to_string()));
            prop_assert_eq!(parsed.ok(), Some(date));
        }

        /// Property: arbitrary bodies never panic the parser
        #[test]
        fn prop_parse_input_never_panics(body in proptest::collection::vec(any::<u8>(), 0..256)) {
            let _ = parse_input::<GenerateReportInput>(&body);
        }

        /// Property: unknown report types are rejected as bad input
        #[test]
        fn prop_unknown_types_are_bad_requests(kind in "[a-z]{1,12}") {
            prop_assume!(kind != "daily" && kind != "weekly");
            let input = GenerateReportInput {
                repo_path: ".".to_string(),
                kind: Some(kind),
                date: Some("2024-01-15".to_string()),
                author: None,
            };
            if let Err(err) = validate_generate_input(&input) {
                prop_assert_eq!(err.status(), StatusCode::BAD_REQUEST);
            }
        }
    }
}
