// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Report assembly
//!
//! [`ReportGenerator`] resolves the reporting window, asks a
//! [`HistorySource`] for the commits inside it and derives the summary and
//! categories from them.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, Local, NaiveDate, TimeZone, Utc};
use serde::Serialize;
use tracing::{debug, info};
use worklog_git::{CommitRecord, GitError, HistorySource, RepositoryMetadata};

use crate::category::{Category, categorize_commits};
use crate::period::{ReportKind, ReportPeriod};
use crate::summary::{ReportSummary, generate_summary};

/// Aggregated view of one reporting period
///
/// This is the context templates are rendered against.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Daily or weekly
    pub kind: ReportKind,
    /// The reference date the report was requested for
    pub date: NaiveDate,
    /// Human-readable description of the window
    pub period: String,
    /// The resolved window
    pub window: ReportPeriod,
    /// Author filter applied; empty means all authors
    pub author: String,
    /// Best-effort repository facts
    pub repository: RepositoryMetadata,
    /// Commits in the order the source returned them
    pub commits: Vec<CommitRecord>,
    /// Derived statistics
    pub summary: ReportSummary,
    /// Commits grouped by category; empty categories are absent
    pub categories: BTreeMap<Category, Vec<CommitRecord>>,
    /// When the report was built
    pub generated_at: DateTime<FixedOffset>,
}

/// Builds reports from a history source
pub struct ReportGenerator<S> {
    source: S,
    author: Option<String>,
}

impl<S: HistorySource> ReportGenerator<S> {
    /// Create a generator
    ///
    /// A missing or blank `author` falls back to the identity configured in
    /// the source; if there is none, every author is included.
    pub fn new(source: S, author: Option<String>) -> Self {
        let author = author
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .or_else(|| source.current_user());
        debug!(author = author.as_deref().unwrap_or("<all>"), "resolved author filter");
        Self { source, author }
    }

    /// The author filter in effect, if any
    #[must_use]
    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    /// The underlying history source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Generate a report for `date` interpreted in the local timezone
    ///
    /// # Errors
    ///
    /// Returns `GitError` if the history cannot be queried or parsed.
    pub fn generate(&self, kind: ReportKind, date: NaiveDate) -> Result<Report, GitError> {
        self.generate_in(kind, date, &Local)
    }

    /// Generate a daily report in the local timezone
    ///
    /// # Errors
    ///
    /// Returns `GitError` if the history cannot be queried or parsed.
    pub fn daily(&self, date: NaiveDate) -> Result<Report, GitError> {
        self.generate(ReportKind::Daily, date)
    }

    /// Generate a weekly report in the local timezone
    ///
    /// # Errors
    ///
    /// Returns `GitError` if the history cannot be queried or parsed.
    pub fn weekly(&self, date: NaiveDate) -> Result<Report, GitError> {
        self.generate(ReportKind::Weekly, date)
    }

    /// Generate a report for `date` interpreted in `tz`
    ///
    /// # Errors
    ///
    /// Returns `GitError` if the history cannot be queried or parsed.
    pub fn generate_in<Tz: TimeZone>(
        &self,
        kind: ReportKind,
        date: NaiveDate,
        tz: &Tz,
    ) -> Result<Report, GitError> {
        let window = ReportPeriod::resolve(kind, date, tz);
        let mut query = window.to_query();
        if let Some(ref author) = self.author {
            query = query.with_author(author);
        }

        let commits = self.source.commits(&query)?;
        let summary = generate_summary(&commits, kind);
        let categories = categorize_commits(&commits);
        let period = window.description();

        info!(
            %kind,
            %period,
            commits = commits.len(),
            files = summary.total_files,
            "generated report"
        );

        Ok(Report {
            kind,
            date,
            period,
            window,
            author: self.author.clone().unwrap_or_default(),
            repository: self.source.repository_metadata(),
            commits,
            summary,
            categories,
            generated_at: Utc::now().with_timezone(tz).fixed_offset(),
        })
    }
}
