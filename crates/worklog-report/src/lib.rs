// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! worklog-report: Commit aggregation and report rendering for worklog
//!
//! This library crate turns commit history into daily or weekly reports:
//! it resolves the reporting window, summarizes and categorizes the commits
//! and renders the result through a template.

#![warn(missing_docs)]

//! # Example
//!
//! ```no_run
//! use chrono::Local;
//! use worklog_git::GitCli;
//! use worklog_report::{ReportGenerator, ReportKind, render};
//!
//! let source = GitCli::open(".").expect("open repo");
//! let generator = ReportGenerator::new(source, None);
//! let report = generator
//!     .generate(ReportKind::Weekly, Local::now().date_naive())
//!     .expect("generate report");
//!
//! println!("{}", render(&report, None).expect("render report"));
//! ```

pub mod category;
pub mod error;
pub mod period;
pub mod render;
pub mod report;
pub mod summary;

pub use category::{Category, categorize_commit, categorize_commits};
pub use error::{ReportError, TemplateError};
pub use period::{ParseReportKindError, ReportKind, ReportPeriod};
pub use render::{Renderer, render};
pub use report::{Report, ReportGenerator};
pub use summary::{FileFrequency, ReportSummary, TOP_FILES_LIMIT, generate_summary};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::category::Category;
    pub use crate::error::{ReportError, TemplateError};
    pub use crate::period::{ReportKind, ReportPeriod};
    pub use crate::render::{Renderer, render};
    pub use crate::report::{Report, ReportGenerator};
    pub use crate::summary::ReportSummary;
}
