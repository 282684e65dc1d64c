// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for worklog-report

use thiserror::Error;
use worklog_git::GitError;

/// Errors from loading or evaluating a report template
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The template file could not be read
    #[error("Failed to read template {path}: {source}")]
    Read {
        /// Path of the template file
        path: String,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The template text is not valid template syntax
    #[error("Template syntax error: {0}")]
    Syntax(#[source] minijinja::Error),

    /// Evaluation failed, e.g. an unknown field or a misused helper
    #[error("Template render error: {0}")]
    Render(#[source] minijinja::Error),
}

impl TemplateError {
    /// Classify a minijinja error raised while rendering a template string
    pub(crate) fn from_minijinja(err: minijinja::Error) -> Self {
        match err.kind() {
            minijinja::ErrorKind::SyntaxError => Self::Syntax(err),
            _ => Self::Render(err),
        }
    }
}

/// Errors that can occur while producing a report
#[derive(Debug, Error)]
pub enum ReportError {
    /// Querying or parsing history failed
    #[error(transparent)]
    Git(#[from] GitError),

    /// Rendering the report failed
    #[error(transparent)]
    Template(#[from] TemplateError),
}
