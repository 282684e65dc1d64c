// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for worklog-git

use thiserror::Error;

/// Errors that can occur while querying or parsing git history
#[derive(Debug, Error)]
pub enum GitError {
    /// Repository not found at the specified path
    #[error("Repository not found: {path}")]
    RepositoryNotFound {
        /// The path that was searched for a repository
        path: String,
    },

    /// The git executable could not be started
    #[error("Failed to run `{command}`: {source}")]
    Invocation {
        /// The command line that was attempted
        command: String,
        /// The underlying spawn error
        #[source]
        source: std::io::Error,
    },

    /// The git executable exited with a non-zero status
    #[error("`{command}` exited with {}: {stderr}", describe_status(.status))]
    CommandFailed {
        /// The command line that failed
        command: String,
        /// Exit code, if the process was not killed by a signal
        status: Option<i32>,
        /// Captured standard error, trimmed
        stderr: String,
    },

    /// A commit header carried a date that does not match the log format
    #[error("Invalid commit timestamp '{value}' on line {line}: {source}")]
    InvalidTimestamp {
        /// 1-based line number in the raw log
        line: usize,
        /// The offending date field
        value: String,
        /// The chrono parse failure
        #[source]
        source: chrono::ParseError,
    },
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}
