// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! worklog-git: Git history querying and log parsing for worklog
//!
//! This library crate runs `git log --numstat` against a repository and
//! parses its output into [`CommitRecord`] values for report generation.

#![warn(missing_docs)]

//! # Example
//!
//! ```no_run
//! use chrono::DateTime;
//! use worklog_git::{GitCli, HistorySource, LogQuery};
//!
//! let repo = GitCli::open(".").expect("open repo");
//! let since = DateTime::parse_from_rfc3339("2024-01-15T00:00:00+00:00").unwrap();
//! let until = DateTime::parse_from_rfc3339("2024-01-15T23:59:59+00:00").unwrap();
//! let commits = repo.commits(&LogQuery::new(since, until)).expect("query history");
//!
//! for c in commits {
//!     println!("{} - {}", c.short_id(), c.message);
//! }
//! ```

pub mod commit;
pub mod error;
pub mod parser;
pub mod source;

pub use commit::CommitRecord;
pub use error::GitError;
pub use parser::parse_log;
pub use source::{GitCli, HistorySource, LogQuery, RepositoryMetadata};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::commit::CommitRecord;
    pub use crate::error::GitError;
    pub use crate::parser::parse_log;
    pub use crate::source::{GitCli, HistorySource, LogQuery, RepositoryMetadata};
}
