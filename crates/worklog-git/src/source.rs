// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Commit history sources
//!
//! [`HistorySource`] is the read-only seam between report generation and
//! git. [`GitCli`] is the production implementation: history comes from the
//! `git` executable (parsed by [`parse_log`]) and repository metadata comes
//! from `git2`.

use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::{DateTime, FixedOffset};
use git2::Repository;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::commit::CommitRecord;
use crate::error::GitError;
use crate::parser::{LOG_FORMAT, parse_log};

/// Time window and author filter for a history query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogQuery {
    /// Earliest commit time, inclusive
    pub since: DateTime<FixedOffset>,
    /// Latest commit time, inclusive
    pub until: DateTime<FixedOffset>,
    /// Author pattern passed to `git log --author`
    pub author: Option<String>,
}

impl LogQuery {
    /// Create a query for all authors
    #[must_use]
    pub fn new(since: DateTime<FixedOffset>, until: DateTime<FixedOffset>) -> Self {
        Self {
            since,
            until,
            author: None,
        }
    }

    /// Restrict the query to an author; blank names mean all authors
    #[must_use]
    pub fn with_author(mut self, author: &str) -> Self {
        let author = author.trim();
        self.author = (!author.is_empty()).then(|| author.to_string());
        self
    }

    /// Arguments for `git log`
    #[must_use]
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            "log".to_string(),
            format!("--pretty=format:{LOG_FORMAT}"),
            "--date=iso".to_string(),
            "--numstat".to_string(),
            format!("--since={}", self.since.format("%Y-%m-%d %H:%M:%S %z")),
            format!("--until={}", self.until.format("%Y-%m-%d %H:%M:%S %z")),
        ];
        if let Some(ref author) = self.author {
            args.push(format!("--author={author}"));
        }
        args
    }
}

/// Repository facts shown in report headers
///
/// Every field is best effort; missing values are omitted when serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryMetadata {
    /// Repository name derived from the `origin` URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// URL of the `origin` remote
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Currently checked-out branch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
}

impl RepositoryMetadata {
    /// Build metadata from a remote URL, deriving the repository name
    #[must_use]
    pub fn from_remote_url(url: &str) -> Self {
        Self {
            name: repository_name(url),
            url: Some(url.to_string()),
            branch: None,
        }
    }
}

/// Derive a repository name from a remote URL
///
/// Takes the last `/`-separated segment and strips a trailing `.git`.
#[must_use]
pub fn repository_name(url: &str) -> Option<String> {
    let last = url.trim().trim_end_matches('/').rsplit('/').next()?;
    let name = last.strip_suffix(".git").unwrap_or(last);
    (!name.is_empty()).then(|| name.to_string())
}

/// A read-only source of commit history
pub trait HistorySource {
    /// Raw `git log --numstat` text for the query
    ///
    /// # Errors
    ///
    /// Returns `GitError` if the history cannot be queried.
    fn log(&self, query: &LogQuery) -> Result<String, GitError>;

    /// The configured author identity, if any
    fn current_user(&self) -> Option<String>;

    /// Best-effort repository metadata
    fn repository_metadata(&self) -> RepositoryMetadata;

    /// Parsed commits for the query, in the order git returned them
    ///
    /// # Errors
    ///
    /// Returns `GitError` if the query fails or the output cannot be parsed.
    fn commits(&self, query: &LogQuery) -> Result<Vec<CommitRecord>, GitError> {
        parse_log(&self.log(query)?)
    }
}

/// History source backed by the `git` executable
pub struct GitCli {
    repo: Repository,
    workdir: PathBuf,
}

impl GitCli {
    /// Open the git repository at the given path
    ///
    /// # Errors
    ///
    /// Returns `GitError::RepositoryNotFound` if the path is not a git repository.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, GitError> {
        let path = path.as_ref();
        let repo = Repository::open(path).map_err(|_| GitError::RepositoryNotFound {
            path: path.display().to_string(),
        })?;
        Ok(Self {
            repo,
            workdir: path.to_path_buf(),
        })
    }

    /// Check whether a path holds a git repository without keeping it open
    #[must_use]
    pub fn is_repository(path: impl AsRef<Path>) -> bool {
        Repository::open(path.as_ref()).is_ok()
    }

    /// The directory git commands run in
    #[must_use]
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn run_git(&self, args: &[String]) -> Result<String, GitError> {
        let command = format!("git {}", args.join(" "));
        debug!(%command, dir = %self.workdir.display(), "running git");

        let output = Command::new("git")
            .current_dir(&self.workdir)
            .args(args)
            .output()
            .map_err(|source| GitError::Invocation {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command,
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn current_branch(&self) -> Option<String> {
        let head = self.repo.head().ok()?;
        if !head.is_branch() {
            return None;
        }
        head.shorthand().map(str::to_string)
    }
}

impl HistorySource for GitCli {
    fn log(&self, query: &LogQuery) -> Result<String, GitError> {
        self.run_git(&query.to_args())
    }

    fn current_user(&self) -> Option<String> {
        let name = self
            .repo
            .config()
            .and_then(|config| config.get_string("user.name"));
        match name {
            Ok(name) if !name.trim().is_empty() => Some(name.trim().to_string()),
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, "no git user.name configured");
                None
            }
        }
    }

    fn repository_metadata(&self) -> RepositoryMetadata {
        let mut metadata = self
            .repo
            .find_remote("origin")
            .ok()
            .and_then(|remote| remote.url().map(RepositoryMetadata::from_remote_url))
            .unwrap_or_default();
        metadata.branch = self.current_branch();
        metadata
    }
}
