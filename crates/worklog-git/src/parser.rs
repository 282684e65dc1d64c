// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Git log parsing utilities
//!
//! This module turns the text printed by
//! `git log --pretty=format:%H|%an|%ad|%s --date=iso --numstat`
//! into [`CommitRecord`] values.
//!
//! The input is a sequence of blocks. Each block starts with a header line
//! (`hash|author|date|subject`) followed by zero or more numstat rows
//! (`added<TAB>deleted<TAB>path`). Binary files report `-` for both counts.

use std::sync::LazyLock;

use chrono::DateTime;
use regex::Regex;
use tracing::{debug, trace};

use crate::commit::CommitRecord;
use crate::error::GitError;

/// `--pretty` format string understood by [`parse_log`]
pub const LOG_FORMAT: &str = "%H|%an|%ad|%s";

/// Layout of the `%ad` field under `--date=iso`
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

static HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9a-f]+)\|(.+)\|(.+)\|(.*)$").expect("valid header regex"));

static DATE_FIELD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\|(\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2} [+-]\d{4})\|").expect("valid date regex")
});

static NUMSTAT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+|-)\s+(\d+|-)\s+(.+)$").expect("valid numstat regex"));

/// Fields of a commit header line, borrowed from the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HeaderFields<'a> {
    id: &'a str,
    author: &'a str,
    date: &'a str,
    message: &'a str,
}

/// Split a header line into its four fields
///
/// The date field is located by its shape, so author names and subjects may
/// contain `|`. Without a well-formed date field the last two segments are
/// taken as date and subject, and the date parse reports the error.
fn split_header(line: &str) -> Option<HeaderFields<'_>> {
    let caps = HEADER_RE.captures(line)?;
    let id = caps.get(1)?.as_str();
    let rest = &line[id.len()..];

    if let Some(date_caps) = DATE_FIELD_RE.captures(rest) {
        let field = date_caps.get(0)?;
        if field.start() > 0 {
            return Some(HeaderFields {
                id,
                author: &rest[1..field.start()],
                date: date_caps.get(1)?.as_str(),
                message: &rest[field.end()..],
            });
        }
    }

    Some(HeaderFields {
        id,
        author: caps.get(2)?.as_str(),
        date: caps.get(3)?.as_str(),
        message: caps.get(4)?.as_str(),
    })
}

/// A numstat row: added, deleted, path
///
/// Counts are `None` for the binary placeholder (or an unrepresentable number).
fn split_numstat(line: &str) -> Option<(Option<u64>, Option<u64>, &str)> {
    let caps = NUMSTAT_RE.captures(line)?;
    let added = caps.get(1)?.as_str().parse().ok();
    let deleted = caps.get(2)?.as_str().parse().ok();
    Some((added, deleted, caps.get(3)?.as_str()))
}

/// Parse raw `git log --numstat` output into commit records
///
/// Records are returned in the order their headers appear. Blank lines are
/// ignored, and lines that are neither a header nor a numstat row are
/// skipped.
///
/// # Errors
///
/// Returns `GitError::InvalidTimestamp` if a header's date field does not
/// match [`DATE_FORMAT`]. The whole parse is aborted in that case.
pub fn parse_log(raw: &str) -> Result<Vec<CommitRecord>, GitError> {
    let mut commits = Vec::new();
    let mut current: Option<CommitRecord> = None;

    for (index, line) in raw.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(header) = split_header(line) {
            let timestamp = DateTime::parse_from_str(header.date, DATE_FORMAT).map_err(|source| {
                GitError::InvalidTimestamp {
                    line: index + 1,
                    value: header.date.to_string(),
                    source,
                }
            })?;

            if let Some(done) = current.take() {
                commits.push(done);
            }
            current = Some(CommitRecord::new(
                header.id,
                header.author,
                timestamp,
                header.message,
            ));
            continue;
        }

        match (current.as_mut(), split_numstat(line)) {
            (Some(commit), Some((added, deleted, path))) => {
                commit.record_file(path, added, deleted);
            }
            _ => trace!(line = index + 1, "skipping unrecognized log line"),
        }
    }

    if let Some(done) = current {
        commits.push(done);
    }

    debug!(commits = commits.len(), "parsed git log");
    Ok(commits)
}
