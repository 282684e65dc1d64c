//! Commit records produced by the log parser

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Length of the abbreviated commit id used in reports
pub const SHORT_ID_LEN: usize = 8;

/// A single commit as reported by `git log --numstat`
///
/// The timestamp keeps the offset git printed; it is never normalized to UTC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// The commit hash
    pub id: String,
    /// Author name
    pub author: String,
    /// Author date with its original offset
    pub timestamp: DateTime<FixedOffset>,
    /// Subject line
    pub message: String,
    /// Touched paths, in the order git listed them
    pub changed_files: Vec<String>,
    /// Lines added across all files
    pub lines_added: u64,
    /// Lines deleted across all files
    pub lines_deleted: u64,
}

impl CommitRecord {
    /// Create a record with no file statistics yet
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        author: impl Into<String>,
        timestamp: DateTime<FixedOffset>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            author: author.into(),
            timestamp,
            message: message.into(),
            changed_files: Vec::new(),
            lines_added: 0,
            lines_deleted: 0,
        }
    }

    /// Get the abbreviated id (first 8 characters, or the whole id if shorter)
    #[must_use]
    pub fn short_id(&self) -> &str {
        short_id(&self.id)
    }

    /// Number of file entries recorded for this commit
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.changed_files.len()
    }

    /// Record one numstat row
    ///
    /// `None` counts come from binary files; the path is still recorded.
    /// Totals saturate at `u64::MAX`.
    pub fn record_file(&mut self, path: impl Into<String>, added: Option<u64>, deleted: Option<u64>) {
        self.lines_added = self.lines_added.saturating_add(added.unwrap_or(0));
        self.lines_deleted = self.lines_deleted.saturating_add(deleted.unwrap_or(0));
        self.changed_files.push(path.into());
    }
}

/// Abbreviate a commit id to [`SHORT_ID_LEN`] characters
#[must_use]
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(SHORT_ID_LEN) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}
