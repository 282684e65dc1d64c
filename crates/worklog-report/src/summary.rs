// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Report statistics

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};
use worklog_git::CommitRecord;

use crate::period::ReportKind;

/// Maximum number of entries in [`ReportSummary::top_files`]
pub const TOP_FILES_LIMIT: usize = 5;

/// Label for paths without an extension
pub const NO_EXTENSION: &str = "No Extension";

/// A file path and how many commits touched it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFrequency {
    /// File path as reported by git
    pub path: String,
    /// Number of (commit, file) occurrences
    pub count: usize,
}

impl fmt::Display for FileFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.path, self.count)
    }
}

/// Aggregate statistics for a set of commits
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Number of commits
    pub total_commits: usize,
    /// Number of distinct file paths
    pub total_files: usize,
    /// Lines added across all commits
    pub total_additions: u64,
    /// Lines deleted across all commits
    pub total_deletions: u64,
    /// File-type label to (commit, file) occurrence count
    pub file_type_counts: BTreeMap<String, usize>,
    /// `MM-DD` to commit count; weekly reports only
    pub daily_counts: BTreeMap<String, usize>,
    /// Most frequently changed files, most frequent first
    pub top_files: Vec<FileFrequency>,
}

/// Normalize a path to a file-type label
///
/// The extension is the text after the last `.` of the file name, compared
/// case-insensitively. A trailing `.` yields an empty label.
#[must_use]
pub fn file_type_label(path: &str) -> String {
    let file_name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    let Some((_, extension)) = file_name.rsplit_once('.') else {
        return NO_EXTENSION.to_string();
    };
    let extension = extension.to_lowercase();

    let label = match extension.as_str() {
        "js" | "jsx" | "ts" | "tsx" => "JavaScript/TypeScript",
        "go" => "Go",
        "py" => "Python",
        "java" => "Java",
        "cpp" | "cc" | "cxx" | "c" => "C/C++",
        "html" | "htm" => "HTML",
        "css" | "scss" | "sass" => "CSS",
        "md" | "markdown" => "Markdown",
        "json" | "yaml" | "yml" | "xml" => "Config File",
        _ => return extension,
    };
    label.to_string()
}

/// Compute the summary for a report
///
/// Per-day counts are only collected for weekly reports, keyed by each
/// commit's own date.
#[must_use]
pub fn generate_summary(commits: &[CommitRecord], kind: ReportKind) -> ReportSummary {
    let mut summary = ReportSummary::default();
    // Paths in first-seen order, with an index for lookups
    let mut frequencies: Vec<FileFrequency> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for commit in commits {
        summary.total_commits += 1;
        summary.total_additions = summary.total_additions.saturating_add(commit.lines_added);
        summary.total_deletions = summary.total_deletions.saturating_add(commit.lines_deleted);

        if kind == ReportKind::Weekly {
            let day = commit.timestamp.format("%m-%d").to_string();
            *summary.daily_counts.entry(day).or_default() += 1;
        }

        for path in &commit.changed_files {
            match positions.get(path.as_str()) {
                Some(&index) => frequencies[index].count += 1,
                None => {
                    positions.insert(path.as_str(), frequencies.len());
                    frequencies.push(FileFrequency {
                        path: path.clone(),
                        count: 1,
                    });
                }
            }
            *summary
                .file_type_counts
                .entry(file_type_label(path))
                .or_default() += 1;
        }
    }

    summary.total_files = frequencies.len();

    // Stable sort keeps first-seen order among equal counts
    frequencies.sort_by(|a, b| b.count.cmp(&a.count));
    frequencies.truncate(TOP_FILES_LIMIT);
    summary.top_files = frequencies;

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use similar_asserts::assert_eq;

    fn commit(ts: &str, files: &[(&str, Option<u64>, Option<u64>)]) -> CommitRecord {
        let timestamp = DateTime::parse_from_rfc3339(ts).unwrap();
        let mut c = CommitRecord::new("abc12345", "Alice", timestamp, "work");
        for (path, added, deleted) in files {
            c.record_file(*path, *added, *deleted);
        }
        c
    }

    #[test]
    fn test_file_type_labels() {
        let cases = [
            ("src/app.js", "JavaScript/TypeScript"),
            ("ui/View.TSX", "JavaScript/TypeScript"),
            ("main.go", "Go"),
            ("tool.py", "Python"),
            ("App.java", "Java"),
            ("engine.cpp", "C/C++"),
            ("lib.c", "C/C++"),
            ("index.HTM", "HTML"),
            ("theme.scss", "CSS"),
            ("README.md", "Markdown"),
            ("notes.markdown", "Markdown"),
            ("config.yml", "Config File"),
            ("pom.xml", "Config File"),
            ("Makefile", "No Extension"),
            ("bin/run", "No Extension"),
            ("src/lib.RS", "rs"),
            ("archive.tar.gz", "gz"),
            (".gitignore", "gitignore"),
            ("trailing.", ""),
            ("v1.2/LICENSE", "No Extension"),
        ];
        for (path, expected) in cases {
            assert_eq!(file_type_label(path), expected, "label for {path}");
        }
    }

    #[test]
    fn test_totals() {
        let commits = vec![
            commit("2024-01-15T10:00:00+00:00", &[("a.rs", Some(3), Some(1)), ("b.md", Some(2), Some(0))]),
            commit("2024-01-15T12:00:00+00:00", &[("a.rs", Some(5), Some(5)), ("logo.png", None, None)]),
        ];
        let summary = generate_summary(&commits, ReportKind::Daily);

        assert_eq!(summary.total_commits, 2);
        assert_eq!(summary.total_files, 3);
        assert_eq!(summary.total_additions, 10);
        assert_eq!(summary.total_deletions, 6);
        assert_eq!(summary.file_type_counts["rs"], 2);
        assert_eq!(summary.file_type_counts["Markdown"], 1);
        assert_eq!(summary.file_type_counts["png"], 1);
        assert!(summary.daily_counts.is_empty());
    }

    #[test]
    fn test_daily_counts_for_weekly_reports() {
        let commits = vec![
            commit("2024-01-15T10:00:00+08:00", &[]),
            commit("2024-01-15T23:30:00+08:00", &[]),
            commit("2024-01-17T09:00:00+08:00", &[]),
        ];
        let summary = generate_summary(&commits, ReportKind::Weekly);
        assert_eq!(summary.daily_counts.len(), 2);
        assert_eq!(summary.daily_counts["01-15"], 2);
        assert_eq!(summary.daily_counts["01-17"], 1);
    }

    #[test]
    fn test_top_files_sorted_and_limited() {
        let ts = "2024-01-15T10:00:00+00:00";
        let commits = vec![
            commit(ts, &[("a", Some(1), Some(0)), ("b", Some(1), Some(0)), ("c", Some(1), Some(0))]),
            commit(ts, &[("d", Some(1), Some(0)), ("e", Some(1), Some(0)), ("f", Some(1), Some(0))]),
            commit(ts, &[("c", Some(1), Some(0)), ("e", Some(1), Some(0))]),
            commit(ts, &[("e", Some(1), Some(0))]),
        ];
        let summary = generate_summary(&commits, ReportKind::Daily);

        let top: Vec<(&str, usize)> = summary
            .top_files
            .iter()
            .map(|f| (f.path.as_str(), f.count))
            .collect();
        // Ties keep first-seen order: a, b, d before f
        assert_eq!(top, vec![("e", 3), ("c", 2), ("a", 1), ("b", 1), ("d", 1)]);
        assert_eq!(summary.total_files, 6);
    }

    #[test]
    fn test_totals_saturate() {
        let ts = "2024-01-15T10:00:00+00:00";
        let commits = vec![
            commit(ts, &[("a.rs", Some(u64::MAX), Some(1))]),
            commit(ts, &[("b.rs", Some(7), Some(u64::MAX))]),
        ];
        let summary = generate_summary(&commits, ReportKind::Daily);
        assert_eq!(summary.total_additions, u64::MAX);
        assert_eq!(summary.total_deletions, u64::MAX);
    }

    #[test]
    fn test_file_frequency_display() {
        let entry = FileFrequency {
            path: "src/main.rs".to_string(),
            count: 4,
        };
        assert_eq!(entry.to_string(), "src/main.rs (4)");
    }

    #[test]
    fn test_empty_summary() {
        let summary = generate_summary(&[], ReportKind::Weekly);
        assert_eq!(summary, ReportSummary::default());
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use chrono::DateTime;
    use proptest::prelude::*;

    fn commits_strategy() -> impl Strategy<Value = Vec<CommitRecord>> {
        proptest::collection::vec(
            proptest::collection::vec(("[a-h]\\.(rs|go|md)", 0u64..100), 0..6),
            0..12,
        )
        .prop_map(|commits| {
            let timestamp = DateTime::parse_from_rfc3339("2024-01-15T10:00:00+00:00").unwrap();
            commits
                .into_iter()
                .enumerate()
                .map(|(i, files)| {
                    let mut c = CommitRecord::new(format!("{i:08x}"), "Alice", timestamp, "work");
                    for (path, added) in files {
                        c.record_file(path, Some(added), Some(0));
                    }
                    c
                })
                .collect()
        })
    }

    proptest! {
        /// Property: top_files has at most 5 entries in descending order
        #[test]
        fn prop_top_files_bounded_and_sorted(commits in commits_strategy()) {
            let summary = generate_summary(&commits, ReportKind::Daily);
            prop_assert!(summary.top_files.len() <= TOP_FILES_LIMIT);
            for pair in summary.top_files.windows(2) {
                prop_assert!(pair[0].count >= pair[1].count);
            }
        }

        /// Property: file-type counts add up to the number of file entries
        #[test]
        fn prop_file_type_counts_cover_every_entry(commits in commits_strategy()) {
            let summary = generate_summary(&commits, ReportKind::Daily);
            let entries: usize = commits.iter().map(CommitRecord::file_count).sum();
            prop_assert_eq!(summary.file_type_counts.values().sum::<usize>(), entries);
            prop_assert_eq!(
                summary.total_additions,
                commits.iter().map(|c| c.lines_added).sum::<u64>()
            );
        }
    }
}
