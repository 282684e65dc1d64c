//! Commit categorization by message keywords

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use worklog_git::CommitRecord;

/// The bucket a commit is reported under
///
/// Variants are ordered by matching priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    /// New functionality
    #[serde(rename = "Feature")]
    Feature,
    /// Bug fixes
    #[serde(rename = "Bug Fix")]
    BugFix,
    /// Restructuring without behavior change
    #[serde(rename = "Refactor")]
    Refactor,
    /// Documentation changes
    #[serde(rename = "Documentation")]
    Documentation,
    /// Test changes
    #[serde(rename = "Testing")]
    Testing,
    /// Configuration changes
    #[serde(rename = "Configuration")]
    Configuration,
    /// Anything else
    #[serde(rename = "Other")]
    Other,
}

impl Category {
    /// Categories in matching priority order
    pub const ALL: [Category; 7] = [
        Self::Feature,
        Self::BugFix,
        Self::Refactor,
        Self::Documentation,
        Self::Testing,
        Self::Configuration,
        Self::Other,
    ];

    /// Display label
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Feature => "Feature",
            Self::BugFix => "Bug Fix",
            Self::Refactor => "Refactor",
            Self::Documentation => "Documentation",
            Self::Testing => "Testing",
            Self::Configuration => "Configuration",
            Self::Other => "Other",
        }
    }

    /// Lowercase substrings that select this category
    #[must_use]
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Feature => &["feat", "feature", "add", "新增", "功能"],
            Self::BugFix => &["fix", "bug", "修复", "修正"],
            Self::Refactor => &["refactor", "重构"],
            Self::Documentation => &["doc", "readme", "文档"],
            Self::Testing => &["test", "测试"],
            Self::Configuration => &["config", "配置"],
            Self::Other => &[],
        }
    }

    /// Pick the first category whose keywords appear in the message
    #[must_use]
    pub fn classify(message: &str) -> Self {
        let message = message.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| {
                category
                    .keywords()
                    .iter()
                    .any(|keyword| message.contains(keyword))
            })
            .unwrap_or(Self::Other)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Category of a single commit
#[must_use]
pub fn categorize_commit(commit: &CommitRecord) -> Category {
    Category::classify(&commit.message)
}

/// Group commits by category, keeping their original order in each bucket
///
/// Categories without commits are absent from the map.
#[must_use]
pub fn categorize_commits(commits: &[CommitRecord]) -> BTreeMap<Category, Vec<CommitRecord>> {
    let mut categories: BTreeMap<Category, Vec<CommitRecord>> = BTreeMap::new();
    for commit in commits {
        categories
            .entry(categorize_commit(commit))
            .or_default()
            .push(commit.clone());
    }
    categories
}
