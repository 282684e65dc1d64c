// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Test utilities for worklog integration tests
//!
//! Scaffolds throwaway git repositories with the `git` CLI so history
//! queries run against real commits.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicU32, Ordering};

/// Counter for generating unique repository directory names
static REPO_COUNTER: AtomicU32 = AtomicU32::new(0);

/// A temporary git repository on branch `main`, removed on drop
///
/// The configured identity is `Test Author <test@example.com>`.
pub struct TestGitRepo {
    path: PathBuf,
}

impl TestGitRepo {
    /// Create and initialize a new repository
    pub fn new(test_name: &str) -> Self {
        let counter = REPO_COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!(
            "worklog-test-{}-{}-{}",
            test_name,
            std::process::id(),
            counter
        ));
        fs::create_dir_all(&path).expect("Failed to create temp repo directory");

        let repo = Self { path };
        repo.git(&["init", "--quiet"]);
        repo.git(&["symbolic-ref", "HEAD", "refs/heads/main"]);
        repo.git(&["config", "user.email", "test@example.com"]);
        repo.git(&["config", "user.name", "Test Author"]);
        repo.git(&["config", "commit.gpgsign", "false"]);
        repo
    }

    /// Get the path to the repository
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run a git command in the repository
    pub fn git(&self, args: &[&str]) {
        run_git(&self.path, args, &[]);
    }

    /// Write a file and stage it
    pub fn write(&self, relative_path: &str, content: &[u8]) {
        let file_path = self.path.join(relative_path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&file_path, content).expect("Failed to write file");
        self.git(&["add", relative_path]);
    }

    /// Commit staged changes with a fixed author and author/committer date
    pub fn commit_at(&self, message: &str, author: &str, date: &str) {
        run_git(
            &self.path,
            &[
                "commit",
                "--quiet",
                "--allow-empty",
                "--author",
                &format!(
                    "{author} <{}@example.com>",
                    author.replace(' ', ".").to_lowercase()
                ),
                "-m",
                message,
            ],
            &[("GIT_AUTHOR_DATE", date), ("GIT_COMMITTER_DATE", date)],
        );
    }
}

impl Drop for TestGitRepo {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// Run a git command, panicking with its stderr on failure
pub fn run_git(dir: &Path, args: &[&str], envs: &[(&str, &str)]) {
    let output = Command::new("git")
        .current_dir(dir)
        .args(args)
        .envs(envs.iter().copied())
        .output()
        .expect("Failed to run git command");

    if !output.status.success() {
        panic!(
            "Git command failed: git {}\nstderr: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
    }
}
