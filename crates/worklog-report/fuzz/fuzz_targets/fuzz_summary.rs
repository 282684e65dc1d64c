#![no_main]

use libfuzzer_sys::fuzz_target;
use worklog_git::parse_log;
use worklog_report::{ReportKind, TOP_FILES_LIMIT, categorize_commits, generate_summary};

fuzz_target!(|data: &[u8]| {
    let Ok(raw) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(commits) = parse_log(raw) else {
        return;
    };

    let summary = generate_summary(&commits, ReportKind::Weekly);
    assert_eq!(summary.total_commits, commits.len());
    assert!(summary.top_files.len() <= TOP_FILES_LIMIT);
    assert!(summary.top_files.windows(2).all(|w| w[0].count >= w[1].count));

    let bucketed: usize = categorize_commits(&commits).values().map(Vec::len).sum();
    assert_eq!(bucketed, commits.len());
});
