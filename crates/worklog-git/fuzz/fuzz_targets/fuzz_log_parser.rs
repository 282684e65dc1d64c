#![no_main]

use libfuzzer_sys::fuzz_target;
use worklog_git::parse_log;

fuzz_target!(|data: &[u8]| {
    if let Ok(raw) = std::str::from_utf8(data)
        && let Ok(commits) = parse_log(raw)
    {
        for commit in &commits {
            assert!(commit.short_id().len() <= commit.id.len());
        }
    }
});
