//! Level filtering specs
//!
//! Entries below the threshold never touch the disk.

use crate::prelude::*;
use proptest::prelude::*;

#[test]
fn below_threshold_entries_add_no_bytes() {
    let dir = LogDir::new();
    let writer = dir.writer("app", LogLevel::Warn, 1024);
    writer.log(LogLevel::Error, "kept");
    let before = dir.size("app.log");

    writer.log(LogLevel::Info, "dropped");
    writer.log(LogLevel::Debug, "dropped");
    writer.log_as("other", LogLevel::Trace, "dropped");

    assert_eq!(dir.size("app.log"), before);
}

#[test]
fn threshold_is_inclusive() {
    let dir = LogDir::new();
    let writer = dir.writer("app", LogLevel::Info, 1024);

    writer.log(LogLevel::Info, "at threshold");

    assert_eq!(dir.lines("app.log").len(), 1);
}

#[test]
fn writer_that_never_logs_creates_no_file() {
    let dir = LogDir::new();
    let writer = dir.writer("app", LogLevel::Error, 1024);

    writer.log(LogLevel::Warn, "filtered");

    assert!(!dir.exists("app.log"));
    assert_eq!(writer.diagnostics().state, FileState::Uninitialized);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn line_count_matches_passing_levels(
        threshold in 0usize..5,
        levels in prop::collection::vec(0usize..5, 1..30),
    ) {
        let dir = LogDir::new();
        let threshold = LogLevel::ALL[threshold];
        let writer = dir.writer("app", threshold, 0);

        for &i in &levels {
            writer.log(LogLevel::ALL[i], "entry");
        }

        let expected = levels
            .iter()
            .filter(|&&i| LogLevel::ALL[i] <= threshold)
            .count();
        prop_assert_eq!(dir.lines("app.log").len(), expected);
    }
}
