//! Degraded-state specs
//!
//! Filesystem failures never escape `log`, are reported through
//! diagnostics and are retried at most once per backoff interval.

use crate::prelude::*;
use std::time::Duration;

fn blocked_options(dir: &LogDir) -> FileLoggerOptions {
    std::fs::write(dir.file("blocker"), "not a directory").unwrap();
    FileLoggerOptions {
        retry_backoff: Duration::from_secs(30),
        ..FileLoggerOptions::new(dir.file("blocker").join("logs"))
    }
}

#[test]
fn create_failure_degrades_without_panicking() {
    let dir = LogDir::new();
    let writer = FileLogWriter::new("app", LogLevel::Info, blocked_options(&dir), None);

    writer.log(LogLevel::Error, "lost");

    let diag = writer.diagnostics();
    assert!(diag.is_degraded());
    assert_eq!(diag.state, FileState::Degraded(FailureKind::FileCreate));
    assert_eq!(diag.entries_dropped, 1);
    assert!(diag.last_error.unwrap().contains("failed to create log file"));
}

#[test]
fn repeated_calls_do_not_retry_before_backoff() {
    let dir = LogDir::new();
    let clock = FakeClock::new();
    let writer = dir.fake_writer(
        blocked_options(&dir),
        LogLevel::Info,
        &FakeRotationHelper::new(),
        &clock,
        false,
    );

    for _ in 0..100 {
        writer.log(LogLevel::Info, "lost");
    }
    assert_eq!(writer.diagnostics().create_failures, 1);

    clock.advance(Duration::from_secs(30));
    writer.log(LogLevel::Info, "lost again");
    assert_eq!(writer.diagnostics().create_failures, 2);
    assert_eq!(writer.diagnostics().entries_dropped, 101);
}

#[test]
fn writer_recovers_once_directory_is_usable() {
    let dir = LogDir::new();
    let clock = FakeClock::new();
    let writer = dir.fake_writer(
        blocked_options(&dir),
        LogLevel::Info,
        &FakeRotationHelper::new(),
        &clock,
        false,
    );
    writer.log(LogLevel::Info, "lost");

    std::fs::remove_file(dir.file("blocker")).unwrap();
    clock.advance(Duration::from_secs(31));
    writer.log(LogLevel::Info, "recovered");

    let diag = writer.diagnostics();
    assert_eq!(diag.state, FileState::Active);
    assert_eq!(diag.entries_written, 1);
    let lines = dir.lines("blocker/logs/app.log");
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with("app: recovered"));
}

#[test]
fn diagnostics_track_successful_activity() {
    let dir = LogDir::new();
    let writer = dir.writer("app", LogLevel::Info, 80);

    for i in 0..6 {
        writer.log(LogLevel::Info, &format!("entry {i} with some padding"));
    }

    let diag = writer.diagnostics();
    assert_eq!(diag.state, FileState::Active);
    assert_eq!(diag.entries_written, 6);
    assert_eq!(diag.entries_dropped, 0);
    assert_eq!(diag.rotations, 5);
    assert_eq!(diag.last_error, None);
}
