//! Privileged rotation specs
//!
//! When the writer may not rotate its own file it asks the injected helper,
//! and a failing helper never costs entries.

use crate::prelude::*;
use std::time::Duration;

#[test]
fn denied_rotation_asks_helper_with_file_paths() {
    let dir = LogDir::new();
    let clock = FakeClock::new();
    let helper = FakeRotationHelper::new();
    let writer = dir.fake_writer(dir.options(100), LogLevel::Info, &helper, &clock, true);

    writer.log(LogLevel::Info, &message_of_len(&clock, LogLevel::Info, 80));
    writer.log(LogLevel::Info, &message_of_len(&clock, LogLevel::Info, 40));

    similar_asserts::assert_eq!(
        helper.calls(),
        vec![RotationRequest {
            current: dir.file("app.log"),
            rotated: dir.file("app.log.1"),
            policy: GenerationPolicy {
                max_rotations: 1,
                delete_old_logs: true,
            },
        }]
    );
    assert_eq!(dir.size("app.log.1"), 80);
    assert_eq!(dir.size("app.log"), 40);
    assert_eq!(writer.diagnostics().privileged_rotations, 1);
}

#[test]
fn helper_is_not_used_when_self_rotation_works() {
    let dir = LogDir::new();
    let clock = FakeClock::new();
    let helper = FakeRotationHelper::new();
    let writer = dir.fake_writer(dir.options(100), LogLevel::Info, &helper, &clock, false);

    writer.log(LogLevel::Info, &message_of_len(&clock, LogLevel::Info, 80));
    writer.log(LogLevel::Info, &message_of_len(&clock, LogLevel::Info, 40));

    assert!(helper.calls().is_empty());
    assert_eq!(writer.diagnostics().rotations, 1);
    assert_eq!(writer.diagnostics().privileged_rotations, 0);
}

#[test]
fn helper_failure_keeps_active_file_accepting_writes() {
    let dir = LogDir::new();
    let clock = FakeClock::new();
    let helper = FakeRotationHelper::failing("sudo: a password is required");
    let writer = dir.fake_writer(dir.options(100), LogLevel::Info, &helper, &clock, true);

    writer.log(LogLevel::Info, &message_of_len(&clock, LogLevel::Info, 80));
    let original = std::fs::read_to_string(dir.file("app.log")).unwrap();
    writer.log(LogLevel::Info, &message_of_len(&clock, LogLevel::Info, 40));
    writer.log(LogLevel::Info, "more");

    let content = std::fs::read_to_string(dir.file("app.log")).unwrap();
    assert!(content.starts_with(&original));
    assert_eq!(dir.lines("app.log").len(), 3);
    assert!(!dir.exists("app.log.1"));

    let diag = writer.diagnostics();
    assert_eq!(diag.state, FileState::Degraded(FailureKind::Rotation));
    assert_eq!(diag.entries_dropped, 0);
    assert!(diag
        .last_error
        .unwrap()
        .contains("sudo: a password is required"));
}

#[test]
fn helper_is_retried_once_per_backoff() {
    let dir = LogDir::new();
    let clock = FakeClock::new();
    let helper = FakeRotationHelper::failing("unavailable");
    let writer = dir.fake_writer(dir.options(100), LogLevel::Info, &helper, &clock, true);

    writer.log(LogLevel::Info, &message_of_len(&clock, LogLevel::Info, 80));
    for _ in 0..20 {
        writer.log(LogLevel::Info, "overflowing");
    }
    assert_eq!(helper.calls().len(), 1);

    clock.advance(Duration::from_secs(30));
    writer.log(LogLevel::Info, "retry");
    assert_eq!(helper.calls().len(), 2);

    helper.set_behavior(HelperBehavior::Rotate);
    clock.advance(Duration::from_secs(30));
    writer.log(LogLevel::Info, "rotated at last");

    assert_eq!(helper.calls().len(), 3);
    assert_eq!(writer.diagnostics().state, FileState::Active);
    assert_eq!(dir.lines("app.log.1").len(), 22);
    assert_eq!(dir.lines("app.log").len(), 1);
    assert!(dir.lines("app.log")[0].ends_with("app: rotated at last"));
}
