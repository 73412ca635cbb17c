//! Identity override specs
//!
//! `log_as` changes the identity of one entry and nothing else.

use crate::prelude::*;
use std::sync::Arc;

#[test]
fn override_and_plain_entries_are_counted_separately() {
    let dir = LogDir::new();
    let writer = dir.writer("app", LogLevel::Info, 0);

    for i in 0..5 {
        writer.log_as("helper", LogLevel::Info, &format!("override {i}"));
    }
    for i in 0..3 {
        writer.log(LogLevel::Info, &format!("plain {i}"));
    }

    let lines = dir.lines("app.log");
    assert_eq!(lines.iter().filter(|l| l.contains("] helper: ")).count(), 5);
    assert_eq!(lines.iter().filter(|l| l.contains("] app: ")).count(), 3);
}

#[test]
fn concurrent_overrides_never_leak_into_plain_entries() {
    let dir = LogDir::new();
    let writer = Arc::new(dir.writer("app", LogLevel::Info, 0));

    std::thread::scope(|s| {
        for t in 0..4 {
            let writer = Arc::clone(&writer);
            s.spawn(move || {
                for i in 0..50 {
                    if t % 2 == 0 {
                        writer.log_as("helper", LogLevel::Info, &format!("override {i}"));
                    } else {
                        writer.log(LogLevel::Info, &format!("plain {i}"));
                    }
                }
            });
        }
    });

    let lines = dir.lines("app.log");
    assert_eq!(lines.len(), 200);
    assert!(lines
        .iter()
        .filter(|l| l.contains("] helper: "))
        .all(|l| l.contains("override")));
    assert!(lines
        .iter()
        .filter(|l| l.contains("] app: "))
        .all(|l| l.contains("plain")));
}

#[test]
fn override_does_not_rename_the_file() {
    let dir = LogDir::new();
    let writer = dir.writer("app", LogLevel::Info, 0);

    writer.log_as("helper", LogLevel::Info, "entry");

    assert!(dir.exists("app.log"));
    assert!(!dir.exists("helper.log"));
}

#[test]
fn sections_write_separate_files() {
    let dir = LogDir::new();
    let main = FileLogWriter::new("app", LogLevel::Info, dir.options(0), None);
    let jobs = FileLogWriter::new("app", LogLevel::Info, dir.options(0), Some("jobs"));

    main.log(LogLevel::Info, "main");
    jobs.log(LogLevel::Info, "jobs");

    assert_eq!(dir.lines("app.log").len(), 1);
    assert_eq!(dir.lines("app-jobs.log").len(), 1);
}
