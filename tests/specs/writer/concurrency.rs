//! Concurrency specs
//!
//! N concurrent calls produce exactly N complete, non-interleaved lines,
//! including across rotations.

use crate::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;

fn run_threads(writer: &Arc<FileLogWriter>, threads: usize, per_thread: usize) {
    std::thread::scope(|s| {
        for t in 0..threads {
            let writer = Arc::clone(writer);
            s.spawn(move || {
                for i in 0..per_thread {
                    writer.log(LogLevel::Info, &format!("t{t}-{i} {}", "x".repeat(i % 17)));
                }
            });
        }
    });
}

#[test]
fn concurrent_writes_without_rotation() {
    let dir = LogDir::new();
    let writer = Arc::new(dir.writer("app", LogLevel::Info, 0));

    run_threads(&writer, 8, 125);

    let lines = dir.lines("app.log");
    assert_eq!(lines.len(), 1000);
    assert_well_formed(&lines);
    let unique: HashSet<&str> = lines
        .iter()
        .map(|l| l.split("app: ").nth(1).unwrap().split(' ').next().unwrap())
        .collect();
    assert_eq!(unique.len(), 1000);
}

#[test]
fn no_entry_lost_across_rotations() {
    let dir = LogDir::new();
    let options = FileLoggerOptions {
        max_rotations: 500,
        ..dir.options(2048)
    };
    let writer = Arc::new(FileLogWriter::new("app", LogLevel::Info, options, None));

    run_threads(&writer, 6, 100);

    let mut all = dir.lines("app.log");
    for name in dir.generations() {
        let lines = dir.lines(&name);
        assert!(!lines.is_empty(), "{name} is empty");
        all.extend(lines);
    }
    assert_eq!(all.len(), 600);
    assert_well_formed(&all);
    assert!(writer.diagnostics().rotations > 1);
}

#[test]
fn rotated_files_respect_size_limit() {
    let dir = LogDir::new();
    let options = FileLoggerOptions {
        max_rotations: 500,
        ..dir.options(1024)
    };
    let writer = Arc::new(FileLogWriter::new("app", LogLevel::Info, options, None));

    run_threads(&writer, 4, 100);

    for name in dir.generations() {
        assert!(dir.size(&name) <= 1024, "{name} exceeds the limit");
    }
}
