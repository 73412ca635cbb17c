//! `logsink log` specs
//!
//! Verify entries appended through the binary, option resolution and the
//! exit status when an entry is dropped.

use crate::prelude::*;

#[test]
fn no_subcommand_prints_help() {
    cli().passes().stdout_has("Usage:");
}

#[test]
fn log_appends_formatted_entries() {
    let logs = LogDir::new();

    cli()
        .args(&["log", "--identity", "app", "--dir"])
        .path_arg(logs.path())
        .args(&["first", "entry"])
        .passes();
    cli()
        .args(&["log", "--identity", "app", "--level", "error", "--dir"])
        .path_arg(logs.path())
        .args(&["second"])
        .passes();

    let lines = logs.lines("app.log");
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with(" [INFO] app: first entry"), "{lines:?}");
    assert!(lines[1].ends_with(" [ERROR] app: second"), "{lines:?}");
    assert_well_formed(&lines);
}

#[test]
fn log_threshold_filters_entries() {
    let logs = LogDir::new();

    cli()
        .args(&["log", "--identity", "app", "--threshold", "warn", "--level", "info"])
        .args(&["--dir"])
        .path_arg(logs.path())
        .args(&["quiet"])
        .passes();

    assert!(!logs.exists("app.log"));
}

#[test]
fn log_rotates_when_env_limit_exceeded() {
    let logs = LogDir::new();

    for word in ["one", "two", "three"] {
        cli()
            .env("LOGSINK_MAX_SIZE", "60")
            .args(&["log", "--identity", "app", "--dir"])
            .path_arg(logs.path())
            .args(&[word])
            .passes();
    }

    let current = logs.lines("app.log");
    assert_eq!(current.len(), 1);
    assert!(current[0].ends_with("app: three"));
    assert_eq!(logs.lines("app.log.1").len(), 1);
}

#[test]
fn log_reads_config_file() {
    let root = LogDir::new();
    let logs = root.file("logs");
    let config = root.file("logsink.toml");
    std::fs::write(
        &config,
        format!("log_directory = {:?}\ninclude_pid = true\n", logs.to_str().unwrap()),
    )
    .unwrap();

    cli()
        .args(&["log", "--identity", "svc", "--section", "audit", "--config"])
        .path_arg(&config)
        .args(&["hello"])
        .passes();

    let content = std::fs::read_to_string(logs.join("svc-audit.log")).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains(" [INFO] svc["), "{lines:?}");
}

#[test]
fn log_into_unusable_directory_fails() {
    let root = LogDir::new();
    let blocker = root.file("blocker");
    std::fs::write(&blocker, "not a dir").unwrap();

    cli()
        .args(&["log", "--identity", "app", "--dir"])
        .path_arg(&blocker)
        .args(&["lost"])
        .fails()
        .stderr_has("Error: entry was not written");
}

#[cfg(unix)]
#[test]
fn log_uses_helper_command_only_when_rotation_is_denied() {
    // A writable directory rotates in-process and never spawns the helper
    let logs = LogDir::new();

    for word in ["one", "two"] {
        cli()
            .env("LOGSINK_MAX_SIZE", "60")
            .args(&["log", "--identity", "app", "--dir"])
            .path_arg(logs.path())
            .args(&["--helper", "false", word])
            .passes();
    }

    assert_eq!(logs.lines("app.log.1").len(), 1);
}
