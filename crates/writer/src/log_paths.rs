// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared path builders for active and rotated log files.
//!
//! Used by the writer and by tooling that tails or rotates its files:
//!   `<log_dir>/<identity>.log`
//!   `<log_dir>/<identity>-<section>.log`
//!   `<log_dir>/<identity>.log.1` … `<identity>.log.N`

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Build the path to the active log file.
///
/// Structure: `{log_dir}/{identity}.log` or `{log_dir}/{identity}-{section}.log`
///
/// # Arguments
/// * `log_dir` - Directory holding the log files
/// * `identity` - Program identity owning the file
/// * `section` - Optional stream tag for several logs sharing one directory
pub fn log_file_path(log_dir: &Path, identity: &str, section: Option<&str>) -> PathBuf {
    let mut name = file_component(identity);
    if let Some(section) = section.filter(|s| !s.is_empty()) {
        name.push('-');
        name.push_str(&file_component(section));
    }
    name.push_str(".log");
    log_dir.join(name)
}

/// Build the path the active file is renamed to on rotation.
///
/// Structure: `{log_file}.1`
pub fn rotated_log_path(log_file: &Path) -> PathBuf {
    let mut raw: OsString = log_file.as_os_str().to_owned();
    raw.push(".1");
    PathBuf::from(raw)
}

/// Make `s` safe to use as a single file name component.
///
/// Path separators and other unusual characters become `_`; an empty or
/// dots-only value becomes `_`.
fn file_component(s: &str) -> String {
    let cleaned: String = s
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.chars().all(|c| c == '.') {
        return "_".to_string();
    }
    cleaned
}

#[cfg(test)]
#[path = "log_paths_tests.rs"]
mod tests;
