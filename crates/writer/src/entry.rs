// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! On-disk entry format.
//!
//! Format: `2026-01-30T08:14:09.123Z [WARN] rserver: message`
//!
//! Each entry is exactly one line. Embedded newlines are replaced with
//! `|||` so tools tailing the file can split on `\n`.

use chrono::{DateTime, SecondsFormat, Utc};
use logsink_core::LogLevel;

/// Replacement for newlines embedded in a message.
pub const NEWLINE_MARKER: &str = "|||";

/// Render one entry, including the trailing newline.
pub fn format_entry(
    timestamp: DateTime<Utc>,
    identity: &str,
    pid: Option<u32>,
    level: LogLevel,
    message: &str,
) -> String {
    let ts = timestamp.to_rfc3339_opts(SecondsFormat::Millis, true);
    let message = single_line(message);
    match pid {
        Some(pid) => format!("{} [{}] {}[{}]: {}\n", ts, level, identity, pid, message),
        None => format!("{} [{}] {}: {}\n", ts, level, identity, message),
    }
}

fn single_line(message: &str) -> String {
    let trimmed = message.trim_end_matches(['\r', '\n']);
    trimmed.replace("\r\n", "\n").replace('\n', NEWLINE_MARKER)
}

#[cfg(test)]
#[path = "entry_tests.rs"]
mod tests;
