// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for logger configuration.

use std::path::PathBuf;

/// Log directory override
pub const LOGSINK_DIR: &str = "LOGSINK_DIR";
/// Size threshold override, in bytes
pub const LOGSINK_MAX_SIZE: &str = "LOGSINK_MAX_SIZE";
/// Retained generation count override
pub const LOGSINK_MAX_ROTATIONS: &str = "LOGSINK_MAX_ROTATIONS";
/// Old-log deletion override (`1`/`true`/`yes` or `0`/`false`/`no`)
pub const LOGSINK_DELETE_OLD_LOGS: &str = "LOGSINK_DELETE_OLD_LOGS";

/// Default log directory when neither config nor LOGSINK_DIR names one:
/// state dir/logsink > temp dir/logsink
pub fn default_log_dir() -> PathBuf {
    dirs::state_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("logsink")
}

/// Log directory from the environment, if set and non-empty.
pub fn log_dir() -> Option<PathBuf> {
    std::env::var(LOGSINK_DIR)
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}

/// Raw value of an override variable, if set and non-empty.
pub fn var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
