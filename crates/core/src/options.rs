// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! File logger configuration.
//!
//! Options are loaded from TOML, then optionally overridden from the
//! environment:
//!
//! ```toml
//! log_directory = "/var/log/myapp"
//! max_size_bytes = 2097152
//! max_rotations = 3
//! delete_old_logs = true
//! max_age_secs = 86400
//! file_mode = 0o640
//! ```

use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::env;
use crate::rotation::GenerationPolicy;

/// Default size threshold before rotation (2 MiB).
pub const DEFAULT_MAX_SIZE_BYTES: u64 = 2 * 1024 * 1024;

/// Default number of retained rotated files.
pub const DEFAULT_MAX_ROTATIONS: u32 = 1;

/// Default interval between retries of a failed create or rotation.
pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_secs(30);

/// Errors from loading or validating options
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// Configuration for a file log writer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileLoggerOptions {
    /// Directory holding the active and rotated log files
    pub log_directory: PathBuf,
    /// Rotate once the active file would grow past this many bytes (0 disables)
    pub max_size_bytes: u64,
    /// Rotated generations kept on disk (`<file>.1` … `<file>.N`)
    pub max_rotations: u32,
    /// Remove stale generations numbered above `max_rotations` after each
    /// rotation. The generation a rotation shifts past `max_rotations` is
    /// removed either way, so at most `max_rotations` rotated files are
    /// produced; this flag only governs leftovers from a larger setting.
    pub delete_old_logs: bool,
    /// Rotate once the active file has been written for this long
    #[serde(rename = "max_age_secs", deserialize_with = "opt_secs")]
    pub max_age: Option<Duration>,
    /// Unix permission bits for created log files
    pub file_mode: Option<u32>,
    /// Render the identity as `identity[pid]`
    pub include_pid: bool,
    /// Minimum interval between retries of a failed create or rotation
    #[serde(rename = "retry_backoff_secs", deserialize_with = "secs")]
    pub retry_backoff: Duration,
}

impl Default for FileLoggerOptions {
    fn default() -> Self {
        Self {
            log_directory: env::default_log_dir(),
            max_size_bytes: DEFAULT_MAX_SIZE_BYTES,
            max_rotations: DEFAULT_MAX_ROTATIONS,
            delete_old_logs: true,
            max_age: None,
            file_mode: None,
            include_pid: false,
            retry_backoff: DEFAULT_RETRY_BACKOFF,
        }
    }
}

impl FileLoggerOptions {
    /// Default options writing into `log_directory`.
    pub fn new(log_directory: impl Into<PathBuf>) -> Self {
        Self {
            log_directory: log_directory.into(),
            ..Self::default()
        }
    }

    /// Parse and validate options from a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let options: Self = toml::from_str(s)?;
        options.validate()?;
        Ok(options)
    }

    /// Load and validate options from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Apply `LOGSINK_*` environment overrides on top of these options.
    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Some(dir) = env::log_dir() {
            self.log_directory = dir;
        }
        if let Some(raw) = env::var(env::LOGSINK_MAX_SIZE) {
            self.max_size_bytes = parse_override(env::LOGSINK_MAX_SIZE, &raw)?;
        }
        if let Some(raw) = env::var(env::LOGSINK_MAX_ROTATIONS) {
            self.max_rotations = parse_override(env::LOGSINK_MAX_ROTATIONS, &raw)?;
        }
        if let Some(raw) = env::var(env::LOGSINK_DELETE_OLD_LOGS) {
            self.delete_old_logs = parse_flag(env::LOGSINK_DELETE_OLD_LOGS, &raw)?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Reject settings the writer cannot honor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_rotations == 0 {
            return Err(ConfigError::InvalidValue {
                key: "max_rotations".to_string(),
                value: "0 (at least one rotated file is kept)".to_string(),
            });
        }
        if let Some(mode) = self.file_mode {
            if mode > 0o7777 {
                return Err(ConfigError::InvalidValue {
                    key: "file_mode".to_string(),
                    value: format!("{:o}", mode),
                });
            }
        }
        Ok(())
    }

    /// Generation retention derived from these options.
    pub fn generation_policy(&self) -> GenerationPolicy {
        GenerationPolicy {
            max_rotations: self.max_rotations.max(1),
            delete_old_logs: self.delete_old_logs,
        }
    }
}

fn parse_override<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: raw.to_string(),
    })
}

fn parse_flag(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw.to_string(),
        }),
    }
}

fn secs<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
    u64::deserialize(d).map(Duration::from_secs)
}

fn opt_secs<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
    Option::<u64>::deserialize(d).map(|s| s.map(Duration::from_secs))
}

#[cfg(test)]
#[path = "options_tests.rs"]
mod tests;
