// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod log;
pub mod path;
pub mod rotate;

use anyhow::{Context, Result};
use clap::Args;
use logsink_core::FileLoggerOptions;
use std::path::PathBuf;

/// Where writer options come from.
#[derive(Args, Debug, Default)]
pub struct OptionsArgs {
    /// TOML file with writer options
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log directory (overrides the config file and LOGSINK_DIR)
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,
}

impl OptionsArgs {
    /// Resolve options: config file (or defaults), then `LOGSINK_*`
    /// environment overrides, then `--dir`.
    pub fn resolve(&self) -> Result<FileLoggerOptions> {
        let options = match &self.config {
            Some(path) => FileLoggerOptions::load(path)
                .with_context(|| format!("invalid config {}", path.display()))?,
            None => FileLoggerOptions::default(),
        };
        let mut options = options.with_env_overrides()?;
        if let Some(dir) = &self.dir {
            options.log_directory = dir.clone();
        }
        Ok(options)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
