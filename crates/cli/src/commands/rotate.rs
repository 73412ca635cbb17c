// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `logsink rotate`: the privileged side of delegated rotation.
//!
//! A writer that may not rename its own files runs this command (usually
//! through `sudo`) with the arguments produced by `CommandRotationHelper`.
//! Since those arguments come from the unprivileged side, a request is
//! refused unless `--current` is a regular `.log` file directly inside the
//! log directory and `--rotated` is its first generation. The log directory
//! is `LOGSINK_DIR` or the default, never an argument.

use anyhow::{bail, Context, Result};
use clap::Args;
use logsink::log_paths::rotated_log_path;
use logsink_core::options::DEFAULT_MAX_ROTATIONS;
use logsink_core::{rotate_generations, FileLoggerOptions, GenerationPolicy};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct RotateArgs {
    /// Active log file to move aside
    #[arg(long, value_name = "PATH")]
    pub current: PathBuf,

    /// Path of the first rotated generation
    #[arg(long, value_name = "PATH")]
    pub rotated: PathBuf,

    /// Rotated generations to keep
    #[arg(
        long,
        default_value_t = DEFAULT_MAX_ROTATIONS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub max_rotations: u32,

    /// Remove stale generations beyond --max-rotations
    #[arg(long)]
    pub delete_old_logs: bool,
}

impl RotateArgs {
    fn policy(&self) -> GenerationPolicy {
        GenerationPolicy {
            max_rotations: self.max_rotations,
            delete_old_logs: self.delete_old_logs,
        }
    }
}

pub fn rotate(args: RotateArgs) -> Result<()> {
    let log_directory = FileLoggerOptions::default()
        .with_env_overrides()?
        .log_directory;
    rotate_within(&args, &log_directory)
}

fn rotate_within(args: &RotateArgs, log_directory: &Path) -> Result<()> {
    check_request(&args.current, &args.rotated, log_directory)?;
    let policy = args.policy();
    rotate_generations(&args.current, &args.rotated, policy)
        .with_context(|| format!("failed to rotate {}", args.current.display()))?;
    tracing::info!(
        current = %args.current.display(),
        rotated = %args.rotated.display(),
        max_rotations = policy.max_rotations,
        "rotated log file"
    );
    Ok(())
}

/// Reject a request before anything on disk is touched.
fn check_request(current: &Path, rotated: &Path, log_directory: &Path) -> Result<()> {
    if rotated != rotated_log_path(current) {
        bail!(
            "refusing to rotate {} to {}: not its first generation",
            current.display(),
            rotated.display()
        );
    }
    if !current.extension().is_some_and(|ext| ext == "log") {
        bail!("refusing to rotate {}: not a .log file", current.display());
    }

    let metadata = fs::symlink_metadata(current)
        .with_context(|| format!("failed to rotate {}", current.display()))?;
    if !metadata.is_file() {
        bail!("refusing to rotate {}: not a regular file", current.display());
    }

    let parent = match current.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let parent = parent
        .canonicalize()
        .with_context(|| format!("failed to resolve {}", parent.display()))?;
    let allowed = log_directory
        .canonicalize()
        .with_context(|| format!("failed to resolve log directory {}", log_directory.display()))?;
    if parent != allowed {
        bail!(
            "refusing to rotate {}: outside log directory {}",
            current.display(),
            allowed.display()
        );
    }
    Ok(())
}

#[cfg(test)]
#[path = "rotate_tests.rs"]
mod tests;
