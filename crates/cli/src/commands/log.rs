// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `logsink log`: append one entry through a FileLogWriter

use anyhow::{bail, Result};
use clap::Args;
use logsink::{FileLogWriter, LogLevel, LogWriter, WriterDeps};
use logsink_adapters::{
    CommandRotationHelper, NoOpRotationHelper, PrivilegedRotationHelper, TracedRotationHelper,
};
use logsink_core::SystemClock;

use super::OptionsArgs;

#[derive(Args)]
pub struct LogArgs {
    /// Program identity; also names the log file
    #[arg(long)]
    pub identity: String,

    /// Stamp the entry with this identity instead
    #[arg(long = "as", value_name = "IDENTITY")]
    pub as_identity: Option<String>,

    /// Log section, for several streams of one identity
    #[arg(long)]
    pub section: Option<String>,

    /// Severity of the entry
    #[arg(short, long, default_value_t = LogLevel::Info)]
    pub level: LogLevel,

    /// Minimum severity written
    #[arg(long, default_value_t = LogLevel::Info)]
    pub threshold: LogLevel,

    #[command(flatten)]
    pub options: OptionsArgs,

    /// Program asked to rotate when this process may not
    #[arg(long, value_name = "PROGRAM")]
    pub helper: Option<String>,

    /// Argument passed to the helper before the rotate request (repeatable)
    #[arg(
        long = "helper-arg",
        value_name = "ARG",
        requires = "helper",
        allow_hyphen_values = true
    )]
    pub helper_args: Vec<String>,

    /// Message text; multiple words are joined with spaces
    #[arg(required = true, num_args = 1..)]
    pub message: Vec<String>,
}

impl LogArgs {
    fn rotation_helper(&self) -> Box<dyn PrivilegedRotationHelper> {
        match &self.helper {
            Some(program) => Box::new(TracedRotationHelper::new(CommandRotationHelper::with_args(
                program,
                &self.helper_args,
            ))),
            None => Box::new(NoOpRotationHelper),
        }
    }
}

pub fn log(args: LogArgs) -> Result<()> {
    let options = args.options.resolve()?;
    let message = args.message.join(" ");
    let writer = FileLogWriter::with_deps(
        args.identity.as_str(),
        args.threshold,
        options,
        args.section.as_deref(),
        WriterDeps::new(args.rotation_helper(), SystemClock),
    );

    match &args.as_identity {
        Some(identity) => writer.log_as(identity, args.level, &message),
        None => writer.log(args.level, &message),
    }

    let diagnostics = writer.diagnostics();
    if diagnostics.entries_dropped > 0 {
        bail!(
            "entry was not written: {}",
            diagnostics.last_error.unwrap_or_default()
        );
    }
    Ok(())
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
