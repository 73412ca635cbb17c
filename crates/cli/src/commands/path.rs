// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `logsink path`: print where a writer would log

use anyhow::Result;
use clap::Args;
use logsink::log_paths::{log_file_path, rotated_log_path};

use super::OptionsArgs;

#[derive(Args)]
pub struct PathArgs {
    /// Program identity
    #[arg(long)]
    pub identity: String,

    /// Log section
    #[arg(long)]
    pub section: Option<String>,

    /// Print the first rotated generation instead
    #[arg(long)]
    pub rotated: bool,

    #[command(flatten)]
    pub options: OptionsArgs,
}

pub fn path(args: PathArgs) -> Result<()> {
    let options = args.options.resolve()?;
    let log_file = log_file_path(
        &options.log_directory,
        &args.identity,
        args.section.as_deref(),
    );
    let shown = if args.rotated {
        rotated_log_path(&log_file)
    } else {
        log_file
    };
    println!("{}", shown.display());
    Ok(())
}
