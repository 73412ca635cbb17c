// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! logsink - append to and rotate rotating log files

mod commands;
mod env;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use commands::{log, path, rotate};

#[derive(Parser)]
#[command(
    name = "logsink",
    version,
    about = "Append leveled entries to rotating log files"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Append one entry to a log file
    Log(log::LogArgs),
    /// Rotate a log file and its generations (privileged helper side)
    Rotate(rotate::RotateArgs),
    /// Print the log file path a writer would use
    Path(path::PathArgs),
}

fn cli_command() -> clap::Command {
    Cli::command()
}

fn main() {
    init_tracing();
    if let Err(e) = run() {
        let msg = format_error(&e);
        if !msg.is_empty() {
            eprintln!("Error: {}", msg);
        }
        std::process::exit(1);
    }
}

/// Install a stderr subscriber filtered by `LOGSINK_LOG` (default `warn`).
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_env(env::LOGSINK_LOG).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).without_time())
        .init();
}

/// Format an anyhow error, deduplicating the chain.
///
/// If the top-level Display already contains every source message, the
/// "Caused by" chain is skipped. Otherwise the full chain is rendered.
fn format_error(err: &anyhow::Error) -> String {
    let top = err.to_string();

    let chain_redundant = err
        .chain()
        .skip(1)
        .all(|cause| top.contains(&cause.to_string()));

    if chain_redundant {
        return top;
    }

    let mut buf = top;
    for (i, cause) in err.chain().skip(1).enumerate() {
        buf.push_str(&format!("\n\nCaused by:\n    {}: {}", i, cause));
    }
    buf
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        // No subcommand provided: print help and exit 0
        cli_command().print_help()?;
        println!();
        return Ok(());
    };

    match command {
        Commands::Log(args) => log::log(args),
        Commands::Rotate(args) => rotate::rotate(args),
        Commands::Path(args) => path::path(args),
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
