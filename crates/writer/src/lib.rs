// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! logsink: rotating file log writer

mod backoff;
pub mod diagnostics;
pub mod entry;
mod error;
mod file_writer;
pub mod log_paths;

pub use diagnostics::{DiagnosticsSnapshot, FailureKind, FileState};
pub use error::WriterError;
pub use file_writer::{FileLogWriter, RotateFn, WriterDeps};
pub use logsink_core::{FileLoggerOptions, LogLevel, LogWriter};
