// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the file writer

use std::path::PathBuf;
use thiserror::Error;

use crate::diagnostics::FailureKind;

/// Failures inside the writer. These never cross the `log` call boundary;
/// they are counted and reported through tracing instead.
#[derive(Debug, Error)]
pub enum WriterError {
    #[error("failed to create log file {path}: {source}")]
    FileCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to rotate log file {path}: {reason}")]
    Rotation { path: PathBuf, reason: String },
    #[error("failed to write log file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl WriterError {
    pub fn kind(&self) -> FailureKind {
        match self {
            WriterError::FileCreate { .. } => FailureKind::FileCreate,
            WriterError::Rotation { .. } => FailureKind::Rotation,
            WriterError::Write { .. } => FailureKind::Write,
        }
    }
}
