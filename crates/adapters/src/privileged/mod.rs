// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Privileged rotation helpers
//!
//! A helper rotates a log file on behalf of a process that lacks permission
//! to rename files in the log directory (for example when the directory is
//! owned by a service account). Requests carry paths and retention policy,
//! never open file handles, since the helper may run under different
//! credentials.

mod command;
mod noop;

pub use command::CommandRotationHelper;
pub use noop::NoOpRotationHelper;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeRotationHelper, HelperBehavior};

use logsink_core::GenerationPolicy;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from privileged rotation requests
#[derive(Debug, Error)]
pub enum RotationHelperError {
    #[error("no privileged rotation helper available")]
    Unavailable,
    #[error("failed to start helper {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("helper rejected rotation of {path}: {message}")]
    Rejected { path: PathBuf, message: String },
}

/// A request to rotate one log file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationRequest {
    /// Active log file to move aside
    pub current: PathBuf,
    /// Path the active file is renamed to (generation 1)
    pub rotated: PathBuf,
    /// Retention for older generations
    pub policy: GenerationPolicy,
}

/// Capability to rotate a log file with elevated privileges.
///
/// Calls may block on another process. Implementations report failure
/// through the returned error; callers treat any error (including a
/// caller-imposed timeout) as "not rotated".
pub trait PrivilegedRotationHelper: Send + Sync + 'static {
    /// Perform the rotation described by `request`.
    fn request_rotation(&self, request: &RotationRequest) -> Result<(), RotationHelperError>;
}

impl<H: PrivilegedRotationHelper + ?Sized> PrivilegedRotationHelper for Box<H> {
    fn request_rotation(&self, request: &RotationRequest) -> Result<(), RotationHelperError> {
        (**self).request_rotation(request)
    }
}

impl<H: PrivilegedRotationHelper + ?Sized> PrivilegedRotationHelper for std::sync::Arc<H> {
    fn request_rotation(&self, request: &RotationRequest) -> Result<(), RotationHelperError> {
        (**self).request_rotation(request)
    }
}
