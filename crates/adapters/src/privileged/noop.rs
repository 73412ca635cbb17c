// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op rotation helper.

use super::{PrivilegedRotationHelper, RotationHelperError, RotationRequest};

/// Helper used when no privileged path is configured.
///
/// Every request fails with [`RotationHelperError::Unavailable`], so a
/// writer that cannot rotate on its own keeps appending to its current file.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpRotationHelper;

impl NoOpRotationHelper {
    pub fn new() -> Self {
        Self
    }
}

impl PrivilegedRotationHelper for NoOpRotationHelper {
    fn request_rotation(&self, _request: &RotationRequest) -> Result<(), RotationHelperError> {
        Err(RotationHelperError::Unavailable)
    }
}

#[cfg(test)]
#[path = "noop_tests.rs"]
mod tests;
