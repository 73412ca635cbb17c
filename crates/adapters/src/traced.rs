// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrapper for consistent observability

use crate::privileged::{PrivilegedRotationHelper, RotationHelperError, RotationRequest};

/// Wrapper that adds tracing to any PrivilegedRotationHelper
#[derive(Clone)]
pub struct TracedRotationHelper<H> {
    inner: H,
}

impl<H> TracedRotationHelper<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H: PrivilegedRotationHelper> PrivilegedRotationHelper for TracedRotationHelper<H> {
    fn request_rotation(&self, request: &RotationRequest) -> Result<(), RotationHelperError> {
        let span = tracing::info_span!(
            "rotation.privileged",
            current = %request.current.display(),
            rotated = %request.rotated.display(),
        );
        let _guard = span.enter();
        tracing::debug!(max_rotations = request.policy.max_rotations, "requesting");
        let start = std::time::Instant::now();
        let result = self.inner.request_rotation(request);
        let elapsed_ms = start.elapsed().as_millis() as u64;
        match &result {
            Ok(()) => tracing::info!(elapsed_ms, "privileged rotation complete"),
            Err(e) => tracing::warn!(elapsed_ms, error = %e, "privileged rotation failed"),
        }
        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
