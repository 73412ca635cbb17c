// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake rotation helper for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{PrivilegedRotationHelper, RotationHelperError, RotationRequest};
use parking_lot::Mutex;
use std::sync::Arc;

/// How the fake responds to requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HelperBehavior {
    /// Perform the rotation in-process and report success
    Rotate,
    /// Reject every request with the given message
    Fail(String),
}

struct FakeHelperState {
    behavior: HelperBehavior,
    calls: Vec<RotationRequest>,
}

/// Fake rotation helper for testing
#[derive(Clone)]
pub struct FakeRotationHelper {
    inner: Arc<Mutex<FakeHelperState>>,
}

impl Default for FakeRotationHelper {
    fn default() -> Self {
        Self::with_behavior(HelperBehavior::Rotate)
    }
}

impl FakeRotationHelper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fake that rejects every request
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_behavior(HelperBehavior::Fail(message.into()))
    }

    pub fn with_behavior(behavior: HelperBehavior) -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeHelperState {
                behavior,
                calls: Vec::new(),
            })),
        }
    }

    /// Change the response for subsequent requests
    pub fn set_behavior(&self, behavior: HelperBehavior) {
        self.inner.lock().behavior = behavior;
    }

    /// Get all recorded requests
    pub fn calls(&self) -> Vec<RotationRequest> {
        self.inner.lock().calls.clone()
    }
}

impl PrivilegedRotationHelper for FakeRotationHelper {
    fn request_rotation(&self, request: &RotationRequest) -> Result<(), RotationHelperError> {
        let behavior = {
            let mut state = self.inner.lock();
            state.calls.push(request.clone());
            state.behavior.clone()
        };
        match behavior {
            HelperBehavior::Rotate => {
                logsink_core::rotate_generations(&request.current, &request.rotated, request.policy)
                    .map_err(|e| RotationHelperError::Rejected {
                        path: request.current.clone(),
                        message: e.to_string(),
                    })
            }
            HelperBehavior::Fail(message) => Err(RotationHelperError::Rejected {
                path: request.current.clone(),
                message,
            }),
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
