// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fixed-interval retry gate for failing filesystem operations.

use std::time::{Duration, Instant};

/// Allows at most one attempt per `interval` after a failure.
#[derive(Debug, Clone)]
pub(crate) struct Backoff {
    interval: Duration,
    retry_at: Option<Instant>,
}

impl Backoff {
    pub(crate) fn new(interval: Duration) -> Self {
        Self {
            interval,
            retry_at: None,
        }
    }

    /// True if an attempt may be made at `now`.
    pub(crate) fn ready(&self, now: Instant) -> bool {
        match self.retry_at {
            Some(at) => now >= at,
            None => true,
        }
    }

    /// Record a failed attempt made at `now`.
    pub(crate) fn fail(&mut self, now: Instant) {
        self.retry_at = Some(now + self.interval);
    }

    /// True if the last attempt failed.
    pub(crate) fn failing(&self) -> bool {
        self.retry_at.is_some()
    }

    /// Record a successful attempt.
    pub(crate) fn reset(&mut self) {
        self.retry_at = None;
    }
}

#[cfg(test)]
#[path = "backoff_tests.rs"]
mod tests;
