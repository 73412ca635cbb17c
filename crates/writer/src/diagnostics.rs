// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Side channel describing writer health.
//!
//! Failures never propagate out of `log`; they show up here and as
//! `tracing` events instead.

use std::sync::atomic::{AtomicU64, Ordering};

/// Which filesystem operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    FileCreate,
    Rotation,
    Write,
}

/// Lifecycle of the backing file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileState {
    /// Nothing logged yet; no file created
    Uninitialized,
    /// File open and accepting entries
    Active,
    /// Last attempt of this kind failed; retried after the backoff interval
    Degraded(FailureKind),
}

/// Counters updated without holding the writer lock.
#[derive(Debug, Default)]
pub(crate) struct Counters {
    pub(crate) entries_written: AtomicU64,
    pub(crate) entries_dropped: AtomicU64,
    pub(crate) rotations: AtomicU64,
    pub(crate) privileged_rotations: AtomicU64,
    pub(crate) create_failures: AtomicU64,
    pub(crate) rotation_failures: AtomicU64,
    pub(crate) write_failures: AtomicU64,
}

impl Counters {
    pub(crate) fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn failure(&self, kind: FailureKind) -> &AtomicU64 {
        match kind {
            FailureKind::FileCreate => &self.create_failures,
            FailureKind::Rotation => &self.rotation_failures,
            FailureKind::Write => &self.write_failures,
        }
    }
}

/// Point-in-time view of a writer's health.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticsSnapshot {
    pub state: FileState,
    pub entries_written: u64,
    pub entries_dropped: u64,
    pub rotations: u64,
    pub privileged_rotations: u64,
    pub create_failures: u64,
    pub rotation_failures: u64,
    pub write_failures: u64,
    pub last_error: Option<String>,
}

impl DiagnosticsSnapshot {
    pub(crate) fn capture(counters: &Counters, state: FileState, last_error: Option<String>) -> Self {
        let load = |c: &AtomicU64| c.load(Ordering::Relaxed);
        Self {
            state,
            entries_written: load(&counters.entries_written),
            entries_dropped: load(&counters.entries_dropped),
            rotations: load(&counters.rotations),
            privileged_rotations: load(&counters.privileged_rotations),
            create_failures: load(&counters.create_failures),
            rotation_failures: load(&counters.rotation_failures),
            write_failures: load(&counters.write_failures),
            last_error,
        }
    }

    /// True if the writer is currently degraded.
    pub fn is_degraded(&self) -> bool {
        matches!(self.state, FileState::Degraded(_))
    }
}

#[cfg(test)]
#[path = "diagnostics_tests.rs"]
mod tests;
