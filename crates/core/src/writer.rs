// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Interface between a logging front-end and a log sink.

use crate::level::LogLevel;

/// A sink that accepts leveled log entries.
///
/// Implementations must never fail or panic on behalf of the caller;
/// problems writing an entry are reported through the sink's own
/// diagnostics.
pub trait LogWriter: Send + Sync {
    /// Log `message` attributed to the writer's own program identity.
    fn log(&self, level: LogLevel, message: &str);

    /// Log `message` attributed to `identity` instead of the writer's own.
    fn log_as(&self, identity: &str, level: LogLevel, message: &str);

    /// Least severe level this writer emits.
    fn log_level(&self) -> LogLevel;
}
