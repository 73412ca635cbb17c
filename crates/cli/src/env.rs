// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI crate.
//!
//! Writer options read their own `LOGSINK_*` overrides in
//! `logsink_core::env`; only CLI-specific variables live here.

/// Filter directives for the CLI's own diagnostics (`tracing` EnvFilter syntax)
pub const LOGSINK_LOG: &str = "LOGSINK_LOG";
