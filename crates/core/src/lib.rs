// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! logsink-core: levels, options, clock and rotation shared by log sinks

pub mod clock;
pub mod env;
pub mod level;
pub mod options;
pub mod rotation;
pub mod writer;

pub use clock::{Clock, FakeClock, SystemClock};
pub use level::{LogLevel, ParseLevelError};
pub use options::{ConfigError, FileLoggerOptions};
pub use rotation::{generation_path, rotate_generations, GenerationPolicy};
pub use writer::LogWriter;
