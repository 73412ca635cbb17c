// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Thread-safe, rotating file log writer.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use logsink_adapters::{NoOpRotationHelper, PrivilegedRotationHelper, RotationRequest};
use logsink_core::{
    rotate_generations, Clock, FileLoggerOptions, GenerationPolicy, LogLevel, LogWriter,
    SystemClock,
};
use parking_lot::Mutex;

use crate::backoff::Backoff;
use crate::diagnostics::{Counters, DiagnosticsSnapshot, FailureKind, FileState};
use crate::entry::format_entry;
use crate::error::WriterError;
use crate::log_paths;

/// In-process rotation routine: `(current, rotated, policy)`.
pub type RotateFn = fn(&Path, &Path, GenerationPolicy) -> io::Result<()>;

/// External dependencies of a writer.
pub struct WriterDeps<H, C> {
    /// Fallback used when in-process rotation is denied
    pub helper: H,
    pub clock: C,
    /// In-process rotation; defaults to [`rotate_generations`]
    pub rotate: RotateFn,
}

impl<H, C> WriterDeps<H, C> {
    pub fn new(helper: H, clock: C) -> Self {
        Self {
            helper,
            clock,
            rotate: rotate_generations,
        }
    }

    /// Replace the in-process rotation routine.
    pub fn with_rotate(mut self, rotate: RotateFn) -> Self {
        self.rotate = rotate;
        self
    }
}

impl Default for WriterDeps<NoOpRotationHelper, SystemClock> {
    fn default() -> Self {
        Self::new(NoOpRotationHelper, SystemClock)
    }
}

/// Mutable state guarded by the writer lock.
struct WriterState {
    file: Option<File>,
    file_state: FileState,
    /// When the current file started receiving entries, for age-based rotation
    opened_at: Option<Instant>,
    create_backoff: Backoff,
    rotate_backoff: Backoff,
    last_error: Option<String>,
}

/// Appends leveled entries to one log file, rotating it when it grows past
/// the configured size or age.
///
/// Every create, rotate and append runs under a single instance lock, so
/// concurrent callers never interleave bytes and no entry straddles a
/// rotation. The file is created on the first emitted entry.
///
/// Failures never reach the caller. They move the writer to
/// [`FileState::Degraded`], are counted in [`DiagnosticsSnapshot`], and are
/// reported with `tracing`. Failed creates and rotations are retried at most
/// once per `retry_backoff`.
///
/// When the process may not rename files in the log directory, rotation is
/// delegated to the injected [`PrivilegedRotationHelper`]. If that fails
/// too, entries keep going to the existing file.
pub struct FileLogWriter<H = NoOpRotationHelper, C = SystemClock> {
    program_identity: String,
    log_level: LogLevel,
    options: FileLoggerOptions,
    pid: Option<u32>,
    log_file: PathBuf,
    rotated_log_file: PathBuf,
    helper: H,
    clock: C,
    rotate: RotateFn,
    counters: Counters,
    state: Mutex<WriterState>,
}

impl FileLogWriter {
    /// Writer with no privileged helper and the system clock.
    pub fn new(
        program_identity: impl Into<String>,
        log_level: LogLevel,
        options: FileLoggerOptions,
        log_section: Option<&str>,
    ) -> Self {
        Self::with_deps(
            program_identity,
            log_level,
            options,
            log_section,
            WriterDeps::default(),
        )
    }
}

impl<H: PrivilegedRotationHelper, C: Clock> FileLogWriter<H, C> {
    pub fn with_deps(
        program_identity: impl Into<String>,
        log_level: LogLevel,
        options: FileLoggerOptions,
        log_section: Option<&str>,
        deps: WriterDeps<H, C>,
    ) -> Self {
        let program_identity = program_identity.into();
        let log_file =
            log_paths::log_file_path(&options.log_directory, &program_identity, log_section);
        let rotated_log_file = log_paths::rotated_log_path(&log_file);
        let pid = options.include_pid.then(std::process::id);
        let state = WriterState {
            file: None,
            file_state: FileState::Uninitialized,
            opened_at: None,
            create_backoff: Backoff::new(options.retry_backoff),
            rotate_backoff: Backoff::new(options.retry_backoff),
            last_error: None,
        };
        Self {
            program_identity,
            log_level,
            options,
            pid,
            log_file,
            rotated_log_file,
            helper: deps.helper,
            clock: deps.clock,
            rotate: deps.rotate,
            counters: Counters::default(),
            state: Mutex::new(state),
        }
    }

    /// Current health of the writer.
    pub fn diagnostics(&self) -> DiagnosticsSnapshot {
        let (file_state, last_error) = {
            let state = self.state.lock();
            (state.file_state, state.last_error.clone())
        };
        DiagnosticsSnapshot::capture(&self.counters, file_state, last_error)
    }

    fn write_entry(&self, identity: &str, level: LogLevel, message: &str) {
        if !level.passes(self.log_level) {
            return;
        }

        let mut state = self.state.lock();
        let now = self.clock.now();
        let entry = format_entry(self.clock.utc_now(), identity, self.pid, level, message);

        if !self.ensure_file(&mut state, now) {
            Counters::bump(&self.counters.entries_dropped);
            return;
        }

        self.rotate_if_needed(&mut state, entry.len() as u64, now);
        if state.file.is_none() {
            // Reopening after rotation failed; already recorded
            Counters::bump(&self.counters.entries_dropped);
            return;
        }

        match self.append(&mut state, &entry) {
            Ok(()) => {
                Counters::bump(&self.counters.entries_written);
                self.mark_recovered(&mut state, FailureKind::Write);
            }
            Err(e) => {
                Counters::bump(&self.counters.entries_dropped);
                self.record_failure(&mut state, e);
            }
        }
    }

    /// Make sure an open handle to an existing file is available, creating
    /// the file if needed. Returns false if the entry must be dropped.
    fn ensure_file(&self, state: &mut WriterState, now: Instant) -> bool {
        if state.file.is_some() && self.log_file.exists() {
            return true;
        }
        if !state.create_backoff.ready(now) {
            return false;
        }
        match self.create_file(state, now) {
            Ok(()) => {
                state.create_backoff.reset();
                true
            }
            Err(e) => {
                state.create_backoff.fail(now);
                self.record_failure(state, e);
                false
            }
        }
    }

    /// Open `log_file` for appending, creating it and its parent directories
    /// if absent.
    fn create_file(&self, state: &mut WriterState, now: Instant) -> Result<(), WriterError> {
        state.file = None;
        let create_err = |source| WriterError::FileCreate {
            path: self.log_file.clone(),
            source,
        };
        if let Some(parent) = self.log_file.parent() {
            fs::create_dir_all(parent).map_err(create_err)?;
        }
        let file = open_append(&self.log_file, self.options.file_mode).map_err(create_err)?;
        state.file = Some(file);
        state.opened_at.get_or_insert(now);
        if state.file_state == FileState::Uninitialized {
            state.file_state = FileState::Active;
        }
        self.mark_recovered(state, FailureKind::FileCreate);
        Ok(())
    }

    fn rotate_if_needed(&self, state: &mut WriterState, incoming: u64, now: Instant) {
        let size = match fs::metadata(&self.log_file) {
            Ok(meta) => meta.len(),
            Err(_) => return,
        };
        if !self.rotation_due(state, size, incoming, now) {
            state.rotate_backoff.reset();
            self.mark_recovered(state, FailureKind::Rotation);
            return;
        }
        if !state.rotate_backoff.ready(now) {
            return;
        }
        if self.rotate_log_file(state, size, now) {
            state.rotate_backoff.reset();
        } else {
            state.rotate_backoff.fail(now);
        }
    }

    fn rotation_due(&self, state: &WriterState, size: u64, incoming: u64, now: Instant) -> bool {
        // Never rotate an empty file, even if one entry alone exceeds the limit
        if size == 0 {
            return false;
        }
        let max_size = self.options.max_size_bytes;
        let by_size = max_size > 0 && size.saturating_add(incoming) > max_size;
        let by_age = match (self.options.max_age, state.opened_at) {
            (Some(max_age), Some(opened_at)) => now.duration_since(opened_at) >= max_age,
            _ => false,
        };
        by_size || by_age
    }

    /// Rotate the active file and reopen a fresh one. Returns whether the
    /// rotation actually happened; on failure the existing file is reopened
    /// so entries keep flowing.
    fn rotate_log_file(&self, state: &mut WriterState, size: u64, now: Instant) -> bool {
        // Release the handle before the rename
        state.file = None;

        let policy = self.options.generation_policy();
        let rotated = match (self.rotate)(&self.log_file, &self.rotated_log_file, policy) {
            Ok(()) => {
                tracing::debug!(
                    path = %self.log_file.display(),
                    rotated = %self.rotated_log_file.display(),
                    size,
                    "rotated log file"
                );
                true
            }
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                tracing::debug!(
                    path = %self.log_file.display(),
                    error = %e,
                    "rotation denied, requesting privileged rotation"
                );
                self.rotate_log_file_privileged(state, size)
            }
            Err(e) => {
                self.record_failure(
                    state,
                    WriterError::Rotation {
                        path: self.log_file.clone(),
                        reason: e.to_string(),
                    },
                );
                false
            }
        };

        if rotated {
            Counters::bump(&self.counters.rotations);
            state.opened_at = Some(now);
            self.mark_recovered(state, FailureKind::Rotation);
        }

        if let Err(e) = self.create_file(state, now) {
            state.create_backoff.fail(now);
            self.record_failure(state, e);
        }
        rotated
    }

    fn rotate_log_file_privileged(&self, state: &mut WriterState, size: u64) -> bool {
        let request = RotationRequest {
            current: self.log_file.clone(),
            rotated: self.rotated_log_file.clone(),
            policy: self.options.generation_policy(),
        };
        let reason = match self.helper.request_rotation(&request) {
            Ok(()) if self.still_unrotated(size) => {
                "helper reported success but the file was not moved".to_string()
            }
            Ok(()) => {
                Counters::bump(&self.counters.privileged_rotations);
                return true;
            }
            Err(e) => e.to_string(),
        };
        self.record_failure(
            state,
            WriterError::Rotation {
                path: self.log_file.clone(),
                reason,
            },
        );
        false
    }

    /// True if `log_file` still holds at least `size` bytes.
    fn still_unrotated(&self, size: u64) -> bool {
        fs::metadata(&self.log_file).is_ok_and(|meta| meta.len() >= size)
    }

    /// Append and flush one entry. A failed append is truncated back so the
    /// file never holds a partial line.
    fn append(&self, state: &mut WriterState, entry: &str) -> Result<(), WriterError> {
        let write_err = |source| WriterError::Write {
            path: self.log_file.clone(),
            source,
        };
        let Some(file) = state.file.as_mut() else {
            return Err(write_err(io::Error::new(
                io::ErrorKind::NotFound,
                "log file is not open",
            )));
        };

        let before = file.metadata().map(|meta| meta.len()).ok();
        let result = file
            .write_all(entry.as_bytes())
            .and_then(|()| file.flush());
        if let Err(source) = result {
            if let Some(len) = before {
                let _ = file.set_len(len);
            }
            // Reopen on the next call
            state.file = None;
            return Err(write_err(source));
        }
        Ok(())
    }

    fn record_failure(&self, state: &mut WriterState, error: WriterError) {
        let kind = error.kind();
        Counters::bump(self.counters.failure(kind));
        let newly_degraded = state.file_state != FileState::Degraded(kind);
        state.file_state = FileState::Degraded(kind);
        state.last_error = Some(error.to_string());
        if newly_degraded {
            tracing::warn!(
                identity = %self.program_identity,
                path = %self.log_file.display(),
                error = %error,
                "log writer degraded"
            );
        } else {
            tracing::debug!(error = %error, "log writer still degraded");
        }
    }

    /// Clear a `kind` degradation. A rotation that is still failing outlives
    /// recovery from any other kind; only a rotation clears it.
    fn mark_recovered(&self, state: &mut WriterState, kind: FailureKind) {
        if state.file_state != FileState::Degraded(kind) {
            return;
        }
        if kind != FailureKind::Rotation && state.rotate_backoff.failing() {
            state.file_state = FileState::Degraded(FailureKind::Rotation);
            tracing::debug!(recovered = ?kind, "log writer still failing to rotate");
            return;
        }
        state.file_state = FileState::Active;
        tracing::info!(
            identity = %self.program_identity,
            path = %self.log_file.display(),
            "log writer recovered"
        );
    }
}

impl<H: PrivilegedRotationHelper, C: Clock> LogWriter for FileLogWriter<H, C> {
    fn log(&self, level: LogLevel, message: &str) {
        self.write_entry(&self.program_identity, level, message);
    }

    fn log_as(&self, identity: &str, level: LogLevel, message: &str) {
        self.write_entry(identity, level, message);
    }

    fn log_level(&self) -> LogLevel {
        self.log_level
    }
}

fn open_append(path: &Path, mode: Option<u32>) -> io::Result<File> {
    let mut opts = OpenOptions::new();
    opts.create(true).append(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        if let Some(mode) = mode {
            opts.mode(mode);
        }
    }
    #[cfg(not(unix))]
    let _ = mode;
    opts.open(path)
}

#[cfg(test)]
#[path = "file_writer_tests.rs"]
mod tests;
