// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Generation-shifting rotation shared by in-process and privileged rotation.
//!
//! Given an active file `app.log` and a rotated path `app.log.1`, rotation
//! with `max_rotations = 3` performs:
//!   `app.log.3` → `app.log.3.dropping`
//!   `app.log.2` → `app.log.3`
//!   `app.log.1` → `app.log.2`
//!   `app.log`   → `app.log.1`
//!   `app.log.3.dropping` deleted
//!
//! Every step before the final delete is a rename. If one fails, the renames
//! already made are undone, so a failed rotation leaves every generation in
//! place and a retry starts from the same state.
//!
//! The active file is not recreated here; the writer recreates it under its
//! own credentials after rotation.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// How many rotated generations to retain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationPolicy {
    /// Rotated files kept on disk; always at least one
    pub max_rotations: u32,
    /// Sweep stale generations numbered above `max_rotations`.
    ///
    /// The generation shifted past `max_rotations` by a rotation is removed
    /// regardless; this flag only covers leftovers from a larger setting.
    pub delete_old_logs: bool,
}

impl Default for GenerationPolicy {
    fn default() -> Self {
        Self {
            max_rotations: 1,
            delete_old_logs: true,
        }
    }
}

/// Path of rotated generation `n` (1-based).
///
/// Generation 1 is `rotated` itself. Later generations replace a trailing
/// `.1` extension with `.n`, or append `.n` when there is none:
/// `app.log.1` → `app.log.2`, `app.old` → `app.old.2`.
pub fn generation_path(rotated: &Path, n: u32) -> PathBuf {
    if n <= 1 {
        return rotated.to_path_buf();
    }
    if rotated.extension().is_some_and(|ext| ext == "1") {
        return rotated.with_extension(n.to_string());
    }
    let mut raw: OsString = rotated.as_os_str().to_owned();
    raw.push(format!(".{}", n));
    PathBuf::from(raw)
}

/// Move `current` to `rotated`, shifting older generations down by one.
///
/// Nothing is touched unless `current` is an existing regular file. The
/// generation falling off the end is deleted only once `current` has been
/// moved into place; any earlier failure restores the previous layout. With
/// `delete_old_logs`, stale generations beyond `max_rotations` (left by an
/// earlier, larger setting) are swept afterwards on a best-effort basis.
///
/// The first failing filesystem operation is returned unchanged, so callers
/// can distinguish `PermissionDenied` from other failures.
pub fn rotate_generations(
    current: &Path,
    rotated: &Path,
    policy: GenerationPolicy,
) -> io::Result<()> {
    rotate_with(current, rotated, policy, |from, to| fs::rename(from, to))
}

fn rotate_with<R>(
    current: &Path,
    rotated: &Path,
    policy: GenerationPolicy,
    rename: R,
) -> io::Result<()>
where
    R: Fn(&Path, &Path) -> io::Result<()>,
{
    let metadata = fs::symlink_metadata(current)?;
    if !metadata.is_file() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} is not a regular file", current.display()),
        ));
    }

    let max = policy.max_rotations.max(1);
    let mut journal = RenameJournal::new(rename);

    let oldest = generation_path(rotated, max);
    let dropped = if fs::symlink_metadata(&oldest).is_ok() {
        let aside = dropping_path(&oldest);
        journal.rename(&oldest, &aside)?;
        Some(aside)
    } else {
        None
    };

    for n in (1..max).rev() {
        let from = generation_path(rotated, n);
        if fs::symlink_metadata(&from).is_ok() {
            journal.rename(&from, &generation_path(rotated, n + 1))?;
        }
    }
    journal.rename(current, rotated)?;
    journal.commit();

    if let Some(aside) = dropped {
        let _ = fs::remove_file(&aside);
    }
    if policy.delete_old_logs {
        sweep_stale_generations(rotated, max);
    }
    Ok(())
}

/// Where the oldest generation waits until the rotation has succeeded.
fn dropping_path(oldest: &Path) -> PathBuf {
    let mut raw: OsString = oldest.as_os_str().to_owned();
    raw.push(".dropping");
    PathBuf::from(raw)
}

/// Renames performed so far, undone in reverse order unless committed.
struct RenameJournal<R: Fn(&Path, &Path) -> io::Result<()>> {
    rename: R,
    done: Vec<(PathBuf, PathBuf)>,
}

impl<R: Fn(&Path, &Path) -> io::Result<()>> RenameJournal<R> {
    fn new(rename: R) -> Self {
        Self {
            rename,
            done: Vec::new(),
        }
    }

    fn rename(&mut self, from: &Path, to: &Path) -> io::Result<()> {
        (self.rename)(from, to)?;
        self.done.push((from.to_path_buf(), to.to_path_buf()));
        Ok(())
    }

    fn commit(&mut self) {
        self.done.clear();
    }
}

impl<R: Fn(&Path, &Path) -> io::Result<()>> Drop for RenameJournal<R> {
    fn drop(&mut self) {
        // Best effort: the original error is what the caller sees
        while let Some((from, to)) = self.done.pop() {
            let _ = (self.rename)(&to, &from);
        }
    }
}

/// Remove generations numbered above `max`, stopping at the first gap.
fn sweep_stale_generations(rotated: &Path, max: u32) {
    let mut n = max + 1;
    loop {
        let stale = generation_path(rotated, n);
        if fs::remove_file(&stale).is_err() {
            break;
        }
        n += 1;
    }
}

/// Rotated generations currently on disk, in generation order.
///
/// Scans until the first missing generation past `limit`.
pub fn existing_generations(rotated: &Path, limit: u32) -> Vec<PathBuf> {
    let mut found = Vec::new();
    let mut n = 1;
    loop {
        let path = generation_path(rotated, n);
        if path.exists() {
            found.push(path);
        } else if n > limit {
            break;
        }
        n += 1;
    }
    found
}

#[cfg(test)]
#[path = "rotation_tests.rs"]
mod tests;
