// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rotation helper that runs an external program.

use std::ffi::OsString;
use std::process::{Command, Stdio};

use super::{PrivilegedRotationHelper, RotationHelperError, RotationRequest};

/// Delegates rotation to an external program, typically the `logsink`
/// binary run through `sudo -n`.
///
/// The program is invoked as:
///   `<program> <args...> rotate --current P --rotated R --max-rotations N [--delete-old-logs]`
///
/// A zero exit status means the rotation happened. Any other status is a
/// rejection carrying the program's stderr. `logsink rotate` only accepts
/// files inside its own log directory (`LOGSINK_DIR` or the default).
#[derive(Debug, Clone)]
pub struct CommandRotationHelper {
    program: OsString,
    args: Vec<OsString>,
}

impl CommandRotationHelper {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Run `program` with leading `args` before the rotate arguments,
    /// e.g. `("sudo", ["-n", "/usr/local/bin/logsink"])`.
    pub fn with_args<I, S>(program: impl Into<OsString>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    fn command(&self, request: &RotationRequest) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .args(rotate_args(request))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        cmd
    }
}

/// Arguments describing `request` for the helper's `rotate` command.
pub(crate) fn rotate_args(request: &RotationRequest) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "rotate".into(),
        "--current".into(),
        request.current.clone().into(),
        "--rotated".into(),
        request.rotated.clone().into(),
        "--max-rotations".into(),
        request.policy.max_rotations.to_string().into(),
    ];
    if request.policy.delete_old_logs {
        args.push("--delete-old-logs".into());
    }
    args
}

impl PrivilegedRotationHelper for CommandRotationHelper {
    fn request_rotation(&self, request: &RotationRequest) -> Result<(), RotationHelperError> {
        let output = self
            .command(request)
            .output()
            .map_err(|source| RotationHelperError::Spawn {
                program: self.program.to_string_lossy().into_owned(),
                source,
            })?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let message = if stderr.is_empty() {
            format!("exited with {}", output.status)
        } else {
            stderr
        };
        Err(RotationHelperError::Rejected {
            path: request.current.clone(),
            message,
        })
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
