// hammer-rs: deployment VCS helper
//
// SPDX-FileCopyrightText: 2026 hammer-rs contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command channel: run a command string on a host, return its stdout.
//!
//! ```text
//!   CommandChannel::execute(cmd, ExecOptions)
//!        |                       |
//!        v                       v
//!   LocalChannel             SshChannel
//!   sh -c <cmd>              ssh host -- <cmd>
//!        \                       /
//!         v                     v
//!     Ok(stdout bytes) | ChannelError::{NonZeroExit{code}, SpawnFailed, Terminated}
//!
//! ExecFlags: ELEVATED (sudo -n -H sh -c '<cmd>'), SILENT (no echo at INFO)
//! ```
//!
//! The channel never changes directories on its own; the VCS shell prefixes
//! `cd '<dir>' &&` before handing the command over.

mod local;
mod ssh;


pub use local::LocalChannel;
pub use ssh::SshChannel;

use bitflags::bitflags;
use std::process::Output;
use tracing::{debug, info, trace};

use crate::error::{ChannelError, HammerResult};

bitflags! {
    /// Flags controlling how a command is executed.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ExecFlags: u32 {
        /// Run as the elevated user (via `sudo`)
        const ELEVATED = 0x01;
        /// Don't echo the command or its output at INFO level
        const SILENT = 0x02;
    }
}

/// Per-command execution options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExecOptions {
    flags: ExecFlags,
}

impl ExecOptions {
    #[must_use]
    pub const fn new(flags: ExecFlags) -> Self {
        Self { flags }
    }

    #[must_use]
    pub const fn elevated(self, yes: bool) -> Self {
        if yes {
            Self::new(self.flags.union(ExecFlags::ELEVATED))
        } else {
            Self::new(self.flags.difference(ExecFlags::ELEVATED))
        }
    }

    #[must_use]
    pub const fn silent(self, yes: bool) -> Self {
        if yes {
            Self::new(self.flags.union(ExecFlags::SILENT))
        } else {
            Self::new(self.flags.difference(ExecFlags::SILENT))
        }
    }

    #[must_use]
    pub const fn flags(&self) -> ExecFlags {
        self.flags
    }

    #[must_use]
    pub const fn is_elevated(&self) -> bool {
        self.flags.contains(ExecFlags::ELEVATED)
    }

    #[must_use]
    pub const fn is_silent(&self) -> bool {
        self.flags.contains(ExecFlags::SILENT)
    }
}

/// Capability to execute command strings against one host.
///
/// Implementations must surface any non-zero exit status as
/// [`ChannelError::NonZeroExit`] carrying the code.
pub trait CommandChannel {
    /// Human readable target, used in log records (`local`, `deploy@web1`).
    fn target(&self) -> &str;

    /// Execute `command` through a POSIX shell and return captured stdout.
    ///
    /// # Errors
    ///
    /// Returns a `ChannelError` if the command cannot be spawned, is killed by a
    /// signal, or exits with a non-zero status.
    fn execute(&self, command: &str, options: ExecOptions) -> HammerResult<Vec<u8>>;
}

/// Quotes `arg` for safe embedding in a POSIX shell command line.
///
/// Words made only of safe characters are returned unchanged so log
/// records stay readable.
#[must_use]
pub fn quote(arg: &str) -> String {
    let safe = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:@%+,^".contains(c));
    if safe {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

/// Wraps `command` for elevated execution when requested.
#[must_use]
pub fn effective_command(command: &str, options: ExecOptions) -> String {
    if options.is_elevated() {
        format!("sudo -n -H sh -c {}", quote(command))
    } else {
        command.to_string()
    }
}

/// Logs the command line the way every channel does.
pub(crate) fn log_command(target: &str, command: &str, options: ExecOptions) {
    if options.is_silent() {
        debug!(target_host = target, command, "run");
    } else {
        info!(target_host = target, command, "run");
    }
}

/// Converts a finished process into the channel result.
pub(crate) fn finish(command: &str, output: Output) -> HammerResult<Vec<u8>> {
    trace!(
        command,
        stdout = %String::from_utf8_lossy(&output.stdout),
        stderr = %String::from_utf8_lossy(&output.stderr),
        "finished"
    );

    if output.status.success() {
        return Ok(output.stdout);
    }

    match output.status.code() {
        Some(code) => Err(ChannelError::NonZeroExit {
            command: command.to_string(),
            code,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
        .into()),
        None => Err(ChannelError::Terminated {
            command: command.to_string(),
        }
        .into()),
    }
}
