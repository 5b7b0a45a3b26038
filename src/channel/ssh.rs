// hammer-rs: deployment VCS helper
//
// SPDX-FileCopyrightText: 2026 hammer-rs contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Channel that runs commands on a remote host through the `ssh` client.
//!
//! Authentication is left to the ssh client (agent, keys, `~/.ssh/config`);
//! `BatchMode=yes` makes it fail instead of prompting.

use std::process::{Command, Stdio};

use super::local::resolve_executable;
use super::{CommandChannel, ExecOptions, effective_command, finish, log_command};
use crate::error::{ChannelError, HammerResult};

/// Executes commands on `host` over ssh.
#[derive(Debug, Clone, bon::Builder)]
pub struct SshChannel {
    /// `host` or `user@host`.
    #[builder(into)]
    host: String,
    port: Option<u16>,
    /// Extra `-o` options, e.g. `StrictHostKeyChecking=accept-new`.
    #[builder(default)]
    ssh_options: Vec<String>,
}

impl SshChannel {
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Arguments passed to the `ssh` executable for `command`.
    #[must_use]
    pub fn command_args(&self, command: &str) -> Vec<String> {
        let mut args = vec!["-o".to_string(), "BatchMode=yes".to_string()];
        if let Some(port) = self.port {
            args.push("-p".to_string());
            args.push(port.to_string());
        }
        for option in &self.ssh_options {
            args.push("-o".to_string());
            args.push(option.clone());
        }
        args.push(self.host.clone());
        args.push("--".to_string());
        args.push(command.to_string());
        args
    }
}

impl CommandChannel for SshChannel {
    fn target(&self) -> &str {
        &self.host
    }

    fn execute(&self, command: &str, options: ExecOptions) -> HammerResult<Vec<u8>> {
        let command = effective_command(command, options);
        log_command(self.target(), &command, options);

        let ssh = resolve_executable("ssh")?;
        let output = Command::new(ssh)
            .args(self.command_args(&command))
            .stdin(Stdio::null())
            .output()
            .map_err(|source| ChannelError::SpawnFailed {
                command: command.clone(),
                source,
            })?;
        finish(&command, output)
    }
}
