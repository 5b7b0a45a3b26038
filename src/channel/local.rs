// hammer-rs: deployment VCS helper
//
// SPDX-FileCopyrightText: 2026 hammer-rs contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Channel that runs commands on this machine through `sh -c`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::{OnceLock, RwLock};

use super::{CommandChannel, ExecOptions, effective_command, finish, log_command};
use crate::error::{ChannelError, HammerResult};

/// Static cache for executable paths resolved via `which`.
static EXECUTABLE_CACHE: OnceLock<RwLock<BTreeMap<String, PathBuf>>> = OnceLock::new();

fn exe_cache() -> &'static RwLock<BTreeMap<String, PathBuf>> {
    EXECUTABLE_CACHE.get_or_init(|| RwLock::new(BTreeMap::new()))
}

/// Resolves `program` on `PATH`, caching the result for the process lifetime.
pub(crate) fn resolve_executable(program: &str) -> HammerResult<PathBuf> {
    {
        let cache = exe_cache()
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(path) = cache.get(program) {
            return Ok(path.clone());
        }
    }

    let path = which::which(program).map_err(|_| ChannelError::ExecutableNotFound {
        name: program.to_string(),
    })?;

    exe_cache()
        .write()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .insert(program.to_string(), path.clone());
    Ok(path)
}

/// Executes commands locally.
///
/// Used for the operator's own project checkout (`repo_url`) and when the
/// deployment target is the local machine.
#[derive(Debug, Clone, Default)]
pub struct LocalChannel {
    cwd: Option<PathBuf>,
}

impl LocalChannel {
    #[must_use]
    pub const fn new() -> Self {
        Self { cwd: None }
    }

    /// Channel whose commands start in `dir`.
    #[must_use]
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            cwd: Some(dir.into()),
        }
    }

    #[must_use]
    pub fn cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }
}

impl CommandChannel for LocalChannel {
    fn target(&self) -> &str {
        "local"
    }

    fn execute(&self, command: &str, options: ExecOptions) -> HammerResult<Vec<u8>> {
        let command = effective_command(command, options);
        log_command(self.target(), &command, options);

        let sh = resolve_executable("sh")?;
        let mut cmd = Command::new(sh);
        cmd.arg("-c")
            .arg(&command)
            .env("GIT_TERMINAL_PROMPT", "0")
            .env("HGPLAIN", "1")
            .stdin(Stdio::null());
        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }

        let output = cmd.output().map_err(|source| ChannelError::SpawnFailed {
            command: command.clone(),
            source,
        })?;
        finish(&command, output)
    }
}
