// hammer-rs: deployment VCS helper
//
// SPDX-FileCopyrightText: 2026 hammer-rs contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command runner with an explicit working-directory stack.
//!
//! ```text
//! let _cwd = shell.cd("/srv/app");      push
//! shell.run("git fetch origin")         --> cd '/srv/app' && git fetch origin
//! {
//!     let _inner = shell.cd("sub");     push
//! }                                     pop (Drop, also on `?`)
//! ```
//!
//! The stack is shared by every call on one backend, so one backend must
//! not be driven from two places at once.

use std::cell::RefCell;
use std::rc::Rc;

use crate::channel::{CommandChannel, ExecOptions, quote};
use crate::error::HammerResult;
use crate::utility::encoding::cleanup_output;

/// Runs commands through a [`CommandChannel`] relative to the current
/// directory scope.
pub struct Shell {
    channel: Rc<dyn CommandChannel>,
    elevated: bool,
    cwd_stack: RefCell<Vec<String>>,
}

impl Shell {
    #[must_use]
    pub fn new(channel: Rc<dyn CommandChannel>, elevated: bool) -> Self {
        Self {
            channel,
            elevated,
            cwd_stack: RefCell::new(Vec::new()),
        }
    }

    /// Enters `path` until the returned guard is dropped.
    #[must_use = "the directory scope ends when the guard is dropped"]
    pub fn cd(&self, path: impl Into<String>) -> CwdGuard<'_> {
        self.cwd_stack.borrow_mut().push(path.into());
        CwdGuard { shell: self }
    }

    /// Innermost directory scope, if any.
    #[must_use]
    pub fn cwd(&self) -> Option<String> {
        self.cwd_stack.borrow().last().cloned()
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.cwd_stack.borrow().len()
    }

    #[must_use]
    pub const fn is_elevated(&self) -> bool {
        self.elevated
    }

    /// Command string as sent to the channel.
    #[must_use]
    pub fn effective_command(&self, command: &str) -> String {
        match self.cwd() {
            Some(dir) => format!("cd {} && {command}", quote(&dir)),
            None => command.to_string(),
        }
    }

    /// Runs `command`, logging it at info level.
    ///
    /// # Errors
    ///
    /// Propagates the channel error, including `NonZeroExit`.
    pub fn run(&self, command: &str) -> HammerResult<String> {
        self.execute(command, false)
    }

    /// Runs `command`, logging it at debug level only.
    ///
    /// # Errors
    ///
    /// Propagates the channel error, including `NonZeroExit`.
    pub fn run_silent(&self, command: &str) -> HammerResult<String> {
        self.execute(command, true)
    }

    fn execute(&self, command: &str, silent: bool) -> HammerResult<String> {
        let options = ExecOptions::default()
            .elevated(self.elevated)
            .silent(silent);
        let stdout = self
            .channel
            .execute(&self.effective_command(command), options)?;
        Ok(cleanup_output(&stdout).trim_end_matches('\n').to_string())
    }
}

/// Directory scope entered with [`Shell::cd`].
pub struct CwdGuard<'a> {
    shell: &'a Shell,
}

impl Drop for CwdGuard<'_> {
    fn drop(&mut self) {
        self.shell.cwd_stack.borrow_mut().pop();
    }
}
