// hammer-rs: deployment VCS helper
//
// SPDX-FileCopyrightText: 2026 hammer-rs contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Everything a backend needs to operate on one checkout.

use std::path::PathBuf;
use std::rc::Rc;

use super::disambiguate::{Disambiguator, Prompt};
use super::shell::Shell;
use crate::channel::{CommandChannel, LocalChannel};
use crate::error::{HammerResult, VcsError};

/// Backend construction settings.
///
/// ```ignore
/// let settings = VcsSettings::builder()
///     .project_root("/home/me/project")
///     .code_dir("/srv/project")
///     .channel(Rc::new(SshChannel::builder().host("deploy@web1").build()))
///     .use_sudo(true)
///     .build();
/// ```
#[derive(Clone, bon::Builder)]
pub struct VcsSettings {
    /// Operator's local clone; detection and `repo_url` look here.
    #[builder(into)]
    project_root: PathBuf,

    /// Checkout directory on the target host.
    #[builder(into)]
    code_dir: Option<String>,

    #[builder(default)]
    use_sudo: bool,

    /// Remote name used for tracking refs.
    #[builder(into, default = "origin".to_string())]
    remote: String,

    /// Channel to the target host.
    channel: Rc<dyn CommandChannel>,

    /// Channel for the local project (defaults to a local shell in `project_root`).
    local_channel: Option<Rc<dyn CommandChannel>>,

    #[builder(default = Rc::new(Prompt::stdio()))]
    disambiguator: Rc<dyn Disambiguator>,
}

impl VcsSettings {
    #[must_use]
    pub const fn project_root(&self) -> &PathBuf {
        &self.project_root
    }

    #[must_use]
    pub fn code_dir(&self) -> Option<&str> {
        self.code_dir.as_deref()
    }

    #[must_use]
    pub const fn use_sudo(&self) -> bool {
        self.use_sudo
    }

    #[must_use]
    pub fn remote(&self) -> &str {
        &self.remote
    }

    /// Host the target channel talks to.
    #[must_use]
    pub fn target(&self) -> &str {
        self.channel.target()
    }

    #[must_use]
    pub fn disambiguator(&self) -> Rc<dyn Disambiguator> {
        Rc::clone(&self.disambiguator)
    }

    /// Shell on the target host, elevated when `use_sudo` is set.
    #[must_use]
    pub fn remote_shell(&self) -> Shell {
        Shell::new(Rc::clone(&self.channel), self.use_sudo)
    }

    /// Shell for the operator's local project, never elevated.
    #[must_use]
    pub fn local_shell(&self) -> Shell {
        let channel = self.local_channel.clone().unwrap_or_else(|| {
            Rc::new(LocalChannel::in_dir(self.project_root.clone())) as Rc<dyn CommandChannel>
        });
        Shell::new(channel, false)
    }

    /// Checkout directory, or an error naming `backend`.
    ///
    /// # Errors
    ///
    /// Returns `VcsError::MissingCodeDir` if no checkout directory was configured.
    pub fn require_code_dir(&self, backend: &'static str) -> HammerResult<&str> {
        self.code_dir()
            .ok_or_else(|| VcsError::MissingCodeDir { backend }.into())
    }
}
