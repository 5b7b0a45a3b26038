// hammer-rs: deployment VCS helper
//
// SPDX-FileCopyrightText: 2026 hammer-rs contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Backend selection and the lazily resolved proxy.

use std::cell::OnceCell;
use std::path::Path;
use tracing::debug;

use super::{
    DeploymentList, FileFilter, GitBackend, HgBackend, Vcs, VcsKind, VcsSettings, Version,
};
use crate::error::{HammerResult, VcsError};

/// Picks the backend whose marker directory exists in `root`.
///
/// Mercurial wins over Git when both markers are present.
///
/// # Errors
///
/// Returns `VcsError::NoBackendDetected` naming every backend tried.
pub fn detect(root: &Path) -> HammerResult<VcsKind> {
    VcsKind::ALL
        .into_iter()
        .find(|kind| kind.is_present(root))
        .ok_or_else(|| {
            VcsError::NoBackendDetected {
                root: root.display().to_string(),
                tried: VcsKind::ALL.map(VcsKind::tag).join(", "),
            }
            .into()
        })
}

/// Constructs the backend for `kind`.
#[must_use]
pub fn backend_for(kind: VcsKind, settings: &VcsSettings) -> Box<dyn Vcs> {
    match kind {
        VcsKind::Mercurial => Box::new(HgBackend::new(settings)),
        VcsKind::Git => Box::new(GitBackend::new(settings)),
    }
}

/// Handle that detects its backend on first use.
///
/// Lets callers build a handle before `project_root` exists (setup
/// scripts); every [`Vcs`] call resolves first, then forwards.
pub struct VcsProxy {
    settings: VcsSettings,
    real: OnceCell<Box<dyn Vcs>>,
}

impl VcsProxy {
    #[must_use]
    pub const fn new(settings: VcsSettings) -> Self {
        Self {
            settings,
            real: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.real.get().is_some()
    }

    /// The concrete backend, detecting it on the first call.
    ///
    /// Failed detection is not cached; a later call detects again.
    ///
    /// # Errors
    ///
    /// Returns `VcsError::NoBackendDetected` if no marker is found.
    pub fn resolve(&self) -> HammerResult<&dyn Vcs> {
        if let Some(real) = self.real.get() {
            return Ok(real.as_ref());
        }

        let kind = detect(self.settings.project_root())?;
        debug!(
            backend = kind.name(),
            root = %self.settings.project_root().display(),
            "detected vcs"
        );
        Ok(self
            .real
            .get_or_init(|| backend_for(kind, &self.settings))
            .as_ref())
    }
}

impl Vcs for VcsProxy {
    fn kind(&self) -> HammerResult<VcsKind> {
        self.resolve()?.kind()
    }

    fn repo_url(&self) -> HammerResult<Option<String>> {
        self.resolve()?.repo_url()
    }

    fn clone_checkout(&self, revision: Option<&str>) -> HammerResult<()> {
        self.resolve()?.clone_checkout(revision)
    }

    fn branch_of(&self, commit: &str, ambiguous: bool) -> HammerResult<String> {
        self.resolve()?.branch_of(commit, ambiguous)
    }

    fn pull(&self) -> HammerResult<()> {
        self.resolve()?.pull()
    }

    fn update(&self, revision: Option<&str>) -> HammerResult<()> {
        self.resolve()?.update(revision)
    }

    fn deployment_list(&self, revision: Option<&str>) -> HammerResult<DeploymentList> {
        self.resolve()?.deployment_list(revision)
    }

    fn revset_log(&self, revset: &str) -> HammerResult<Vec<String>> {
        self.resolve()?.revset_log(revset)
    }

    fn raw_changed_files(&self, revset: &str) -> HammerResult<Vec<String>> {
        self.resolve()?.raw_changed_files(revset)
    }

    fn changed_files(&self, revset: &str, filter: Option<&FileFilter>) -> HammerResult<Vec<String>> {
        self.resolve()?.changed_files(revset, filter)
    }

    fn version(&self) -> HammerResult<Version> {
        self.resolve()?.version()
    }
}
