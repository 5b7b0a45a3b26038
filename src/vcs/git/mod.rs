// hammer-rs: deployment VCS helper
//
// SPDX-FileCopyrightText: 2026 hammer-rs contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git backend driven through the `git` CLI on the target host.
//!
//! ```text
//! GitBackend
//!   branch.rs    branch_of: cache -> for-each-ref --contains -> symbolic-ref
//!                           -> log %d decoration -> per-branch log search
//!   revision.rs  classify revision (hex >= 7 = commit, else remote branch)
//!                deployment_list: HEAD..target, then target..HEAD
//! ```

mod branch;
mod revision;


pub use branch::{can_normalize, normalize_branch};

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::debug;

use super::{
    Ambiguity, DeploymentList, Disambiguator, Shell, Vcs, VcsKind, VcsSettings, Version,
};
use crate::channel::quote;
use crate::error::{HammerResult, VcsError};

const VERSION_SEP: &str = ":|:|:";

/// Git implementation of [`Vcs`].
pub struct GitBackend {
    settings: VcsSettings,
    shell: Shell,
    local: Shell,
    disambiguator: Rc<dyn Disambiguator>,
    /// Resolved commit id -> chosen branch; lives as long as the backend.
    branch_cache: RefCell<HashMap<String, String>>,
}

impl GitBackend {
    #[must_use]
    pub fn new(settings: &VcsSettings) -> Self {
        Self {
            shell: settings.remote_shell(),
            local: settings.local_shell(),
            disambiguator: settings.disambiguator(),
            settings: settings.clone(),
            branch_cache: RefCell::new(HashMap::new()),
        }
    }

    /// `x..y`; git needs both bounds.
    ///
    /// # Errors
    ///
    /// Returns `VcsError::InvalidRevset` if either bound is empty.
    pub fn revset(x: &str, y: &str) -> HammerResult<String> {
        if x.trim().is_empty() || y.trim().is_empty() {
            return Err(VcsError::InvalidRevset {
                x: x.to_string(),
                y: y.to_string(),
                message: "git revision sets need both bounds",
            }
            .into());
        }
        Ok(format!("{x}..{y}"))
    }

    /// `git log` prints newest-first; deployment lists are oldest-first.
    #[must_use]
    pub fn order_revisions(mut revisions: Vec<String>) -> Vec<String> {
        revisions.reverse();
        revisions
    }

    /// The shell running commands on the target.
    #[must_use]
    pub const fn shell(&self) -> &Shell {
        &self.shell
    }

    fn code_dir(&self) -> HammerResult<&str> {
        self.settings.require_code_dir(VcsKind::Git.name())
    }

    fn remote(&self) -> &str {
        self.settings.remote()
    }

    fn remote_url(&self, name: &str) -> HammerResult<Option<String>> {
        match self
            .local
            .run_silent(&format!("git config --get remote.{name}.url"))
        {
            Ok(url) => Ok(Some(url.trim().to_string()).filter(|u| !u.is_empty())),
            Err(err) if err.exit_code() == Some(1) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Log lines for `revset`, branch placeholder filled with `label` or
    /// resolved per commit.
    fn log_lines(&self, revset: &str, label: Option<&str>) -> HammerResult<Vec<String>> {
        let _cwd = self.shell.cd(self.code_dir()?);
        let output = self.shell.run_silent(&format!(
            "git --no-pager log --format='%h {{}} %an <%ae> %s' {}",
            quote(revset)
        ))?;

        output
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| self.add_branch(line, label))
            .collect()
    }

    fn add_branch(&self, line: &str, label: Option<&str>) -> HammerResult<String> {
        let Some(hash) = line.split_whitespace().next() else {
            return Ok(line.to_string());
        };
        let branch = match label {
            Some(label) => label.to_string(),
            None => {
                debug!(commit = hash, "figuring out branch for commit");
                self.branch_of(hash, true)?
            }
        };
        Ok(line.replacen("{}", &branch, 1))
    }
}

impl Vcs for GitBackend {
    fn kind(&self) -> HammerResult<VcsKind> {
        Ok(VcsKind::Git)
    }

    fn repo_url(&self) -> HammerResult<Option<String>> {
        let output = self.local.run_silent("git remote -v")?;
        let mut remotes: Vec<String> = Vec::new();
        for name in output.lines().filter_map(|l| l.split_whitespace().next()) {
            if !remotes.iter().any(|r| r == name) {
                remotes.push(name.to_string());
            }
        }

        match remotes.as_slice() {
            [] => Ok(None),
            [only] => self.remote_url(only),
            many if many.iter().any(|r| r == self.remote()) => self.remote_url(self.remote()),
            many => {
                let request = Ambiguity::new("which remote to use", many.to_vec());
                let chosen = self.disambiguator.choose(&request)?;
                self.remote_url(&chosen)
            }
        }
    }

    fn clone_checkout(&self, revision: Option<&str>) -> HammerResult<()> {
        let url = self.repo_url()?.ok_or(VcsError::NoRepoUrl)?;
        self.shell.run(&format!(
            "git clone {} {}",
            quote(&url),
            quote(self.code_dir()?)
        ))?;

        match revision {
            Some(revision) if !revision.is_empty() => self.update(Some(revision)),
            _ => Ok(()),
        }
    }

    fn branch_of(&self, commit: &str, ambiguous: bool) -> HammerResult<String> {
        self.resolve_branch(commit, ambiguous)
    }

    fn pull(&self) -> HammerResult<()> {
        let _cwd = self.shell.cd(self.code_dir()?);
        self.shell
            .run(&format!("git fetch {}", quote(self.remote())))?;
        Ok(())
    }

    fn update(&self, revision: Option<&str>) -> HammerResult<()> {
        let revision = revision.unwrap_or_default();
        self.reject_remote_prefixed(revision)?;

        let _cwd = self.shell.cd(self.code_dir()?);
        self.pull()?;
        let (target, _) = self.revision_and_base_branch(revision)?;
        self.shell.run(&format!(
            "git -c advice.detachedHead=false checkout -q {}",
            quote(&target)
        ))?;
        Ok(())
    }

    fn deployment_list(&self, revision: Option<&str>) -> HammerResult<DeploymentList> {
        self.compute_deployment_list(revision.unwrap_or_default())
    }

    fn revset_log(&self, revset: &str) -> HammerResult<Vec<String>> {
        self.log_lines(revset, None)
    }

    fn raw_changed_files(&self, revset: &str) -> HammerResult<Vec<String>> {
        let _cwd = self.shell.cd(self.code_dir()?);
        let output = self.shell.run_silent(&format!(
            "git --no-pager diff --name-status {}",
            quote(revset)
        ))?;
        Ok(output
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.replace('\t', " "))
            .collect())
    }

    fn version(&self) -> HammerResult<Version> {
        let _cwd = self.shell.cd(self.code_dir()?);
        let command = format!("git --no-pager log -n 1 --format='%h{VERSION_SEP}%s{VERSION_SEP}%an <%ae>'");
        let output = self.shell.run_silent(&command)?;

        let parts: Vec<String> = output
            .trim()
            .split(VERSION_SEP)
            .map(str::to_string)
            .collect();
        let Ok([commit_id, message, author]) = <[String; 3]>::try_from(parts) else {
            return Err(VcsError::UnexpectedOutput { command, output }.into());
        };

        let branch = self.resolve_branch("HEAD", false)?;
        Ok(Version {
            commit_id,
            branch,
            message,
            author,
        })
    }
}
