// hammer-rs: deployment VCS helper
//
// SPDX-FileCopyrightText: 2026 hammer-rs contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mercurial backend driven through the `hg` CLI on the target host.
//!
//! Revision sets use `x::y`, which includes `x`; with one bound missing the
//! set is restricted to the working branch (`branch(p1()) and x::y`).

#[cfg(test)]
mod tests;

use super::{
    ALREADY_AT_TARGET, DeploymentList, NOT_RELATED, Shell, Vcs, VcsKind, VcsSettings, Version,
};
use crate::channel::quote;
use crate::error::{HammerResult, VcsError};

/// `hg` with color and pager disabled.
const HG: &str = "hg --config ui.color=never --config ui.paginate=never";

const VERSION_SEP: &str = ":|:|:";

/// Mercurial implementation of [`Vcs`].
pub struct HgBackend {
    settings: VcsSettings,
    shell: Shell,
    local: Shell,
}

impl HgBackend {
    #[must_use]
    pub fn new(settings: &VcsSettings) -> Self {
        Self {
            shell: settings.remote_shell(),
            local: settings.local_shell(),
            settings: settings.clone(),
        }
    }

    /// `x::y`, or `branch(p1()) and x::y` when one bound is empty.
    ///
    /// # Errors
    ///
    /// Returns `VcsError::InvalidRevset` if both bounds are empty.
    pub fn revset(x: &str, y: &str) -> HammerResult<String> {
        let (x, y) = (x.trim(), y.trim());
        match (x.is_empty(), y.is_empty()) {
            (true, true) => Err(VcsError::InvalidRevset {
                x: x.to_string(),
                y: y.to_string(),
                message: "at least one bound is required",
            }
            .into()),
            (false, false) => Ok(format!("{x}::{y}")),
            _ => Ok(format!("branch(p1()) and {x}::{y}")),
        }
    }

    /// Drops the boundary revision `x::y` always includes.
    #[must_use]
    pub fn order_revisions(revisions: Vec<String>) -> Vec<String> {
        revisions.into_iter().skip(1).collect()
    }

    #[must_use]
    pub const fn shell(&self) -> &Shell {
        &self.shell
    }

    fn code_dir(&self) -> HammerResult<&str> {
        self.settings.require_code_dir(VcsKind::Mercurial.name())
    }
}

impl Vcs for HgBackend {
    fn kind(&self) -> HammerResult<VcsKind> {
        Ok(VcsKind::Mercurial)
    }

    fn repo_url(&self) -> HammerResult<Option<String>> {
        match self.local.run_silent("hg paths default") {
            Ok(url) => Ok(Some(url.trim().to_string()).filter(|u| !u.is_empty())),
            Err(err) if err.exit_code() == Some(1) => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn clone_checkout(&self, revision: Option<&str>) -> HammerResult<()> {
        let url = self.repo_url()?.ok_or(VcsError::NoRepoUrl)?;
        self.shell.run(&format!(
            "hg clone {} {}",
            quote(&url),
            quote(self.code_dir()?)
        ))?;

        match revision {
            Some(revision) if !revision.is_empty() => self.update(Some(revision)),
            _ => Ok(()),
        }
    }

    fn branch_of(&self, commit: &str, _ambiguous: bool) -> HammerResult<String> {
        let _cwd = self.shell.cd(self.code_dir()?);

        let output = if commit.is_empty() || commit == "." || commit.eq_ignore_ascii_case("head") {
            self.shell.run_silent("hg id -b")?
        } else {
            self.shell.run_silent(&format!(
                "{HG} log -r {} --template '{{branch}}'",
                quote(commit)
            ))?
        };

        let branch = output.trim();
        if branch.is_empty() {
            return Err(VcsError::NoBranchFound {
                commit: commit.to_string(),
            }
            .into());
        }
        Ok(branch.to_string())
    }

    fn pull(&self) -> HammerResult<()> {
        let _cwd = self.shell.cd(self.code_dir()?);
        self.shell.run_silent("hg pull")?;
        Ok(())
    }

    fn update(&self, revision: Option<&str>) -> HammerResult<()> {
        self.pull()?;

        let _cwd = self.shell.cd(self.code_dir()?);
        match revision {
            Some(revision) if !revision.is_empty() => {
                self.shell.run(&format!("hg update {}", quote(revision)))?
            }
            _ => self.shell.run("hg update")?,
        };
        Ok(())
    }

    fn deployment_list(&self, revision: Option<&str>) -> HammerResult<DeploymentList> {
        let revision = revision.unwrap_or_default();
        let _cwd = self.shell.cd(self.code_dir()?);
        self.pull()?;

        let revset = Self::revset(".", revision)?;
        let revisions = self.revset_log(&revset)?;
        match revisions.len() {
            0 => {}
            1 => return Ok(DeploymentList::message(ALREADY_AT_TARGET)),
            _ => {
                return Ok(DeploymentList::Forwards {
                    forwards: Self::order_revisions(revisions),
                    revset,
                });
            }
        }

        let revset = Self::revset(revision, ".")?;
        let revisions = self.revset_log(&revset)?;
        if revisions.is_empty() {
            return Ok(DeploymentList::message(NOT_RELATED));
        }
        Ok(DeploymentList::Backwards {
            backwards: Self::order_revisions(revisions),
            revset,
        })
    }

    fn revset_log(&self, revset: &str) -> HammerResult<Vec<String>> {
        let _cwd = self.shell.cd(self.code_dir()?);
        let output = self.shell.run_silent(&format!(
            "{HG} log --template '{{rev}}:{{node|short}} {{branch}} {{author}} {{desc|firstline}}\\n' -r {}",
            quote(revset)
        ))?;

        Ok(output
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    fn raw_changed_files(&self, revset: &str) -> HammerResult<Vec<String>> {
        let _cwd = self.shell.cd(self.code_dir()?);
        let output = self
            .shell
            .run_silent(&format!("{HG} status --rev {}", quote(revset)))?;

        Ok(output
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.replace('\t', " "))
            .collect())
    }

    fn version(&self) -> HammerResult<Version> {
        let _cwd = self.shell.cd(self.code_dir()?);

        let command = "hg id -nb".to_string();
        let output = self.shell.run_silent(&command)?;
        let mut fields = output.split_whitespace();
        let (Some(rev), Some(branch)) = (fields.next(), fields.next()) else {
            return Err(VcsError::UnexpectedOutput {
                command,
                output: output.clone(),
            }
            .into());
        };
        // `5+` marks a dirty working copy
        let (rev, branch) = (rev.trim_end_matches('+').to_string(), branch.to_string());

        let command = format!(
            "{HG} log --template '{{node|short}}{VERSION_SEP}{{author}}{VERSION_SEP}{{desc|firstline}}\\n' -r {}",
            quote(&rev)
        );
        let output = self.shell.run_silent(&command)?;
        let parts: Vec<String> = output
            .trim()
            .split(VERSION_SEP)
            .map(str::to_string)
            .collect();
        let Ok([hash, author, message]) = <[String; 3]>::try_from(parts) else {
            return Err(VcsError::UnexpectedOutput { command, output }.into());
        };

        Ok(Version {
            commit_id: format!("{rev}:{hash}"),
            branch,
            message,
            author,
        })
    }
}
