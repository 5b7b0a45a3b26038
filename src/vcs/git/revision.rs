// hammer-rs: deployment VCS helper
//
// SPDX-FileCopyrightText: 2026 hammer-rs contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Revision classification and the git deployment diff.

use tracing::info;

use super::GitBackend;
use crate::channel::quote;
use crate::error::{HammerResult, VcsError};
use crate::vcs::{ALREADY_AT_TARGET, DeploymentList, Vcs};

/// Shortest hex string accepted as a commit id.
pub const MIN_COMMIT_ID_LEN: usize = 7;

/// What a revision argument denotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RevisionKind {
    /// Empty: the remote-tracking branch of the current branch.
    CurrentBranch,
    Commit,
    Branch,
}

/// Classifies `revision` by shape alone.
///
/// # Errors
///
/// Returns `VcsError::CommitIdTooShort` for hex strings under seven characters.
pub(crate) fn classify(revision: &str) -> HammerResult<RevisionKind> {
    if revision.is_empty() {
        return Ok(RevisionKind::CurrentBranch);
    }
    if !revision.chars().all(|c| c.is_ascii_hexdigit()) {
        return Ok(RevisionKind::Branch);
    }
    if revision.len() < MIN_COMMIT_ID_LEN {
        return Err(VcsError::CommitIdTooShort {
            revision: revision.to_string(),
        }
        .into());
    }
    Ok(RevisionKind::Commit)
}

impl GitBackend {
    pub(super) fn reject_remote_prefixed(&self, revision: &str) -> HammerResult<()> {
        let prefix = format!("{}/", self.remote());
        if revision.starts_with(&prefix) {
            return Err(VcsError::RemotePrefixedBranch {
                revision: revision.to_string(),
                prefix,
            }
            .into());
        }
        Ok(())
    }

    /// Whether `revision` names a branch on the remote (or, with `locally`,
    /// in the checkout itself).
    pub(super) fn has_revision(&self, revision: &str, locally: bool) -> HammerResult<bool> {
        let prefix = format!("{}/", self.remote());
        let name = revision.strip_prefix(&prefix).unwrap_or(revision);
        let repo = if locally { "." } else { self.remote() };

        let command = format!(
            "git ls-remote --heads {} {} | wc -l",
            quote(repo),
            quote(name)
        );
        let output = self.shell.run_silent(&command)?;
        let count: usize = output
            .trim()
            .parse()
            .map_err(|_| VcsError::UnexpectedOutput { command, output })?;
        if count > 0 {
            return Ok(true);
        }

        match self.shell.run_silent(&format!(
            "git --no-pager show -s --oneline {}",
            quote(revision)
        )) {
            Ok(_) => Ok(true),
            Err(err) if err.exit_code().is_some() => Ok(false),
            Err(err) => Err(err),
        }
    }

    fn has_commit(&self, commit: &str) -> HammerResult<bool> {
        match self
            .shell
            .run_silent(&format!("git cat-file -e {}", quote(&format!("{commit}^{{commit}}"))))
        {
            Ok(_) => Ok(true),
            Err(err) if err.exit_code().is_some() => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Turns a revision argument into something `git log`/`checkout` accept.
    ///
    /// Returns the target and, for an empty argument, the current branch
    /// (shared by every log line of the call).
    pub(super) fn revision_and_base_branch(
        &self,
        revision: &str,
    ) -> HammerResult<(String, Option<String>)> {
        self.reject_remote_prefixed(revision)?;

        match classify(revision)? {
            RevisionKind::CurrentBranch => {
                let base = self.resolve_branch("HEAD", false)?;
                Ok((format!("{}/{base}", self.remote()), Some(base)))
            }
            RevisionKind::Commit => {
                if !self.has_commit(revision)? {
                    return Err(VcsError::RevisionNotFound {
                        revision: revision.to_string(),
                    }
                    .into());
                }
                Ok((revision.to_string(), None))
            }
            RevisionKind::Branch => {
                if !self.has_revision(revision, false)? {
                    return Err(VcsError::RevisionNotFound {
                        revision: revision.to_string(),
                    }
                    .into());
                }

                // the branch search needs a local branch to look at
                if !self.has_revision(revision, true)? {
                    let command = format!(
                        "git fetch {} {}",
                        quote(self.remote()),
                        quote(&format!("{revision}:{revision}"))
                    );
                    info!(
                        branch = revision,
                        "not a commit id and the branch exists remotely, creating it locally"
                    );
                    self.shell.run_silent(&command)?;
                }
                Ok((format!("{}/{revision}", self.remote()), None))
            }
        }
    }

    pub(super) fn compute_deployment_list(&self, revision: &str) -> HammerResult<DeploymentList> {
        self.reject_remote_prefixed(revision)?;

        let _cwd = self.shell.cd(self.code_dir()?);
        self.pull()?;

        let (target, base_branch) = self.revision_and_base_branch(revision)?;
        let label = base_branch.as_deref();

        let revset = Self::revset("HEAD", &target)?;
        let revisions = self.log_lines(&revset, label)?;
        if !revisions.is_empty() {
            return Ok(DeploymentList::Forwards {
                forwards: Self::order_revisions(revisions),
                revset,
            });
        }

        let revset = Self::revset(&target, "HEAD")?;
        let revisions = self.log_lines(&revset, label)?;
        if !revisions.is_empty() {
            return Ok(DeploymentList::Backwards {
                backwards: Self::order_revisions(revisions),
                revset,
            });
        }

        Ok(DeploymentList::message(ALREADY_AT_TARGET))
    }
}
