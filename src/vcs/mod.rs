// hammer-rs: deployment VCS helper
//
// SPDX-FileCopyrightText: 2026 hammer-rs contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Version control abstraction for remote checkouts.
//!
//! ```text
//! VcsProxy (lazy, detects on first call)
//!     |  .hg? --> HgBackend      .git? --> GitBackend
//!     v
//! dyn Vcs ------------------------------------------+
//!   repo_url / clone_checkout / pull / update       |
//!   branch_of        (git: multi-strategy resolver) |
//!   deployment_list  forwards | backwards | message |
//!   changed_files    FileFilter (concatenating)     |
//!   version          (commit, branch, msg, author)  |
//!     |                                             |
//!     v                                             |
//! Shell: cwd stack + `cd '<dir>' && cmd` -----> dyn CommandChannel
//! ```
//!
//! Revision sets differ per backend: git excludes the left bound
//! structurally (`x..y`), Mercurial includes it (`x::y`) and
//! [`VcsKind::order_revisions`] drops it afterwards.

mod detect;
mod disambiguate;
pub mod git;
pub mod hg;
mod settings;
mod shell;

#[cfg(test)]
pub(crate) mod testing;

pub use detect::{VcsProxy, backend_for, detect};
pub use disambiguate::{
    Ambiguity, AmbiguityPolicy, Disambiguator, FailOnAmbiguity, PickFirst, Preseeded, Prompt,
};
pub use git::GitBackend;
pub use hg::HgBackend;
pub use settings::VcsSettings;
pub use shell::{CwdGuard, Shell};

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::path::Path;

use crate::error::{HammerResult, VcsError};

/// Message returned when the checkout already sits on the target.
pub const ALREADY_AT_TARGET: &str = "Already at target revision";

/// Message returned by Mercurial when neither direction connects the revisions.
pub const NOT_RELATED: &str = "Target revision is not related to the current revision";

/// Supported backends, in detection precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VcsKind {
    Mercurial,
    Git,
}

impl VcsKind {
    /// Detection order: Mercurial first.
    pub const ALL: [Self; 2] = [Self::Mercurial, Self::Git];

    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Mercurial => "hg",
            Self::Git => "git",
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mercurial => "Mercurial",
            Self::Git => "Git",
        }
    }

    /// Directory whose presence marks a checkout of this kind.
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Mercurial => ".hg",
            Self::Git => ".git",
        }
    }

    #[must_use]
    pub fn is_present(self, root: &Path) -> bool {
        root.join(self.marker()).exists()
    }

    /// Revision-set descriptor for "everything after `x` up to `y`".
    ///
    /// # Errors
    ///
    /// Returns `VcsError::InvalidRevset` when git is given an empty bound or
    /// Mercurial is given two empty bounds.
    pub fn revset_between(self, x: &str, y: &str) -> HammerResult<String> {
        match self {
            Self::Mercurial => HgBackend::revset(x, y),
            Self::Git => GitBackend::revset(x, y),
        }
    }

    /// Orders raw log lines oldest-first with the left boundary excluded.
    #[must_use]
    pub fn order_revisions(self, revisions: Vec<String>) -> Vec<String> {
        match self {
            Self::Mercurial => HgBackend::order_revisions(revisions),
            Self::Git => GitBackend::order_revisions(revisions),
        }
    }
}

impl fmt::Display for VcsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Result of comparing the deployed revision with a target.
///
/// Serializes to `{"forwards": [...], "revset": ".."}`,
/// `{"backwards": [...], "revset": ".."}` or `{"message": ".."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DeploymentList {
    /// Target is ahead; entries oldest-first.
    Forwards {
        forwards: Vec<String>,
        revset: String,
    },
    /// Target is behind; entries oldest-first.
    Backwards {
        backwards: Vec<String>,
        revset: String,
    },
    /// Nothing to apply.
    Message { message: String },
}

impl DeploymentList {
    #[must_use]
    pub fn message(message: &str) -> Self {
        Self::Message {
            message: message.to_string(),
        }
    }

    /// Log lines to apply or un-apply (empty for a message).
    #[must_use]
    pub fn entries(&self) -> &[String] {
        match self {
            Self::Forwards { forwards, .. } => forwards,
            Self::Backwards { backwards, .. } => backwards,
            Self::Message { .. } => &[],
        }
    }

    /// Revision set usable with [`Vcs::changed_files`].
    #[must_use]
    pub fn revset(&self) -> Option<&str> {
        match self {
            Self::Forwards { revset, .. } | Self::Backwards { revset, .. } => Some(revset),
            Self::Message { .. } => None,
        }
    }

    #[must_use]
    pub fn is_up_to_date(&self) -> bool {
        matches!(self, Self::Message { message } if message == ALREADY_AT_TARGET)
    }
}

impl fmt::Display for DeploymentList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (label, entries, revset) = match self {
            Self::Forwards { forwards, revset } => ("forwards", forwards, revset),
            Self::Backwards { backwards, revset } => ("backwards", backwards, revset),
            Self::Message { message } => return f.write_str(message),
        };
        writeln!(f, "{label} ({revset}):")?;
        for entry in entries {
            writeln!(f, "  {entry}")?;
        }
        Ok(())
    }
}

/// Revision currently deployed on the target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Version {
    pub commit_id: String,
    pub branch: String,
    pub message: String,
    /// `Name <email>`
    pub author: String,
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.commit_id, self.branch, self.author, self.message
        )
    }
}

/// Filter for changed-file lines.
///
/// A list of patterns concatenates the matches of each pattern in order,
/// so a line matching two patterns appears twice.
#[derive(Debug, Clone)]
pub enum FileFilter {
    Single(Regex),
    Many(Vec<Regex>),
}

fn compile(pattern: &str) -> HammerResult<Regex> {
    Regex::new(pattern).map_err(|source| {
        VcsError::InvalidFilter {
            pattern: pattern.to_string(),
            source,
        }
        .into()
    })
}

impl FileFilter {
    /// # Errors
    ///
    /// Returns `VcsError::InvalidFilter` if `pattern` is not a valid regex.
    pub fn new(pattern: &str) -> HammerResult<Self> {
        compile(pattern).map(Self::Single)
    }

    /// # Errors
    ///
    /// Returns `VcsError::InvalidFilter` for the first invalid pattern.
    pub fn any_of<I, S>(patterns: I) -> HammerResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        patterns
            .into_iter()
            .map(|p| compile(p.as_ref()))
            .collect::<HammerResult<Vec<_>>>()
            .map(Self::Many)
    }

    /// `None` for no patterns, a single filter for one, a list otherwise.
    ///
    /// # Errors
    ///
    /// Returns `VcsError::InvalidFilter` for the first invalid pattern.
    pub fn from_patterns(patterns: &[String]) -> HammerResult<Option<Self>> {
        match patterns {
            [] => Ok(None),
            [single] => Self::new(single).map(Some),
            many => Self::any_of(many).map(Some),
        }
    }

    #[must_use]
    pub fn apply(&self, lines: &[String]) -> Vec<String> {
        let matching = |regex: &Regex| {
            lines
                .iter()
                .filter(|line| regex.is_match(line))
                .cloned()
                .collect::<Vec<_>>()
        };
        match self {
            Self::Single(regex) => matching(regex),
            Self::Many(regexes) => regexes.iter().flat_map(matching).collect(),
        }
    }
}

/// Operations every backend provides against one remote checkout.
///
/// All remote operations run inside the checkout directory through the
/// backend's [`Shell`]. Instances are single-threaded; callers serialize
/// access.
pub trait Vcs {
    /// Backend kind. Resolving a [`VcsProxy`] may fail.
    ///
    /// # Errors
    ///
    /// Returns `VcsError::NoBackendDetected` if a proxy cannot pick a backend.
    fn kind(&self) -> HammerResult<VcsKind>;

    /// Url of the upstream repository of the local project, if known.
    ///
    /// # Errors
    ///
    /// Returns an error if the local tool fails or the operator aborts a choice.
    fn repo_url(&self) -> HammerResult<Option<String>>;

    /// Clone the project into `code_dir`, then update to `revision` if given.
    ///
    /// # Errors
    ///
    /// Returns `VcsError::NoRepoUrl` when the project has no upstream.
    fn clone_checkout(&self, revision: Option<&str>) -> HammerResult<()>;

    /// Branch containing `commit` (`HEAD` for the working revision).
    ///
    /// With `ambiguous`, several candidates are joined by `|` instead of
    /// asking the configured [`Disambiguator`].
    ///
    /// # Errors
    ///
    /// Returns `VcsError::NoBranchFound` when nothing contains the commit.
    fn branch_of(&self, commit: &str, ambiguous: bool) -> HammerResult<String>;

    /// Fetch new history without touching the working copy.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote command fails.
    fn pull(&self) -> HammerResult<()>;

    /// Switch the checkout to `revision` (tip of the current branch if `None`).
    ///
    /// # Errors
    ///
    /// Returns a validation error for malformed or unknown revisions.
    fn update(&self, revision: Option<&str>) -> HammerResult<()>;

    /// Revisions separating the deployed revision from `revision`.
    ///
    /// # Errors
    ///
    /// Returns a validation error for malformed or unknown revisions.
    fn deployment_list(&self, revision: Option<&str>) -> HammerResult<DeploymentList>;

    /// Log lines (`<id> <branch> <author> <subject>`) for a revision set.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote command fails.
    fn revset_log(&self, revset: &str) -> HammerResult<Vec<String>>;

    /// Unfiltered `<code> <path>` lines for a revision set.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote command fails.
    fn raw_changed_files(&self, revset: &str) -> HammerResult<Vec<String>>;

    /// Changed files in `revset`, optionally filtered.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote command fails.
    fn changed_files(&self, revset: &str, filter: Option<&FileFilter>) -> HammerResult<Vec<String>> {
        let lines = self.raw_changed_files(revset)?;
        Ok(match filter {
            Some(filter) => filter.apply(&lines),
            None => lines,
        })
    }

    /// Deployed commit id, branch, subject and author.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote command fails or prints something unexpected.
    fn version(&self) -> HammerResult<Version>;

    /// See [`VcsKind::revset_between`].
    ///
    /// # Errors
    ///
    /// Returns `VcsError::InvalidRevset` for unusable bounds.
    fn revset_between(&self, x: &str, y: &str) -> HammerResult<String> {
        self.kind()?.revset_between(x, y)
    }

    /// See [`VcsKind::order_revisions`].
    ///
    /// # Errors
    ///
    /// Returns `VcsError::NoBackendDetected` if a proxy cannot pick a backend.
    fn order_revisions(&self, revisions: Vec<String>) -> HammerResult<Vec<String>> {
        Ok(self.kind()?.order_revisions(revisions))
    }
}
