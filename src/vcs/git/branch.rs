// hammer-rs: deployment VCS helper
//
// SPDX-FileCopyrightText: 2026 hammer-rs contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Commit -> branch resolution.
//!
//! Strategies run in order until one yields a candidate:
//!
//! 1. cache (keyed by the resolved commit id; ref names are never cached)
//! 2. remote refs containing the commit (`for-each-ref`, `branch -a` fallback)
//! 3. `symbolic-ref` at the commit (exit 1 = detached, not an error)
//! 4. `<remote>/...` decorations of the commit's log line
//! 5. local, then remote branches whose log contains the commit

use std::collections::BTreeSet;
use tracing::{debug, trace};

use super::GitBackend;
use crate::channel::quote;
use crate::error::{HammerResult, VcsError};
use crate::vcs::Ambiguity;

/// Whether `branch` names a branch at all (detached heads do not).
#[must_use]
pub fn can_normalize(branch: &str) -> bool {
    !branch.trim().is_empty()
        && !branch.contains("detached from")
        && !branch.contains("detached at")
}

/// Strips `<remote>/`, `HEAD` and `->` artifacts from raw ref text.
///
/// Detached-head markers and names that end up empty give `None`.
#[must_use]
pub fn normalize_branch(branch: &str, remote: &str) -> Option<String> {
    if !can_normalize(branch) {
        return None;
    }

    let normalized = branch
        .replace(&format!("{remote}/"), "")
        .replace("HEAD", "")
        .replace("->", "");
    let normalized = normalized.trim().trim_matches('/').trim();
    (!normalized.is_empty()).then(|| normalized.to_string())
}

/// Whether `commit` is a hash rather than a ref name that can move.
fn is_commit_id(commit: &str) -> bool {
    commit.len() >= super::revision::MIN_COMMIT_ID_LEN
        && commit.chars().all(|c| c.is_ascii_hexdigit())
}

/// Cleans one `for-each-ref` / `branch -a` line into a branch name.
fn cleanup_candidate(raw: &str, remote: &str) -> Option<String> {
    let mut name = raw.trim();
    if name.starts_with('[') {
        return None;
    }
    if let Some(rest) = name.strip_prefix("* ") {
        name = rest;
    }
    if !can_normalize(name) || name.contains("HEAD") {
        return None;
    }

    for prefix in [
        format!("refs/remotes/{remote}/"),
        "refs/remotes/".to_string(),
        format!("remotes/{remote}/"),
        format!("{remote}/"),
    ] {
        if let Some(rest) = name.strip_prefix(prefix.as_str()) {
            name = rest;
        }
    }

    (!name.is_empty()).then(|| name.to_string())
}

impl GitBackend {
    /// Short id of the checked out commit.
    pub(super) fn head_commit(&self) -> HammerResult<String> {
        let _cwd = self.shell.cd(self.code_dir()?);
        let output = self
            .shell
            .run_silent("git --no-pager log -n 1 --pretty=%h")?;
        Ok(output.trim().to_string())
    }

    pub(super) fn resolve_branch(&self, commit: &str, ambiguous: bool) -> HammerResult<String> {
        let _cwd = self.shell.cd(self.code_dir()?);

        let commit = if commit.is_empty() || commit.eq_ignore_ascii_case("head") {
            self.head_commit()?
        } else {
            commit.to_string()
        };

        let cached = self.branch_cache.borrow().get(&commit).cloned();
        if let Some(branch) = cached {
            trace!(commit = %commit, branch = %branch, "branch cache hit");
            return Ok(branch);
        }

        let (candidates, stable) = self.branch_candidates(&commit)?;
        let candidates: Vec<String> = candidates.into_iter().collect();
        debug!(commit = %commit, ?candidates, stable, "branch candidates");

        let branch = match candidates.as_slice() {
            [] => return Err(VcsError::NoBranchFound { commit }.into()),
            [only] => only.clone(),
            many if ambiguous => return Ok(many.join("|")),
            many => {
                let request = Ambiguity::new(
                    format!("remote deployed git branch (for {commit})"),
                    many.to_vec(),
                );
                self.disambiguator.choose(&request)?
            }
        };

        if stable && is_commit_id(&commit) {
            self.branch_cache
                .borrow_mut()
                .insert(commit, branch.clone());
        }
        Ok(branch)
    }

    /// Candidates from the first strategy that finds any, sorted.
    ///
    /// The flag is false for `symbolic-ref` and decoration results, which
    /// describe a ref rather than the commit and are never cached.
    fn branch_candidates(&self, commit: &str) -> HammerResult<(BTreeSet<String>, bool)> {
        let found = self.containing_refs(commit)?;
        if !found.is_empty() {
            return Ok((found, true));
        }

        let found = self.symbolic_ref(commit)?;
        if !found.is_empty() {
            return Ok((found, false));
        }

        let found = self.decorations(commit)?;
        if !found.is_empty() {
            return Ok((found, false));
        }

        let found = self.branches_containing(commit, false)?;
        if !found.is_empty() {
            return Ok((found, true));
        }

        Ok((self.branches_containing(commit, true)?, true))
    }

    fn containing_refs(&self, commit: &str) -> HammerResult<BTreeSet<String>> {
        let commit = quote(commit);
        let lines = match self.shell.run_silent(&format!(
            "git for-each-ref --contains {commit} --format='%(refname)' refs/remotes/"
        )) {
            Ok(output) => output,
            Err(err) if err.exit_code().is_some() => {
                // older git without `for-each-ref --contains`
                match self
                    .shell
                    .run_silent(&format!("git branch --color=never -a --contains {commit}"))
                {
                    Ok(output) => output,
                    // 129: unknown commit
                    Err(err) if err.exit_code() == Some(129) => String::new(),
                    Err(err) => return Err(err),
                }
            }
            Err(err) => return Err(err),
        };

        Ok(lines
            .lines()
            .filter_map(|line| cleanup_candidate(line, self.remote()))
            .collect())
    }

    fn symbolic_ref(&self, commit: &str) -> HammerResult<BTreeSet<String>> {
        match self
            .shell
            .run_silent(&format!("git symbolic-ref --short -q {}", quote(commit)))
        {
            Ok(output) => Ok(Some(output.trim().to_string())
                .filter(|branch| !branch.is_empty())
                .into_iter()
                .collect()),
            // 1: detached head
            Err(err) if err.exit_code() == Some(1) => Ok(BTreeSet::new()),
            Err(err) => Err(err),
        }
    }

    fn decorations(&self, commit: &str) -> HammerResult<BTreeSet<String>> {
        let output = self.shell.run_silent(&format!(
            "git --no-pager log -n 1 --oneline --pretty=%d {}",
            quote(commit)
        ))?;
        let prefix = format!("{}/", self.remote());

        Ok(output
            .trim_matches(|c| c == ' ' || c == '(' || c == ')')
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty() && !token.contains("HEAD"))
            .filter_map(|token| token.strip_prefix(prefix.as_str()))
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Local (`remote == false`) or remote-tracking branch names.
    fn all_branches(&self, remote: bool) -> HammerResult<BTreeSet<String>> {
        let scope = if remote { "-r" } else { "-l" };
        let output = self
            .shell
            .run_silent(&format!("git --no-pager branch {scope} --color=never"))?;

        Ok(output
            .lines()
            .map(|line| {
                let line = line.trim();
                line.strip_prefix("* ").unwrap_or(line)
            })
            .filter_map(|line| normalize_branch(line, self.remote()))
            .collect())
    }

    /// Branches whose history (merged with `<remote>/<branch>`) contains `commit`.
    fn branches_containing(&self, commit: &str, remote: bool) -> HammerResult<BTreeSet<String>> {
        let mut found = BTreeSet::new();
        for branch in self.all_branches(remote)? {
            let command = format!(
                "git --no-pager log --pretty=%H {branch} {remote}/{branch} | grep -i ^{commit}",
                branch = quote(&branch),
                remote = self.remote(),
                commit = quote(commit),
            );
            match self.shell.run_silent(&command) {
                Ok(output) if !output.trim().is_empty() => {
                    found.insert(branch);
                }
                Ok(_) => {}
                // grep found nothing
                Err(err) if err.exit_code() == Some(1) => {}
                Err(err) => return Err(err),
            }
        }
        Ok(found)
    }
}
