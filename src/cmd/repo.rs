// hammer-rs: deployment VCS helper
//
// SPDX-FileCopyrightText: 2026 hammer-rs contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Checkout commands: detect, repo-url, clone, pull, update, current, branch.

use tracing::info;

use crate::cli::repo::{BranchArgs, CurrentArgs, RevisionArgs};
use crate::error::{Result, VcsError};
use crate::vcs::Vcs;

/// Print the detected backend tag.
///
/// # Errors
///
/// Returns an error if no backend marker exists in the project root.
pub fn run_detect_command(vcs: &dyn Vcs) -> Result<()> {
    println!("{}", vcs.kind()?);
    Ok(())
}

/// Print the repository URL of the local project.
///
/// # Errors
///
/// Returns an error if the project has no usable remote URL.
pub fn run_repo_url_command(vcs: &dyn Vcs) -> Result<()> {
    let url = vcs.repo_url()?.ok_or(VcsError::NoRepoUrl)?;
    println!("{url}");
    Ok(())
}

/// Clone the project onto the target.
///
/// # Errors
///
/// Returns an error if the clone or the follow-up update fails.
pub fn run_clone_command(args: &RevisionArgs, vcs: &dyn Vcs) -> Result<()> {
    vcs.clone_checkout(args.revision.as_deref())?;
    info!("clone finished");
    Ok(())
}

/// Fetch new revisions on the target.
///
/// # Errors
///
/// Returns an error if the fetch fails.
pub fn run_pull_command(vcs: &dyn Vcs) -> Result<()> {
    vcs.pull()?;
    Ok(())
}

/// Update the target checkout and print the revision it ends up on.
///
/// # Errors
///
/// Returns an error if the revision cannot be resolved or checked out.
pub fn run_update_command(args: &RevisionArgs, vcs: &dyn Vcs) -> Result<()> {
    vcs.update(args.revision.as_deref())?;
    println!("{}", vcs.version()?);
    Ok(())
}

/// Print the deployed revision.
///
/// # Errors
///
/// Returns an error if the version cannot be read from the target.
pub fn run_current_command(args: &CurrentArgs, vcs: &dyn Vcs) -> Result<()> {
    let version = vcs.version()?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&version)?);
    } else {
        println!("{version}");
    }
    Ok(())
}

/// Print the remote branch `args.commit` belongs to.
///
/// # Errors
///
/// Returns an error if no branch is found or the choice is aborted.
pub fn run_branch_command(args: &BranchArgs, vcs: &dyn Vcs) -> Result<()> {
    println!("{}", vcs.branch_of(&args.commit, args.ambiguous)?);
    Ok(())
}
