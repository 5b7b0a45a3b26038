// hammer-rs: deployment VCS helper
//
// SPDX-FileCopyrightText: 2026 hammer-rs contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Deployment inspection commands.

use std::fmt::Write as _;

use crate::cli::deploy::{ChangedFilesArgs, DeployListArgs};
use crate::config::types::TargetConfig;
use crate::error::Result;
use crate::vcs::{DeploymentList, FileFilter, Vcs};

/// Run the deploy-list command.
///
/// Filters default to `target.changed_files` when none are given.
///
/// # Errors
///
/// Returns an error if the revision cannot be resolved, a filter does not
/// compile, or the changed files cannot be listed.
pub fn run_deploy_list_command(
    args: &DeployListArgs,
    vcs: &dyn Vcs,
    target: &TargetConfig,
) -> Result<()> {
    let list = vcs.deployment_list(args.revision.as_deref())?;

    let files = match list.revset() {
        Some(revset) if args.files => {
            let patterns = if args.filters.is_empty() {
                &target.changed_files
            } else {
                &args.filters
            };
            let filter = FileFilter::from_patterns(patterns)?;
            Some(vcs.changed_files(revset, filter.as_ref())?)
        }
        _ => None,
    };

    print!("{}", render_deploy_list(&list, files.as_deref(), args.json)?);
    Ok(())
}

/// Run the changed-files command.
///
/// # Errors
///
/// Returns an error if a filter does not compile or the backend fails.
pub fn run_changed_files_command(args: &ChangedFilesArgs, vcs: &dyn Vcs) -> Result<()> {
    let filter = FileFilter::from_patterns(&args.filters)?;
    for line in vcs.changed_files(&args.revset, filter.as_ref())? {
        println!("{line}");
    }
    Ok(())
}

/// Text or JSON rendering of a deployment list, newline-terminated.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_deploy_list(
    list: &DeploymentList,
    files: Option<&[String]>,
    json: bool,
) -> Result<String> {
    if json {
        let value = match files {
            Some(files) => serde_json::json!({ "deployment": list, "changed_files": files }),
            None => serde_json::to_value(list)?,
        };
        return Ok(format!("{}\n", serde_json::to_string_pretty(&value)?));
    }

    let mut out = list.to_string();
    if !out.ends_with('\n') {
        out.push('\n');
    }
    if let Some(files) = files {
        let _ = writeln!(out, "changed files ({}):", files.len());
        for file in files {
            let _ = writeln!(out, "  {file}");
        }
    }
    Ok(out)
}
