// hammer-rs: deployment VCS helper
//
// SPDX-FileCopyrightText: 2026 hammer-rs contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! hammer [global options] <command>
//! version | options | inis
//! detect | repo-url
//! clone [REV] | pull | update [REV]
//! current [--json] | branch [COMMIT] [--ambiguous]
//! deploy-list [REV] [--json] [--files] [-f RE]...
//! changed-files REVSET [-f RE]...
//! ```

pub mod deploy;
pub mod global;
pub mod repo;

#[cfg(test)]
mod tests;

use crate::cli::deploy::{ChangedFilesArgs, DeployListArgs};
use crate::cli::global::GlobalOptions;
use crate::cli::repo::{BranchArgs, CurrentArgs, RevisionArgs};
use clap::{Parser, Subcommand};

/// Deployment helper for git and Mercurial checkouts.
#[derive(Debug, Parser)]
#[command(
    name = "hammer",
    author,
    version,
    about = "Deployment VCS helper",
    long_about = "hammer-rs Copyright (C) 2026 hammer-rs contributors\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Inspects and updates a git or Mercurial checkout on a deployment\n\
                  target. `hammer --host deploy@web1 --code-dir /srv/app deploy-list`\n\
                  shows what deploying the tracked branch would change. See\n\
                  `hammer <command> --help` for more information about a command.",
    after_help = "CONFIG FILES:\n\n\
                  hammer reads `hammer.toml` from the current directory if present,\n\
                  then every file given with --ini, then HAMMER_* environment\n\
                  variables (HAMMER_TARGET__CODE_DIR=/srv/app), then --set options.\n\
                  Target flags such as --host apply last."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    Version,

    /// Lists all options and their values.
    Options,

    /// Lists the config files used by hammer.
    Inis,

    /// Prints the backend detected for the project root.
    Detect,

    /// Prints the repository URL of the local project.
    #[command(name = "repo-url")]
    RepoUrl,

    /// Clones the project into the target's code directory.
    Clone(RevisionArgs),

    /// Fetches new revisions on the target without changing the checkout.
    Pull,

    /// Updates the target checkout to a revision.
    Update(RevisionArgs),

    /// Shows the revision currently checked out on the target.
    Current(CurrentArgs),

    /// Shows the remote branch a commit belongs to.
    Branch(BranchArgs),

    /// Lists the commits a deployment would apply or revert.
    #[command(name = "deploy-list")]
    DeployList(DeployListArgs),

    /// Lists files changed in a revision set.
    #[command(name = "changed-files")]
    ChangedFiles(ChangedFilesArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
