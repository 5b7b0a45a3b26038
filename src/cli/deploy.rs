// hammer-rs: deployment VCS helper
//
// SPDX-FileCopyrightText: 2026 hammer-rs contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Deployment inspection arguments.
//!
//! ```text
//! deploy-list [REV] [--json] [--files] [-f RE]...
//!   → commits between the checkout and REV, optionally changed files
//! changed-files REVSET [-f RE]...
//!   → status lines for a revision set
//! ```

use clap::Args;

/// Arguments for `deploy-list`.
#[derive(Debug, Clone, Args)]
pub struct DeployListArgs {
    /// Target revision; empty means the tip of the tracked branch.
    #[arg(value_name = "REV")]
    pub revision: Option<String>,

    /// Print JSON.
    #[arg(long)]
    pub json: bool,

    /// Also list files changed in the deployment revset.
    #[arg(long)]
    pub files: bool,

    /// Only keep changed files matching REGEX (repeatable).
    /// Defaults to `target.changed_files`.
    #[arg(short = 'f', long = "filter", value_name = "REGEX", action = clap::ArgAction::Append)]
    pub filters: Vec<String>,
}

/// Arguments for `changed-files`.
#[derive(Debug, Clone, Args)]
pub struct ChangedFilesArgs {
    /// Revision set, e.g. `HEAD..origin/master` or `.::stable`.
    #[arg(value_name = "REVSET")]
    pub revset: String,

    /// Only keep files matching REGEX (repeatable).
    #[arg(short = 'f', long = "filter", value_name = "REGEX", action = clap::ArgAction::Append)]
    pub filters: Vec<String>,
}
