// hammer-rs: deployment VCS helper
//
// SPDX-FileCopyrightText: 2026 hammer-rs contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Checkout command arguments.
//!
//! ```text
//! clone [REV]        → clone into code_dir, then update to REV
//! update [REV]       → pull, then check out REV (or the tracked branch)
//! current [--json]   → commit id, branch, author, message
//! branch [COMMIT]    → remote branch holding COMMIT (default HEAD)
//! ```

use clap::Args;

/// Optional target revision (`clone`, `update`).
#[derive(Debug, Clone, Args)]
pub struct RevisionArgs {
    /// Commit id, branch name or Mercurial revision; empty means the
    /// currently tracked branch.
    #[arg(value_name = "REV")]
    pub revision: Option<String>,
}

/// Arguments for `current`.
#[derive(Debug, Clone, Args)]
pub struct CurrentArgs {
    /// Print JSON instead of a single line.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `branch`.
#[derive(Debug, Clone, Args)]
pub struct BranchArgs {
    /// Commit to look up.
    #[arg(value_name = "COMMIT", default_value = "HEAD")]
    pub commit: String,

    /// Print every candidate joined by '|' instead of asking.
    #[arg(long)]
    pub ambiguous: bool,
}
