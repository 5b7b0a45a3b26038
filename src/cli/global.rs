// hammer-rs: deployment VCS helper
//
// SPDX-FileCopyrightText: 2026 hammer-rs contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! --ini FILE        ← Additional config files (can repeat)
//! --log-level N     ← Console verbosity (0-6)
//! --file-log-level  ← File verbosity (overrides --log-level)
//! --set KEY=VAL     ← Direct config override
//! --target NAME     ← Select [targets.NAME]
//! --host, --code-dir, --project-root, --sudo, --ambiguity
//!                   ← Applied to the selected target last
//!
//! Precedence: CLI flags > --set > env > --ini > hammer.toml > defaults
//! ```

use anyhow::anyhow;
use clap::Args;
use std::path::PathBuf;

use crate::config::types::TargetConfig;
use crate::error::Result;
use crate::vcs::AmbiguityPolicy;

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to additional TOML configuration file(s).
    /// Can be specified multiple times.
    #[arg(short = 'i', long = "ini", value_name = "FILE", action = clap::ArgAction::Append)]
    pub inis: Vec<PathBuf>,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace, 6=dump).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub log_level: Option<u8>,

    /// File log level, overrides --log-level for the log file.
    #[arg(long = "file-log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Named target from `[targets.NAME]`.
    #[arg(short = 't', long = "target", value_name = "NAME")]
    pub target: Option<String>,

    /// SSH host of the target (e.g. deploy@web1.example.com).
    #[arg(long = "host", value_name = "HOST")]
    pub host: Option<String>,

    /// Checkout directory on the target.
    #[arg(long = "code-dir", value_name = "DIR")]
    pub code_dir: Option<String>,

    /// Local project clone used for detection and repository URL lookup.
    #[arg(long = "project-root", value_name = "DIR")]
    pub project_root: Option<PathBuf>,

    /// Runs target commands through sudo.
    #[arg(long)]
    pub sudo: bool,

    /// What to do when a branch or remote cannot be determined automatically.
    #[arg(long = "ambiguity", value_name = "POLICY")]
    pub ambiguity: Option<AmbiguityPolicy>,

    /// Sets an option, such as 'target.code_dir=/srv/app'.
    /// Can be specified multiple times.
    #[arg(short = 's', long = "set", value_name = "OPTION", action = clap::ArgAction::Append)]
    pub options: Vec<String>,
}

impl GlobalOptions {
    /// Converts command-line options to `(key, value)` configuration overrides.
    ///
    /// `--set` accepts both `section.key` and `section/key`.
    ///
    /// # Errors
    ///
    /// Returns an error if a `--set` entry has no `=` or an empty key.
    pub fn to_config_overrides(&self) -> Result<Vec<(String, String)>> {
        let mut overrides = self
            .options
            .iter()
            .map(String::as_str)
            .map(parse_override)
            .collect::<Result<Vec<_>>>()?;

        if let Some(level) = self.log_level {
            overrides.push(("global.output_log_level".into(), level.to_string()));
        }

        // file_log_level falls back to log_level if not specified
        if let Some(level) = self.file_log_level.or(self.log_level) {
            overrides.push(("global.file_log_level".into(), level.to_string()));
        }

        if let Some(ref path) = self.log_file {
            overrides.push(("global.log_file".into(), path.display().to_string()));
        }

        Ok(overrides)
    }

    /// Applies the target flags over the selected target.
    pub fn apply_to_target(&self, target: &mut TargetConfig) {
        if let Some(ref host) = self.host {
            target.host = Some(host.clone());
        }
        if let Some(ref code_dir) = self.code_dir {
            target.code_dir = Some(code_dir.clone());
        }
        if let Some(ref root) = self.project_root {
            target.project_root = Some(root.clone());
        }
        if self.sudo {
            target.use_sudo = true;
        }
        if let Some(policy) = self.ambiguity {
            target.ambiguity = policy;
        }
    }
}

fn parse_override(option: &str) -> Result<(String, String)> {
    let (key, value) = option
        .split_once('=')
        .ok_or_else(|| anyhow!("invalid --set '{option}': expected KEY=VALUE"))?;
    let key = key.trim().replace('/', ".");
    if key.is_empty() {
        return Err(anyhow!("invalid --set '{option}': empty key"));
    }
    Ok((key, value.to_string()))
}
