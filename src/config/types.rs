// hammer-rs: deployment VCS helper
//
// SPDX-FileCopyrightText: 2026 hammer-rs contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types.
//!
//! ```text
//! Config: GlobalConfig, TargetConfig, targets: name -> TargetOverride
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::logging::LogLevel;
use crate::vcs::AmbiguityPolicy;

/// Global options (`[global]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Console log level (0-6).
    pub output_log_level: LogLevel,
    /// File log level (0-6).
    pub file_log_level: LogLevel,
    /// Log file path; no file logging when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::DEBUG,
            log_file: None,
        }
    }
}

/// Where the deployed checkout lives and how to reach it (`[target]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TargetConfig {
    /// SSH host; commands run locally when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Extra `-o` options passed to ssh.
    pub ssh_options: Vec<String>,
    /// Checkout directory on the target.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_dir: Option<String>,
    /// Local project clone; defaults to the working directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_root: Option<PathBuf>,
    /// Run target commands through `sudo`.
    pub use_sudo: bool,
    /// Remote name the checkout tracks.
    pub remote: String,
    pub ambiguity: AmbiguityPolicy,
    /// Default `deploy-list --files` filters.
    pub changed_files: Vec<String>,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: None,
            ssh_options: Vec::new(),
            code_dir: None,
            project_root: None,
            use_sudo: false,
            remote: "origin".to_string(),
            ambiguity: AmbiguityPolicy::default(),
            changed_files: Vec::new(),
        }
    }
}
