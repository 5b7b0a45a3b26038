// hammer-rs: deployment VCS helper
//
// SPDX-FileCopyrightText: 2026 hammer-rs contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Per-target configuration merging.
//!
//! ```text
//! TargetConfig + TargetOverride --> field-by-field merge
//! ```
//!
//! Only fields set (`Some`) in the override replace base values.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::types::TargetConfig;
use crate::vcs::AmbiguityPolicy;

/// `[targets.<name>]` section: a [`TargetConfig`] with every field optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TargetOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssh_options: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_root: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_sudo: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ambiguity: Option<AmbiguityPolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changed_files: Option<Vec<String>>,
}

impl TargetOverride {
    /// `(key, value)` pairs for the fields this override sets.
    pub(super) fn set_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        if let Some(host) = &self.host {
            fields.push(("host", host.clone()));
        }
        if let Some(port) = self.port {
            fields.push(("port", port.to_string()));
        }
        if let Some(options) = &self.ssh_options {
            fields.push(("ssh_options", super::format_list(options)));
        }
        if let Some(code_dir) = &self.code_dir {
            fields.push(("code_dir", code_dir.clone()));
        }
        if let Some(root) = &self.project_root {
            fields.push(("project_root", root.display().to_string()));
        }
        if let Some(use_sudo) = self.use_sudo {
            fields.push(("use_sudo", use_sudo.to_string()));
        }
        if let Some(remote) = &self.remote {
            fields.push(("remote", remote.clone()));
        }
        if let Some(ambiguity) = self.ambiguity {
            fields.push(("ambiguity", ambiguity.as_str().to_string()));
        }
        if let Some(filters) = &self.changed_files {
            fields.push(("changed_files", super::format_list(filters)));
        }
        fields
    }
}

/// Merge `override_config` over `base`.
#[must_use]
pub fn merge_target_config(base: &TargetConfig, override_config: &TargetOverride) -> TargetConfig {
    TargetConfig {
        host: override_config.host.clone().or_else(|| base.host.clone()),
        port: override_config.port.or(base.port),
        ssh_options: override_config
            .ssh_options
            .clone()
            .unwrap_or_else(|| base.ssh_options.clone()),
        code_dir: override_config
            .code_dir
            .clone()
            .or_else(|| base.code_dir.clone()),
        project_root: override_config
            .project_root
            .clone()
            .or_else(|| base.project_root.clone()),
        use_sudo: override_config.use_sudo.unwrap_or(base.use_sudo),
        remote: override_config
            .remote
            .clone()
            .unwrap_or_else(|| base.remote.clone()),
        ambiguity: override_config.ambiguity.unwrap_or(base.ambiguity),
        changed_files: override_config
            .changed_files
            .clone()
            .unwrap_or_else(|| base.changed_files.clone()),
    }
}
