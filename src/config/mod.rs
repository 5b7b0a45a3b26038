// hammer-rs: deployment VCS helper
//
// SPDX-FileCopyrightText: 2026 hammer-rs contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. hammer.toml (cwd)
//! 3. --ini FILE (repeatable)
//! 4. HAMMER_* env vars
//! 5. --set key=value
//! 6. CLI flags (--host, --code-dir, ...)
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! HAMMER_GLOBAL__OUTPUT_LOG_LEVEL=4  → global.output_log_level = 4
//! HAMMER_TARGET__CODE_DIR=/srv/app   → target.code_dir = "/srv/app"
//! HAMMER_TARGET__USE_SUDO=true       → target.use_sudo = true
//! ```
//!
//! # Per-Target Overrides
//!
//! ```toml
//! [target]
//! code_dir = "/srv/app"
//!
//! [targets.staging]
//! host = "staging.example.com" # selected with --target staging
//! ```

pub mod loader;
pub mod merge;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{ConfigError, Result};

use loader::ConfigLoader;
use merge::TargetOverride;
use types::{GlobalConfig, TargetConfig};

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Default target.
    pub target: TargetConfig,
    /// Named targets (field-level overrides of `[target]`).
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub targets: BTreeMap<String, TargetOverride>,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use hammer_rs::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("hammer.toml")
    ///     .with_env_prefix("HAMMER")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Target settings for `name`, or the default `[target]` when `None`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownTarget` if no `[targets.<name>]` exists.
    pub fn target(&self, name: Option<&str>) -> std::result::Result<TargetConfig, ConfigError> {
        let Some(name) = name else {
            return Ok(self.target.clone());
        };
        self.targets
            .get(name)
            .map(|config| merge::merge_target_config(&self.target, config))
            .ok_or_else(|| ConfigError::UnknownTarget(name.to_string()))
    }

    /// Rejects values that would only fail later on the target.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an empty or malformed remote
    /// name, or port 0.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        validate_target("target", Some(self.target.remote.as_str()), self.target.port)?;
        for (name, config) in &self.targets {
            validate_target(
                &format!("targets.{name}"),
                config.remote.as_deref(),
                config.port,
            )?;
        }
        Ok(())
    }

    /// Format configuration options for display.
    ///
    /// Output is deterministically ordered using `BTreeMap`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_target_options(&mut options);
        for (name, config) in &self.targets {
            for (key, value) in config.set_fields() {
                options.insert(format!("targets.{name}.{key}"), value);
            }
        }

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);
        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        let global = &self.global;
        options.insert(
            "global.output_log_level".into(),
            global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file".into(),
            format_optional(global.log_file.as_ref().map(|p| p.display().to_string())),
        );
    }

    fn format_target_options(&self, options: &mut BTreeMap<String, String>) {
        let target = &self.target;
        options.insert("target.host".into(), format_optional(target.host.clone()));
        options.insert(
            "target.port".into(),
            format_optional(target.port.map(|p| p.to_string())),
        );
        options.insert("target.ssh_options".into(), format_list(&target.ssh_options));
        options.insert(
            "target.code_dir".into(),
            format_optional(target.code_dir.clone()),
        );
        options.insert(
            "target.project_root".into(),
            format_optional(target.project_root.as_ref().map(|p| p.display().to_string())),
        );
        options.insert("target.use_sudo".into(), target.use_sudo.to_string());
        options.insert("target.remote".into(), target.remote.clone());
        options.insert("target.ambiguity".into(), target.ambiguity.as_str().into());
        options.insert(
            "target.changed_files".into(),
            format_list(&target.changed_files),
        );
    }
}

fn validate_target(
    section: &str,
    remote: Option<&str>,
    port: Option<u16>,
) -> std::result::Result<(), ConfigError> {
    if let Some(remote) = remote
        && (remote.is_empty() || remote.contains(['/', ' ']))
    {
        return Err(ConfigError::InvalidValue {
            section: section.to_string(),
            key: "remote".to_string(),
            message: format!("'{remote}' is not a remote name"),
        });
    }
    if port == Some(0) {
        return Err(ConfigError::InvalidValue {
            section: section.to_string(),
            key: "port".to_string(),
            message: "port must be between 1 and 65535".to_string(),
        });
    }
    Ok(())
}

fn format_optional(value: Option<String>) -> String {
    value.unwrap_or_else(|| "(unset)".to_string())
}

fn format_list(values: &[String]) -> String {
    if values.is_empty() {
        "[]".to_string()
    } else {
        values.join(", ")
    }
}
