// hammer-rs: deployment VCS helper
//
// SPDX-FileCopyrightText: 2026 hammer-rs contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   config (options, inis), repo (detect .. branch), deploy (deploy-list, changed-files)
//!
//! Config + GlobalOptions --> TargetConfig --> VcsSettings --> VcsProxy
//!                               host? --> SshChannel : LocalChannel
//! ```

pub mod config;
pub mod deploy;
pub mod repo;

#[cfg(test)]
mod tests;

use anyhow::Context as _;
use std::rc::Rc;
use tracing::debug;

use crate::channel::{CommandChannel, LocalChannel, SshChannel};
use crate::cli::global::GlobalOptions;
use crate::config::Config;
use crate::config::types::TargetConfig;
use crate::error::Result;
use crate::vcs::{VcsProxy, VcsSettings};

/// Selects `--target` (or `[target]`) and applies the target flags.
///
/// # Errors
///
/// Returns an error if `--target` names an unknown target.
pub fn resolve_target(config: &Config, global: &GlobalOptions) -> Result<TargetConfig> {
    let mut target = config.target(global.target.as_deref())?;
    global.apply_to_target(&mut target);
    Ok(target)
}

/// Channel to the target: ssh when a host is configured, else this machine.
#[must_use]
pub fn target_channel(target: &TargetConfig) -> Rc<dyn CommandChannel> {
    match &target.host {
        Some(host) => Rc::new(
            SshChannel::builder()
                .host(host)
                .maybe_port(target.port)
                .ssh_options(target.ssh_options.clone())
                .build(),
        ),
        None => Rc::new(LocalChannel::new()),
    }
}

/// Backend settings for `target`.
///
/// # Errors
///
/// Returns an error if no project root is configured and the working
/// directory cannot be read.
pub fn vcs_settings(target: &TargetConfig) -> Result<VcsSettings> {
    let project_root = match &target.project_root {
        Some(root) => root.clone(),
        None => std::env::current_dir().context("failed to read working directory")?,
    };

    let settings = VcsSettings::builder()
        .project_root(project_root)
        .maybe_code_dir(target.code_dir.clone())
        .use_sudo(target.use_sudo)
        .remote(target.remote.clone())
        .channel(target_channel(target))
        .disambiguator(target.ambiguity.disambiguator())
        .build();

    debug!(
        host = settings.target(),
        code_dir = ?settings.code_dir(),
        sudo = settings.use_sudo(),
        "vcs settings"
    );
    Ok(settings)
}

/// Lazily detected backend for the selected target.
///
/// # Errors
///
/// Returns an error if the target cannot be resolved.
pub fn connect(config: &Config, global: &GlobalOptions) -> Result<VcsProxy> {
    let target = resolve_target(config, global)?;
    Ok(VcsProxy::new(vcs_settings(&target)?))
}
