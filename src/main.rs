// hammer-rs: deployment VCS helper
//
// SPDX-FileCopyrightText: 2026 hammer-rs contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Command Dispatch
//!   Version | Options | Inis | Detect | RepoUrl | Clone | Pull
//!   Update | Current | Branch | DeployList | ChangedFiles
//! ```

use std::process::ExitCode;

use hammer_rs::cli::global::GlobalOptions;
use hammer_rs::cli::{self, Command};
use hammer_rs::cmd::config::{run_inis_command, run_options_command};
use hammer_rs::cmd::deploy::{run_changed_files_command, run_deploy_list_command};
use hammer_rs::cmd::repo::{
    run_branch_command, run_clone_command, run_current_command, run_detect_command,
    run_pull_command, run_repo_url_command, run_update_command,
};
use hammer_rs::cmd::{connect, resolve_target, vcs_settings};
use hammer_rs::config::Config;
use hammer_rs::config::loader::ConfigLoader;
use hammer_rs::error::Result;
use hammer_rs::logging::init_logging;
use hammer_rs::logging::{LogConfig, LogLevel};
use hammer_rs::vcs::VcsProxy;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> ExitCode {
    let cli = cli::parse();
    let config = load_config(&cli.global);

    let log_config = build_log_config(&cli.global, config.as_ref().ok());
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    match dispatch_command(&cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// CLI flags win; the loaded `[global]` section fills the rest.
fn build_log_config(global: &GlobalOptions, config: Option<&Config>) -> LogConfig {
    let console_level = global
        .log_level
        .and_then(LogLevel::from_u8)
        .or_else(|| config.map(|c| c.global.output_log_level))
        .unwrap_or(LogLevel::INFO);

    let file_level = global
        .file_log_level
        .and_then(LogLevel::from_u8)
        .or_else(|| config.map(|c| c.global.file_log_level))
        .unwrap_or(console_level);

    let log_file = global
        .log_file
        .clone()
        .or_else(|| config.and_then(|c| c.global.log_file.clone()));

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(file_level)
        .maybe_with_log_file(log_file)
        .build()
}

fn dispatch_command(cli: &cli::Cli, config: Result<Config>) -> Result<()> {
    let global = &cli.global;
    match &cli.command {
        Some(Command::Version) => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Some(Command::Options) => {
            run_options_command(&config?);
            Ok(())
        }
        Some(Command::Inis) => {
            run_inis_command(&build_config_loader(global).format_loaded_files());
            Ok(())
        }
        Some(Command::Detect) => run_detect_command(&connect(&config?, global)?),
        Some(Command::RepoUrl) => run_repo_url_command(&connect(&config?, global)?),
        Some(Command::Clone(args)) => run_clone_command(args, &connect(&config?, global)?),
        Some(Command::Pull) => run_pull_command(&connect(&config?, global)?),
        Some(Command::Update(args)) => run_update_command(args, &connect(&config?, global)?),
        Some(Command::Current(args)) => run_current_command(args, &connect(&config?, global)?),
        Some(Command::Branch(args)) => run_branch_command(args, &connect(&config?, global)?),
        Some(Command::DeployList(args)) => {
            let target = resolve_target(&config?, global)?;
            let vcs = VcsProxy::new(vcs_settings(&target)?);
            run_deploy_list_command(args, &vcs, &target)
        }
        Some(Command::ChangedFiles(args)) => {
            run_changed_files_command(args, &connect(&config?, global)?)
        }
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    }
}

fn build_config_loader(global: &GlobalOptions) -> ConfigLoader {
    let mut loader = ConfigLoader::new().add_toml_file_optional("hammer.toml");
    for ini_path in &global.inis {
        loader = loader.add_toml_file(ini_path);
    }
    loader.with_env_prefix("HAMMER")
}

fn load_config(global: &GlobalOptions) -> Result<Config> {
    let mut loader = build_config_loader(global);
    for (key, value) in global.to_config_overrides()? {
        loader = loader.set(&key, value)?;
    }
    loader
        .build()
        .map_err(|e| e.context("failed to load config"))
}
