// hammer-rs: deployment VCS helper
//
// SPDX-FileCopyrightText: 2026 hammer-rs contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::cli::{Cli, Command};
use crate::config::types::TargetConfig;
use crate::vcs::AmbiguityPolicy;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;

#[test]
fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn test_parse_version() {
    let cli = Cli::try_parse_from(["hammer", "version"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn test_parse_global_options() {
    let cli = Cli::try_parse_from([
        "hammer",
        "-l",
        "5",
        "--ini",
        "deploy.toml",
        "-t",
        "staging",
        "--host",
        "deploy@web1",
        "--code-dir",
        "/srv/app",
        "--sudo",
        "--ambiguity",
        "first",
        "pull",
    ])
    .unwrap();

    let global = &cli.global;
    assert_eq!(global.log_level, Some(5));
    assert_eq!(global.inis, vec![PathBuf::from("deploy.toml")]);
    assert_eq!(global.target.as_deref(), Some("staging"));
    assert_eq!(global.host.as_deref(), Some("deploy@web1"));
    assert_eq!(global.code_dir.as_deref(), Some("/srv/app"));
    assert!(global.sudo);
    assert_eq!(global.ambiguity, Some(AmbiguityPolicy::First));
    assert!(matches!(cli.command, Some(Command::Pull)));
}

#[test]
fn test_log_level_range() {
    assert!(Cli::try_parse_from(["hammer", "-l", "7", "version"]).is_err());
}

#[test]
fn test_parse_deploy_list() {
    let cli = Cli::try_parse_from([
        "hammer",
        "deploy-list",
        "stable",
        "--json",
        "--files",
        "-f",
        r"\.po$",
        "-f",
        "requirements",
    ])
    .unwrap();

    let Some(Command::DeployList(args)) = cli.command else {
        panic!("expected deploy-list");
    };
    assert_eq!(args.revision.as_deref(), Some("stable"));
    assert!(args.json);
    assert!(args.files);
    assert_eq!(args.filters, vec![r"\.po$", "requirements"]);
}

#[test]
fn test_parse_branch_defaults_to_head() {
    let cli = Cli::try_parse_from(["hammer", "branch"]).unwrap();
    let Some(Command::Branch(args)) = cli.command else {
        panic!("expected branch");
    };
    assert_eq!(args.commit, "HEAD");
    assert!(!args.ambiguous);

    let cli = Cli::try_parse_from(["hammer", "branch", "abc1234", "--ambiguous"]).unwrap();
    let Some(Command::Branch(args)) = cli.command else {
        panic!("expected branch");
    };
    assert_eq!(args.commit, "abc1234");
    assert!(args.ambiguous);
}

#[test]
fn test_parse_changed_files_requires_revset() {
    assert!(Cli::try_parse_from(["hammer", "changed-files"]).is_err());

    let cli = Cli::try_parse_from(["hammer", "changed-files", "HEAD..origin/master"]).unwrap();
    let Some(Command::ChangedFiles(args)) = cli.command else {
        panic!("expected changed-files");
    };
    assert_eq!(args.revset, "HEAD..origin/master");
    assert!(args.filters.is_empty());
}

#[test]
fn test_config_overrides() {
    let cli = Cli::try_parse_from([
        "hammer",
        "-s",
        "target/code_dir=/srv/app",
        "--set",
        "target.remote=upstream",
        "-l",
        "4",
        "options",
    ])
    .unwrap();

    assert_eq!(
        cli.global.to_config_overrides().unwrap(),
        vec![
            ("target.code_dir".to_string(), "/srv/app".to_string()),
            ("target.remote".to_string(), "upstream".to_string()),
            ("global.output_log_level".to_string(), "4".to_string()),
            ("global.file_log_level".to_string(), "4".to_string()),
        ]
    );
}

#[test]
fn test_config_override_without_value() {
    let cli = Cli::try_parse_from(["hammer", "-s", "target.code_dir", "options"]).unwrap();
    let err = cli.global.to_config_overrides().unwrap_err();
    insta::assert_snapshot!(err, @"invalid --set 'target.code_dir': expected KEY=VALUE");
}

#[test]
fn test_apply_to_target() {
    let cli = Cli::try_parse_from([
        "hammer",
        "--host",
        "web2",
        "--project-root",
        "/home/dev/project",
        "--ambiguity",
        "fail",
        "detect",
    ])
    .unwrap();

    let mut target = TargetConfig {
        host: Some("web1".into()),
        code_dir: Some("/srv/app".into()),
        ..TargetConfig::default()
    };
    cli.global.apply_to_target(&mut target);

    assert_eq!(target.host.as_deref(), Some("web2"));
    assert_eq!(target.code_dir.as_deref(), Some("/srv/app"));
    assert_eq!(target.project_root, Some(PathBuf::from("/home/dev/project")));
    assert_eq!(target.ambiguity, AmbiguityPolicy::Fail);
    assert!(!target.use_sudo);
}
