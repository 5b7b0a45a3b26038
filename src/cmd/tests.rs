// hammer-rs: deployment VCS helper
//
// SPDX-FileCopyrightText: 2026 hammer-rs contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;
use std::rc::Rc;

use super::deploy::{render_deploy_list, run_deploy_list_command};
use super::{resolve_target, target_channel, vcs_settings};
use crate::cli::deploy::DeployListArgs;
use crate::cli::global::GlobalOptions;
use crate::config::Config;
use crate::config::types::TargetConfig;
use crate::error::ConfigError;
use crate::vcs::testing::{ScriptedChannel, settings};
use crate::vcs::{ALREADY_AT_TARGET, DeploymentList, FailOnAmbiguity, HgBackend};

fn forwards() -> DeploymentList {
    DeploymentList::Forwards {
        forwards: vec![
            "bbbbbbb master Dev <dev@example.com> Second".into(),
            "ccccccc master Dev <dev@example.com> Third".into(),
        ],
        revset: "HEAD..origin/master".into(),
    }
}

#[test]
fn test_render_text_with_files() {
    let files = vec!["M app/views.py".to_string()];
    let out = render_deploy_list(&forwards(), Some(files.as_slice()), false).unwrap();
    assert_eq!(
        out,
        "forwards (HEAD..origin/master):\n\
         \x20 bbbbbbb master Dev <dev@example.com> Second\n\
         \x20 ccccccc master Dev <dev@example.com> Third\n\
         changed files (1):\n\
         \x20 M app/views.py\n"
    );
}

#[test]
fn test_render_message_gets_newline() {
    let list = DeploymentList::message(ALREADY_AT_TARGET);
    let out = render_deploy_list(&list, None, false).unwrap();
    assert_eq!(out, "Already at target revision\n");
}

#[test]
fn test_render_json() {
    let out = render_deploy_list(&DeploymentList::message(ALREADY_AT_TARGET), None, true).unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value, serde_json::json!({ "message": "Already at target revision" }));

    let files = vec!["A static/logo.png".to_string()];
    let out = render_deploy_list(&forwards(), Some(files.as_slice()), true).unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["deployment"]["revset"], "HEAD..origin/master");
    assert_eq!(value["changed_files"], serde_json::json!(["A static/logo.png"]));
}

#[test]
fn test_resolve_target_applies_flags_over_named_target() {
    let config = Config::parse(
        "[target]\ncode_dir = \"/srv/app\"\n[targets.staging]\nhost = \"staging\"\n",
    )
    .unwrap();
    let global = GlobalOptions {
        target: Some("staging".into()),
        sudo: true,
        ..GlobalOptions::default()
    };

    let target = resolve_target(&config, &global).unwrap();
    assert_eq!(target.host.as_deref(), Some("staging"));
    assert_eq!(target.code_dir.as_deref(), Some("/srv/app"));
    assert!(target.use_sudo);

    let global = GlobalOptions {
        target: Some("prod".into()),
        ..GlobalOptions::default()
    };
    let err = resolve_target(&config, &global).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::UnknownTarget(_))
    ));
}

#[test]
fn test_target_channel_selection() {
    let local = TargetConfig::default();
    assert_eq!(target_channel(&local).target(), "local");

    let remote = TargetConfig {
        host: Some("deploy@web1".into()),
        port: Some(2222),
        ..TargetConfig::default()
    };
    assert_eq!(target_channel(&remote).target(), "deploy@web1");
}

#[test]
fn test_vcs_settings_from_target() {
    let target = TargetConfig {
        code_dir: Some("/srv/app".into()),
        project_root: Some(PathBuf::from("/home/dev/project")),
        remote: "upstream".into(),
        use_sudo: true,
        ..TargetConfig::default()
    };
    let settings = vcs_settings(&target).unwrap();
    assert_eq!(settings.project_root(), &PathBuf::from("/home/dev/project"));
    assert_eq!(settings.code_dir(), Some("/srv/app"));
    assert_eq!(settings.remote(), "upstream");
    assert!(settings.use_sudo());
    assert!(settings.remote_shell().is_elevated());
}

#[test]
fn test_deploy_list_uses_configured_filters() {
    let remote = Rc::new(
        ScriptedChannel::new()
            .ok("hg pull", "")
            .ok(
                "-r .::stable",
                "5:aaaaaaaaaaaa default Dev first\n6:bbbbbbbbbbbb stable Dev second\n",
            )
            .ok("status --rev .::stable", "M app.py\nA locale/de.po\n"),
    );
    let local = Rc::new(ScriptedChannel::new());
    let hg = HgBackend::new(&settings(&remote, &local, Rc::new(FailOnAmbiguity)));

    let target = TargetConfig {
        changed_files: vec![r"\.po$".into()],
        ..TargetConfig::default()
    };
    let args = DeployListArgs {
        revision: Some("stable".into()),
        json: false,
        files: true,
        filters: Vec::new(),
    };

    run_deploy_list_command(&args, &hg, &target).unwrap();
    assert_eq!(remote.remaining(), 0);
}
