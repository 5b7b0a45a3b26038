// hammer-rs: deployment VCS helper
//
// SPDX-FileCopyrightText: 2026 hammer-rs contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the Mercurial backend.
//!
//! Skipped when `hg` is not installed.

use hammer_rs::channel::LocalChannel;
use hammer_rs::vcs::{DeploymentList, FailOnAmbiguity, Vcs, VcsKind, VcsProxy, VcsSettings};
use std::fs;
use std::path::Path;
use std::process::Command;
use std::rc::Rc;

fn hg_available() -> bool {
    which::which("hg").is_ok()
}

fn run_hg(args: &[&str], cwd: &Path) {
    let output = Command::new("hg")
        .args(args)
        .current_dir(cwd)
        .env("HGPLAIN", "1")
        .env("HGUSER", "Test <test@test.com>")
        .output()
        .expect("failed to run hg");
    assert!(
        output.status.success(),
        "hg {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

fn commit(dir: &Path, file: &str, message: &str) {
    fs::write(dir.join(file), message).unwrap();
    run_hg(&["add", file], dir);
    run_hg(&["commit", "-m", message], dir);
}

#[test]
fn hg_clone_forwards_and_version() {
    if !hg_available() {
        return;
    }

    let temp = tempfile::tempdir().unwrap();
    let upstream = temp.path().join("upstream");
    let work = temp.path().join("work");
    let deploy = temp.path().join("deploy");
    fs::create_dir(&upstream).unwrap();

    run_hg(&["init"], &upstream);
    commit(&upstream, "README", "Initial commit");
    run_hg(
        &["clone", "-q", upstream.to_str().unwrap(), work.to_str().unwrap()],
        temp.path(),
    );

    let settings = VcsSettings::builder()
        .project_root(&work)
        .code_dir(deploy.to_str().unwrap())
        .channel(Rc::new(LocalChannel::new()))
        .disambiguator(Rc::new(FailOnAmbiguity))
        .build();
    let vcs = VcsProxy::new(settings);

    assert_eq!(vcs.kind().unwrap(), VcsKind::Mercurial);
    vcs.clone_checkout(None).unwrap();
    assert!(vcs.deployment_list(None).unwrap().is_up_to_date());

    commit(&upstream, "app.py", "Add app");
    let list = vcs.deployment_list(None).unwrap();
    let DeploymentList::Forwards { forwards, .. } = &list else {
        panic!("expected forwards, got {list:?}");
    };
    assert_eq!(forwards.len(), 1);
    assert!(forwards[0].starts_with("1:"), "unexpected entry {}", forwards[0]);
    assert!(forwards[0].ends_with("Add app"));

    let version = vcs.version().unwrap();
    assert!(version.commit_id.starts_with("0:"));
    assert_eq!(version.branch, "default");
    assert_eq!(version.message, "Initial commit");

    vcs.update(None).unwrap();
    assert_eq!(vcs.version().unwrap().message, "Add app");
    assert_eq!(vcs.branch_of("HEAD", false).unwrap(), "default");
}
