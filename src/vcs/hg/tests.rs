// hammer-rs: deployment VCS helper
//
// SPDX-FileCopyrightText: 2026 hammer-rs contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use std::rc::Rc;

use super::*;
use crate::vcs::testing::{ScriptedChannel, settings};
use crate::vcs::{FailOnAmbiguity, FileFilter};

fn backend(remote: ScriptedChannel) -> (HgBackend, Rc<ScriptedChannel>) {
    backend_with(remote, ScriptedChannel::new())
}

fn backend_with(remote: ScriptedChannel, local: ScriptedChannel) -> (HgBackend, Rc<ScriptedChannel>) {
    let remote = Rc::new(remote);
    let local = Rc::new(local);
    let hg = HgBackend::new(&settings(&remote, &local, Rc::new(FailOnAmbiguity)));
    (hg, remote)
}

#[test]
fn test_revset_with_implicit_bound() {
    assert_eq!(HgBackend::revset(".", "stable").unwrap(), ".::stable");
    insta::assert_snapshot!(HgBackend::revset(".", "").unwrap(), @"branch(p1()) and .::");
    insta::assert_snapshot!(HgBackend::revset("", ".").unwrap(), @"branch(p1()) and ::.");

    let err = HgBackend::revset("", "").unwrap_err();
    assert!(matches!(err.as_vcs(), Some(VcsError::InvalidRevset { .. })));
}

#[test]
fn test_order_revisions_drops_boundary() {
    let ordered = HgBackend::order_revisions(vec!["5:a".into(), "6:b".into(), "7:c".into()]);
    assert_eq!(ordered, vec!["6:b", "7:c"]);
    assert!(HgBackend::order_revisions(Vec::new()).is_empty());
}

#[test]
fn test_deployment_list_forwards() {
    let (hg, remote) = backend(
        ScriptedChannel::new()
            .ok("hg pull", "")
            .ok(
                "-r .::stable",
                "5:aaaaaaaaaaaa default Dev first\n6:bbbbbbbbbbbb stable Dev second\n7:cccccccccccc stable Dev third\n",
            ),
    );

    let list = hg.deployment_list(Some("stable")).unwrap();
    assert_eq!(
        list,
        DeploymentList::Forwards {
            forwards: vec![
                "6:bbbbbbbbbbbb stable Dev second".to_string(),
                "7:cccccccccccc stable Dev third".to_string(),
            ],
            revset: ".::stable".to_string(),
        }
    );
    assert_eq!(remote.remaining(), 0);
    assert_eq!(hg.shell().depth(), 0);
}

#[test]
fn test_deployment_list_single_revision_is_up_to_date() {
    let (hg, _) = backend(
        ScriptedChannel::new()
            .ok("hg pull", "")
            .ok("-r 'branch(p1()) and .::'", "5:aaaaaaaaaaaa default Dev first\n"),
    );
    let list = hg.deployment_list(None).unwrap();
    assert!(list.is_up_to_date());
}

#[test]
fn test_deployment_list_backwards() {
    let (hg, remote) = backend(
        ScriptedChannel::new()
            .ok("hg pull", "")
            .ok("-r .::3", "")
            .ok(
                "-r 3::.",
                "3:333333333333 default Dev third\n4:444444444444 default Dev fourth\n5:555555555555 default Dev fifth\n",
            ),
    );

    let list = hg.deployment_list(Some("3")).unwrap();
    insta::assert_snapshot!(
        serde_json::to_string(&list).unwrap(),
        @r#"{"backwards":["4:444444444444 default Dev fourth","5:555555555555 default Dev fifth"],"revset":"3::."}"#
    );
    assert_eq!(remote.remaining(), 0);
}

#[test]
fn test_deployment_list_unrelated() {
    let (hg, _) = backend(
        ScriptedChannel::new()
            .ok("hg pull", "")
            .ok("-r .::other", "")
            .ok("-r other::.", ""),
    );
    let list = hg.deployment_list(Some("other")).unwrap();
    insta::assert_snapshot!(list, @"Target revision is not related to the current revision");
}

#[test]
fn test_version_tuple() {
    let (hg, remote) = backend(
        ScriptedChannel::new()
            .ok("hg id -nb", "5+ default\n")
            .ok("-r 5", "abcdef012345:|:|:Dev <dev@example.com>:|:|:Fix login\n"),
    );
    let version = hg.version().unwrap();
    assert_eq!(
        version,
        Version {
            commit_id: "5:abcdef012345".into(),
            branch: "default".into(),
            message: "Fix login".into(),
            author: "Dev <dev@example.com>".into(),
        }
    );
    insta::assert_snapshot!(
        remote.commands()[1],
        @r"cd /srv/app && hg --config ui.color=never --config ui.paginate=never log --template '{node|short}:|:|:{author}:|:|:{desc|firstline}\n' -r 5"
    );
}

#[test]
fn test_branch_of() {
    let (hg, remote) = backend(
        ScriptedChannel::new()
            .ok("hg id -b", "default\n")
            .ok("log -r abcdef012345 --template '{branch}'", "stable"),
    );
    assert_eq!(hg.branch_of("HEAD", false).unwrap(), "default");
    assert_eq!(hg.branch_of("abcdef012345", true).unwrap(), "stable");
    assert_eq!(remote.remaining(), 0);
}

#[test]
fn test_repo_url_missing_default_path() {
    let (hg, _) = backend_with(
        ScriptedChannel::new(),
        ScriptedChannel::new().exit("hg paths default", 1),
    );
    assert_eq!(hg.repo_url().unwrap(), None);
}

#[test]
fn test_clone_then_update() {
    let (hg, remote) = backend_with(
        ScriptedChannel::new()
            .ok("hg clone ssh://hg@example.com/app /srv/app", "")
            .ok("hg pull", "")
            .ok("hg update stable", ""),
        ScriptedChannel::new().ok("hg paths default", "ssh://hg@example.com/app\n"),
    );
    hg.clone_checkout(Some("stable")).unwrap();
    assert_eq!(remote.remaining(), 0);
    assert_eq!(remote.commands()[0], "hg clone ssh://hg@example.com/app /srv/app");
}

#[test]
fn test_update_without_revision() {
    let (hg, remote) = backend(ScriptedChannel::new().ok("hg pull", "").ok("hg update", ""));
    hg.update(None).unwrap();
    assert_eq!(remote.commands()[1], "cd /srv/app && hg update");
}

#[test]
fn test_changed_files_filtered() {
    let (hg, _) = backend(ScriptedChannel::new().ok(
        "status --rev .::stable",
        "A foo.png\nM bar.txt\nA baz.txt\n",
    ));
    let filter = FileFilter::new(r"\.txt$").unwrap();
    let files = hg.changed_files(".::stable", Some(&filter)).unwrap();
    assert_eq!(files, vec!["M bar.txt", "A baz.txt"]);
}
