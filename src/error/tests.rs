// hammer-rs: deployment VCS helper
//
// SPDX-FileCopyrightText: 2026 hammer-rs contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{ChannelError, ConfigError, HammerError, HammerResult, VcsError, bail_out};

#[test]
fn test_config_error_display() {
    let err = ConfigError::MissingKey {
        section: "target".to_string(),
        key: "code_dir".to_string(),
    };
    insta::assert_snapshot!(err.to_string(), @"missing required config key 'code_dir' in section '[target]'");
}

#[test]
fn test_vcs_error_display() {
    let err: HammerError = VcsError::CommitIdTooShort {
        revision: "4c9237".to_string(),
    }
    .into();
    insta::assert_snapshot!(err.to_string(), @"vcs error: the commit id given is too short: 4c9237");
}

#[test]
fn test_exit_code_only_for_non_zero_exit() {
    let exit: HammerError = ChannelError::NonZeroExit {
        command: "git symbolic-ref -q HEAD".to_string(),
        code: 1,
        stderr: String::new(),
    }
    .into();
    assert_eq!(exit.exit_code(), Some(1));

    let spawn: HammerError = ChannelError::ExecutableNotFound {
        name: "ssh".to_string(),
    }
    .into();
    assert_eq!(spawn.exit_code(), None);
    assert_eq!(bail_out("stop").exit_code(), None);
}

#[test]
fn test_as_vcs() {
    let err: HammerError = VcsError::Aborted.into();
    assert!(matches!(err.as_vcs(), Some(VcsError::Aborted)));
    assert!(bail_out("x").as_vcs().is_none());
}

#[test]
fn test_hammer_error_size() {
    // The Box<str> variant (Bailed) is 16 bytes (fat pointer: ptr + len)
    // With discriminant + alignment = 24 bytes
    let size = std::mem::size_of::<HammerError>();
    assert!(size <= 24, "HammerError is {size} bytes, expected <= 24");
}

#[test]
fn test_hammer_result_size() {
    let size = std::mem::size_of::<HammerResult<()>>();
    assert!(size <= 24, "HammerResult<()> is {size} bytes, expected <= 24");
}
