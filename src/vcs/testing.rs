// hammer-rs: deployment VCS helper
//
// SPDX-FileCopyrightText: 2026 hammer-rs contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Scripted in-memory channel for backend unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::channel::{CommandChannel, ExecOptions};
use crate::error::{ChannelError, HammerResult};
use crate::vcs::{Disambiguator, VcsSettings};

enum Reply {
    Output(String),
    Exit(i32),
}

struct Step {
    expect: String,
    reply: Reply,
}

/// Replays canned replies in order; each command must contain the
/// expected fragment of its step.
#[derive(Default)]
pub(crate) struct ScriptedChannel {
    steps: RefCell<VecDeque<Step>>,
    commands: RefCell<Vec<(String, ExecOptions)>>,
}

impl ScriptedChannel {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Next command contains `expect` and prints `output`.
    pub(crate) fn ok(self, expect: &str, output: &str) -> Self {
        self.steps.borrow_mut().push_back(Step {
            expect: expect.to_string(),
            reply: Reply::Output(output.to_string()),
        });
        self
    }

    /// Next command contains `expect` and exits with `code`.
    pub(crate) fn exit(self, expect: &str, code: i32) -> Self {
        self.steps.borrow_mut().push_back(Step {
            expect: expect.to_string(),
            reply: Reply::Exit(code),
        });
        self
    }

    /// Commands received so far.
    pub(crate) fn commands(&self) -> Vec<String> {
        self.commands
            .borrow()
            .iter()
            .map(|(command, _)| command.clone())
            .collect()
    }

    pub(crate) fn options(&self) -> Vec<ExecOptions> {
        self.commands.borrow().iter().map(|(_, o)| *o).collect()
    }

    pub(crate) fn remaining(&self) -> usize {
        self.steps.borrow().len()
    }
}

impl CommandChannel for ScriptedChannel {
    fn target(&self) -> &str {
        "scripted"
    }

    fn execute(&self, command: &str, options: ExecOptions) -> HammerResult<Vec<u8>> {
        self.commands
            .borrow_mut()
            .push((command.to_string(), options));

        let step = self
            .steps
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected command: {command}"));
        assert!(
            command.contains(&step.expect),
            "expected a command containing {:?}, got {command:?}",
            step.expect
        );

        match step.reply {
            Reply::Output(output) => Ok(output.into_bytes()),
            Reply::Exit(code) => Err(ChannelError::NonZeroExit {
                command: command.to_string(),
                code,
                stderr: String::new(),
            }
            .into()),
        }
    }
}

/// Settings for a checkout at `/srv/app` driven through `remote`, with
/// local project queries answered by `local`.
pub(crate) fn settings(
    remote: &Rc<ScriptedChannel>,
    local: &Rc<ScriptedChannel>,
    disambiguator: Rc<dyn Disambiguator>,
) -> VcsSettings {
    VcsSettings::builder()
        .project_root("/home/dev/project")
        .code_dir("/srv/app")
        .channel(Rc::clone(remote) as Rc<dyn CommandChannel>)
        .local_channel(Rc::clone(local) as Rc<dyn CommandChannel>)
        .disambiguator(disambiguator)
        .build()
}
