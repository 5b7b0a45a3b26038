// hammer-rs: deployment VCS helper
//
// SPDX-FileCopyrightText: 2026 hammer-rs contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Choosing between several candidates (branches, remotes).
//!
//! The backend hands an [`Ambiguity`] to a [`Disambiguator`] and resumes
//! with the chosen index. Automated runs use [`PickFirst`],
//! [`FailOnAmbiguity`] or [`Preseeded`] so nothing blocks on a terminal.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::rc::Rc;

use crate::error::{HammerResult, VcsError};

/// A choice the operator (or a policy) has to make.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ambiguity {
    subject: String,
    candidates: Vec<String>,
}

impl Ambiguity {
    /// Candidates are sorted so prompts and seeded answers are stable.
    #[must_use]
    pub fn new(subject: impl Into<String>, mut candidates: Vec<String>) -> Self {
        candidates.sort();
        Self {
            subject: subject.into(),
            candidates,
        }
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    #[must_use]
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Candidate for a 1-based answer; `0` and out-of-range give `None`.
    #[must_use]
    pub fn pick(&self, answer: usize) -> Option<&str> {
        answer
            .checked_sub(1)
            .and_then(|index| self.candidates.get(index))
            .map(String::as_str)
    }

    fn refused(&self) -> VcsError {
        VcsError::Ambiguous {
            subject: self.subject.clone(),
            candidates: self.candidates.join(", "),
        }
    }
}

/// Resolves an [`Ambiguity`] to one of its candidates.
pub trait Disambiguator {
    /// Returns the chosen candidate.
    ///
    /// # Errors
    ///
    /// Returns `VcsError::Aborted` when the operator cancels and
    /// `VcsError::Ambiguous` when the policy refuses to choose.
    fn choose(&self, request: &Ambiguity) -> HammerResult<String>;
}

/// Always takes the first (sorted) candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct PickFirst;

impl Disambiguator for PickFirst {
    fn choose(&self, request: &Ambiguity) -> HammerResult<String> {
        request
            .pick(1)
            .map(str::to_string)
            .ok_or_else(|| request.refused().into())
    }
}

/// Treats any ambiguity as an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailOnAmbiguity;

impl Disambiguator for FailOnAmbiguity {
    fn choose(&self, request: &Ambiguity) -> HammerResult<String> {
        Err(request.refused().into())
    }
}

/// Replays queued 1-based answers; `0` aborts, an empty queue refuses.
#[derive(Debug, Default)]
pub struct Preseeded {
    answers: RefCell<VecDeque<usize>>,
}

impl Preseeded {
    #[must_use]
    pub fn new(answers: impl IntoIterator<Item = usize>) -> Self {
        Self {
            answers: RefCell::new(answers.into_iter().collect()),
        }
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.answers.borrow().len()
    }
}

impl Disambiguator for Preseeded {
    fn choose(&self, request: &Ambiguity) -> HammerResult<String> {
        let answer = self.answers.borrow_mut().pop_front();
        match answer {
            Some(0) => Err(VcsError::Aborted.into()),
            Some(n) => request
                .pick(n)
                .map(str::to_string)
                .ok_or_else(|| request.refused().into()),
            None => Err(request.refused().into()),
        }
    }
}

/// Interactive console prompt.
///
/// Lists `1: a, 2: b`, reads an index, re-asks on anything else, `0` aborts.
/// Blocks until the operator answers.
pub struct Prompt {
    input: RefCell<Box<dyn BufRead>>,
    output: RefCell<Box<dyn Write>>,
}

impl Prompt {
    #[must_use]
    pub fn new(input: Box<dyn BufRead>, output: Box<dyn Write>) -> Self {
        Self {
            input: RefCell::new(input),
            output: RefCell::new(output),
        }
    }

    /// Prompt on stdin/stderr.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(
            Box::new(std::io::stdin().lock()),
            Box::new(std::io::stderr()),
        )
    }
}

impl Disambiguator for Prompt {
    fn choose(&self, request: &Ambiguity) -> HammerResult<String> {
        let mut output = self.output.borrow_mut();
        let mut input = self.input.borrow_mut();

        let listing = request
            .candidates()
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{}: {c}", i + 1))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(
            output,
            "Could not automatically determine {}, please pick the correct value",
            request.subject()
        )?;
        writeln!(output, "Candidates are (use 0 to abort): {listing}")?;

        loop {
            write!(output, "Select value: ")?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                // EOF: nobody is left to answer
                return Err(VcsError::Aborted.into());
            }

            match line.trim().parse::<usize>() {
                Ok(0) => return Err(VcsError::Aborted.into()),
                Ok(n) => {
                    if let Some(choice) = request.pick(n) {
                        return Ok(choice.to_string());
                    }
                }
                Err(_) => {}
            }
        }
    }
}

/// Policy selected in configuration (`target.ambiguity`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AmbiguityPolicy {
    /// Ask on the console.
    #[default]
    Prompt,
    /// Take the first sorted candidate.
    First,
    /// Fail the command.
    Fail,
}

impl AmbiguityPolicy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Prompt => "prompt",
            Self::First => "first",
            Self::Fail => "fail",
        }
    }

    #[must_use]
    pub fn disambiguator(self) -> Rc<dyn Disambiguator> {
        match self {
            Self::Prompt => Rc::new(Prompt::stdio()),
            Self::First => Rc::new(PickFirst),
            Self::Fail => Rc::new(FailOnAmbiguity),
        }
    }
}
