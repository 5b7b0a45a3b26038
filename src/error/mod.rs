// hammer-rs: deployment VCS helper
//
// SPDX-FileCopyrightText: 2026 hammer-rs contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!            HammerError (~24 bytes)
//!                    |
//!     +-------+------+------+------+
//!     |       |      |      |      |
//!     v       v      v      v      v
//!   Bail     Vcs  Channel  Cfg     Io
//!            Box    Box    Box    Box
//!
//! Sub-errors (unboxed internally):
//!   Vcs      NoBackendDetected, CommitIdTooShort, RevisionNotFound,
//!            RemotePrefixedBranch, NoBranchFound, Aborted, ...
//!   Channel  ExecutableNotFound, SpawnFailed, NonZeroExit, Terminated
//!   Config   MissingKey, InvalidValue, UnknownTarget, ParseError
//!
//! All variants boxed => HammerError fits in 24 bytes.
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`HammerError`].
pub type HammerResult<T> = std::result::Result<T, HammerError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum HammerError {
    /// Fatal error that should terminate the application.
    #[error("fatal error: {0}")]
    Bailed(Box<str>),

    /// Version control operation failed.
    #[error("vcs error: {0}")]
    Vcs(#[from] Box<VcsError>),

    /// Remote command execution failed.
    #[error("command error: {0}")]
    Channel(#[from] Box<ChannelError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),
}

impl HammerError {
    /// Exit status of the failed command, if this error came from one.
    ///
    /// Call sites use this to treat specific codes as expected signals
    /// (e.g. `1` from `git symbolic-ref -q` on a detached head).
    #[must_use]
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Channel(err) => match err.as_ref() {
                ChannelError::NonZeroExit { code, .. } => Some(*code),
                _ => None,
            },
            _ => None,
        }
    }

    /// Returns the VCS sub-error, if any.
    #[must_use]
    pub fn as_vcs(&self) -> Option<&VcsError> {
        match self {
            Self::Vcs(err) => Some(err),
            _ => None,
        }
    }
}

/// Create a fatal [`HammerError::Bailed`] that terminates the application.
pub fn bail_out(message: impl Into<String>) -> HammerError {
    HammerError::Bailed(message.into().into_boxed_str())
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for HammerError {
                fn from(err: $error) -> Self {
                    HammerError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    VcsError => Vcs,
    ChannelError => Channel,
    ConfigError => Config,
    std::io::Error => Io,
}

// --- VCS Errors ---

/// Version control errors.
#[derive(Debug, Error)]
pub enum VcsError {
    /// None of the known backends found its marker directory.
    #[error("no suitable VCS type detected in {root} (tried {tried})")]
    NoBackendDetected { root: String, tried: String },

    /// The remote checkout directory was never configured.
    #[error("{backend}: code_dir is not configured (set target.code_dir or pass --code-dir)")]
    MissingCodeDir { backend: &'static str },

    /// A hex revision that is too short to be a trustworthy commit id.
    #[error("the commit id given is too short: {revision}")]
    CommitIdTooShort { revision: String },

    /// Revision (branch or commit) does not exist.
    #[error("this revision or commit id does not exist in the repo: {revision}")]
    RevisionNotFound { revision: String },

    /// Branch argument already carries the remote-tracking prefix.
    #[error("one cannot deploy a branch that starts with \"{prefix}\": {revision}")]
    RemotePrefixedBranch { revision: String, prefix: String },

    /// Every branch resolution strategy came up empty.
    #[error("could not figure out remote branch (for {commit})")]
    NoBranchFound { commit: String },

    /// Local project has no remote url.
    #[error("repo url was not found")]
    NoRepoUrl,

    /// Operator declined to pick a candidate.
    #[error("aborted by user")]
    Aborted,

    /// Disambiguation was required but the active policy refuses to choose.
    #[error("ambiguous {subject}: candidates are {candidates}")]
    Ambiguous { subject: String, candidates: String },

    /// Revision-set descriptor could not be built from the given bounds.
    #[error("invalid revision set bounds ({x:?}, {y:?}): {message}")]
    InvalidRevset {
        x: String,
        y: String,
        message: &'static str,
    },

    /// Changed-file filter is not a valid regular expression.
    #[error("invalid changed-file filter '{pattern}': {source}")]
    InvalidFilter {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Tool output did not have the expected shape.
    #[error("unexpected output from `{command}`: {output:?}")]
    UnexpectedOutput { command: String, output: String },
}

// --- Channel Errors ---

/// Command channel errors.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn the command.
    #[error("failed to spawn '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Command exited with non-zero status.
    #[error("`{command}` exited with code {code}: {stderr}")]
    NonZeroExit {
        command: String,
        code: i32,
        stderr: String,
    },

    /// Command was terminated by a signal.
    #[error("`{command}` was terminated by a signal")]
    Terminated { command: String },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration sources.
    #[error("failed to parse config: {message}")]
    ParseError { message: String },

    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// `--target NAME` does not match any `[targets.NAME]` section.
    #[error("unknown target '{0}'")]
    UnknownTarget(String),
}

#[cfg(test)]
mod tests;
