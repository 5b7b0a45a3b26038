// hammer-rs: deployment VCS helper
//
// SPDX-FileCopyrightText: 2026 hammer-rs contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |         repo / deploy / config
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |  TOML + env, per target   |
//!              '-------------+-------------'
//!                            v
//!              ,---------------------------,
//!              |            vcs            |
//!              |  proxy -> git | hg        |
//!              |  shell (cwd stack)        |
//!              |  disambiguation policies  |
//!              '-------------+-------------'
//!                            v
//!                 channel: local | ssh
//!
//!   +-----------------------------------------+
//!   |  foundation   error, logging, utility   |
//!   +-----------------------------------------+
//! ```

pub mod channel;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod logging;
pub mod utility;
pub mod vcs;
