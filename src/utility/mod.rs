// hammer-rs: deployment VCS helper
//
// SPDX-FileCopyrightText: 2026 hammer-rs contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Utility modules.
//!
//! ```text
//! encoding
//!   cleanup_output()  bytes --> recovered UTF-8 text
//!   guess_encoding()  BOM / UTF-8 / Windows-1252
//! ```

pub mod encoding;
