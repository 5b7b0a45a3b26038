// hammer-rs: deployment VCS helper
//
// SPDX-FileCopyrightText: 2026 hammer-rs contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Best-effort text recovery for command output.
//!
//! ```text
//! raw stdout bytes
//!   BOM?  --> UTF-16 LE/BE, UTF-8 (BOM stripped)
//!   UTF-8 valid?  --> as is
//!   else, per line:
//!     UTF-8 valid?  --> as is
//!     else  --> Windows-1252 (author names from legacy clients)
//!        |
//!        v
//!   strip ANSI escapes + NUL, CRLF --> LF
//! ```
//!
//! Uses `encoding_rs`. Remote tools print author names in whatever
//! encoding the commit was written with; parsing must never fail on them.

use encoding_rs::{UTF_8, UTF_16BE, UTF_16LE, WINDOWS_1252};
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// ANSI CSI sequences (colors, cursor movement) that leak through pagers.
static ANSI_ESCAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]").unwrap_or_else(|_| unreachable!("static pattern"))
});

/// Source encoding detected for a byte buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    #[default]
    Utf8,
    Utf16Le,
    Utf16Be,
    /// Single-byte fallback; every byte sequence decodes.
    Windows1252,
}

/// Guesses the encoding of `bytes`, returning it with the BOM length to skip.
#[must_use]
pub fn guess_encoding(bytes: &[u8]) -> (Encoding, usize) {
    if let Some((encoding, bom_len)) = encoding_rs::Encoding::for_bom(bytes) {
        let detected = if encoding == UTF_16LE {
            Encoding::Utf16Le
        } else if encoding == UTF_16BE {
            Encoding::Utf16Be
        } else {
            Encoding::Utf8
        };
        return (detected, bom_len);
    }

    if std::str::from_utf8(bytes).is_ok() {
        (Encoding::Utf8, 0)
    } else {
        (Encoding::Windows1252, 0)
    }
}

/// Converts bytes from the given encoding to UTF-8.
///
/// Invalid sequences are replaced with U+FFFD.
///
/// # Example
/// ```
/// use hammer_rs::utility::encoding::{bytes_to_utf8, Encoding};
///
/// let cp1252_bytes = b"J\xfcrgen"; // "Jürgen" in Windows-1252
/// assert_eq!(bytes_to_utf8(Encoding::Windows1252, cp1252_bytes), "Jürgen");
/// ```
#[must_use]
pub fn bytes_to_utf8(encoding: Encoding, bytes: &[u8]) -> Cow<'_, str> {
    let codec = match encoding {
        Encoding::Utf8 => UTF_8,
        Encoding::Utf16Le => UTF_16LE,
        Encoding::Utf16Be => UTF_16BE,
        Encoding::Windows1252 => WINDOWS_1252,
    };
    let (text, _had_errors) = codec.decode_without_bom_handling(bytes);
    text
}

/// Cleans captured command output into parseable text.
///
/// # Example
/// ```
/// use hammer_rs::utility::encoding::cleanup_output;
///
/// assert_eq!(cleanup_output(b"\x1b[33mabc1234\x1b[m J\xfcrgen\r\n"), "abc1234 Jürgen\n");
/// ```
#[must_use]
pub fn cleanup_output(bytes: &[u8]) -> String {
    let (encoding, bom_len) = guess_encoding(bytes);
    let text = match encoding {
        Encoding::Windows1252 => Cow::Owned(decode_lines(bytes)),
        _ => bytes_to_utf8(encoding, &bytes[bom_len..]),
    };

    let text = ANSI_ESCAPE.replace_all(&text, "");
    text.replace("\r\n", "\n").replace('\0', "")
}

/// Decodes each line on its own so one legacy line leaves the others intact.
fn decode_lines(bytes: &[u8]) -> String {
    bytes
        .split_inclusive(|&b| b == b'\n')
        .map(|line| {
            let encoding = match std::str::from_utf8(line) {
                Ok(_) => Encoding::Utf8,
                Err(_) => Encoding::Windows1252,
            };
            bytes_to_utf8(encoding, line)
        })
        .collect()
}

#[cfg(test)]
mod tests;
