// hammer-rs: deployment VCS helper
//
// SPDX-FileCopyrightText: 2026 hammer-rs contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{Encoding, bytes_to_utf8, cleanup_output, guess_encoding};

#[test]
fn test_utf8_passthrough() {
    let input = "abc1234 master Jürgen Müller <j@example.com> Fix 世界";
    insta::assert_snapshot!(cleanup_output(input.as_bytes()), @"abc1234 master Jürgen Müller <j@example.com> Fix 世界");
}

#[test]
fn test_invalid_utf8_falls_back_to_windows_1252() {
    // "café" in Windows-1252: 0x63 0x61 0x66 0xe9
    let input = b"caf\xe9";
    assert_eq!(guess_encoding(input), (Encoding::Windows1252, 0));
    insta::assert_snapshot!(cleanup_output(input), @"café");
}

#[test]
fn test_mixed_encodings_decoded_per_line() {
    let input = b"aaaaaaa J\xc3\xbcrgen fix\nbbbbbbb J\xfcrgen feat\n";
    assert_eq!(
        cleanup_output(input),
        "aaaaaaa J\u{fc}rgen fix\nbbbbbbb J\u{fc}rgen feat\n"
    );
}

#[test]
fn test_utf16_bom_is_detected() {
    // BOM + "Hi" in UTF-16 LE
    let input = b"\xff\xfeH\x00i\x00";
    assert_eq!(guess_encoding(input), (Encoding::Utf16Le, 2));
    assert_eq!(cleanup_output(input), "Hi");
}

#[test]
fn test_utf8_bom_is_stripped() {
    assert_eq!(cleanup_output(b"\xef\xbb\xbfmaster"), "master");
}

#[test]
fn test_ansi_and_crlf_are_normalized() {
    let input = b"\x1b[32m* master\x1b[0m\r\n  stable\r\n";
    assert_eq!(cleanup_output(input), "* master\n  stable\n");
}

#[test]
fn test_nul_bytes_removed() {
    assert_eq!(cleanup_output(b"a\0b"), "ab");
}

#[test]
fn test_bytes_to_utf8_windows_1252() {
    assert_eq!(bytes_to_utf8(Encoding::Windows1252, b"\x93quoted\x94"), "\u{201c}quoted\u{201d}");
}
