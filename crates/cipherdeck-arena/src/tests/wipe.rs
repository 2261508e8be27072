// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::wipe::{WIPE_PATTERN, wipe};

#[test]
fn test_wipe_overwrites_every_byte() {
    let mut bytes = [0x11u8; 37];

    wipe(&mut bytes, WIPE_PATTERN);

    assert!(bytes.iter().all(|&b| b == WIPE_PATTERN));
}

#[test]
fn test_wipe_empty_slice_is_noop() {
    let mut bytes: [u8; 0] = [];

    wipe(&mut bytes, 0x42);
}

#[test]
fn test_wipe_pattern_is_non_zero() {
    assert_ne!(WIPE_PATTERN, 0);
}
