// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::sync::atomic::{Ordering, compiler_fence};

/// Byte written over an arena before its memory is released.
pub const WIPE_PATTERN: u8 = 0xA5;

/// Overwrites `bytes` with `pattern` using volatile stores.
pub fn wipe(bytes: &mut [u8], pattern: u8) {
    for byte in bytes.iter_mut() {
        // SAFETY: `byte` is a valid, exclusive reference.
        unsafe { core::ptr::write_volatile(byte, pattern) };
    }

    compiler_fence(Ordering::SeqCst);
}
