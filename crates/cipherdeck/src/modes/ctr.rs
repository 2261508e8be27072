// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! CTR with a big-endian counter the size of one block.
//!
//! Keystream is generated per call starting at a block boundary; bytes of
//! a partially used keystream block are not carried into the next call.

use zeroize::Zeroize;

use super::{BlockCx, xor_in_place};

pub(crate) fn increment(ctr: &mut [u8]) {
    for byte in ctr.iter_mut().rev() {
        *byte = byte.wrapping_add(1);
        if *byte != 0 {
            break;
        }
    }
}

pub(crate) fn apply(cx: &mut BlockCx<'_>, buf: &mut [u8]) {
    let bl = cx.block_len();

    for chunk in buf.chunks_mut(bl) {
        cx.scratch.copy_from_slice(cx.ctr);
        cx.block.encrypt_block(cx.ctx, cx.scratch);
        increment(cx.ctr);
        xor_in_place(chunk, cx.scratch);
    }

    cx.scratch.zeroize();
}
