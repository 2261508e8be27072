// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use super::BlockCx;

/// `buf.len()` must be a multiple of the block length.
pub(crate) fn encrypt(cx: &mut BlockCx<'_>, buf: &mut [u8]) {
    let bl = cx.block_len();

    for block in buf.chunks_exact_mut(bl) {
        cx.block.encrypt_block(cx.ctx, block);
    }
}

/// `buf.len()` must be a multiple of the block length.
pub(crate) fn decrypt(cx: &mut BlockCx<'_>, buf: &mut [u8]) {
    let bl = cx.block_len();

    for block in buf.chunks_exact_mut(bl) {
        cx.block.decrypt_block(cx.ctx, block);
    }
}
