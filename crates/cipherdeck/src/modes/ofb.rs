// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! OFB. Encryption and decryption are the same operation.

use super::{BlockCx, split_front, xor_in_place};

pub(crate) fn apply(cx: &mut BlockCx<'_>, mut buf: &mut [u8]) {
    let bl = cx.block_len();

    if buf.len() <= *cx.unused {
        let start = bl - *cx.unused;
        *cx.unused -= buf.len();
        xor_in_place(buf, &cx.iv[start..]);
        return;
    }

    if *cx.unused > 0 {
        let carried = *cx.unused;
        let head = split_front(&mut buf, carried);
        xor_in_place(head, &cx.iv[bl - carried..]);
        *cx.unused = 0;
    }

    while buf.len() >= bl {
        let block = split_front(&mut buf, bl);
        cx.last_iv.copy_from_slice(cx.iv);
        cx.block.encrypt_block(cx.ctx, cx.iv);
        xor_in_place(block, cx.iv);
    }

    if !buf.is_empty() {
        cx.last_iv.copy_from_slice(cx.iv);
        cx.block.encrypt_block(cx.ctx, cx.iv);
        *cx.unused = bl - buf.len();
        xor_in_place(buf, cx.iv);
    }
}
