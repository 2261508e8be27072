// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! CBC, with optional ciphertext stealing and MAC output.
//!
//! With stealing enabled and more than one block of input, the last two
//! blocks are swapped: the final full-size block of output is the
//! encryption of the (zero-padded) last plaintext block, and the short
//! tail holds the leading bytes of the preceding ciphertext block. This
//! applies even when the input is block-aligned.

use super::{BlockCx, split_front, xor_in_place};

fn stealing_tail(len: usize, bl: usize) -> usize {
    match len % bl {
        0 => bl,
        rest => rest,
    }
}

fn encrypt_blocks(cx: &mut BlockCx<'_>, blocks: &mut [u8]) {
    if let Some(bulk) = cx.bulk {
        bulk.cbc_encrypt(cx.ctx, cx.iv, blocks);
        return;
    }

    for block in blocks.chunks_exact_mut(cx.block_len()) {
        xor_in_place(block, cx.iv);
        cx.block.encrypt_block(cx.ctx, block);
        cx.iv.copy_from_slice(block);
    }
}

fn decrypt_blocks(cx: &mut BlockCx<'_>, blocks: &mut [u8]) {
    if let Some(bulk) = cx.bulk {
        bulk.cbc_decrypt(cx.ctx, cx.iv, blocks);
        return;
    }

    for block in blocks.chunks_exact_mut(cx.block_len()) {
        // The ciphertext is the next IV; keep it before decrypting over it.
        cx.last_iv.copy_from_slice(block);
        cx.block.decrypt_block(cx.ctx, block);
        xor_in_place(block, cx.iv);
        cx.iv.copy_from_slice(cx.last_iv);
    }
}

/// Caller guarantees `buf.len() % bl == 0` unless `cts` and `buf.len() > bl`.
pub(crate) fn encrypt(cx: &mut BlockCx<'_>, buf: &mut [u8], cts: bool) {
    let bl = cx.block_len();
    let len = buf.len();
    let stealing = cts && len > bl;

    let mut nblocks = len / bl;
    if stealing && len % bl == 0 {
        nblocks -= 1;
    }

    let (head, tail) = buf.split_at_mut(nblocks * bl);
    encrypt_blocks(cx, head);

    if !stealing {
        return;
    }

    let rest = stealing_tail(len, bl);
    let prev = &mut head[(nblocks - 1) * bl..];

    for i in 0..rest {
        let plain = tail[i];
        tail[i] = prev[i];
        prev[i] = plain ^ cx.iv[i];
    }
    prev[rest..].copy_from_slice(&cx.iv[rest..]);

    cx.block.encrypt_block(cx.ctx, prev);
    cx.iv.copy_from_slice(prev);
}

/// Caller guarantees `buf.len() % bl == 0` unless `cts` and `buf.len() > bl`.
pub(crate) fn decrypt(cx: &mut BlockCx<'_>, buf: &mut [u8], cts: bool) {
    let bl = cx.block_len();
    let len = buf.len();
    let stealing = cts && len > bl;

    let mut nblocks = len / bl;
    if stealing {
        nblocks -= 1;
        if len % bl == 0 {
            nblocks -= 1;
        }
        cx.last_iv.copy_from_slice(cx.iv);
    }

    let mut rest_of_buf = buf;
    let head = split_front(&mut rest_of_buf, nblocks * bl);
    decrypt_blocks(cx, head);

    if !stealing {
        return;
    }

    let rest = stealing_tail(len, bl);
    let (swapped, tail) = rest_of_buf.split_at_mut(bl);

    // last_iv <- C[n-2]; iv[..rest] <- leading bytes of C[n-1].
    cx.last_iv.copy_from_slice(cx.iv);
    cx.iv[..rest].copy_from_slice(&tail[..rest]);

    cx.block.decrypt_block(cx.ctx, swapped);
    xor_in_place(&mut swapped[..rest], &cx.iv[..rest]);
    tail[..rest].copy_from_slice(&swapped[..rest]);

    // Rebuild C[n-1] and decrypt it into the second-to-last position.
    cx.iv[rest..].copy_from_slice(&swapped[rest..]);
    swapped.copy_from_slice(cx.iv);
    cx.block.decrypt_block(cx.ctx, swapped);
    xor_in_place(swapped, cx.last_iv);
}

/// Chains every block of `input` into the IV without producing ciphertext.
///
/// Returns false when `input` holds no whole block.
pub(crate) fn mac(cx: &mut BlockCx<'_>, input: &[u8]) -> bool {
    let bl = cx.block_len();
    let whole = input.len() / bl * bl;

    if whole == 0 {
        return false;
    }

    if let Some(bulk) = cx.bulk {
        bulk.cbc_mac(cx.ctx, cx.iv, &input[..whole]);
        return true;
    }

    for block in input[..whole].chunks_exact(bl) {
        xor_in_place(cx.iv, block);
        cx.block.encrypt_block(cx.ctx, cx.iv);
    }

    true
}
