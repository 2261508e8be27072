// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Full-block CFB.
//!
//! The IV doubles as the keystream buffer: after a short call its last
//! `unused` bytes are keystream not yet consumed, and the bytes before them
//! already hold ciphertext. Splitting a message across calls therefore
//! yields the same output as one call.

use super::{BlockCx, split_front};

fn encrypt_bytes(iv: &mut [u8], buf: &mut [u8]) {
    for (byte, mask) in buf.iter_mut().zip(iv.iter_mut()) {
        *mask ^= *byte;
        *byte = *mask;
    }
}

fn decrypt_bytes(iv: &mut [u8], buf: &mut [u8]) {
    for (byte, mask) in buf.iter_mut().zip(iv.iter_mut()) {
        let cipher = *byte;
        *byte = *mask ^ cipher;
        *mask = cipher;
    }
}

fn run(cx: &mut BlockCx<'_>, mut buf: &mut [u8], encrypting: bool) {
    let bl = cx.block_len();
    let apply = if encrypting { encrypt_bytes } else { decrypt_bytes };

    if buf.len() <= *cx.unused {
        let start = bl - *cx.unused;
        *cx.unused -= buf.len();
        apply(&mut cx.iv[start..], buf);
        return;
    }

    if *cx.unused > 0 {
        let carried = *cx.unused;
        let head = split_front(&mut buf, carried);
        apply(&mut cx.iv[bl - carried..], head);
        *cx.unused = 0;
    }

    if buf.len() >= 2 * bl {
        match cx.bulk {
            Some(bulk) => {
                let whole = buf.len() / bl * bl;
                let blocks = split_front(&mut buf, whole);
                if encrypting {
                    bulk.cfb_encrypt(cx.ctx, cx.iv, blocks);
                } else {
                    bulk.cfb_decrypt(cx.ctx, cx.iv, blocks);
                }
            }
            None => {
                while buf.len() >= 2 * bl {
                    let block = split_front(&mut buf, bl);
                    cx.block.encrypt_block(cx.ctx, cx.iv);
                    apply(cx.iv, block);
                }
            }
        }
    }

    if buf.len() >= bl {
        let block = split_front(&mut buf, bl);
        cx.last_iv.copy_from_slice(cx.iv);
        cx.block.encrypt_block(cx.ctx, cx.iv);
        apply(cx.iv, block);
    }

    if !buf.is_empty() {
        cx.last_iv.copy_from_slice(cx.iv);
        cx.block.encrypt_block(cx.ctx, cx.iv);
        *cx.unused = bl - buf.len();
        apply(cx.iv, buf);
    }
}

pub(crate) fn encrypt(cx: &mut BlockCx<'_>, buf: &mut [u8]) {
    run(cx, buf, true);
}

pub(crate) fn decrypt(cx: &mut BlockCx<'_>, buf: &mut [u8]) {
    run(cx, buf, false);
}

/// Realigns the IV to the last full ciphertext block boundary.
pub(crate) fn sync(iv: &mut [u8], last_iv: &[u8], unused: &mut usize) {
    let carried = *unused;

    if carried == 0 {
        return;
    }

    let bl = iv.len();
    iv.copy_within(..bl - carried, carried);
    iv[..carried].copy_from_slice(&last_iv[bl - carried..]);
    *unused = 0;
}
