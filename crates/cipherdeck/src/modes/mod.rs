// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Chaining modes.
//!
//! Every routine works in place on a buffer the handle has already
//! validated and copied the input into. State between calls lives in the
//! handle arena (IV, last IV, counter) and the unused-byte count.

pub(crate) mod cbc;
pub(crate) mod cfb;
pub(crate) mod ctr;
pub(crate) mod ecb;
pub(crate) mod ofb;

use cipherdeck_core::{BlockTransform, BulkAccelerator};

/// Borrowed handle state for one block-mode call.
pub(crate) struct BlockCx<'a> {
    pub block: &'a dyn BlockTransform,
    pub bulk: Option<&'a dyn BulkAccelerator>,
    pub ctx: &'a [u8],
    pub iv: &'a mut [u8],
    pub last_iv: &'a mut [u8],
    pub ctr: &'a mut [u8],
    pub scratch: &'a mut [u8],
    pub unused: &'a mut usize,
}

impl BlockCx<'_> {
    pub(crate) fn block_len(&self) -> usize {
        self.iv.len()
    }
}

/// Detaches the first `n` bytes of `buf`.
pub(crate) fn split_front<'a>(buf: &mut &'a mut [u8], n: usize) -> &'a mut [u8] {
    let (front, rest) = core::mem::take(buf).split_at_mut(n);
    *buf = rest;
    front
}

pub(crate) fn xor_in_place(dst: &mut [u8], src: &[u8]) {
    for (d, s) in dst.iter_mut().zip(src) {
        *d ^= *s;
    }
}
