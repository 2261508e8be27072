// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::error::ArenaError;

/// Slot sizes and offsets for one handle arena.
///
/// Slots are laid out back to back, each rounded up to `align`:
/// `live | template | iv | last_iv | ctr | scratch`.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ArenaLayout {
    context_size: usize,
    block_len: usize,
    align: usize,
    context_stride: usize,
    block_stride: usize,
    total: usize,
}

fn round_up(len: usize, align: usize) -> Result<usize, ArenaError> {
    len.checked_add(align - 1)
        .map(|padded| padded & !(align - 1))
        .ok_or(ArenaError::SizeOverflow)
}

impl ArenaLayout {
    /// Computes the layout for `context_size`-byte contexts and
    /// `block_len`-byte chaining buffers, every slot aligned to `align`.
    pub fn new(context_size: usize, block_len: usize, align: usize) -> Result<Self, ArenaError> {
        if align == 0 || !align.is_power_of_two() {
            return Err(ArenaError::InvalidAlignment(align));
        }

        let context_stride = round_up(context_size, align)?;
        let block_stride = round_up(block_len, align)?;

        let total = context_stride
            .checked_mul(2)
            .and_then(|contexts| {
                block_stride
                    .checked_mul(4)
                    .and_then(|blocks| contexts.checked_add(blocks))
            })
            .ok_or(ArenaError::SizeOverflow)?;

        Ok(Self {
            context_size,
            block_len,
            align,
            context_stride,
            block_stride,
            // Zero-sized allocations are not allowed.
            total: total.max(align),
        })
    }

    /// Size of each context slot.
    pub fn context_size(&self) -> usize {
        self.context_size
    }

    /// Size of each block slot.
    pub fn block_len(&self) -> usize {
        self.block_len
    }

    /// Alignment of every slot.
    pub fn align(&self) -> usize {
        self.align
    }

    /// Bytes needed for all slots, padding included.
    pub fn total(&self) -> usize {
        self.total
    }

    pub(crate) fn context_stride(&self) -> usize {
        self.context_stride
    }

    pub(crate) fn block_stride(&self) -> usize {
        self.block_stride
    }

    /// Offset of the template slot.
    pub fn template_offset(&self) -> usize {
        self.context_stride
    }

    /// Offset of the IV slot.
    pub fn iv_offset(&self) -> usize {
        self.context_stride * 2
    }
}
