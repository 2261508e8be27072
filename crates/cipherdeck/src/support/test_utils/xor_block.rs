// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::sync::Arc;

use cipherdeck_core::{BlockTransform, CipherPrimitive, PrimitiveSpec};

/// Block length of [`XorBlockPrimitive`].
pub const XOR_BLOCK_LEN: usize = 16;

/// 16-byte "block cipher" whose encrypt and decrypt both flip every bit.
///
/// Keying is a no-op.
#[derive(Debug, Default, Clone, Copy)]
pub struct XorBlockPrimitive;

impl XorBlockPrimitive {
    /// Spec registering this primitive as `name` with a 128-bit key.
    pub fn spec(name: &'static str) -> PrimitiveSpec {
        PrimitiveSpec::new(name, 128, XOR_BLOCK_LEN, XOR_BLOCK_LEN, Arc::new(Self))
    }
}

impl CipherPrimitive for XorBlockPrimitive {
    fn block(&self) -> Option<&dyn BlockTransform> {
        Some(self)
    }
}

impl BlockTransform for XorBlockPrimitive {
    fn encrypt_block(&self, _ctx: &[u8], block: &mut [u8]) {
        block.iter_mut().for_each(|b| *b ^= 0xFF);
    }

    fn decrypt_block(&self, _ctx: &[u8], block: &mut [u8]) {
        block.iter_mut().for_each(|b| *b ^= 0xFF);
    }
}
