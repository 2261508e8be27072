// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::sync::Arc;

use cipherdeck_core::{CipherPrimitive, PrimitiveError, PrimitiveSpec, StreamTransform};

const CONTEXT_SIZE: usize = 9;

/// Stream "cipher" with keystream byte `key[0] ^ position`.
///
/// The context holds the key byte followed by the little-endian position,
/// so stream state survives across calls and is restored by a reset.
#[derive(Debug, Default, Clone, Copy)]
pub struct XorStreamPrimitive;

impl XorStreamPrimitive {
    /// Spec registering this primitive as `name`.
    pub fn spec(name: &'static str) -> PrimitiveSpec {
        PrimitiveSpec::new(name, 8, 1, CONTEXT_SIZE, Arc::new(Self))
    }

    fn apply(ctx: &mut [u8], buf: &mut [u8]) {
        let key = ctx[0];
        let mut position = [0u8; 8];
        position.copy_from_slice(&ctx[1..CONTEXT_SIZE]);
        let mut position = u64::from_le_bytes(position);

        for byte in buf.iter_mut() {
            *byte ^= key ^ position as u8;
            position = position.wrapping_add(1);
        }

        ctx[1..CONTEXT_SIZE].copy_from_slice(&position.to_le_bytes());
    }
}

impl CipherPrimitive for XorStreamPrimitive {
    fn set_key(&self, ctx: &mut [u8], key: &[u8]) -> Result<(), PrimitiveError> {
        let Some(&first) = key.first() else {
            return Err(PrimitiveError::InvalidKeyLength {
                expected: 1,
                actual: 0,
            });
        };

        ctx.fill(0);
        ctx[0] = first;
        Ok(())
    }

    fn stream(&self) -> Option<&dyn StreamTransform> {
        Some(self)
    }
}

impl StreamTransform for XorStreamPrimitive {
    fn encrypt_stream(&self, ctx: &mut [u8], buf: &mut [u8]) {
        Self::apply(ctx, buf);
    }

    fn decrypt_stream(&self, ctx: &mut [u8], buf: &mut [u8]) {
        Self::apply(ctx, buf);
    }
}
