// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::error::PrimitiveError;

/// A pluggable cipher primitive.
///
/// The engine hands every call the primitive's own context bytes, so one
/// instance can serve any number of handles concurrently.
pub trait CipherPrimitive: Send + Sync {
    /// Installs `key` into the live context `ctx`.
    ///
    /// The default accepts any key and leaves the context untouched.
    fn set_key(&self, ctx: &mut [u8], key: &[u8]) -> Result<(), PrimitiveError> {
        let _ = (ctx, key);
        Ok(())
    }

    /// Single-block transform, if the primitive is a block cipher.
    fn block(&self) -> Option<&dyn BlockTransform> {
        None
    }

    /// Stream transform, if the primitive is a stream cipher.
    fn stream(&self) -> Option<&dyn StreamTransform> {
        None
    }

    /// Multi-block CBC/CFB routines, if the primitive has faster ones.
    fn bulk(&self) -> Option<&dyn BulkAccelerator> {
        None
    }
}

/// Single-block encrypt/decrypt. `block` is exactly one block long.
pub trait BlockTransform: Send + Sync {
    /// Encrypts one block in place.
    fn encrypt_block(&self, ctx: &[u8], block: &mut [u8]);

    /// Decrypts one block in place.
    fn decrypt_block(&self, ctx: &[u8], block: &mut [u8]);
}

/// Whole-buffer stream transform. Stream state lives in `ctx`.
pub trait StreamTransform: Send + Sync {
    /// Encrypts `buf` in place.
    fn encrypt_stream(&self, ctx: &mut [u8], buf: &mut [u8]);

    /// Decrypts `buf` in place.
    fn decrypt_stream(&self, ctx: &mut [u8], buf: &mut [u8]);
}

/// Multi-block chaining routines.
///
/// Every method processes `blocks.len() / block_len` whole blocks in place
/// and leaves `iv` holding the chaining value the scalar loop would have
/// produced. Results must be byte-identical to the per-block path.
pub trait BulkAccelerator: Send + Sync {
    /// CBC encryption; `iv` ends as the last ciphertext block.
    fn cbc_encrypt(&self, ctx: &[u8], iv: &mut [u8], blocks: &mut [u8]);

    /// CBC encryption that only chains; `iv` ends as the MAC.
    fn cbc_mac(&self, ctx: &[u8], iv: &mut [u8], blocks: &[u8]);

    /// CBC decryption; `iv` ends as the last ciphertext block.
    fn cbc_decrypt(&self, ctx: &[u8], iv: &mut [u8], blocks: &mut [u8]);

    /// CFB encryption; `iv` ends as the last ciphertext block.
    fn cfb_encrypt(&self, ctx: &[u8], iv: &mut [u8], blocks: &mut [u8]);

    /// CFB decryption; `iv` ends as the last ciphertext block.
    fn cfb_decrypt(&self, ctx: &[u8], iv: &mut [u8], blocks: &mut [u8]);
}
