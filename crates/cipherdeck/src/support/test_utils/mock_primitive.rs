// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use cipherdeck_core::{
    BlockTransform, BulkAccelerator, CipherPrimitive, PrimitiveError, PrimitiveSpec,
};

use super::XOR_BLOCK_LEN;

/// Configurable behavior for [`MockPrimitive`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockPrimitiveBehaviour {
    /// Every key is accepted.
    None,
    /// Every key is rejected as weak.
    FailSetKey,
    /// Reject the key on the Nth set_key call (1-indexed).
    FailSetKeyAtNth(usize),
}

/// Counting XOR-0xFF block primitive with an optional bulk accelerator.
///
/// Outputs are byte-identical to [`super::XorBlockPrimitive`]. Keying
/// stores the first key byte in the context so reset paths can be checked.
pub struct MockPrimitive {
    behaviour: MockPrimitiveBehaviour,
    with_bulk: bool,
    set_key_count: AtomicUsize,
    block_count: AtomicUsize,
    bulk_count: AtomicUsize,
}

impl MockPrimitive {
    /// Creates a mock without a bulk accelerator.
    pub fn new(behaviour: MockPrimitiveBehaviour) -> Self {
        Self {
            behaviour,
            with_bulk: false,
            set_key_count: AtomicUsize::new(0),
            block_count: AtomicUsize::new(0),
            bulk_count: AtomicUsize::new(0),
        }
    }

    /// Exposes CBC/CFB bulk routines.
    pub fn with_bulk(mut self) -> Self {
        self.with_bulk = true;
        self
    }

    /// Spec registering `mock` as `name`.
    pub fn spec(name: &'static str, mock: &Arc<MockPrimitive>) -> PrimitiveSpec {
        PrimitiveSpec::new(name, 128, XOR_BLOCK_LEN, XOR_BLOCK_LEN, Arc::clone(mock) as Arc<dyn CipherPrimitive>)
    }

    /// Number of set_key calls.
    pub fn set_key_count(&self) -> usize {
        self.set_key_count.load(Ordering::Relaxed)
    }

    /// Number of single-block calls.
    pub fn block_count(&self) -> usize {
        self.block_count.load(Ordering::Relaxed)
    }

    /// Number of bulk calls.
    pub fn bulk_count(&self) -> usize {
        self.bulk_count.load(Ordering::Relaxed)
    }

    /// Resets every counter.
    pub fn reset_counts(&self) {
        self.set_key_count.store(0, Ordering::Relaxed);
        self.block_count.store(0, Ordering::Relaxed);
        self.bulk_count.store(0, Ordering::Relaxed);
    }

    fn flip(block: &mut [u8]) {
        block.iter_mut().for_each(|b| *b ^= 0xFF);
    }
}

impl CipherPrimitive for MockPrimitive {
    fn set_key(&self, ctx: &mut [u8], key: &[u8]) -> Result<(), PrimitiveError> {
        let call = self.set_key_count.fetch_add(1, Ordering::Relaxed) + 1;

        // Scribble first so a failed key set leaves a modified context.
        ctx.fill(0);
        if let Some(&first) = key.first() {
            ctx[0] = first;
        }

        match self.behaviour {
            MockPrimitiveBehaviour::None => Ok(()),
            MockPrimitiveBehaviour::FailSetKey => Err(PrimitiveError::WeakKey),
            MockPrimitiveBehaviour::FailSetKeyAtNth(n) if n == call => Err(PrimitiveError::WeakKey),
            MockPrimitiveBehaviour::FailSetKeyAtNth(_) => Ok(()),
        }
    }

    fn block(&self) -> Option<&dyn BlockTransform> {
        Some(self)
    }

    fn bulk(&self) -> Option<&dyn BulkAccelerator> {
        if self.with_bulk { Some(self) } else { None }
    }
}

impl BlockTransform for MockPrimitive {
    fn encrypt_block(&self, _ctx: &[u8], block: &mut [u8]) {
        self.block_count.fetch_add(1, Ordering::Relaxed);
        Self::flip(block);
    }

    fn decrypt_block(&self, _ctx: &[u8], block: &mut [u8]) {
        self.block_count.fetch_add(1, Ordering::Relaxed);
        Self::flip(block);
    }
}

impl BulkAccelerator for MockPrimitive {
    fn cbc_encrypt(&self, _ctx: &[u8], iv: &mut [u8], blocks: &mut [u8]) {
        self.bulk_count.fetch_add(1, Ordering::Relaxed);

        for block in blocks.chunks_exact_mut(XOR_BLOCK_LEN) {
            block.iter_mut().zip(iv.iter()).for_each(|(b, v)| *b ^= v);
            Self::flip(block);
            iv.copy_from_slice(block);
        }
    }

    fn cbc_mac(&self, _ctx: &[u8], iv: &mut [u8], blocks: &[u8]) {
        self.bulk_count.fetch_add(1, Ordering::Relaxed);

        for block in blocks.chunks_exact(XOR_BLOCK_LEN) {
            iv.iter_mut().zip(block).for_each(|(v, b)| *v ^= b);
            Self::flip(iv);
        }
    }

    fn cbc_decrypt(&self, _ctx: &[u8], iv: &mut [u8], blocks: &mut [u8]) {
        self.bulk_count.fetch_add(1, Ordering::Relaxed);

        for block in blocks.chunks_exact_mut(XOR_BLOCK_LEN) {
            let mut saved = [0u8; XOR_BLOCK_LEN];
            saved.copy_from_slice(block);
            Self::flip(block);
            block.iter_mut().zip(iv.iter()).for_each(|(b, v)| *b ^= v);
            iv.copy_from_slice(&saved);
        }
    }

    fn cfb_encrypt(&self, _ctx: &[u8], iv: &mut [u8], blocks: &mut [u8]) {
        self.bulk_count.fetch_add(1, Ordering::Relaxed);

        for block in blocks.chunks_exact_mut(XOR_BLOCK_LEN) {
            Self::flip(iv);
            for (b, v) in block.iter_mut().zip(iv.iter_mut()) {
                *v ^= *b;
                *b = *v;
            }
        }
    }

    fn cfb_decrypt(&self, _ctx: &[u8], iv: &mut [u8], blocks: &mut [u8]) {
        self.bulk_count.fetch_add(1, Ordering::Relaxed);

        for block in blocks.chunks_exact_mut(XOR_BLOCK_LEN) {
            Self::flip(iv);
            for (b, v) in block.iter_mut().zip(iv.iter_mut()) {
                let cipher = *b;
                *b = *v ^ cipher;
                *v = cipher;
            }
        }
    }
}
