// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! AES-128/192/256 built on the `aes` round functions.
//!
//! `set_key` runs the FIPS-197 key expansion once and stores the result in
//! the context: the encryption round keys followed by the round keys of the
//! equivalent inverse cipher. Block and bulk calls only read them.

use std::sync::Arc;

use aes::Block;
use aes::hazmat::{cipher_round, equiv_inv_cipher_round, inv_mix_columns, mix_columns};
use cipherdeck_core::{
    AlgorithmId, BlockTransform, BulkAccelerator, CipherMode, CipherPrimitive, OidSpec,
    PrimitiveError, PrimitiveSpec,
};
use zeroize::{Zeroize, Zeroizing};

use super::{AES128, AES192, AES256};

const BLOCK_LEN: usize = 16;

#[derive(Debug, Clone, Copy)]
enum Variant {
    Aes128,
    Aes192,
    Aes256,
}

impl Variant {
    fn key_len(self) -> usize {
        match self {
            Self::Aes128 => 16,
            Self::Aes192 => 24,
            Self::Aes256 => 32,
        }
    }

    fn rounds(self) -> usize {
        self.key_len() / 4 + 6
    }

    /// Bytes of one direction's round keys.
    fn schedule_len(self) -> usize {
        (self.rounds() + 1) * BLOCK_LEN
    }

    fn context_size(self) -> usize {
        2 * self.schedule_len()
    }
}

fn xor_in_place(block: &mut [u8], key: &[u8]) {
    block.iter_mut().zip(key).for_each(|(b, k)| *b ^= k);
}

fn xtime(x: u8) -> u8 {
    (x << 1) ^ if x & 0x80 != 0 { 0x1b } else { 0 }
}

/// SubWord through a full round: with the word in every column ShiftRows
/// is the identity, and undoing MixColumns leaves SubBytes alone.
fn sub_word(word: &mut [u8; 4]) {
    let mut state = Zeroizing::new([0u8; BLOCK_LEN]);
    state.chunks_exact_mut(4).for_each(|column| column.copy_from_slice(word));

    let block = Block::from_mut_slice(&mut state[..]);
    cipher_round(block, &Block::default());
    inv_mix_columns(block);

    word.copy_from_slice(&state[..4]);
}

/// Writes both round key sets for `key` into `ctx`.
fn expand_key(variant: Variant, ctx: &mut [u8], key: &[u8]) {
    let nk = variant.key_len() / 4;
    let rounds = variant.rounds();
    let (enc, dec) = ctx[..variant.context_size()].split_at_mut(variant.schedule_len());

    enc[..key.len()].copy_from_slice(key);

    let mut rcon = 1u8;
    let mut temp = [0u8; 4];

    for i in nk..4 * (rounds + 1) {
        temp.copy_from_slice(&enc[(i - 1) * 4..i * 4]);

        if i % nk == 0 {
            temp.rotate_left(1);
            sub_word(&mut temp);
            temp[0] ^= rcon;
            rcon = xtime(rcon);
        } else if nk > 6 && i % nk == 4 {
            sub_word(&mut temp);
        }

        for (j, t) in temp.iter().enumerate() {
            enc[i * 4 + j] = enc[(i - nk) * 4 + j] ^ t;
        }
    }

    temp.zeroize();

    for (round, dst) in dec.chunks_exact_mut(BLOCK_LEN).enumerate() {
        let src = (rounds - round) * BLOCK_LEN;
        dst.copy_from_slice(&enc[src..src + BLOCK_LEN]);

        if round != 0 && round != rounds {
            inv_mix_columns(Block::from_mut_slice(dst));
        }
    }
}

/// Round keys borrowed from a keyed context.
struct Schedule<'a> {
    rounds: usize,
    enc: &'a [u8],
    dec: &'a [u8],
}

impl<'a> Schedule<'a> {
    fn new(variant: Variant, ctx: &'a [u8]) -> Self {
        let (enc, dec) = ctx[..variant.context_size()].split_at(variant.schedule_len());

        Self {
            rounds: variant.rounds(),
            enc,
            dec,
        }
    }

    fn round_key(keys: &[u8], round: usize) -> &Block {
        Block::from_slice(&keys[round * BLOCK_LEN..(round + 1) * BLOCK_LEN])
    }

    fn encrypt(&self, block: &mut [u8]) {
        let block = Block::from_mut_slice(block);

        xor_in_place(block, Self::round_key(self.enc, 0));
        for round in 1..self.rounds {
            cipher_round(block, Self::round_key(self.enc, round));
        }

        // Last round has no MixColumns.
        cipher_round(block, &Block::default());
        inv_mix_columns(block);
        xor_in_place(block, Self::round_key(self.enc, self.rounds));
    }

    fn decrypt(&self, block: &mut [u8]) {
        let block = Block::from_mut_slice(block);

        xor_in_place(block, Self::round_key(self.dec, 0));
        for round in 1..self.rounds {
            equiv_inv_cipher_round(block, Self::round_key(self.dec, round));
        }

        equiv_inv_cipher_round(block, &Block::default());
        mix_columns(block);
        xor_in_place(block, Self::round_key(self.dec, self.rounds));
    }
}

struct Aes {
    variant: Variant,
}

impl CipherPrimitive for Aes {
    fn set_key(&self, ctx: &mut [u8], key: &[u8]) -> Result<(), PrimitiveError> {
        let expected = self.variant.key_len();

        if key.len() != expected {
            return Err(PrimitiveError::InvalidKeyLength {
                expected,
                actual: key.len(),
            });
        }

        expand_key(self.variant, ctx, key);
        Ok(())
    }

    fn block(&self) -> Option<&dyn BlockTransform> {
        Some(self)
    }

    fn bulk(&self) -> Option<&dyn BulkAccelerator> {
        Some(self)
    }
}

impl BlockTransform for Aes {
    fn encrypt_block(&self, ctx: &[u8], block: &mut [u8]) {
        Schedule::new(self.variant, ctx).encrypt(block);
    }

    fn decrypt_block(&self, ctx: &[u8], block: &mut [u8]) {
        Schedule::new(self.variant, ctx).decrypt(block);
    }
}

impl BulkAccelerator for Aes {
    fn cbc_encrypt(&self, ctx: &[u8], iv: &mut [u8], blocks: &mut [u8]) {
        let schedule = Schedule::new(self.variant, ctx);

        for block in blocks.chunks_exact_mut(BLOCK_LEN) {
            block.iter_mut().zip(iv.iter()).for_each(|(b, v)| *b ^= v);
            schedule.encrypt(block);
            iv.copy_from_slice(block);
        }
    }

    fn cbc_mac(&self, ctx: &[u8], iv: &mut [u8], blocks: &[u8]) {
        let schedule = Schedule::new(self.variant, ctx);

        for block in blocks.chunks_exact(BLOCK_LEN) {
            iv.iter_mut().zip(block).for_each(|(v, b)| *v ^= b);
            schedule.encrypt(iv);
        }
    }

    fn cbc_decrypt(&self, ctx: &[u8], iv: &mut [u8], blocks: &mut [u8]) {
        let schedule = Schedule::new(self.variant, ctx);
        let mut saved = Zeroizing::new([0u8; BLOCK_LEN]);

        for block in blocks.chunks_exact_mut(BLOCK_LEN) {
            saved.copy_from_slice(block);
            schedule.decrypt(block);
            block.iter_mut().zip(iv.iter()).for_each(|(b, v)| *b ^= v);
            iv.copy_from_slice(&saved[..]);
        }
    }

    fn cfb_encrypt(&self, ctx: &[u8], iv: &mut [u8], blocks: &mut [u8]) {
        let schedule = Schedule::new(self.variant, ctx);

        for block in blocks.chunks_exact_mut(BLOCK_LEN) {
            schedule.encrypt(iv);
            for (b, v) in block.iter_mut().zip(iv.iter_mut()) {
                *v ^= *b;
                *b = *v;
            }
        }
    }

    fn cfb_decrypt(&self, ctx: &[u8], iv: &mut [u8], blocks: &mut [u8]) {
        let schedule = Schedule::new(self.variant, ctx);

        for block in blocks.chunks_exact_mut(BLOCK_LEN) {
            schedule.encrypt(iv);
            for (b, v) in block.iter_mut().zip(iv.iter_mut()) {
                let cipher = *b;
                *b = *v ^ cipher;
                *v = cipher;
            }
        }
    }
}

fn oids(base: u32) -> [OidSpec; 4] {
    [
        (1, CipherMode::Ecb),
        (2, CipherMode::Cbc),
        (3, CipherMode::Ofb),
        (4, CipherMode::Cfb),
    ]
    .map(|(arc, mode)| OidSpec::new(format!("2.16.840.1.101.3.4.1.{}", base + arc), mode))
}

fn spec(name: &'static str, aliases: &[&'static str], variant: Variant, oid_base: u32) -> PrimitiveSpec {
    PrimitiveSpec::new(
        name,
        variant.key_len() * 8,
        BLOCK_LEN,
        variant.context_size(),
        Arc::new(Aes { variant }),
    )
    .with_aliases(aliases.iter().copied())
    .with_oids(oids(oid_base))
    .with_context_align(16)
}

pub(super) fn specs() -> Vec<(AlgorithmId, PrimitiveSpec)> {
    vec![
        (AES128, spec("AES", &["RIJNDAEL", "AES128", "AES-128"], Variant::Aes128, 0)),
        (AES192, spec("AES192", &["RIJNDAEL192", "AES-192"], Variant::Aes192, 20)),
        (AES256, spec("AES256", &["RIJNDAEL256", "AES-256"], Variant::Aes256, 40)),
    ]
}
