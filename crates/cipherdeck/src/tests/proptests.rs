// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use cipherdeck_core::{CipherMode, HandleFlags};
use proptest::prelude::*;

use crate::handle::CipherHandle;
use crate::tests::utils::Fixture;

fn carrying_mode() -> impl Strategy<Value = CipherMode> {
    prop_oneof![
        Just(CipherMode::Cfb),
        Just(CipherMode::Ofb),
        Just(CipherMode::Stream),
    ]
}

fn any_mode() -> impl Strategy<Value = CipherMode> {
    prop_oneof![
        Just(CipherMode::Ecb),
        Just(CipherMode::Cbc),
        Just(CipherMode::Cfb),
        Just(CipherMode::Ofb),
        Just(CipherMode::Ctr),
        Just(CipherMode::Stream),
    ]
}

/// Feeds `input` through `handle` in pieces whose sizes cycle through `cuts`.
fn encrypt_with_cuts(handle: &mut CipherHandle, input: &[u8], cuts: &[usize]) -> Vec<u8> {
    let mut out = vec![0u8; input.len()];
    let mut offset = 0;

    for &cut in cuts.iter().cycle() {
        if offset == input.len() {
            break;
        }

        let end = (offset + cut).min(input.len());
        handle
            .encrypt(&mut out[offset..end], &input[offset..end])
            .expect("Failed to encrypt(..)");
        offset = end;
    }

    out
}

proptest! {
    #[test]
    fn split_calls_match_single_call(
        mode in carrying_mode(),
        plaintext in prop::collection::vec(any::<u8>(), 0..200),
        cuts in prop::collection::vec(1..40usize, 1..8),
    ) {
        let fixture = Fixture::new();

        let mut whole = fixture.keyed(mode, HandleFlags::new());
        let mut expected = vec![0u8; plaintext.len()];
        whole
            .encrypt(&mut expected, &plaintext)
            .expect("Failed to encrypt(..)");

        let mut split = fixture.keyed(mode, HandleFlags::new());
        let actual = encrypt_with_cuts(&mut split, &plaintext, &cuts);

        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn round_trip_any_mode(
        mode in any_mode(),
        blocks in 0..12usize,
        tail in 0..16usize,
        seed in any::<u8>(),
    ) {
        let fixture = Fixture::new();
        let len = match mode {
            CipherMode::Ecb | CipherMode::Cbc => blocks * 16,
            _ => blocks * 16 + tail,
        };
        let plaintext: Vec<u8> = (0..len).map(|i| seed.wrapping_add(i as u8)).collect();

        let mut encryptor = fixture.keyed(mode, HandleFlags::new());
        let mut ciphertext = vec![0u8; len];
        encryptor
            .encrypt(&mut ciphertext, &plaintext)
            .expect("Failed to encrypt(..)");

        let mut decryptor = fixture.keyed(mode, HandleFlags::new());
        let mut recovered = vec![0u8; len];
        decryptor
            .decrypt(&mut recovered, &ciphertext)
            .expect("Failed to decrypt(..)");

        prop_assert_eq!(recovered, plaintext);
    }

    #[test]
    fn cts_round_trip(len in 17..300usize, seed in any::<u8>()) {
        let fixture = Fixture::new();
        let flags = HandleFlags::new().cbc_cts();
        let plaintext: Vec<u8> = (0..len).map(|i| seed ^ (i as u8)).collect();

        let mut encryptor = fixture.keyed(CipherMode::Cbc, flags);
        let mut ciphertext = vec![0u8; len];
        encryptor
            .encrypt(&mut ciphertext, &plaintext)
            .expect("Failed to encrypt(..)");

        let mut decryptor = fixture.keyed(CipherMode::Cbc, flags);
        let mut recovered = vec![0u8; len];
        decryptor
            .decrypt(&mut recovered, &ciphertext)
            .expect("Failed to decrypt(..)");

        prop_assert_eq!(recovered, plaintext);
    }
}
