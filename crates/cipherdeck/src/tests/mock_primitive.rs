// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use cipherdeck_core::{BlockTransform, BulkAccelerator, CipherPrimitive, PrimitiveError};

use crate::support::test_utils::{
    MockPrimitive, MockPrimitiveBehaviour, XorBlockPrimitive, XorStreamPrimitive,
};

#[test]
fn test_mock_behaviour_none_accepts_keys() {
    let mock = MockPrimitive::new(MockPrimitiveBehaviour::None);
    let mut ctx = [0u8; 16];

    mock.set_key(&mut ctx, &[7u8; 16])
        .expect("Failed to set_key(..)");

    assert_eq!(ctx[0], 7);
    assert_eq!(mock.set_key_count(), 1);
}

#[test]
fn test_mock_behaviour_fail_set_key() {
    let mock = MockPrimitive::new(MockPrimitiveBehaviour::FailSetKey);
    let mut ctx = [0u8; 16];

    for _ in 0..3 {
        assert_eq!(mock.set_key(&mut ctx, &[1u8; 16]), Err(PrimitiveError::WeakKey));
    }
    assert_eq!(mock.set_key_count(), 3);
}

#[test]
fn test_mock_behaviour_fail_at_nth() {
    let mock = MockPrimitive::new(MockPrimitiveBehaviour::FailSetKeyAtNth(2));
    let mut ctx = [0u8; 16];

    assert!(mock.set_key(&mut ctx, &[1u8; 16]).is_ok());
    assert!(mock.set_key(&mut ctx, &[1u8; 16]).is_err());
    assert!(mock.set_key(&mut ctx, &[1u8; 16]).is_ok());
}

#[test]
fn test_mock_counts_and_resets() {
    let mock = MockPrimitive::new(MockPrimitiveBehaviour::None).with_bulk();
    let ctx = [0u8; 16];
    let mut iv = [0u8; 16];
    let mut block = [0u8; 32];

    mock.encrypt_block(&ctx, &mut block[..16]);
    mock.decrypt_block(&ctx, &mut block[..16]);
    mock.cbc_encrypt(&ctx, &mut iv, &mut block);

    assert_eq!(mock.block_count(), 2);
    assert_eq!(mock.bulk_count(), 1);

    mock.reset_counts();

    assert_eq!(mock.block_count(), 0);
    assert_eq!(mock.bulk_count(), 0);
    assert_eq!(mock.set_key_count(), 0);
}

#[test]
fn test_mock_bulk_is_optional() {
    let plain = MockPrimitive::new(MockPrimitiveBehaviour::None);
    let bulk = MockPrimitive::new(MockPrimitiveBehaviour::None).with_bulk();

    assert!(plain.bulk().is_none());
    assert!(bulk.bulk().is_some());
    assert!(plain.block().is_some());
    assert!(plain.stream().is_none());
}

#[test]
fn test_xor_block_matches_mock() {
    let mock = MockPrimitive::new(MockPrimitiveBehaviour::None);
    let xor = XorBlockPrimitive;
    let ctx = [0u8; 16];

    let mut a: Vec<u8> = (0..16).collect();
    let mut b = a.clone();
    mock.encrypt_block(&ctx, &mut a);
    xor.block()
        .expect("Failed to block()")
        .encrypt_block(&ctx, &mut b);

    assert_eq!(a, b);
}

#[test]
fn test_xor_stream_rejects_empty_key() {
    let mut ctx = [0u8; 9];

    assert_eq!(
        XorStreamPrimitive.set_key(&mut ctx, &[]),
        Err(PrimitiveError::InvalidKeyLength {
            expected: 1,
            actual: 0
        })
    );
}
