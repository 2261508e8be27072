// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::sync::Arc;

use cipherdeck_core::{CipherMode, HandleFlags, PrimitiveSpec};
use serial_test::serial;

use crate::registry::Registry;
use crate::support::test_utils::XorBlockPrimitive;
use crate::tests::utils::{Fixture, assert_aborted, run_test_as_subprocess};

// =============================================================================
// Closed handles
// =============================================================================

/// Subprocess for test_close_twice_aborts
#[test]
#[ignore]
fn subprocess_test_close_twice_aborts() {
    let fixture = Fixture::new();
    let mut handle = fixture.keyed(CipherMode::Cbc, HandleFlags::new());

    handle.close();
    handle.close();
}

#[test]
#[serial(fatal)]
fn test_close_twice_aborts() {
    let status = run_test_as_subprocess("tests::fatal::subprocess_test_close_twice_aborts");
    assert_aborted(status);
}

/// Subprocess for test_encrypt_after_close_aborts
#[test]
#[ignore]
fn subprocess_test_encrypt_after_close_aborts() {
    let fixture = Fixture::new();
    let mut handle = fixture.keyed(CipherMode::Ecb, HandleFlags::new());
    handle.close();

    let mut out = [0u8; 16];
    let _ = handle.encrypt(&mut out, &[0u8; 16]);
}

#[test]
#[serial(fatal)]
fn test_encrypt_after_close_aborts() {
    let status = run_test_as_subprocess("tests::fatal::subprocess_test_encrypt_after_close_aborts");
    assert_aborted(status);
}

/// Subprocess for test_set_key_after_close_aborts
#[test]
#[ignore]
fn subprocess_test_set_key_after_close_aborts() {
    let fixture = Fixture::new();
    let mut handle = fixture.keyed(CipherMode::Ctr, HandleFlags::new());
    handle.close();

    let _ = handle.set_key(&[0u8; 16]);
}

#[test]
#[serial(fatal)]
fn test_set_key_after_close_aborts() {
    let status = run_test_as_subprocess("tests::fatal::subprocess_test_set_key_after_close_aborts");
    assert_aborted(status);
}

/// Subprocess for test_accessor_after_close_aborts
#[test]
#[ignore]
fn subprocess_test_accessor_after_close_aborts() {
    let fixture = Fixture::new();
    let mut handle = fixture.keyed(CipherMode::Ofb, HandleFlags::new());
    handle.close();

    let _ = handle.block_len();
}

#[test]
#[serial(fatal)]
fn test_accessor_after_close_aborts() {
    let status = run_test_as_subprocess("tests::fatal::subprocess_test_accessor_after_close_aborts");
    assert_aborted(status);
}

// =============================================================================
// Corrupt registrations
// =============================================================================

/// Subprocess for test_zero_key_length_aborts
#[test]
#[ignore]
fn subprocess_test_zero_key_length_aborts() {
    let registry = Registry::without_builtins();
    let entry = registry
        .register(PrimitiveSpec::new("KEYLESS", 0, 16, 16, Arc::new(XorBlockPrimitive)))
        .expect("Failed to register(..)");

    let _ = registry.key_length(entry.id());
}

#[test]
#[serial(fatal)]
fn test_zero_key_length_aborts() {
    let status = run_test_as_subprocess("tests::fatal::subprocess_test_zero_key_length_aborts");
    assert_aborted(status);
}

/// Subprocess for test_zero_block_length_aborts
#[test]
#[ignore]
fn subprocess_test_zero_block_length_aborts() {
    let registry = Registry::without_builtins();
    let entry = registry
        .register(PrimitiveSpec::new("BLOCKLESS", 128, 0, 16, Arc::new(XorBlockPrimitive)))
        .expect("Failed to register(..)");

    let _ = registry.block_length(entry.id());
}

#[test]
#[serial(fatal)]
fn test_zero_block_length_aborts() {
    let status = run_test_as_subprocess("tests::fatal::subprocess_test_zero_block_length_aborts");
    assert_aborted(status);
}
