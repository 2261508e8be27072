// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::sync::Arc;

use crate::mode::CipherMode;
use crate::spec::{OidSpec, PrimitiveSpec};
use crate::traits::CipherPrimitive;

struct KeyOnly;

impl CipherPrimitive for KeyOnly {}

fn spec() -> PrimitiveSpec {
    PrimitiveSpec::new("TWOFISH", 256, 16, 64, Arc::new(KeyOnly))
        .with_aliases(["twofish256", "TF-256"])
        .with_oids([
            OidSpec::new("1.3.6.1.4.1.3029.1.2.1", CipherMode::Cbc),
            OidSpec::new("1.3.6.1.4.1.3029.1.2.2", CipherMode::Cfb),
        ])
}

// =============================================================================
// PrimitiveSpec::new()
// =============================================================================

#[test]
fn test_new_stores_declared_lengths() {
    let spec = spec();

    assert_eq!(spec.name(), "TWOFISH");
    assert_eq!(spec.key_bits(), 256);
    assert_eq!(spec.block_len(), 16);
    assert_eq!(spec.context_size(), 64);
    assert_eq!(spec.context_align(), 8);
}

#[test]
fn test_with_context_align_overrides_default() {
    let spec = spec().with_context_align(16);

    assert_eq!(spec.context_align(), 16);
}

#[test]
fn test_default_capabilities_are_absent() {
    let spec = spec();
    let primitive = spec.primitive();

    assert!(primitive.block().is_none());
    assert!(primitive.stream().is_none());
    assert!(primitive.bulk().is_none());
}

#[test]
fn test_default_set_key_accepts_anything() {
    let spec = spec();
    let mut ctx = [0u8; 4];

    spec.primitive()
        .set_key(&mut ctx, b"whatever")
        .expect("Failed to set_key()");

    assert_eq!(ctx, [0u8; 4]);
}

// =============================================================================
// matches_name()
// =============================================================================

#[test]
fn test_matches_name_is_case_insensitive() {
    let spec = spec();

    assert!(spec.matches_name("twofish"));
    assert!(spec.matches_name("TWOFISH256"));
    assert!(spec.matches_name("tf-256"));
    assert!(!spec.matches_name("twofish128"));
}

// =============================================================================
// find_oid()
// =============================================================================

#[test]
fn test_find_oid_returns_paired_mode() {
    let spec = spec();

    let found = spec.find_oid("1.3.6.1.4.1.3029.1.2.2").expect("Failed to find_oid()");

    assert_eq!(found.mode, CipherMode::Cfb);
}

#[test]
fn test_find_oid_unknown_returns_none() {
    assert!(spec().find_oid("1.2.3").is_none());
}
