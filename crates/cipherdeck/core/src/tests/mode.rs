// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::mode::{Capability, CipherMode, HandleFlags};

// =============================================================================
// required_capability()
// =============================================================================

#[test]
fn test_block_modes_require_block_capability() {
    for mode in [
        CipherMode::Ecb,
        CipherMode::Cbc,
        CipherMode::Cfb,
        CipherMode::Ofb,
        CipherMode::Ctr,
    ] {
        assert_eq!(mode.required_capability(), Some(Capability::Block));
        assert!(mode.is_block_mode());
    }
}

#[test]
fn test_stream_mode_requires_stream_capability() {
    assert_eq!(
        CipherMode::Stream.required_capability(),
        Some(Capability::Stream)
    );
    assert!(!CipherMode::Stream.is_block_mode());
}

#[test]
fn test_none_mode_requires_nothing() {
    assert_eq!(CipherMode::None.required_capability(), None);
}

// =============================================================================
// HandleFlags
// =============================================================================

#[test]
fn test_default_flags_are_empty() {
    let flags = HandleFlags::default();

    assert_eq!(flags, HandleFlags::new());
    assert!(!flags.is_secure());
    assert!(!flags.is_sync_enabled());
    assert!(!flags.is_cbc_cts());
    assert!(!flags.is_cbc_mac());
}

#[test]
fn test_builder_sets_each_flag() {
    let flags = HandleFlags::new().secure().enable_sync().cbc_cts();

    assert!(flags.is_secure());
    assert!(flags.is_sync_enabled());
    assert!(flags.is_cbc_cts());
    assert!(!flags.is_cbc_mac());
}

#[test]
fn test_cts_with_mac_is_inconsistent() {
    assert!(HandleFlags::new().cbc_cts().is_consistent());
    assert!(HandleFlags::new().cbc_mac().is_consistent());
    assert!(!HandleFlags::new().cbc_cts().cbc_mac().is_consistent());
}

#[test]
fn test_setters_clear_flags() {
    let mut flags = HandleFlags::new().cbc_mac();

    flags.set_cbc_mac(false);
    flags.set_cbc_cts(true);

    assert!(flags.is_cbc_cts());
    assert!(!flags.is_cbc_mac());
}
