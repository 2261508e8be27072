// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Algorithms registered by default.

#[cfg(feature = "builtin-aes")]
mod aes;

use cipherdeck_core::{AlgorithmId, PrimitiveSpec};

/// AES with a 128-bit key.
pub const AES128: AlgorithmId = 7;
/// AES with a 192-bit key.
pub const AES192: AlgorithmId = 8;
/// AES with a 256-bit key.
pub const AES256: AlgorithmId = 9;

pub(crate) fn default_specs() -> Vec<(AlgorithmId, PrimitiveSpec)> {
    let mut specs = Vec::new();

    #[cfg(feature = "builtin-aes")]
    specs.extend(aes::specs());

    specs
}
