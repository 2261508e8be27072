// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use alloc::string::String;

use thiserror::Error;

/// Errors a primitive may report while installing a key.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum PrimitiveError {
    /// The key has the wrong size.
    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength {
        /// Key length the primitive accepts.
        expected: usize,
        /// Key length supplied.
        actual: usize,
    },

    /// The key is on the primitive's weak-key list.
    #[error("weak key")]
    WeakKey,

    /// Any other refusal, with the primitive's reason.
    #[error("key rejected: {0}")]
    Rejected(String),
}
