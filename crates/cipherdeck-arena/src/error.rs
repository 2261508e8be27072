// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for cipherdeck-arena.
use thiserror::Error;

/// Errors that can occur while laying out or allocating an arena.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum ArenaError {
    /// Alignment is zero, not a power of two, or larger than a page.
    #[error("invalid alignment: {0}")]
    InvalidAlignment(usize),

    /// Slot sizes overflow `usize`.
    #[error("arena size overflows")]
    SizeOverflow,

    /// The global allocator returned null.
    #[error("allocation of {size} bytes failed")]
    Allocation {
        /// Requested bytes.
        size: usize,
    },

    /// Anonymous mapping failed.
    #[error("mmap failed")]
    Map,

    /// The mapping could not be locked into memory.
    #[error("mlock failed")]
    Lock,
}
