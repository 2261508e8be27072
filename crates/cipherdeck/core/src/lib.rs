// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Core traits and types for cipherdeck primitives.
//!
//! A primitive is a single block or stream cipher without any chaining mode.
//! It is described by a [`PrimitiveSpec`] and implements [`CipherPrimitive`],
//! exposing each capability it actually has:
//!
//! - [`BlockTransform`]: single-block encrypt/decrypt (ECB, CBC, CFB, OFB, CTR)
//! - [`StreamTransform`]: whole-buffer stream encrypt/decrypt (STREAM)
//! - [`BulkAccelerator`]: optional multi-block CBC/CFB routines
//!
//! Missing capabilities are reported as `None` and rejected when a handle is
//! opened, never at encryption time.

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

extern crate alloc;

#[cfg(test)]
mod tests;

mod error;
mod mode;
mod spec;
mod traits;

pub use error::PrimitiveError;
pub use mode::{Capability, CipherMode, HandleFlags};
pub use spec::{AlgorithmId, OidSpec, PrimitiveSpec};
pub use traits::{BlockTransform, BulkAccelerator, CipherPrimitive, StreamTransform};

/// Largest key length, in bits, an algorithm may declare.
pub const MAX_KEY_BITS: usize = 512;

/// Upper bound (exclusive), in bytes, for a declared block length.
pub const MAX_BLOCK_LEN: usize = 10_000;
