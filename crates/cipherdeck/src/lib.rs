// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Symmetric cipher registry and mode-of-operation engine.
//!
//! Cipher primitives (a key schedule plus a single-block or stream
//! transform) are registered in a [`Registry`]. A [`CipherHandle`] binds
//! one of them to a chaining mode and carries the per-session state:
//!
//! - **ECB**, **CBC** (optionally with ciphertext stealing or MAC output)
//! - **CFB**, **OFB** with sub-block carry across calls
//! - **CTR** with a big-endian block-sized counter
//! - **STREAM** for native stream ciphers, **NONE** for plain copy
//!
//! Handle memory (live context, reset template, IV, counter) lives in one
//! aligned arena that is wiped before it is freed. Requesting
//! [`HandleFlags::secure`] draws it from locked memory.
//!
//! # Errors
//!
//! Recoverable failures are returned as [`CipherError`]. Using a handle
//! after [`CipherHandle::close`] aborts the process.
//!
//! # Example
//!
//! ```rust
//! use cipherdeck::builtin::AES128;
//! use cipherdeck::{CipherError, CipherHandle, CipherMode, HandleFlags, Registry};
//!
//! fn example() -> Result<(), CipherError> {
//!     let registry = Registry::new();
//!     let mut handle = CipherHandle::open(&registry, AES128, CipherMode::Cbc, HandleFlags::new())?;
//!
//!     handle.set_key(&[0x2b; 16])?;
//!     handle.set_iv(&[0u8; 16]);
//!
//!     let plaintext = [0x11u8; 32];
//!     let mut ciphertext = [0u8; 32];
//!     handle.encrypt(&mut ciphertext, &plaintext)?;
//!
//!     handle.reset()?;
//!     handle.set_iv(&[0u8; 16]);
//!
//!     let mut recovered = [0u8; 32];
//!     handle.decrypt(&mut recovered, &ciphertext)?;
//!     assert_eq!(recovered, plaintext);
//!
//!     handle.close();
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]

#[cfg(test)]
mod tests;

pub mod builtin;

mod error;
mod fatal;
mod handle;
mod info;
mod modes;
mod registry;
mod support;

pub use cipherdeck_core::{
    AlgorithmId, BlockTransform, BulkAccelerator, Capability, CipherMode, CipherPrimitive,
    HandleFlags, OidSpec, PrimitiveError, PrimitiveSpec, StreamTransform,
};
pub use error::{
    ArgumentError, CipherError, ConfigurationError, FatalError, OperationalError,
};
pub use handle::{CipherHandle, FAILED_OUTPUT_PATTERN, close};
pub use info::{AlgorithmInfo, AlgorithmQuery};
pub use registry::{EntryRef, FIRST_DYNAMIC_ID, Registry};

#[cfg(any(test, feature = "test-utils"))]
pub use support::test_utils;

/// Opens a handle against [`Registry::global`].
pub fn open(id: AlgorithmId, mode: CipherMode, flags: HandleFlags) -> Result<CipherHandle, CipherError> {
    CipherHandle::open(Registry::global(), id, mode, flags)
}

/// Queries [`Registry::global`]. See [`Registry::algorithm_info`].
pub fn algorithm_info(id: AlgorithmId, query: AlgorithmQuery) -> Result<AlgorithmInfo, CipherError> {
    Registry::global().algorithm_info(id, query)
}

/// Disables `id` in [`Registry::global`] for the rest of the process.
pub fn disable_algorithm(id: AlgorithmId) {
    Registry::global().disable(id);
}
