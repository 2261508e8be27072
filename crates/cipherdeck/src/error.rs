// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for cipherdeck.

use cipherdeck_arena::ArenaError;
use cipherdeck_core::{AlgorithmId, CipherMode, PrimitiveError};
use thiserror::Error;

/// Algorithm, mode or flag selection that cannot work.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum ConfigurationError {
    /// No algorithm is registered under the id.
    #[error("unknown algorithm {0}")]
    UnknownAlgorithm(AlgorithmId),

    /// The algorithm was disabled and refuses new handles.
    #[error("algorithm {0} is disabled")]
    AlgorithmDisabled(AlgorithmId),

    /// The primitive lacks the capability the mode needs.
    #[error("algorithm {id} does not support {mode:?} mode")]
    UnsupportedMode {
        /// Algorithm asked for.
        id: AlgorithmId,
        /// Mode asked for.
        mode: CipherMode,
    },

    /// Both CTS and CBC-MAC were requested.
    #[error("ciphertext stealing and CBC-MAC are mutually exclusive")]
    ConflictingFlags,

    /// A declared length cannot serve the requested mode.
    #[error("algorithm {id} declares an invalid {what} of {value}")]
    InvalidLength {
        /// Algorithm declaring the length.
        id: AlgorithmId,
        /// Which length, e.g. `"block length"`.
        what: &'static str,
        /// Declared value.
        value: usize,
    },

    /// The operation needs a key and none was set.
    #[error("handle has no key")]
    NotKeyed,
}

/// Caller-supplied buffers or values that do not fit the handle.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum ArgumentError {
    /// Input length must be a whole number of blocks.
    #[error("length {len} is not a multiple of the block length {block_len}")]
    Misaligned {
        /// Input length.
        len: usize,
        /// Block length of the algorithm.
        block_len: usize,
    },

    /// Output buffer is shorter than the input.
    #[error("output buffer too short: need {required} bytes, got {actual}")]
    OutputTooShort {
        /// Bytes needed.
        required: usize,
        /// Bytes available.
        actual: usize,
    },

    /// CTR counter length differs from the block length.
    #[error("counter must be {expected} bytes, got {actual}")]
    InvalidCounterLength {
        /// Block length.
        expected: usize,
        /// Counter length supplied.
        actual: usize,
    },

    /// The primitive refused the key.
    #[error("key rejected: {0}")]
    KeyRejected(#[from] PrimitiveError),
}

/// Environment failures.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum OperationalError {
    /// The handle's context arena could not be allocated.
    #[error("handle allocation failed: {0}")]
    Allocation(#[from] ArenaError),

    /// No free dynamic id is left.
    #[error("algorithm id space exhausted")]
    IdSpaceExhausted,
}

/// Every recoverable error returned by cipherdeck.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum CipherError {
    /// See [`ConfigurationError`].
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// See [`ArgumentError`].
    #[error("argument error: {0}")]
    Argument(#[from] ArgumentError),

    /// See [`OperationalError`].
    #[error("operational error: {0}")]
    Operational(#[from] OperationalError),
}

impl From<PrimitiveError> for CipherError {
    fn from(error: PrimitiveError) -> Self {
        Self::Argument(ArgumentError::KeyRejected(error))
    }
}

impl From<ArenaError> for CipherError {
    fn from(error: ArenaError) -> Self {
        Self::Operational(OperationalError::Allocation(error))
    }
}

/// Conditions that terminate the process instead of being returned.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum FatalError {
    /// Any use of a handle after `close`.
    #[error("operation on a closed cipher handle")]
    HandleClosed,

    /// A registered algorithm declares no key.
    #[error("algorithm {0} declares a zero key length")]
    ZeroKeyLength(AlgorithmId),

    /// A registered algorithm declares no block.
    #[error("algorithm {0} declares a zero block length")]
    ZeroBlockLength(AlgorithmId),
}
