// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Algorithm metadata queries. None of these need an open handle.

use cipherdeck_core::{AlgorithmId, CipherMode, MAX_BLOCK_LEN, MAX_KEY_BITS};

use crate::error::{CipherError, ConfigurationError, FatalError};
use crate::fatal::fatal;
use crate::registry::Registry;

/// What [`Registry::algorithm_info`] should report.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum AlgorithmQuery {
    /// Key length in bytes.
    KeyLength,
    /// Block length in bytes.
    BlockLength,
    /// Whether new handles may be opened.
    Availability,
}

/// Answer to an [`AlgorithmQuery`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum AlgorithmInfo {
    /// Key length in bytes.
    KeyLength(usize),
    /// Block length in bytes.
    BlockLength(usize),
    /// The algorithm is registered and enabled.
    Available,
}

struct Declared {
    key_bits: usize,
    block_len: usize,
}

impl Registry {
    fn declared(&self, id: AlgorithmId) -> Result<Declared, CipherError> {
        let table = self.lock();
        let entry = table
            .get(id)
            .ok_or(ConfigurationError::UnknownAlgorithm(id))?;

        if entry.is_disabled() {
            return Err(ConfigurationError::AlgorithmDisabled(id).into());
        }

        Ok(Declared {
            key_bits: entry.spec().key_bits(),
            block_len: entry.spec().block_len(),
        })
    }

    /// Answers `query` for algorithm `id`.
    ///
    /// Unknown or disabled algorithms, and declared lengths outside the
    /// accepted range, are [`ConfigurationError`]s. A declared length of
    /// zero means the registration itself is corrupt and aborts the process.
    pub fn algorithm_info(&self, id: AlgorithmId, query: AlgorithmQuery) -> Result<AlgorithmInfo, CipherError> {
        let declared = self.declared(id)?;

        match query {
            AlgorithmQuery::Availability => Ok(AlgorithmInfo::Available),
            AlgorithmQuery::KeyLength => match declared.key_bits {
                0 => fatal(FatalError::ZeroKeyLength(id)),
                bits if bits > MAX_KEY_BITS => Err(ConfigurationError::InvalidLength {
                    id,
                    what: "key length",
                    value: bits,
                }
                .into()),
                bits => Ok(AlgorithmInfo::KeyLength(bits / 8)),
            },
            AlgorithmQuery::BlockLength => match declared.block_len {
                0 => fatal(FatalError::ZeroBlockLength(id)),
                len if len >= MAX_BLOCK_LEN => Err(ConfigurationError::InvalidLength {
                    id,
                    what: "block length",
                    value: len,
                }
                .into()),
                len => Ok(AlgorithmInfo::BlockLength(len)),
            },
        }
    }

    /// Key length of `id` in bytes.
    pub fn key_length(&self, id: AlgorithmId) -> Result<usize, CipherError> {
        match self.algorithm_info(id, AlgorithmQuery::KeyLength)? {
            AlgorithmInfo::KeyLength(len) => Ok(len),
            _ => Err(ConfigurationError::UnknownAlgorithm(id).into()),
        }
    }

    /// Block length of `id` in bytes.
    pub fn block_length(&self, id: AlgorithmId) -> Result<usize, CipherError> {
        match self.algorithm_info(id, AlgorithmQuery::BlockLength)? {
            AlgorithmInfo::BlockLength(len) => Ok(len),
            _ => Err(ConfigurationError::UnknownAlgorithm(id).into()),
        }
    }

    /// Succeeds when `id` is registered and enabled.
    pub fn check_available(&self, id: AlgorithmId) -> Result<(), CipherError> {
        self.algorithm_info(id, AlgorithmQuery::Availability).map(|_| ())
    }

    /// Resolves a name, alias or OID to an id. OIDs are tried first.
    pub fn map_name(&self, name: &str) -> Option<AlgorithmId> {
        let table = self.lock();

        table
            .find_by_oid(name)
            .or_else(|| table.find_by_name(name))
            .map(|entry| entry.id())
    }

    /// Mode designated by `oid`, if any registered algorithm lists it.
    pub fn mode_from_oid(&self, oid: &str) -> Option<CipherMode> {
        self.lock().oid_mode(oid)
    }

    /// Canonical name of `id`.
    pub fn algorithm_name(&self, id: AlgorithmId) -> Option<String> {
        self.lock().get(id).map(|entry| entry.spec().name().to_owned())
    }
}
