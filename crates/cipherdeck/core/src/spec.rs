// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Algorithm descriptions handed to the registry.

use alloc::borrow::Cow;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::mode::CipherMode;
use crate::traits::CipherPrimitive;

/// Numeric algorithm identifier.
pub type AlgorithmId = u32;

/// Standards identifier paired with the mode it implies.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct OidSpec {
    /// Dotted-decimal OID, without any `oid.` prefix.
    pub oid: Cow<'static, str>,
    /// Mode the OID designates.
    pub mode: CipherMode,
}

impl OidSpec {
    /// Creates an OID entry.
    pub fn new(oid: impl Into<Cow<'static, str>>, mode: CipherMode) -> Self {
        Self {
            oid: oid.into(),
            mode,
        }
    }
}

/// Describes one algorithm and carries its implementation.
///
/// `key_bits` and `block_len` are declared metadata; the registry reports
/// them through its introspection queries and rejects nonsensical values
/// there. `context_size` bytes are reserved twice per handle (live context
/// and reset template), each slot aligned to `context_align`.
#[derive(Clone)]
pub struct PrimitiveSpec {
    name: Cow<'static, str>,
    aliases: Vec<Cow<'static, str>>,
    oids: Vec<OidSpec>,
    key_bits: usize,
    block_len: usize,
    context_size: usize,
    context_align: usize,
    primitive: Arc<dyn CipherPrimitive>,
}

impl PrimitiveSpec {
    /// Creates a spec with no aliases or OIDs and 8-byte context alignment.
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        key_bits: usize,
        block_len: usize,
        context_size: usize,
        primitive: Arc<dyn CipherPrimitive>,
    ) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            oids: Vec::new(),
            key_bits,
            block_len,
            context_size,
            context_align: 8,
            primitive,
        }
    }

    /// Adds alternative names.
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'static, str>>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    /// Adds OID-to-mode mappings.
    pub fn with_oids<I>(mut self, oids: I) -> Self
    where
        I: IntoIterator<Item = OidSpec>,
    {
        self.oids.extend(oids);
        self
    }

    /// Overrides the context alignment. Must be a power of two.
    pub fn with_context_align(mut self, align: usize) -> Self {
        self.context_align = align;
        self
    }

    /// Canonical name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Alternative names.
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.aliases.iter().map(|alias| alias.as_ref())
    }

    /// OID table.
    pub fn oids(&self) -> &[OidSpec] {
        &self.oids
    }

    /// Declared key length in bits.
    pub fn key_bits(&self) -> usize {
        self.key_bits
    }

    /// Block length in bytes.
    pub fn block_len(&self) -> usize {
        self.block_len
    }

    /// Size in bytes of one expanded-key context.
    pub fn context_size(&self) -> usize {
        self.context_size
    }

    /// Required alignment of each context slot.
    pub fn context_align(&self) -> usize {
        self.context_align
    }

    /// The implementation.
    pub fn primitive(&self) -> &Arc<dyn CipherPrimitive> {
        &self.primitive
    }

    /// Case-insensitive match against the name and every alias.
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            || self.aliases().any(|alias| alias.eq_ignore_ascii_case(name))
    }

    /// Looks up `oid` (prefix already stripped) in the OID table.
    pub fn find_oid(&self, oid: &str) -> Option<&OidSpec> {
        self.oids
            .iter()
            .find(|entry| entry.oid.eq_ignore_ascii_case(oid))
    }
}

impl core::fmt::Debug for PrimitiveSpec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PrimitiveSpec")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("oids", &self.oids)
            .field("key_bits", &self.key_bits)
            .field("block_len", &self.block_len)
            .field("context_size", &self.context_size)
            .field("context_align", &self.context_align)
            .finish_non_exhaustive()
    }
}
