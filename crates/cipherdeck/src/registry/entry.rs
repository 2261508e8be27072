// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use cipherdeck_core::{AlgorithmId, PrimitiveSpec};

use super::table::{Table, lock};

/// A registered algorithm.
///
/// `refs` is only modified with the registry lock held; the atomic lets
/// readers observe it without taking the lock.
pub(crate) struct RegisteredEntry {
    id: AlgorithmId,
    spec: PrimitiveSpec,
    disabled: AtomicBool,
    refs: AtomicUsize,
}

impl RegisteredEntry {
    pub(crate) fn new(id: AlgorithmId, spec: PrimitiveSpec) -> Self {
        Self {
            id,
            spec,
            disabled: AtomicBool::new(false),
            refs: AtomicUsize::new(1),
        }
    }

    pub(crate) fn id(&self) -> AlgorithmId {
        self.id
    }

    pub(crate) fn spec(&self) -> &PrimitiveSpec {
        &self.spec
    }

    pub(crate) fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::Acquire)
    }

    pub(crate) fn disable(&self) {
        self.disabled.store(true, Ordering::Release);
    }

    pub(crate) fn refs(&self) -> usize {
        self.refs.load(Ordering::Acquire)
    }

    pub(crate) fn acquire(&self) {
        self.refs.fetch_add(1, Ordering::AcqRel);
    }

    /// Returns true when this was the last reference.
    pub(crate) fn release(&self) -> bool {
        self.refs.fetch_sub(1, Ordering::AcqRel) == 1
    }
}

/// Pinning reference to a registry entry.
///
/// While any `EntryRef` for an algorithm exists the entry stays resolvable.
/// Dropping the reference releases the pin; the entry leaves the registry
/// once the last pin is gone. Built-in algorithms keep a pin owned by the
/// registry itself and never leave.
#[must_use = "dropping an EntryRef releases its pin"]
pub struct EntryRef {
    entry: Arc<RegisteredEntry>,
    table: Arc<Mutex<Table>>,
}

impl EntryRef {
    /// Wraps an entry whose reference count was already incremented.
    pub(crate) fn adopt(entry: Arc<RegisteredEntry>, table: Arc<Mutex<Table>>) -> Self {
        Self { entry, table }
    }

    /// Registry-assigned id.
    pub fn id(&self) -> AlgorithmId {
        self.entry.id()
    }

    /// Canonical name.
    pub fn name(&self) -> &str {
        self.entry.spec().name()
    }

    /// Full description, including the implementation.
    pub fn spec(&self) -> &PrimitiveSpec {
        self.entry.spec()
    }

    /// Whether new handles are refused.
    pub fn is_disabled(&self) -> bool {
        self.entry.is_disabled()
    }

    /// Number of outstanding pins, this one included.
    pub fn ref_count(&self) -> usize {
        self.entry.refs()
    }
}

impl Clone for EntryRef {
    fn clone(&self) -> Self {
        let _table = lock(&self.table);
        self.entry.acquire();

        Self {
            entry: Arc::clone(&self.entry),
            table: Arc::clone(&self.table),
        }
    }
}

impl Drop for EntryRef {
    fn drop(&mut self) {
        let removed = {
            let mut table = lock(&self.table);
            self.entry.release() && table.remove_if_same(&self.entry)
        };

        if removed {
            log::debug!(
                "algorithm {} ({}) removed from registry",
                self.entry.id(),
                self.entry.spec().name()
            );
        }
    }
}

impl core::fmt::Debug for EntryRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EntryRef")
            .field("id", &self.id())
            .field("name", &self.name())
            .field("disabled", &self.is_disabled())
            .finish_non_exhaustive()
    }
}
