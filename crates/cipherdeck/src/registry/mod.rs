// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Algorithm registry.
//!
//! Every lookup and mutation takes one mutex for a short, bounded critical
//! section. Primitive code is never called with the lock held.

mod entry;
mod table;

use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use cipherdeck_core::{AlgorithmId, PrimitiveSpec};

use crate::builtin;
use crate::error::CipherError;

pub use entry::EntryRef;
pub use table::FIRST_DYNAMIC_ID;

pub(crate) use entry::RegisteredEntry;
use table::{Table, lock};

/// Set of available cipher primitives.
///
/// Cloning a `Registry` yields another handle to the same table.
#[derive(Clone)]
pub struct Registry {
    table: Arc<Mutex<Table>>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Creates a registry whose built-in algorithms are registered on first use.
    pub fn new() -> Self {
        Self {
            table: Arc::new(Mutex::new(Table::new(false))),
        }
    }

    /// Creates a registry with no built-in algorithms.
    pub fn without_builtins() -> Self {
        Self {
            table: Arc::new(Mutex::new(Table::new(true))),
        }
    }

    /// Process-wide registry used by the top-level convenience functions.
    pub fn global() -> &'static Registry {
        static GLOBAL: OnceLock<Registry> = OnceLock::new();
        GLOBAL.get_or_init(Registry::new)
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, Table> {
        let table = lock(&self.table);

        if table.defaults_registered() {
            return table;
        }

        drop(table);

        // Built outside the lock; only the first caller to re-lock installs them.
        let defaults = builtin::default_specs();

        let mut table = lock(&self.table);
        if table.defaults_registered() {
            return table;
        }

        table.install_defaults(defaults);
        drop(table);

        log::debug!("built-in algorithms registered");

        lock(&self.table)
    }

    fn pin(&self, entry: &Arc<RegisteredEntry>) -> EntryRef {
        entry.acquire();
        EntryRef::adopt(Arc::clone(entry), Arc::clone(&self.table))
    }

    /// Adds an algorithm and returns its registration pin.
    ///
    /// The algorithm stays registered until this pin and every pin derived
    /// from it (lookups, open handles) are released.
    pub fn register(&self, spec: PrimitiveSpec) -> Result<EntryRef, CipherError> {
        let name = spec.name().to_owned();

        let mut table = self.lock();
        let entry = table.insert(spec)?;
        drop(table);

        log::debug!("registered algorithm {} ({name})", entry.id());

        Ok(EntryRef::adopt(entry, Arc::clone(&self.table)))
    }

    /// Releases one pin.
    pub fn unregister(&self, entry: EntryRef) {
        log::debug!("releasing pin on algorithm {}", entry.id());
        drop(entry);
    }

    /// Pins the algorithm with numeric id `id`.
    pub fn lookup_by_id(&self, id: AlgorithmId) -> Option<EntryRef> {
        let table = self.lock();
        table.get(id).map(|entry| self.pin(entry))
    }

    /// Pins the algorithm whose name or alias equals `name`, ignoring case.
    pub fn lookup_by_name(&self, name: &str) -> Option<EntryRef> {
        let table = self.lock();
        table.find_by_name(name).map(|entry| self.pin(entry))
    }

    /// Pins the algorithm owning `oid`. An `oid.` prefix is accepted.
    pub fn lookup_by_oid(&self, oid: &str) -> Option<EntryRef> {
        let table = self.lock();
        table.find_by_oid(oid).map(|entry| self.pin(entry))
    }

    /// Refuses new handles for `id`. Open handles keep working.
    ///
    /// Unknown ids are ignored.
    pub fn disable(&self, id: AlgorithmId) {
        let found = match self.lock().get(id) {
            Some(entry) => {
                entry.disable();
                true
            }
            None => false,
        };

        if found {
            log::debug!("algorithm {id} disabled");
        } else {
            log::debug!("disable: unknown algorithm {id}");
        }
    }

    /// Ids of every registered algorithm, ascending.
    pub fn list(&self) -> Vec<AlgorithmId> {
        self.lock().ids()
    }

    #[cfg(test)]
    pub(crate) fn __unsafe_is_locked(&self) -> bool {
        matches!(self.table.try_lock(), Err(std::sync::TryLockError::WouldBlock))
    }
}

impl core::fmt::Debug for Registry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Registry")
            .field("algorithms", &self.list())
            .finish()
    }
}
