// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use cipherdeck_core::{AlgorithmId, PrimitiveSpec};

use super::entry::RegisteredEntry;
use crate::error::{CipherError, OperationalError};

/// First id handed out to dynamically registered algorithms.
pub const FIRST_DYNAMIC_ID: AlgorithmId = 1024;

pub(crate) struct Table {
    entries: BTreeMap<AlgorithmId, Arc<RegisteredEntry>>,
    next_id: AlgorithmId,
    defaults_registered: bool,
}

/// Takes the registry lock. No code path panics while holding it, so a
/// poisoned lock still guards a consistent table.
pub(crate) fn lock(table: &Mutex<Table>) -> MutexGuard<'_, Table> {
    table.lock().unwrap_or_else(PoisonError::into_inner)
}

fn strip_oid_prefix(oid: &str) -> &str {
    oid.strip_prefix("oid.")
        .or_else(|| oid.strip_prefix("OID."))
        .unwrap_or(oid)
}

impl Table {
    pub(crate) fn new(defaults_registered: bool) -> Self {
        Self {
            entries: BTreeMap::new(),
            next_id: FIRST_DYNAMIC_ID,
            defaults_registered,
        }
    }

    pub(crate) fn defaults_registered(&self) -> bool {
        self.defaults_registered
    }

    pub(crate) fn install_defaults(&mut self, defaults: Vec<(AlgorithmId, PrimitiveSpec)>) {
        for (id, spec) in defaults {
            self.entries
                .entry(id)
                .or_insert_with(|| Arc::new(RegisteredEntry::new(id, spec)));
        }

        self.defaults_registered = true;
    }

    pub(crate) fn insert(&mut self, spec: PrimitiveSpec) -> Result<Arc<RegisteredEntry>, CipherError> {
        let mut id = self.next_id;

        while self.entries.contains_key(&id) {
            id = id.checked_add(1).ok_or(OperationalError::IdSpaceExhausted)?;
        }

        self.next_id = id.checked_add(1).ok_or(OperationalError::IdSpaceExhausted)?;

        let entry = Arc::new(RegisteredEntry::new(id, spec));
        self.entries.insert(id, Arc::clone(&entry));

        Ok(entry)
    }

    /// Removes `entry` unless its id has been taken over by another entry.
    pub(crate) fn remove_if_same(&mut self, entry: &Arc<RegisteredEntry>) -> bool {
        match self.entries.get(&entry.id()) {
            Some(current) if Arc::ptr_eq(current, entry) => {
                self.entries.remove(&entry.id());
                true
            }
            _ => false,
        }
    }

    pub(crate) fn get(&self, id: AlgorithmId) -> Option<&Arc<RegisteredEntry>> {
        self.entries.get(&id)
    }

    pub(crate) fn find_by_name(&self, name: &str) -> Option<&Arc<RegisteredEntry>> {
        self.entries
            .values()
            .find(|entry| entry.spec().matches_name(name))
    }

    pub(crate) fn find_by_oid(&self, oid: &str) -> Option<&Arc<RegisteredEntry>> {
        let oid = strip_oid_prefix(oid);

        self.entries
            .values()
            .find(|entry| entry.spec().find_oid(oid).is_some())
    }

    pub(crate) fn oid_mode(&self, oid: &str) -> Option<cipherdeck_core::CipherMode> {
        let oid = strip_oid_prefix(oid);

        self.entries
            .values()
            .find_map(|entry| entry.spec().find_oid(oid).map(|found| found.mode))
    }

    pub(crate) fn ids(&self) -> Vec<AlgorithmId> {
        self.entries.keys().copied().collect()
    }
}
