// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Control operations on an open handle.

use super::CipherHandle;
use crate::error::{ArgumentError, CipherError, ConfigurationError};
use crate::modes::cfb;

impl CipherHandle {
    /// Replaces the CTR counter.
    ///
    /// `None` or an empty slice zero-fills it; otherwise `ctr` must be
    /// exactly one block long.
    pub fn set_ctr(&mut self, ctr: Option<&[u8]>) -> Result<(), CipherError> {
        self.ensure_live();

        let bl = self.block_len;
        let slots = self.arena_mut().slots();

        match ctr {
            Some(value) if value.len() == bl => slots.ctr.copy_from_slice(value),
            None => slots.ctr.fill(0),
            Some([]) => slots.ctr.fill(0),
            Some(value) => {
                return Err(ArgumentError::InvalidCounterLength {
                    expected: bl,
                    actual: value.len(),
                }
                .into());
            }
        }

        Ok(())
    }

    /// Realigns CFB state to the last full ciphertext block.
    ///
    /// Only acts when the handle was opened with sync enabled and the
    /// previous call left unused keystream bytes.
    pub fn sync_cfb(&mut self) {
        self.ensure_live();

        if !self.flags.is_sync_enabled() || self.unused == 0 {
            return;
        }

        let Some(arena) = self.arena.as_mut() else {
            return;
        };
        let slots = arena.slots();

        cfb::sync(slots.iv, slots.last_iv, &mut self.unused);
    }

    /// Enables or disables ciphertext stealing.
    pub fn set_cbc_cts(&mut self, enable: bool) -> Result<(), CipherError> {
        self.ensure_live();

        if enable && self.flags.is_cbc_mac() {
            return Err(ConfigurationError::ConflictingFlags.into());
        }

        self.flags.set_cbc_cts(enable);
        Ok(())
    }

    /// Enables or disables CBC-MAC output.
    pub fn set_cbc_mac(&mut self, enable: bool) -> Result<(), CipherError> {
        self.ensure_live();

        if enable && self.flags.is_cbc_cts() {
            return Err(ConfigurationError::ConflictingFlags.into());
        }

        self.flags.set_cbc_mac(enable);
        Ok(())
    }
}
