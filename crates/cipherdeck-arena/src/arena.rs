// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! ContextArena - one aligned allocation split into handle slots.

use crate::error::ArenaError;
use crate::layout::ArenaLayout;
#[cfg(unix)]
use crate::locked::LockedRegion;
use crate::standard::StandardRegion;
use crate::wipe::{WIPE_PATTERN, wipe};

/// Where arena memory comes from.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum AllocStrategy {
    /// Global allocator.
    Standard,
    /// `mmap` + `mlock`, excluded from core dumps (Unix only).
    Locked,
}

enum Region {
    Standard(StandardRegion),
    #[cfg(unix)]
    Locked(LockedRegion),
}

impl Region {
    fn as_slice(&self) -> &[u8] {
        match self {
            Self::Standard(region) => region.as_slice(),
            #[cfg(unix)]
            Self::Locked(region) => region.as_slice(),
        }
    }

    fn as_mut_slice(&mut self) -> &mut [u8] {
        match self {
            Self::Standard(region) => region.as_mut_slice(),
            #[cfg(unix)]
            Self::Locked(region) => region.as_mut_slice(),
        }
    }
}

/// Mutable views of every slot, borrowed together.
pub struct ArenaSlots<'a> {
    /// Live context.
    pub live: &'a mut [u8],
    /// Reset template.
    pub template: &'a mut [u8],
    /// Chaining value.
    pub iv: &'a mut [u8],
    /// Previous chaining value.
    pub last_iv: &'a mut [u8],
    /// CTR counter.
    pub ctr: &'a mut [u8],
    /// Temporary block.
    pub scratch: &'a mut [u8],
}

/// Aligned storage for one cipher handle.
pub struct ContextArena {
    region: Region,
    layout: ArenaLayout,
}

fn take<'a>(bytes: &mut &'a mut [u8], stride: usize, len: usize) -> &'a mut [u8] {
    let (slot, rest) = core::mem::take(bytes).split_at_mut(stride);
    *bytes = rest;
    &mut slot[..len]
}

impl ContextArena {
    /// Allocates a zero-filled arena for `layout`.
    pub fn allocate(layout: ArenaLayout, strategy: AllocStrategy) -> Result<Self, ArenaError> {
        let region = match strategy {
            AllocStrategy::Standard => {
                Region::Standard(StandardRegion::new(layout.total(), layout.align())?)
            }
            #[cfg(unix)]
            AllocStrategy::Locked => Region::Locked(LockedRegion::new(layout.total(), layout.align())?),
            #[cfg(not(unix))]
            AllocStrategy::Locked => {
                log::warn!("locked memory is not available on this target, using the global allocator");
                Region::Standard(StandardRegion::new(layout.total(), layout.align())?)
            }
        };

        Ok(Self { region, layout })
    }

    /// Layout this arena was built from.
    pub fn layout(&self) -> &ArenaLayout {
        &self.layout
    }

    /// Strategy actually in effect.
    pub fn strategy(&self) -> AllocStrategy {
        match self.region {
            Region::Standard(_) => AllocStrategy::Standard,
            #[cfg(unix)]
            Region::Locked(_) => AllocStrategy::Locked,
        }
    }

    /// Total bytes owned, including slot padding and page slack.
    pub fn region_len(&self) -> usize {
        self.region.as_slice().len()
    }

    /// Raw view of the whole region.
    pub fn as_bytes(&self) -> &[u8] {
        self.region.as_slice()
    }

    /// Borrows every slot at once.
    pub fn slots(&mut self) -> ArenaSlots<'_> {
        let context_stride = self.layout.context_stride();
        let block_stride = self.layout.block_stride();
        let context_size = self.layout.context_size();
        let block_len = self.layout.block_len();

        let mut bytes = self.region.as_mut_slice();

        let live = take(&mut bytes, context_stride, context_size);
        let template = take(&mut bytes, context_stride, context_size);
        let iv = take(&mut bytes, block_stride, block_len);
        let last_iv = take(&mut bytes, block_stride, block_len);
        let ctr = take(&mut bytes, block_stride, block_len);
        let scratch = take(&mut bytes, block_stride, block_len);

        ArenaSlots {
            live,
            template,
            iv,
            last_iv,
            ctr,
            scratch,
        }
    }

    /// Copies the live context into the template slot.
    pub fn commit_template(&mut self) {
        let slots = self.slots();
        slots.template.copy_from_slice(slots.live);
    }

    /// Copies the template slot back into the live context.
    pub fn restore_template(&mut self) {
        let slots = self.slots();
        slots.live.copy_from_slice(slots.template);
    }

    /// Overwrites the whole region with [`WIPE_PATTERN`].
    pub fn wipe(&mut self) {
        wipe(self.region.as_mut_slice(), WIPE_PATTERN);
    }
}

impl core::fmt::Debug for ContextArena {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ContextArena")
            .field("layout", &self.layout)
            .field("strategy", &self.strategy())
            .finish_non_exhaustive()
    }
}
