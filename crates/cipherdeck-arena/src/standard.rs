// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! StandardRegion - global allocator with explicit alignment.

use alloc::alloc::{Layout, alloc_zeroed, dealloc};
use core::ptr::NonNull;

use crate::error::ArenaError;
use crate::wipe::{WIPE_PATTERN, wipe};

pub(crate) struct StandardRegion {
    ptr: NonNull<u8>,
    layout: Layout,
}

impl StandardRegion {
    pub(crate) fn new(size: usize, align: usize) -> Result<Self, ArenaError> {
        let layout = Layout::from_size_align(size, align).map_err(|_| ArenaError::SizeOverflow)?;

        // SAFETY: `size` is non-zero (ArenaLayout::total() >= align >= 1).
        let ptr = unsafe { alloc_zeroed(layout) };
        let ptr = NonNull::new(ptr).ok_or(ArenaError::Allocation { size })?;

        Ok(Self { ptr, layout })
    }

    pub(crate) fn as_slice(&self) -> &[u8] {
        // SAFETY: `ptr` owns `layout.size()` initialized bytes.
        unsafe { core::slice::from_raw_parts(self.ptr.as_ptr(), self.layout.size()) }
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [u8] {
        // SAFETY: `ptr` owns `layout.size()` initialized bytes, borrowed exclusively.
        unsafe { core::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.layout.size()) }
    }
}

impl Drop for StandardRegion {
    fn drop(&mut self) {
        wipe(self.as_mut_slice(), WIPE_PATTERN);

        // SAFETY: allocated in `new` with this exact layout.
        unsafe { dealloc(self.ptr.as_ptr(), self.layout) };
    }
}

// Safety: StandardRegion exclusively owns its allocation
unsafe impl Send for StandardRegion {}
unsafe impl Sync for StandardRegion {}
