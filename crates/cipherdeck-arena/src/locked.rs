// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! LockedRegion - anonymous mapping pinned in RAM.

use core::ptr::NonNull;

use crate::error::ArenaError;
use crate::wipe::{WIPE_PATTERN, wipe};

pub(crate) struct LockedRegion {
    ptr: NonNull<u8>,
    len: usize,
}

pub(crate) fn page_size() -> usize {
    // SAFETY: sysconf has no preconditions.
    let size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };

    if size <= 0 { 4096 } else { size as usize }
}

impl LockedRegion {
    /// Maps at least `size` bytes, rounded up to whole pages.
    pub(crate) fn new(size: usize, align: usize) -> Result<Self, ArenaError> {
        let page = page_size();

        if align > page {
            return Err(ArenaError::InvalidAlignment(align));
        }

        let len = size
            .checked_add(page - 1)
            .map(|padded| padded / page * page)
            .ok_or(ArenaError::SizeOverflow)?;

        // SAFETY: anonymous private mapping, no file descriptor involved.
        let ptr = unsafe {
            libc::mmap(
                core::ptr::null_mut(),
                len,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_PRIVATE | libc::MAP_ANONYMOUS,
                -1,
                0,
            )
        };

        if ptr == libc::MAP_FAILED {
            return Err(ArenaError::Map);
        }

        let ptr = NonNull::new(ptr as *mut u8).ok_or(ArenaError::Map)?;

        // SAFETY: `ptr..ptr + len` is the mapping created above.
        if unsafe { libc::mlock(ptr.as_ptr() as *const libc::c_void, len) } != 0 {
            // SAFETY: unmapping the region we own.
            unsafe { libc::munmap(ptr.as_ptr() as *mut libc::c_void, len) };
            return Err(ArenaError::Lock);
        }

        #[cfg(target_os = "linux")]
        {
            // SAFETY: advisory call on our own mapping.
            let rc = unsafe {
                libc::madvise(ptr.as_ptr() as *mut libc::c_void, len, libc::MADV_DONTDUMP)
            };

            if rc != 0 {
                log::debug!("madvise(MADV_DONTDUMP) failed, continuing without it");
            }
        }

        Ok(Self { ptr, len })
    }

    pub(crate) fn as_slice(&self) -> &[u8] {
        // SAFETY: mapping is `len` bytes, readable, zero-filled by the kernel.
        unsafe { core::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [u8] {
        // SAFETY: mapping is `len` bytes, writable, borrowed exclusively.
        unsafe { core::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl Drop for LockedRegion {
    fn drop(&mut self) {
        wipe(self.as_mut_slice(), WIPE_PATTERN);

        let addr = self.ptr.as_ptr() as *mut libc::c_void;

        // SAFETY: mapping created in `new` and never unmapped before.
        unsafe {
            libc::munlock(addr, self.len);
            libc::munmap(addr, self.len);
        }
    }
}

// Safety: LockedRegion exclusively owns its mapping
unsafe impl Send for LockedRegion {}
unsafe impl Sync for LockedRegion {}
