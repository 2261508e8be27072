// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Aligned storage for cipher handle state.
//!
//! A [`ContextArena`] is one allocation holding every sensitive buffer a
//! cipher handle owns, each in its own slot aligned to the primitive's
//! declared alignment:
//!
//! | slot       | length         | use                                   |
//! |------------|----------------|---------------------------------------|
//! | `live`     | context size   | expanded key the modes operate on     |
//! | `template` | context size   | copy taken right after keying         |
//! | `iv`       | block length   | chaining value                        |
//! | `last_iv`  | block length   | previous chaining value               |
//! | `ctr`      | block length   | CTR counter                           |
//! | `scratch`  | block length   | keystream / temporary block           |
//!
//! # Allocation strategies
//!
//! - **Standard**: global allocator with the requested alignment.
//! - **Locked** (Unix only): anonymous `mmap`, `mlock`ed and excluded from
//!   core dumps. Other targets fall back to `Standard` with a warning.
//!
//! On drop the whole region, padding included, is overwritten with
//! [`WIPE_PATTERN`] before it is released.
//!
//! # Example
//!
//! ```rust
//! use cipherdeck_arena::{AllocStrategy, ArenaError, ArenaLayout, ContextArena};
//!
//! fn example() -> Result<(), ArenaError> {
//!     let layout = ArenaLayout::new(240, 16, 16)?;
//!     let mut arena = ContextArena::allocate(layout, AllocStrategy::Standard)?;
//!
//!     let slots = arena.slots();
//!     slots.live[0] = 0x2a;
//!     slots.iv.copy_from_slice(&[7u8; 16]);
//!
//!     arena.commit_template();
//!     assert_eq!(arena.slots().template[0], 0x2a);
//!
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

extern crate alloc;

#[cfg(test)]
mod tests;

#[cfg(unix)]
mod locked;

mod arena;
mod error;
mod layout;
mod standard;
mod wipe;

pub use arena::{AllocStrategy, ArenaSlots, ContextArena};
pub use error::ArenaError;
pub use layout::ArenaLayout;
pub use wipe::{WIPE_PATTERN, wipe};
