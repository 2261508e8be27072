// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use serial_test::serial;

use crate::arena::{AllocStrategy, ContextArena};
use crate::layout::ArenaLayout;
use crate::wipe::WIPE_PATTERN;

fn layout() -> ArenaLayout {
    ArenaLayout::new(244, 16, 16).expect("Failed to new()")
}

// =============================================================================
// allocate()
// =============================================================================

#[test]
fn test_allocate_standard_is_zeroed() {
    let arena = ContextArena::allocate(layout(), AllocStrategy::Standard)
        .expect("Failed to allocate()");

    assert_eq!(arena.strategy(), AllocStrategy::Standard);
    assert_eq!(arena.region_len(), layout().total());
    assert!(arena.as_bytes().iter().all(|&b| b == 0));
}

#[test]
fn test_allocate_standard_is_aligned() {
    let layout = ArenaLayout::new(24, 16, 64).expect("Failed to new()");
    let arena = ContextArena::allocate(layout, AllocStrategy::Standard)
        .expect("Failed to allocate()");

    assert_eq!(arena.as_bytes().as_ptr() as usize % 64, 0);
}

#[cfg(unix)]
#[test]
#[serial(locked)]
fn test_allocate_locked_spans_whole_pages() {
    let arena =
        ContextArena::allocate(layout(), AllocStrategy::Locked).expect("Failed to allocate()");
    let page = crate::locked::page_size();

    assert_eq!(arena.strategy(), AllocStrategy::Locked);
    assert_eq!(arena.region_len() % page, 0);
    assert!(arena.region_len() >= layout().total());
    assert!(arena.as_bytes().iter().all(|&b| b == 0));
}

#[cfg(unix)]
#[test]
#[serial(locked)]
fn test_allocate_locked_rejects_alignment_above_page() {
    let page = crate::locked::page_size();
    let layout = ArenaLayout::new(16, 16, page * 2).expect("Failed to new()");

    let result = ContextArena::allocate(layout, AllocStrategy::Locked);

    assert!(matches!(result, Err(crate::ArenaError::InvalidAlignment(_))));
}

// =============================================================================
// slots()
// =============================================================================

#[test]
fn test_slots_have_declared_lengths() {
    let mut arena = ContextArena::allocate(layout(), AllocStrategy::Standard)
        .expect("Failed to allocate()");
    let slots = arena.slots();

    assert_eq!(slots.live.len(), 244);
    assert_eq!(slots.template.len(), 244);
    assert_eq!(slots.iv.len(), 16);
    assert_eq!(slots.last_iv.len(), 16);
    assert_eq!(slots.ctr.len(), 16);
    assert_eq!(slots.scratch.len(), 16);
}

#[test]
fn test_slots_are_aligned_and_disjoint() {
    let mut arena = ContextArena::allocate(layout(), AllocStrategy::Standard)
        .expect("Failed to allocate()");
    let slots = arena.slots();

    let addrs = [
        slots.live.as_ptr() as usize,
        slots.template.as_ptr() as usize,
        slots.iv.as_ptr() as usize,
        slots.last_iv.as_ptr() as usize,
        slots.ctr.as_ptr() as usize,
        slots.scratch.as_ptr() as usize,
    ];

    for addr in addrs {
        assert_eq!(addr % 16, 0);
    }

    assert_eq!(addrs[1] - addrs[0], 256);
    assert_eq!(addrs[2] - addrs[1], 256);
    assert_eq!(addrs[3] - addrs[2], 16);
    assert_eq!(addrs[4] - addrs[3], 16);
    assert_eq!(addrs[5] - addrs[4], 16);
}

#[test]
fn test_slots_writes_are_isolated() {
    let mut arena = ContextArena::allocate(layout(), AllocStrategy::Standard)
        .expect("Failed to allocate()");

    {
        let slots = arena.slots();
        slots.iv.fill(0x11);
        slots.ctr.fill(0x22);
    }

    let slots = arena.slots();

    assert!(slots.live.iter().all(|&b| b == 0));
    assert!(slots.last_iv.iter().all(|&b| b == 0));
    assert!(slots.iv.iter().all(|&b| b == 0x11));
    assert!(slots.ctr.iter().all(|&b| b == 0x22));
}

// =============================================================================
// commit_template() / restore_template()
// =============================================================================

#[test]
fn test_commit_then_restore_template() {
    let mut arena = ContextArena::allocate(layout(), AllocStrategy::Standard)
        .expect("Failed to allocate()");

    arena.slots().live.fill(0x5c);
    arena.commit_template();

    arena.slots().live.fill(0x00);
    assert!(arena.slots().template.iter().all(|&b| b == 0x5c));

    arena.restore_template();
    assert!(arena.slots().live.iter().all(|&b| b == 0x5c));
}

// =============================================================================
// wipe()
// =============================================================================

#[test]
fn test_wipe_covers_padding() {
    let mut arena = ContextArena::allocate(layout(), AllocStrategy::Standard)
        .expect("Failed to allocate()");

    arena.slots().live.fill(0x01);
    arena.wipe();

    assert_eq!(arena.as_bytes().len(), layout().total());
    assert!(arena.as_bytes().iter().all(|&b| b == WIPE_PATTERN));
}

#[cfg(unix)]
#[test]
#[serial(locked)]
fn test_wipe_covers_page_slack() {
    let mut arena =
        ContextArena::allocate(layout(), AllocStrategy::Locked).expect("Failed to allocate()");

    arena.wipe();

    assert!(arena.as_bytes().iter().all(|&b| b == WIPE_PATTERN));
}
