// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::error::FatalError;

/// Logs `error` and aborts the process.
#[cold]
#[inline(never)]
pub(crate) fn fatal(error: FatalError) -> ! {
    log::error!("fatal: {error}");
    std::process::abort()
}
