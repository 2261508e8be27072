// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Stand-in primitives for tests and benchmarks.

mod mock_primitive;
mod xor_block;
mod xor_stream;

pub use mock_primitive::{MockPrimitive, MockPrimitiveBehaviour};
pub use xor_block::{XOR_BLOCK_LEN, XorBlockPrimitive};
pub use xor_stream::XorStreamPrimitive;
