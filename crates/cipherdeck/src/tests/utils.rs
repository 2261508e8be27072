// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Shared fixtures.

use std::sync::Arc;

use cipherdeck_core::{AlgorithmId, CipherMode, HandleFlags};

use crate::handle::CipherHandle;
use crate::registry::{EntryRef, Registry};
use crate::support::test_utils::{MockPrimitive, XorBlockPrimitive, XorStreamPrimitive};

pub(crate) const KEY: [u8; 16] = [0x0f; 16];
pub(crate) const IV: [u8; 16] = [
    0xa0, 0xa1, 0xa2, 0xa3, 0xa4, 0xa5, 0xa6, 0xa7, 0xa8, 0xa9, 0xaa, 0xab, 0xac, 0xad, 0xae,
    0xaf,
];

/// Registry without built-ins holding the XOR block and XOR stream stubs.
pub(crate) struct Fixture {
    pub registry: Registry,
    pub xor: EntryRef,
    pub stream: EntryRef,
}

impl Fixture {
    pub(crate) fn new() -> Self {
        let registry = Registry::without_builtins();
        let xor = registry
            .register(XorBlockPrimitive::spec("XOR"))
            .expect("Failed to register(..)");
        let stream = registry
            .register(XorStreamPrimitive::spec("XORSTREAM"))
            .expect("Failed to register(..)");

        Self {
            registry,
            xor,
            stream,
        }
    }

    pub(crate) fn xor_id(&self) -> AlgorithmId {
        self.xor.id()
    }

    pub(crate) fn stream_id(&self) -> AlgorithmId {
        self.stream.id()
    }

    pub(crate) fn register_mock(&self, mock: &Arc<MockPrimitive>) -> EntryRef {
        self.registry
            .register(MockPrimitive::spec("MOCK", mock))
            .expect("Failed to register(..)")
    }

    /// Opens, keys and sets [`IV`] on a handle for the stub that fits `mode`.
    pub(crate) fn keyed(&self, mode: CipherMode, flags: HandleFlags) -> CipherHandle {
        let id = match mode {
            CipherMode::Stream => self.stream_id(),
            _ => self.xor_id(),
        };

        let mut handle =
            CipherHandle::open(&self.registry, id, mode, flags).expect("Failed to open(..)");
        handle.set_key(&KEY).expect("Failed to set_key(..)");
        handle.set_iv(&IV);

        handle
    }
}

/// Plaintext `0, 1, 2, ...` of `len` bytes.
pub(crate) fn counting(len: usize) -> Vec<u8> {
    (0..len).map(|i| i as u8).collect()
}

/// Runs an ignored test as a subprocess and returns its exit status.
#[cfg(unix)]
pub(crate) fn run_test_as_subprocess(test_name: &str) -> std::process::ExitStatus {
    let exe = std::env::current_exe().expect("Failed to current_exe()");

    std::process::Command::new(exe)
        .args([
            "--exact",
            test_name,
            "--ignored",
            "--test-threads=1",
            "--nocapture",
        ])
        .status()
        .expect("Failed to run subprocess")
}

/// Asserts the subprocess was killed by `SIGABRT`.
#[cfg(unix)]
pub(crate) fn assert_aborted(status: std::process::ExitStatus) {
    use std::os::unix::process::ExitStatusExt;

    assert!(!status.success(), "Subprocess should not exit cleanly");
    assert_eq!(
        status.signal(),
        Some(libc::SIGABRT),
        "Subprocess should abort, got {status:?}"
    );
}
