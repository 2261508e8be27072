// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

/// Chaining mode selected when a handle is opened.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum CipherMode {
    /// Plain copy. Provides no confidentiality.
    None,
    /// Electronic codebook.
    Ecb,
    /// Cipher block chaining, optionally with ciphertext stealing or MAC output.
    Cbc,
    /// Full-block cipher feedback.
    Cfb,
    /// Output feedback.
    Ofb,
    /// Big-endian counter mode.
    Ctr,
    /// Native stream cipher.
    Stream,
}

/// Primitive capability a mode depends on.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Capability {
    /// Single-block encrypt and decrypt.
    Block,
    /// Stream encrypt and decrypt.
    Stream,
}

impl CipherMode {
    /// Capability the primitive must provide for this mode, if any.
    pub fn required_capability(self) -> Option<Capability> {
        match self {
            Self::None => None,
            Self::Ecb | Self::Cbc | Self::Cfb | Self::Ofb | Self::Ctr => Some(Capability::Block),
            Self::Stream => Some(Capability::Stream),
        }
    }

    /// Returns true for modes that chain through the primitive's block transform.
    pub fn is_block_mode(self) -> bool {
        self.required_capability() == Some(Capability::Block)
    }
}

/// Options accepted when opening a handle.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct HandleFlags {
    secure: bool,
    enable_sync: bool,
    cbc_cts: bool,
    cbc_mac: bool,
}

impl HandleFlags {
    /// No options set.
    pub const fn new() -> Self {
        Self {
            secure: false,
            enable_sync: false,
            cbc_cts: false,
            cbc_mac: false,
        }
    }

    /// Draw handle storage from locked memory.
    pub const fn secure(mut self) -> Self {
        self.secure = true;
        self
    }

    /// Allow CFB resynchronization.
    pub const fn enable_sync(mut self) -> Self {
        self.enable_sync = true;
        self
    }

    /// CBC with ciphertext stealing.
    pub const fn cbc_cts(mut self) -> Self {
        self.cbc_cts = true;
        self
    }

    /// CBC producing only the final chained block.
    pub const fn cbc_mac(mut self) -> Self {
        self.cbc_mac = true;
        self
    }

    /// Whether locked memory was requested.
    pub const fn is_secure(&self) -> bool {
        self.secure
    }

    /// Whether CFB resynchronization is allowed.
    pub const fn is_sync_enabled(&self) -> bool {
        self.enable_sync
    }

    /// Whether ciphertext stealing is active.
    pub const fn is_cbc_cts(&self) -> bool {
        self.cbc_cts
    }

    /// Whether CBC-MAC output is active.
    pub const fn is_cbc_mac(&self) -> bool {
        self.cbc_mac
    }

    /// Sets or clears ciphertext stealing.
    pub fn set_cbc_cts(&mut self, enable: bool) {
        self.cbc_cts = enable;
    }

    /// Sets or clears CBC-MAC output.
    pub fn set_cbc_mac(&mut self, enable: bool) {
        self.cbc_mac = enable;
    }

    /// Ciphertext stealing and MAC output cannot be combined.
    pub const fn is_consistent(&self) -> bool {
        !(self.cbc_cts && self.cbc_mac)
    }
}
