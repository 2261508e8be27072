// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! CipherHandle - one keyed session over a registered algorithm.

mod control;

use std::sync::Arc;

use cipherdeck_arena::{AllocStrategy, ArenaLayout, ContextArena};
use cipherdeck_core::{AlgorithmId, Capability, CipherMode, CipherPrimitive, HandleFlags};
use zeroize::Zeroize;

use crate::error::{ArgumentError, CipherError, ConfigurationError, FatalError};
use crate::fatal::fatal;
use crate::modes::{BlockCx, cbc, cfb, ctr, ecb, ofb};
use crate::registry::{EntryRef, Registry};

/// Byte written over the whole output buffer of a failed encryption.
pub const FAILED_OUTPUT_PATTERN: u8 = 0x42;

const TAG_STANDARD: u32 = 0x6364_0001;
const TAG_SECURE: u32 = 0x6364_0002;
const TAG_CLOSED: u32 = 0;

#[derive(Clone, Copy)]
enum Direction {
    Encrypt,
    Decrypt,
}

/// Session state bound to one registered algorithm.
///
/// A handle is not internally synchronized. It may be moved between
/// threads but must not be driven from two threads at once.
///
/// Any operation on a closed handle aborts the process.
pub struct CipherHandle {
    tag: u32,
    entry: Option<EntryRef>,
    arena: Option<ContextArena>,
    primitive: Arc<dyn CipherPrimitive>,
    id: AlgorithmId,
    mode: CipherMode,
    flags: HandleFlags,
    block_len: usize,
    unused: usize,
    keyed: bool,
}

impl CipherHandle {
    /// Opens a handle for algorithm `id` in `mode`.
    ///
    /// Fails with [`ConfigurationError`] when the algorithm is unknown or
    /// disabled, the flags conflict, or the primitive lacks the capability
    /// `mode` needs. Allocation failures surface as
    /// [`crate::OperationalError`].
    pub fn open(
        registry: &Registry,
        id: AlgorithmId,
        mode: CipherMode,
        flags: HandleFlags,
    ) -> Result<Self, CipherError> {
        let entry = registry
            .lookup_by_id(id)
            .ok_or(ConfigurationError::UnknownAlgorithm(id))?;

        if entry.is_disabled() {
            return Err(ConfigurationError::AlgorithmDisabled(id).into());
        }

        if !flags.is_consistent() {
            return Err(ConfigurationError::ConflictingFlags.into());
        }

        let spec = entry.spec();
        let primitive = Arc::clone(spec.primitive());

        let supported = match mode.required_capability() {
            None => true,
            Some(Capability::Block) => primitive.block().is_some(),
            Some(Capability::Stream) => primitive.stream().is_some(),
        };

        if !supported {
            return Err(ConfigurationError::UnsupportedMode { id, mode }.into());
        }

        let block_len = spec.block_len();
        if mode.is_block_mode() && block_len == 0 {
            return Err(ConfigurationError::InvalidLength {
                id,
                what: "block length",
                value: 0,
            }
            .into());
        }

        if mode == CipherMode::None {
            log::warn!("algorithm {id} opened in None mode, data is not encrypted");
        }

        let layout = ArenaLayout::new(spec.context_size(), block_len, spec.context_align())?;
        let strategy = if flags.is_secure() {
            AllocStrategy::Locked
        } else {
            AllocStrategy::Standard
        };
        let arena = ContextArena::allocate(layout, strategy)?;

        log::debug!("opened {} ({id}) in {mode:?} mode", spec.name());

        Ok(Self {
            tag: if flags.is_secure() { TAG_SECURE } else { TAG_STANDARD },
            entry: Some(entry),
            arena: Some(arena),
            primitive,
            id,
            mode,
            flags,
            block_len,
            unused: 0,
            keyed: false,
        })
    }

    fn is_live(&self) -> bool {
        self.tag == TAG_STANDARD || self.tag == TAG_SECURE
    }

    fn ensure_live(&self) {
        if !self.is_live() {
            fatal(FatalError::HandleClosed);
        }
    }

    fn ensure_keyed(&self) -> Result<(), CipherError> {
        if self.keyed {
            Ok(())
        } else {
            Err(ConfigurationError::NotKeyed.into())
        }
    }

    fn arena_mut(&mut self) -> &mut ContextArena {
        match self.arena.as_mut() {
            Some(arena) => arena,
            None => fatal(FatalError::HandleClosed),
        }
    }

    fn cts_active(&self) -> bool {
        self.mode == CipherMode::Cbc && self.flags.is_cbc_cts()
    }

    fn mac_active(&self) -> bool {
        self.mode == CipherMode::Cbc && self.flags.is_cbc_mac()
    }

    fn block_cx(&mut self) -> Result<BlockCx<'_>, CipherError> {
        let block = self
            .primitive
            .block()
            .ok_or(ConfigurationError::UnsupportedMode {
                id: self.id,
                mode: self.mode,
            })?;

        let Some(arena) = self.arena.as_mut() else {
            fatal(FatalError::HandleClosed);
        };
        let slots = arena.slots();

        Ok(BlockCx {
            block,
            bulk: self.primitive.bulk(),
            ctx: slots.live,
            iv: slots.iv,
            last_iv: slots.last_iv,
            ctr: slots.ctr,
            scratch: slots.scratch,
            unused: &mut self.unused,
        })
    }

    fn check_request(&self, input_len: usize, output_len: usize, direction: Direction) -> Result<(), CipherError> {
        let bl = self.block_len;

        let required = match direction {
            Direction::Encrypt if self.mac_active() => bl,
            _ => input_len,
        };

        if output_len < required {
            return Err(ArgumentError::OutputTooShort {
                required,
                actual: output_len,
            }
            .into());
        }

        let must_align = match self.mode {
            CipherMode::Ecb => true,
            CipherMode::Cbc => !(self.cts_active() && input_len > bl),
            _ => false,
        };

        if must_align && input_len % bl != 0 {
            return Err(ArgumentError::Misaligned {
                len: input_len,
                block_len: bl,
            }
            .into());
        }

        Ok(())
    }

    fn transform(&mut self, buf: &mut [u8], direction: Direction) -> Result<(), CipherError> {
        let cts = self.cts_active();

        match self.mode {
            CipherMode::None => {}
            CipherMode::Stream => {
                let stream = self
                    .primitive
                    .stream()
                    .ok_or(ConfigurationError::UnsupportedMode {
                        id: self.id,
                        mode: self.mode,
                    })?;
                let Some(arena) = self.arena.as_mut() else {
                    fatal(FatalError::HandleClosed);
                };
                let ctx = arena.slots().live;

                match direction {
                    Direction::Encrypt => stream.encrypt_stream(ctx, buf),
                    Direction::Decrypt => stream.decrypt_stream(ctx, buf),
                }
            }
            mode => {
                let mut cx = self.block_cx()?;

                match (mode, direction) {
                    (CipherMode::Ecb, Direction::Encrypt) => ecb::encrypt(&mut cx, buf),
                    (CipherMode::Ecb, Direction::Decrypt) => ecb::decrypt(&mut cx, buf),
                    (CipherMode::Cbc, Direction::Encrypt) => cbc::encrypt(&mut cx, buf, cts),
                    (CipherMode::Cbc, Direction::Decrypt) => cbc::decrypt(&mut cx, buf, cts),
                    (CipherMode::Cfb, Direction::Encrypt) => cfb::encrypt(&mut cx, buf),
                    (CipherMode::Cfb, Direction::Decrypt) => cfb::decrypt(&mut cx, buf),
                    (CipherMode::Ofb, _) => ofb::apply(&mut cx, buf),
                    (CipherMode::Ctr, _) => ctr::apply(&mut cx, buf),
                    (CipherMode::None | CipherMode::Stream, _) => {}
                }
            }
        }

        Ok(())
    }

    /// Runs CBC-MAC over `input` and writes the tag to `out[..block_len]`.
    fn write_mac(&mut self, input: &[u8], out: &mut [u8]) -> Result<(), CipherError> {
        let bl = self.block_len;
        let mut cx = self.block_cx()?;

        if cbc::mac(&mut cx, input) {
            out[..bl].copy_from_slice(cx.iv);
        }

        Ok(())
    }

    // =========================================================================
    // Keying
    // =========================================================================

    /// Installs `key` and snapshots the keyed context as the reset template.
    ///
    /// On failure the handle is left unkeyed.
    pub fn set_key(&mut self, key: &[u8]) -> Result<(), CipherError> {
        self.ensure_live();

        let Some(arena) = self.arena.as_mut() else {
            fatal(FatalError::HandleClosed);
        };

        match self.primitive.set_key(arena.slots().live, key) {
            Ok(()) => {
                arena.commit_template();
                self.keyed = true;
                Ok(())
            }
            Err(error) => {
                self.keyed = false;
                log::debug!("algorithm {} rejected key: {error}", self.id);
                Err(error.into())
            }
        }
    }

    /// Sets the IV, zero-padding or truncating it to the block length.
    pub fn set_iv(&mut self, iv: &[u8]) {
        self.ensure_live();

        let bl = self.block_len;
        if iv.len() != bl {
            log::warn!("IV length {} does not match block length {bl}", iv.len());
        }

        let slots = self.arena_mut().slots();
        slots.iv.fill(0);
        let take = iv.len().min(bl);
        slots.iv[..take].copy_from_slice(&iv[..take]);

        self.unused = 0;
    }

    /// Restores the post-keying context and clears IV, last IV and counter.
    pub fn reset(&mut self) -> Result<(), CipherError> {
        self.ensure_live();
        self.ensure_keyed()?;

        let arena = self.arena_mut();
        arena.restore_template();

        let slots = arena.slots();
        slots.iv.zeroize();
        slots.last_iv.zeroize();
        slots.ctr.zeroize();
        slots.scratch.zeroize();

        self.unused = 0;

        Ok(())
    }

    // =========================================================================
    // Encryption
    // =========================================================================

    /// Encrypts `input` into `out`.
    ///
    /// `out` must hold at least `input.len()` bytes, or one block in
    /// CBC-MAC mode. On any error the whole of `out` is overwritten with
    /// [`FAILED_OUTPUT_PATTERN`].
    pub fn encrypt(&mut self, out: &mut [u8], input: &[u8]) -> Result<(), CipherError> {
        self.ensure_live();

        let result = self.try_encrypt(out, input);
        if result.is_err() {
            out.fill(FAILED_OUTPUT_PATTERN);
        }

        result
    }

    fn try_encrypt(&mut self, out: &mut [u8], input: &[u8]) -> Result<(), CipherError> {
        self.ensure_keyed()?;
        self.check_request(input.len(), out.len(), Direction::Encrypt)?;

        if self.mac_active() {
            return self.write_mac(input, out);
        }

        let out = &mut out[..input.len()];
        out.copy_from_slice(input);

        self.transform(out, Direction::Encrypt)
    }

    /// Encrypts `buf` in place. Errors wipe `buf` like [`Self::encrypt`].
    pub fn encrypt_in_place(&mut self, buf: &mut [u8]) -> Result<(), CipherError> {
        self.ensure_live();

        let result = self.try_encrypt_in_place(buf);
        if result.is_err() {
            buf.fill(FAILED_OUTPUT_PATTERN);
        }

        result
    }

    fn try_encrypt_in_place(&mut self, buf: &mut [u8]) -> Result<(), CipherError> {
        self.ensure_keyed()?;
        self.check_request(buf.len(), buf.len(), Direction::Encrypt)?;

        if self.mac_active() {
            let bl = self.block_len;
            let mut cx = self.block_cx()?;

            if cbc::mac(&mut cx, buf) {
                buf[..bl].copy_from_slice(cx.iv);
            }

            return Ok(());
        }

        self.transform(buf, Direction::Encrypt)
    }

    /// Decrypts `input` into `out`. `out` is left as-is on error.
    pub fn decrypt(&mut self, out: &mut [u8], input: &[u8]) -> Result<(), CipherError> {
        self.ensure_live();
        self.ensure_keyed()?;
        self.check_request(input.len(), out.len(), Direction::Decrypt)?;

        let out = &mut out[..input.len()];
        out.copy_from_slice(input);

        self.transform(out, Direction::Decrypt)
    }

    /// Decrypts `buf` in place.
    pub fn decrypt_in_place(&mut self, buf: &mut [u8]) -> Result<(), CipherError> {
        self.ensure_live();
        self.ensure_keyed()?;
        self.check_request(buf.len(), buf.len(), Direction::Decrypt)?;

        self.transform(buf, Direction::Decrypt)
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Releases the registry pin, wipes and frees the handle memory.
    ///
    /// Closing an already closed handle aborts the process.
    pub fn close(&mut self) {
        self.ensure_live();

        drop(self.entry.take());

        if let Some(mut arena) = self.arena.take() {
            arena.wipe();
        }

        self.tag = TAG_CLOSED;
        self.keyed = false;
        self.unused = 0;

        log::debug!("closed handle for algorithm {}", self.id);
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Algorithm id the handle is bound to.
    pub fn algorithm(&self) -> AlgorithmId {
        self.ensure_live();
        self.id
    }

    /// Selected mode.
    pub fn mode(&self) -> CipherMode {
        self.ensure_live();
        self.mode
    }

    /// Current flags.
    pub fn flags(&self) -> HandleFlags {
        self.ensure_live();
        self.flags
    }

    /// Block length of the bound algorithm.
    pub fn block_len(&self) -> usize {
        self.ensure_live();
        self.block_len
    }

    /// Whether a key has been installed successfully.
    pub fn is_keyed(&self) -> bool {
        self.ensure_live();
        self.keyed
    }

    /// Whether handle memory is locked.
    pub fn is_secure(&self) -> bool {
        self.ensure_live();
        self.tag == TAG_SECURE
    }

    #[cfg(test)]
    pub(crate) fn __unsafe_iv(&mut self) -> Vec<u8> {
        self.arena_mut().slots().iv.to_vec()
    }

    #[cfg(test)]
    pub(crate) fn __unsafe_counter(&mut self) -> Vec<u8> {
        self.arena_mut().slots().ctr.to_vec()
    }

    #[cfg(test)]
    pub(crate) fn __unsafe_contexts(&mut self) -> (Vec<u8>, Vec<u8>) {
        let slots = self.arena_mut().slots();
        (slots.live.to_vec(), slots.template.to_vec())
    }

    #[cfg(test)]
    pub(crate) fn __unsafe_unused(&self) -> usize {
        self.unused
    }

    #[cfg(test)]
    pub(crate) fn __unsafe_strategy(&self) -> Option<AllocStrategy> {
        self.arena.as_ref().map(ContextArena::strategy)
    }
}

/// Closes `handle` if there is one.
pub fn close(handle: Option<&mut CipherHandle>) {
    if let Some(handle) = handle {
        handle.close();
    }
}

impl Drop for CipherHandle {
    fn drop(&mut self) {
        if self.is_live() {
            self.close();
        }
    }
}

impl core::fmt::Debug for CipherHandle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CipherHandle")
            .field("algorithm", &self.id)
            .field("mode", &self.mode)
            .field("flags", &self.flags)
            .field("live", &self.is_live())
            .field("keyed", &self.keyed)
            .finish_non_exhaustive()
    }
}
