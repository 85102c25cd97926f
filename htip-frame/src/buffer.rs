//! Fixed-capacity frame buffer used to build outgoing frames.

use crate::tlv::{TlvType, TlvWriter};
use crate::{Error, Result, MTU};

/// A fixed-capacity byte buffer with a monotonic write cursor.
///
/// The cursor is the number of committed bytes. A write that does not fit in
/// the remaining capacity fails with [`Error::BufferOverflow`] and leaves the
/// buffer untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer<const N: usize = MTU> {
    data: heapless::Vec<u8, N>,
}

impl FrameBuffer<MTU> {
    /// Create an empty frame buffer of one MTU.
    pub fn new() -> Self {
        Self::allocate()
    }
}

impl Default for FrameBuffer<MTU> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> FrameBuffer<N> {
    /// Create an empty frame buffer of `N` bytes.
    pub fn allocate() -> Self {
        Self {
            data: heapless::Vec::new(),
        }
    }

    /// Return the capacity of the buffer.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Return the number of committed bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` when nothing was written yet.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Return the number of bytes that can still be written.
    pub fn remaining(&self) -> usize {
        N - self.data.len()
    }

    /// Append `bytes` at the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferOverflow`] if `bytes` does not fit.
    pub fn append(&mut self, bytes: &[u8]) -> Result<()> {
        self.data
            .extend_from_slice(bytes)
            .map_err(|_| Error::BufferOverflow)
    }

    /// Append a single byte at the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferOverflow`] if the buffer is full.
    pub fn push(&mut self, byte: u8) -> Result<()> {
        self.data.push(byte).map_err(|_| Error::BufferOverflow)
    }

    /// Open a TLV of the given type at the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferOverflow`] if the two header bytes do not fit.
    pub fn open_tlv(&mut self, tlv_type: TlvType) -> Result<TlvWriter<'_, N>> {
        TlvWriter::open(self, tlv_type)
    }

    /// Return the committed bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Drop every byte from `len` on.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.data.truncate(len);
    }

    /// Overwrite two already committed bytes at `offset`.
    pub(crate) fn patch(&mut self, offset: usize, bytes: [u8; 2]) {
        self.data[offset..][..2].copy_from_slice(&bytes);
    }
}

impl<const N: usize> AsRef<[u8]> for FrameBuffer<N> {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}
