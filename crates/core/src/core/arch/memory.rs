//! Flat Byte-Addressed Memory.
//!
//! This module implements the emulated memory as a single zero-initialized
//! byte array starting at address 0. It provides:
//! 1. **Bounds Checking:** Every access is validated against the configured size.
//! 2. **Little-Endian Access:** Word reads for instruction fetch and doubleword
//!    writes for stores.
//! 3. **Out-of-Bounds Policy:** Stores outside memory either fault or are dropped.

use crate::common::error::MemoryError;
use crate::config::OutOfBoundsPolicy;

/// Emulated memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Memory {
    bytes: Vec<u8>,
    policy: OutOfBoundsPolicy,
}

impl Memory {
    /// Creates a zero-filled memory of `size` bytes.
    ///
    /// # Arguments
    ///
    /// * `size` - Memory size in bytes.
    /// * `policy` - Handling of stores outside memory.
    pub fn new(size: usize, policy: OutOfBoundsPolicy) -> Self {
        Self {
            bytes: vec![0; size],
            policy,
        }
    }

    /// Returns the memory size in bytes.
    pub const fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Returns the configured out-of-bounds policy.
    pub const fn policy(&self) -> OutOfBoundsPolicy {
        self.policy
    }

    /// Returns the whole memory contents.
    pub const fn as_slice(&self) -> &[u8] {
        self.bytes.as_slice()
    }

    /// Resolves `[addr, addr + len)` to a slice range, or reports it as out of bounds.
    fn range(&self, addr: u64, len: u64) -> Result<std::ops::Range<usize>, MemoryError> {
        let err = MemoryError::OutOfBounds {
            addr,
            len,
            size: self.size(),
        };
        let end = addr.checked_add(len).ok_or(err)?;
        if end > self.size() {
            return Err(err);
        }
        Ok(addr as usize..end as usize)
    }

    /// Reads one byte.
    ///
    /// # Errors
    ///
    /// [`MemoryError::OutOfBounds`] if `addr` lies outside memory.
    pub fn read_byte(&self, addr: u64) -> Result<u8, MemoryError> {
        let range = self.range(addr, 1)?;
        Ok(self.bytes[range.start])
    }

    /// Writes one byte.
    ///
    /// # Errors
    ///
    /// [`MemoryError::OutOfBounds`] if `addr` lies outside memory.
    pub fn write_byte(&mut self, addr: u64, val: u8) -> Result<(), MemoryError> {
        let range = self.range(addr, 1)?;
        self.bytes[range.start] = val;
        Ok(())
    }

    /// Reads a little-endian 32-bit word.
    ///
    /// # Arguments
    ///
    /// * `addr` - Address of the lowest byte.
    ///
    /// # Errors
    ///
    /// [`MemoryError::OutOfBounds`] if any of the four bytes lies outside memory.
    pub fn read_u32(&self, addr: u64) -> Result<u32, MemoryError> {
        let range = self.range(addr, 4)?;
        let mut buf = [0_u8; 4];
        buf.copy_from_slice(&self.bytes[range]);
        Ok(u32::from_le_bytes(buf))
    }

    /// Writes a 64-bit value as eight little-endian bytes.
    ///
    /// The whole range is validated before any byte is written, so a faulting
    /// store leaves memory untouched.
    ///
    /// # Arguments
    ///
    /// * `addr` - Address of the lowest byte.
    /// * `val` - The value to store.
    ///
    /// # Errors
    ///
    /// [`MemoryError::OutOfBounds`] if any of the eight bytes lies outside memory.
    pub fn write_u64(&mut self, addr: u64, val: u64) -> Result<(), MemoryError> {
        let range = self.range(addr, 8)?;
        self.bytes[range].copy_from_slice(&val.to_le_bytes());
        Ok(())
    }

    /// Copies whole little-endian instruction words to the start of memory.
    ///
    /// A trailing partial word is dropped. Words that do not fit are dropped too.
    ///
    /// # Returns
    ///
    /// The number of bytes copied.
    pub fn load_words(&mut self, bytes: &[u8]) -> usize {
        let whole = bytes.len() - bytes.len() % 4;
        let fit = whole.min(self.bytes.len() - self.bytes.len() % 4);
        self.bytes[..fit].copy_from_slice(&bytes[..fit]);
        fit
    }
}
