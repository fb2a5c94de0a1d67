//! AArch64 General-Purpose Register File.
//!
//! This module implements the register storage for the A64 architecture.
//! It performs the following:
//! 1. **Storage:** Maintains `X0`-`X30` plus the stack pointer in one array.
//! 2. **Slot Mapping:** Slot 31 holds `SP`; the zero register has no storage.
//! 3. **Safety:** Out-of-range slots read as zero and ignore writes.

use crate::common::constants::REGISTER_SLOTS;

/// General-purpose register storage.
///
/// Slots 0-30 are `X0`-`X30`, slot 31 is `SP`. All slots start at zero.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Gpr {
    regs: [u64; REGISTER_SLOTS],
}

impl Gpr {
    /// Creates a new register file with all slots initialized to zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a register slot.
    ///
    /// # Arguments
    ///
    /// * `idx` - Slot index (0-31).
    ///
    /// # Returns
    ///
    /// The 64-bit value stored in the slot, or 0 for an out-of-range index.
    pub fn read(&self, idx: usize) -> u64 {
        self.regs.get(idx).copied().unwrap_or(0)
    }

    /// Writes a register slot.
    ///
    /// # Arguments
    ///
    /// * `idx` - Slot index (0-31). Out-of-range writes are ignored.
    /// * `val` - The 64-bit value to write.
    pub fn write(&mut self, idx: usize, val: u64) {
        if let Some(slot) = self.regs.get_mut(idx) {
            *slot = val;
        }
    }

    /// Returns all slots in index order.
    pub const fn slots(&self) -> &[u64; REGISTER_SLOTS] {
        &self.regs
    }
}
