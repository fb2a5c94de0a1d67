//! Architectural Register File.
//!
//! This module provides the `RegisterFile` struct, the interface the engine uses
//! for every register access. It provides:
//! 1. **Slot Access:** Raw reads and writes of `X0`-`X30` and `SP` by index.
//! 2. **Named Access:** Reads and writes through decoded [`Reg`] operands, applying
//!    the zero-register and 32-bit view rules.
//! 3. **Stack Pointer:** Direct accessors for `SP`.

use crate::common::constants::SP_SLOT;
use crate::core::arch::gpr::Gpr;
use crate::isa::instruction::Reg;

/// Register file holding `X0`-`X30` and the stack pointer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterFile {
    gpr: Gpr,
}

impl RegisterFile {
    /// Creates a new register file with all registers initialized to zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a register slot.
    ///
    /// # Arguments
    ///
    /// * `idx` - Slot index: 0-30 for `X0`-`X30`, 31 for `SP`.
    ///
    /// # Returns
    ///
    /// The 64-bit value stored in the slot.
    pub fn read(&self, idx: usize) -> u64 {
        self.gpr.read(idx)
    }

    /// Writes a register slot.
    ///
    /// # Arguments
    ///
    /// * `idx` - Slot index: 0-30 for `X0`-`X30`, 31 for `SP`.
    /// * `val` - The 64-bit value to write.
    pub fn write(&mut self, idx: usize, val: u64) {
        self.gpr.write(idx, val);
    }

    /// Reads a register as named by an operand.
    ///
    /// The zero registers read as 0 and the `W` views return the low 32 bits
    /// zero-extended.
    pub fn read_reg(&self, reg: Reg) -> u64 {
        match reg {
            Reg::X(n) => self.read(usize::from(n)),
            Reg::W(n) => self.read(usize::from(n)) & 0xFFFF_FFFF,
            Reg::Xzr | Reg::Wzr => 0,
            Reg::Sp => self.sp(),
            Reg::Wsp => self.sp() & 0xFFFF_FFFF,
        }
    }

    /// Writes a register as named by an operand.
    ///
    /// Writes to the zero registers are discarded. A `W` view write zero-extends
    /// into the full 64-bit register.
    pub fn write_reg(&mut self, reg: Reg, val: u64) {
        match reg {
            Reg::X(n) => self.write(usize::from(n), val),
            Reg::W(n) => self.write(usize::from(n), val & 0xFFFF_FFFF),
            Reg::Xzr | Reg::Wzr => {}
            Reg::Sp => self.set_sp(val),
            Reg::Wsp => self.set_sp(val & 0xFFFF_FFFF),
        }
    }

    /// Returns the stack pointer.
    pub fn sp(&self) -> u64 {
        self.gpr.read(SP_SLOT)
    }

    /// Sets the stack pointer.
    pub fn set_sp(&mut self, val: u64) {
        self.gpr.write(SP_SLOT, val);
    }

    /// Returns all 32 slots (`X0`-`X30`, then `SP`).
    pub const fn slots(&self) -> &[u64] {
        self.gpr.slots()
    }
}
