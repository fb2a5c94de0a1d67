//! AArch64 architectural storage.
//!
//! This module contains the storage behind the architectural state.
//! It includes the following modules:
//! 1. **GPRs:** General-purpose register file with the stack pointer slot.
//! 2. **Memory:** Flat byte-addressed memory with bounds checking.

/// General-Purpose Register file implementation.
pub mod gpr;

/// Flat emulated memory.
pub mod memory;
