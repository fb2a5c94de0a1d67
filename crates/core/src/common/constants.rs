//! Global Emulator Constants.
//!
//! This module defines system-wide constants used across the emulator. It includes:
//! 1. **Memory Constants:** Default memory size and word widths.
//! 2. **Register Constants:** Register counts and slot indices.
//! 3. **View Constants:** Default memory window size.

/// Default size of emulated memory in bytes (2 KiB).
pub const DEFAULT_MEMORY_SIZE: usize = 2 * 1024;

/// Size of an A64 instruction in bytes.
pub const INSTRUCTION_SIZE: u64 = 4;

/// Size of a doubleword store in bytes.
pub const DOUBLEWORD_SIZE: u64 = 8;

/// Number of general-purpose registers (`X0`-`X30`).
pub const GPR_COUNT: usize = 31;

/// Number of register file slots: `X0`-`X30` plus the stack pointer.
pub const REGISTER_SLOTS: usize = GPR_COUNT + 1;

/// Register file slot holding the stack pointer.
pub const SP_SLOT: usize = 31;

/// Default number of bytes shown by the memory window view.
pub const DEFAULT_WINDOW_BYTES: usize = 30;
