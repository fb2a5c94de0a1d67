//! Common utilities and types used throughout the emulator.
//!
//! This module provides the building blocks shared by the decoder, the engine,
//! and the drivers. It includes:
//! 1. **Constants:** Memory sizing, instruction width, and view defaults.
//! 2. **Error Handling:** Decode failures, memory faults, and terminal halt reasons.
//! 3. **Register Management:** The general-purpose register file.

/// Common constants used throughout the emulator.
pub mod constants;

/// Error types and halt reasons.
pub mod error;

/// Register file implementation.
pub mod reg;

pub use error::{DecodeError, Fault, Halt, MemoryError};
pub use reg::RegisterFile;
