//! ARM64 single-step emulator library.
//!
//! This crate implements a minimal AArch64 (A64) emulator with the following:
//! 1. **Core:** Architectural state (X0-X30, SP, PC, flat memory) and the fetch-decode-execute step.
//! 2. **ISA:** A self-contained A64 decoder producing engine-owned operand types.
//! 3. **Simulation:** Mach-O/ELF code-section loader and a run-to-completion driver.
//! 4. **Views:** Read-only text projections of registers, memory, and the instruction trace.

/// Common types and constants (errors, register file, memory sizes).
pub mod common;
/// Emulator configuration (memory bound, out-of-bounds policy, view settings).
pub mod config;
/// CPU core (architectural state, step engine, instruction semantics).
pub mod core;
/// Instruction set (decode, instruction and operand types, ABI registers).
pub mod isa;
/// Code-section loader and run-to-completion driver.
pub mod sim;
/// Execution statistics collection and reporting.
pub mod stats;
/// Text views of architectural state for presentation layers.
pub mod view;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Main CPU type; holds registers, memory, PC, status, and trace.
pub use crate::core::Cpu;
/// Run-to-completion driver around a [`Cpu`].
pub use crate::sim::Simulator;
