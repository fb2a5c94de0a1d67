//! Core processor implementation.
//!
//! This module contains the architectural state (register storage and flat
//! memory) and the CPU that owns it and executes instructions one step at a time.

/// Architecture-specific components (register storage, memory).
pub mod arch;

/// CPU core implementation and execution.
pub mod cpu;

pub use self::cpu::{Cpu, Status};
