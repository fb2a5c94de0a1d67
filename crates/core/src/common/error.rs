//! Decode, Memory, and Halt definitions.
//!
//! This module defines the error handling for the emulator. It provides:
//! 1. **Decode Failures:** Words that are not a recognized or allocated A64 encoding.
//! 2. **Memory Faults:** Accesses outside the configured memory bound.
//! 3. **Halt Reasons:** The terminal conditions of the step engine, separating a
//!    deliberate program exit from a fault.

use thiserror::Error;

use crate::isa::instruction::Instruction;

/// Failure to turn a 32-bit word into an instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The word does not belong to any encoding class the decoder knows.
    ///
    /// The associated value is the raw instruction word.
    #[error("unrecognized instruction encoding {0:#010x}")]
    Unrecognized(u32),

    /// The word belongs to a known class but uses a reserved field combination.
    ///
    /// The associated value is the raw instruction word.
    #[error("unallocated instruction encoding {0:#010x}")]
    Unallocated(u32),
}

/// Memory access outside the configured bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MemoryError {
    /// An access of `len` bytes starting at `addr` does not fit below `size`.
    #[error("access of {len} byte(s) at {addr:#x} exceeds memory size {size:#x}")]
    OutOfBounds {
        /// First byte of the access.
        addr: u64,
        /// Width of the access in bytes.
        len: u64,
        /// Configured memory size in bytes.
        size: u64,
    },
}

/// Unrecoverable failure of a single step.
///
/// Every variant is terminal: the engine transitions to halted and reports the
/// same fault on each subsequent step.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Fault {
    /// The instruction fetch itself left memory.
    #[error("fetch failed at pc {pc:#x}: {source}")]
    Fetch {
        /// Program counter of the failed fetch.
        pc: u64,
        /// Underlying memory error.
        #[source]
        source: MemoryError,
    },

    /// The fetched word could not be decoded.
    #[error("decode failed at pc {pc:#x}: {source}")]
    Decode {
        /// Program counter of the undecodable word.
        pc: u64,
        /// Underlying decode error.
        #[source]
        source: DecodeError,
    },

    /// The instruction decoded but its opcode has no semantics in this engine.
    #[error("unknown instruction `{inst}` at pc {pc:#x}")]
    UnknownInstruction {
        /// Program counter of the instruction.
        pc: u64,
        /// The decoded instruction.
        inst: Instruction,
    },

    /// The opcode is supported but its operands match no supported form.
    #[error("invalid operands for `{inst}` at pc {pc:#x}: {reason}")]
    OperandMismatch {
        /// Program counter of the instruction.
        pc: u64,
        /// The decoded instruction with the offending operands.
        inst: Instruction,
        /// Which operand form was rejected.
        reason: &'static str,
    },

    /// A data access left memory while the out-of-bounds policy is `fault`.
    #[error("memory fault in `{inst}` at pc {pc:#x}: {source}")]
    Memory {
        /// Program counter of the instruction.
        pc: u64,
        /// The faulting instruction.
        inst: Instruction,
        /// Underlying memory error.
        #[source]
        source: MemoryError,
    },
}

/// Terminal condition reported by [`Cpu::step`](crate::core::Cpu::step).
///
/// Callers must distinguish a program that finished ([`Halt::Exit`]) from one that
/// stopped on a fault ([`Halt::Fault`]).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Halt {
    /// The program requested exit through the supervisor call.
    #[error("program exited with code {code}")]
    Exit {
        /// Exit status taken from `X0` at the time of the call.
        code: u64,
    },

    /// Execution stopped on a fault.
    #[error(transparent)]
    Fault(#[from] Fault),
}

impl Halt {
    /// Returns `true` if the halt was caused by a fault rather than a requested exit.
    pub const fn is_fault(&self) -> bool {
        matches!(self, Self::Fault(_))
    }

    /// Returns the exit status if the program exited deliberately.
    pub const fn exit_code(&self) -> Option<u64> {
        match self {
            Self::Exit { code } => Some(*code),
            Self::Fault(_) => None,
        }
    }
}
