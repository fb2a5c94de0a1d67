//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the A64 encoding classes, the decoder, and the structured
//! instruction types the engine consumes.
//!
//! # Modules
//!
//! * `abi`: Registers and service numbers used by the supervisor call.
//! * `decode`: Word-to-instruction decoding and the `Decoder` seam.
//! * `instruction`: Opcodes, registers, and operand forms.
//! * `opcodes`: Encoding class masks.

/// Supervisor-call register and service number constants.
pub mod abi;

/// Instruction decoding for the supported A64 encoding classes.
pub mod decode;

/// Instruction, opcode, and operand types.
pub mod instruction;

/// A64 encoding class masks and fixed values.
pub mod opcodes;

pub use decode::{A64Decoder, Decoder};
pub use instruction::{Extend, Instruction, MemOperand, Opcode, Operand, Reg};
