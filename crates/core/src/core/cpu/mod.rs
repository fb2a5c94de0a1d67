//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, which owns the entire
//! architectural state of the emulated machine. It coordinates the following:
//! 1. **State Management:** Registers, program counter, and flat memory.
//! 2. **Execution Status:** The running/halted state machine and the halt reason.
//! 3. **Introspection:** The instruction trace and execution statistics.
//! 4. **Program Loading:** Placement of code bytes at address 0.

/// Fetch-decode-execute cycle.
pub mod execution;

/// Per-opcode instruction semantics, reachable only through the step engine.
mod semantics;

use tracing::{debug, warn};

use crate::common::RegisterFile;
use crate::common::constants::INSTRUCTION_SIZE;
use crate::common::error::{Halt, MemoryError};
use crate::config::{Config, OutOfBoundsPolicy};
use crate::core::arch::memory::Memory;
use crate::isa::decode::A64Decoder;
use crate::isa::instruction::Reg;
use crate::stats::SimStats;

/// Execution status of the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Status {
    /// The engine accepts further steps.
    Running,
    /// The engine has stopped; every further step reports this reason.
    Halted(Halt),
}

/// Main CPU structure containing all architectural state.
///
/// The CPU is generic over its [`Decoder`](crate::isa::decode::Decoder) so that
/// tests can script decode results; production code uses [`A64Decoder`].
#[derive(Debug)]
pub struct Cpu<D = A64Decoder> {
    regs: RegisterFile,
    pc: u64,
    memory: Memory,
    status: Status,
    trace: Vec<String>,
    stats: SimStats,
    decoder: D,
    trace_instructions: bool,
}

impl Cpu<A64Decoder> {
    /// Creates a new CPU with the built-in A64 decoder.
    ///
    /// # Arguments
    ///
    /// * `config` - Memory size, out-of-bounds policy, and tracing settings.
    ///
    /// # Returns
    ///
    /// A running CPU with all registers zero, `pc = 0`, and zero-filled memory.
    pub fn new(config: &Config) -> Self {
        Self::with_decoder(config, A64Decoder)
    }
}

impl<D> Cpu<D> {
    /// Creates a new CPU that decodes through `decoder`.
    ///
    /// # Arguments
    ///
    /// * `config` - Memory size, out-of-bounds policy, and tracing settings.
    /// * `decoder` - The instruction decoder to use for every fetch.
    pub fn with_decoder(config: &Config, decoder: D) -> Self {
        Self {
            regs: RegisterFile::new(),
            pc: 0,
            memory: Memory::new(config.memory.size, config.memory.out_of_bounds),
            status: Status::Running,
            trace: Vec::new(),
            stats: SimStats::default(),
            decoder,
            trace_instructions: config.general.trace_instructions,
        }
    }

    /// Copies a program into memory starting at address 0.
    ///
    /// Bytes are copied in whole 4-byte words; a trailing group shorter than a
    /// word is dropped, and words that do not fit in memory are dropped with a
    /// warning.
    ///
    /// # Arguments
    ///
    /// * `bytes` - Raw little-endian machine code.
    ///
    /// # Returns
    ///
    /// The number of bytes placed in memory.
    pub fn load(&mut self, bytes: &[u8]) -> usize {
        let word = INSTRUCTION_SIZE as usize;
        let whole = bytes.len() - bytes.len() % word;
        let copied = self.memory.load_words(bytes);

        if bytes.len() != whole {
            debug!(
                trailing = bytes.len() - whole,
                "dropped trailing partial instruction word"
            );
        }
        if copied < whole {
            warn!(
                copied,
                dropped = whole - copied,
                memory_size = self.memory.size(),
                "program does not fit in memory; truncated"
            );
        }
        copied
    }

    /// Returns the program counter.
    pub const fn pc(&self) -> u64 {
        self.pc
    }

    /// Returns the register file.
    pub const fn regs(&self) -> &RegisterFile {
        &self.regs
    }

    /// Reads a register by slot index (0-30 for `X0`-`X30`, 31 for `SP`).
    pub fn read_register(&self, idx: usize) -> u64 {
        self.regs.read(idx)
    }

    /// Writes a register by slot index (0-30 for `X0`-`X30`, 31 for `SP`).
    pub fn write_register(&mut self, idx: usize, val: u64) {
        self.regs.write(idx, val);
    }

    /// Reads a register as named by a decoded operand.
    pub fn read_reg(&self, reg: Reg) -> u64 {
        self.regs.read_reg(reg)
    }

    /// Returns the emulated memory.
    pub const fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Reads a memory byte, honouring the out-of-bounds policy.
    ///
    /// Under [`OutOfBoundsPolicy::Ignore`] an out-of-bounds read returns 0.
    ///
    /// # Errors
    ///
    /// [`MemoryError::OutOfBounds`] under [`OutOfBoundsPolicy::Fault`].
    pub fn read_byte(&self, addr: u64) -> Result<u8, MemoryError> {
        match self.memory.read_byte(addr) {
            Err(_) if self.memory.policy() == OutOfBoundsPolicy::Ignore => Ok(0),
            other => other,
        }
    }

    /// Writes a memory byte, honouring the out-of-bounds policy.
    ///
    /// Under [`OutOfBoundsPolicy::Ignore`] an out-of-bounds write is dropped.
    ///
    /// # Errors
    ///
    /// [`MemoryError::OutOfBounds`] under [`OutOfBoundsPolicy::Fault`].
    pub fn write_byte(&mut self, addr: u64, val: u8) -> Result<(), MemoryError> {
        match self.memory.write_byte(addr, val) {
            Err(_) if self.memory.policy() == OutOfBoundsPolicy::Ignore => Ok(()),
            other => other,
        }
    }

    /// Returns the textual rendering of every successfully executed instruction.
    pub const fn trace(&self) -> &[String] {
        self.trace.as_slice()
    }

    /// Returns the execution statistics.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Returns the execution status.
    pub const fn status(&self) -> &Status {
        &self.status
    }

    /// Returns `true` once the engine has stopped.
    pub const fn is_halted(&self) -> bool {
        matches!(self.status, Status::Halted(_))
    }

    /// Returns the reason the engine stopped, if it has.
    pub const fn halt_reason(&self) -> Option<&Halt> {
        match &self.status {
            Status::Running => None,
            Status::Halted(halt) => Some(halt),
        }
    }
}
