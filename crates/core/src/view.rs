//! Text views of architectural state.
//!
//! This module projects a [`Cpu`] into human-readable text for presentation
//! layers. It provides:
//! 1. **Register view:** Every register in decimal plus the program counter in hex.
//! 2. **Memory window view:** A byte window around the program counter.
//! 3. **Trace view:** Every executed instruction, latest marked.
//! 4. **Current instruction view:** The instruction the next step would execute.
//!
//! Views borrow the CPU and never mutate it; each implements [`fmt::Display`].

use std::fmt;

use crate::common::RegisterFile;
use crate::common::constants::{GPR_COUNT, SP_SLOT};
use crate::common::error::Fault;
use crate::config::ViewConfig;
use crate::core::Cpu;
use crate::isa::decode::Decoder;
use crate::isa::instruction::Instruction;

/// Register dump: `x0`-`x30` and `sp` in decimal, then `pc` as 16 hex digits.
#[derive(Clone, Copy, Debug)]
pub struct RegisterView<'a> {
    regs: &'a RegisterFile,
    pc: u64,
}

impl<'a> RegisterView<'a> {
    /// Creates a register view of `cpu`.
    pub const fn new<D>(cpu: &'a Cpu<D>) -> Self {
        Self {
            regs: cpu.regs(),
            pc: cpu.pc(),
        }
    }
}

impl fmt::Display for RegisterView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for idx in 0..GPR_COUNT {
            writeln!(f, "x{idx}: {}", self.regs.read(idx))?;
        }
        writeln!(f, "sp: {}", self.regs.read(SP_SLOT))?;
        writeln!(f, "pc: 0x{:016x}", self.pc)
    }
}

/// A window of memory around the program counter.
///
/// The window starts `window_bytes / 2` bytes before `pc`, clamped so that it
/// never begins before address 0 or runs past the end of memory.
#[derive(Clone, Copy, Debug)]
pub struct MemoryView<'a> {
    bytes: &'a [u8],
    pc: u64,
    window: usize,
}

impl<'a> MemoryView<'a> {
    /// Creates a memory window view of `cpu`.
    ///
    /// # Arguments
    ///
    /// * `cpu` - The CPU to inspect.
    /// * `config` - Presentation settings; `window_bytes` sets the row count.
    pub const fn new<D>(cpu: &'a Cpu<D>, config: &ViewConfig) -> Self {
        Self {
            bytes: cpu.memory().as_slice(),
            pc: cpu.pc(),
            window: config.window_bytes,
        }
    }

    /// Returns the address range shown by the window.
    pub fn range(&self) -> std::ops::Range<usize> {
        let window = self.window.min(self.bytes.len());
        let start = usize::try_from(self.pc)
            .unwrap_or(usize::MAX)
            .saturating_sub(self.window / 2)
            .min(self.bytes.len() - window);
        start..start + window
    }
}

impl fmt::Display for MemoryView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "   address     dec  hex   chr")?;
        for addr in self.range() {
            let byte = self.bytes[addr];
            let marker = if addr as u64 == self.pc { "-> " } else { "   " };
            let ascii = if byte.is_ascii_graphic() || byte == b' ' {
                char::from(byte)
            } else {
                '.'
            };
            writeln!(f, "{marker}0x{addr:08x}  {byte:>3}  0x{byte:02x}  {ascii}")?;
        }
        Ok(())
    }
}

/// Every executed instruction in order; the latest is prefixed with `*`.
#[derive(Clone, Copy, Debug)]
pub struct TraceView<'a> {
    entries: &'a [String],
}

impl<'a> TraceView<'a> {
    /// Creates a trace view of `cpu`.
    pub const fn new<D>(cpu: &'a Cpu<D>) -> Self {
        Self {
            entries: cpu.trace(),
        }
    }
}

impl fmt::Display for TraceView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let last = self.entries.len().saturating_sub(1);
        for (idx, entry) in self.entries.iter().enumerate() {
            let marker = if idx == last { "*  " } else { "   " };
            writeln!(f, "{marker}{entry}")?;
        }
        Ok(())
    }
}

/// The instruction at `pc`, decoded without executing it.
#[derive(Clone, Debug)]
pub struct CurrentInstructionView {
    pc: u64,
    decoded: Result<Instruction, Fault>,
}

impl CurrentInstructionView {
    /// Decodes the instruction at the program counter of `cpu`.
    pub fn new<D: Decoder>(cpu: &Cpu<D>) -> Self {
        Self {
            pc: cpu.pc(),
            decoded: cpu.current_instruction(),
        }
    }
}

impl fmt::Display for CurrentInstructionView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.decoded {
            Ok(inst) => writeln!(f, "→ 0x{:08x}: {inst}", self.pc),
            Err(fault) => writeln!(f, "→ 0x{:08x}: {fault}", self.pc),
        }
    }
}
