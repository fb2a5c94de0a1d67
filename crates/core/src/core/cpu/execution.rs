//! Main Execution Loop.
//!
//! This module implements the fetch-decode-execute cycle of the CPU. It performs the following:
//! 1. **Fetch:** Reads the little-endian word at `pc`.
//! 2. **Decode:** Hands the word to the configured decoder.
//! 3. **Execute:** Applies the instruction semantics and retires the instruction.
//! 4. **Halting:** Latches the first terminal condition and replays it on every later step.

use tracing::{debug, info, warn};

use super::semantics::Outcome;
use super::{Cpu, Status};
use crate::common::constants::INSTRUCTION_SIZE;
use crate::common::error::{Fault, Halt};
use crate::isa::decode::Decoder;
use crate::isa::instruction::Instruction;

impl<D: Decoder> Cpu<D> {
    /// Executes exactly one instruction.
    ///
    /// On success the program counter has advanced by 4 and the instruction has
    /// been appended to the trace. On a terminal condition the engine is halted
    /// and the condition is returned; a halted engine returns the same condition
    /// on every later call without touching state.
    ///
    /// # Errors
    ///
    /// Returns the [`Halt`] that stopped the engine, either on this step or an
    /// earlier one.
    pub fn step(&mut self) -> Result<(), Halt> {
        if let Status::Halted(halt) = &self.status {
            return Err(halt.clone());
        }

        self.try_step().inspect_err(|halt| {
            match halt {
                Halt::Exit { code } => info!(code, pc = self.pc, "program exited"),
                Halt::Fault(fault) => warn!(%fault, pc = self.pc, "halted on fault"),
            }
            self.status = Status::Halted(halt.clone());
        })
    }

    fn try_step(&mut self) -> Result<(), Halt> {
        let pc = self.pc;
        let inst = self.fetch_decode(pc)?;

        if let Outcome::Exit(code) = self.execute(pc, &inst)? {
            return Err(Halt::Exit { code });
        }

        if self.trace_instructions {
            debug!(pc = format_args!("{pc:#010x}"), inst = %inst, "executed");
        }
        self.pc = pc.wrapping_add(INSTRUCTION_SIZE);
        self.stats.record_retired(inst.op);
        self.trace.push(inst.to_string());
        Ok(())
    }

    /// Fetches and decodes the instruction at `pc` without executing it.
    ///
    /// # Arguments
    ///
    /// * `pc` - Address of the instruction word.
    ///
    /// # Errors
    ///
    /// [`Fault::Fetch`] if the word lies outside memory, or [`Fault::Decode`]
    /// if the word is not a recognized encoding.
    pub fn fetch_decode(&self, pc: u64) -> Result<Instruction, Fault> {
        let word = self
            .memory
            .read_u32(pc)
            .map_err(|source| Fault::Fetch { pc, source })?;
        self.decoder
            .decode(word)
            .map_err(|source| Fault::Decode { pc, source })
    }

    /// Decodes the instruction the next step would execute.
    ///
    /// # Errors
    ///
    /// Same as [`Cpu::fetch_decode`].
    pub fn current_instruction(&self) -> Result<Instruction, Fault> {
        self.fetch_decode(self.pc)
    }
}
