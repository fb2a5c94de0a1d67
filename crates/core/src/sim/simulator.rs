//! Simulator: runs a CPU until it halts.
//!
//! The run-to-completion driver shares the single step engine with the
//! interactive stepper; it only differs in calling `step()` back to back.

use crate::common::error::Halt;
use crate::config::Config;
use crate::core::Cpu;
use crate::isa::decode::{A64Decoder, Decoder};

/// How a run ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// The engine halted after `steps` retired instructions.
    Halted {
        /// Instructions retired during this run.
        steps: u64,
        /// Why the engine stopped.
        halt: Halt,
    },
    /// The configured step limit was reached with the engine still running.
    StepLimit {
        /// Instructions retired during this run.
        steps: u64,
    },
}

/// Top-level simulator: CPU plus the run limit.
#[derive(Debug)]
pub struct Simulator<D = A64Decoder> {
    /// CPU architectural state (registers, memory, trace, stats).
    pub cpu: Cpu<D>,
    max_steps: Option<u64>,
}

impl Simulator<A64Decoder> {
    /// Creates a simulator with a fresh CPU and the given program loaded at address 0.
    pub fn new(config: &Config, program: &[u8]) -> Self {
        let mut cpu = Cpu::new(config);
        let _ = cpu.load(program);
        Self::with_cpu(cpu, config.general.max_steps)
    }
}

impl<D: Decoder> Simulator<D> {
    /// Wraps an already prepared CPU.
    ///
    /// # Arguments
    ///
    /// * `cpu` - The CPU to drive, usually with a program already loaded.
    /// * `max_steps` - Maximum instructions per [`Simulator::run`], or `None` for no limit.
    pub const fn with_cpu(cpu: Cpu<D>, max_steps: Option<u64>) -> Self {
        Self { cpu, max_steps }
    }

    /// Advances the simulator by one instruction.
    ///
    /// # Errors
    ///
    /// The [`Halt`] reported by [`Cpu::step`].
    pub fn step(&mut self) -> Result<(), Halt> {
        self.cpu.step()
    }

    /// Steps until the CPU halts or the step limit is reached.
    pub fn run(&mut self) -> RunOutcome {
        let mut steps = 0;
        loop {
            if self.max_steps.is_some_and(|limit| steps >= limit) {
                return RunOutcome::StepLimit { steps };
            }
            if let Err(halt) = self.cpu.step() {
                return RunOutcome::Halted { steps, halt };
            }
            steps += 1;
        }
    }

    /// Retrieves the exit code if the program has exited.
    pub fn exit_code(&self) -> Option<u64> {
        self.cpu.halt_reason().and_then(Halt::exit_code)
    }
}
