//! Interactive single-step driver.
//!
//! Reads one command per line and renders the current instruction, registers,
//! memory window, and trace after every command. Keys:
//! * `s` or an empty line: execute one instruction.
//! * `r`: execute until the engine halts.
//! * `q`: quit.

use std::io::{self, BufRead, Write};

use armstep_core::Cpu;
use armstep_core::config::{Config, ViewConfig};
use armstep_core::view::{CurrentInstructionView, MemoryView, RegisterView, TraceView};

/// An operator command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Command {
    Step,
    Run,
    Quit,
}

impl Command {
    fn parse(line: &str) -> Option<Self> {
        match line.trim() {
            "" | "s" | "step" => Some(Self::Step),
            "r" | "run" => Some(Self::Run),
            "q" | "quit" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Drives a CPU one command at a time.
#[derive(Debug)]
pub struct Stepper<R, W> {
    cpu: Cpu,
    view: ViewConfig,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Stepper<R, W> {
    /// Creates a stepper with `program` loaded into a fresh CPU.
    pub fn new(config: &Config, program: &[u8], input: R, output: W) -> Self {
        let mut cpu = Cpu::new(config);
        let _ = cpu.load(program);
        Self {
            cpu,
            view: config.view,
            input,
            output,
        }
    }

    /// Returns the driven CPU.
    pub const fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// Processes commands until `q` or end of input.
    ///
    /// # Errors
    ///
    /// Any failure reading commands or writing the views.
    pub fn run(&mut self) -> io::Result<()> {
        self.render()?;
        let mut line = String::new();
        loop {
            write!(self.output, "[s]tep [r]un [q]uit > ")?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                return Ok(());
            }

            match Command::parse(&line) {
                Some(Command::Step) => self.step_once()?,
                Some(Command::Run) => {
                    while !self.cpu.is_halted() {
                        self.step_once()?;
                    }
                }
                Some(Command::Quit) => return Ok(()),
                None => {
                    writeln!(self.output, "unknown command: {}", line.trim())?;
                    continue;
                }
            }
            self.render()?;
        }
    }

    fn step_once(&mut self) -> io::Result<()> {
        if let Err(halt) = self.cpu.step() {
            writeln!(self.output, "halted: {halt}")?;
        }
        Ok(())
    }

    fn render(&mut self) -> io::Result<()> {
        writeln!(self.output, "== instruction ==")?;
        write!(self.output, "{}", CurrentInstructionView::new(&self.cpu))?;
        writeln!(self.output, "== registers ==")?;
        write!(self.output, "{}", RegisterView::new(&self.cpu))?;
        writeln!(self.output, "== memory ==")?;
        write!(self.output, "{}", MemoryView::new(&self.cpu, &self.view))?;
        writeln!(self.output, "== trace ==")?;
        write!(self.output, "{}", TraceView::new(&self.cpu))?;
        Ok(())
    }
}
