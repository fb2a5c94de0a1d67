//! ARM64 single-step emulator CLI.
//!
//! This binary provides the two drivers around the shared step engine. It performs:
//! 1. **Run:** Execute a program until it exits or faults, then dump registers and statistics.
//! 2. **Step:** Drive the engine one instruction per operator command, rendering the views.
//!
//! Programs are read from the code section of a Mach-O or ELF file, or taken verbatim
//! with `--raw`. Exit status: the program's exit code, 1 on a fault or step limit,
//! 2 when the program or configuration cannot be loaded, 3 when the interactive
//! stepper loses its terminal.

mod stepper;

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use armstep_core::Simulator;
use armstep_core::common::Halt;
use armstep_core::config::{Config, ConfigError};
use armstep_core::sim::loader::{self, CodeSection, LoaderError};
use armstep_core::sim::RunOutcome;
use armstep_core::view::RegisterView;
use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use crate::stepper::Stepper;

/// Exit status for a fault or an exhausted step limit.
const EXIT_FAULT: u8 = 1;
/// Exit status when the program or configuration cannot be loaded.
const EXIT_LOAD_ERROR: u8 = 2;
/// Exit status when the stepper cannot read commands or write its views.
const EXIT_IO_ERROR: u8 = 3;

#[derive(Parser, Debug)]
#[command(
    name = "armstep",
    author,
    version,
    about = "Minimal single-stepping ARM64 emulator",
    long_about = "Load the code section of an AArch64 Mach-O or ELF executable and execute it.\n\nExamples:\n  armstep run hello\n  armstep run --raw code.bin --max-steps 100\n  armstep step hello --config armstep.json"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a program until it exits or faults.
    Run {
        #[command(flatten)]
        source: Source,

        /// Stop after this many instructions (overrides `general.max_steps`).
        #[arg(long)]
        max_steps: Option<u64>,

        /// Statistics sections to print (summary, instruction_mix, memory). Default: all.
        #[arg(long, value_delimiter = ',')]
        stats: Vec<String>,
    },

    /// Step through a program interactively.
    Step {
        #[command(flatten)]
        source: Source,
    },
}

/// Where the program and configuration come from.
#[derive(Args, Debug)]
struct Source {
    /// Executable (Mach-O or ELF) or, with `--raw`, a flat binary.
    file: PathBuf,

    /// Treat FILE as raw little-endian machine code instead of an executable.
    #[arg(long)]
    raw: bool,

    /// JSON configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Emit a debug event for every executed instruction.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Loader(#[from] LoaderError),
    #[error("stepper I/O failed: {0}")]
    Io(#[from] io::Error),
}

impl CliError {
    /// Process exit status reported for this error.
    const fn exit_status(&self) -> u8 {
        match self {
            Self::Config(_) | Self::Loader(_) => EXIT_LOAD_ERROR,
            Self::Io(_) => EXIT_IO_ERROR,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Run {
            source,
            max_steps,
            stats,
        } => cmd_run(&source, max_steps, &stats),
        Commands::Step { source } => cmd_step(&source),
    };

    result.unwrap_or_else(|e| {
        eprintln!("[!] {e}");
        ExitCode::from(e.exit_status())
    })
}

/// Installs the stderr `fmt` subscriber; `RUST_LOG` takes precedence over `-v`.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let stderr_format = tracing_subscriber::fmt::layer().with_writer(io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_format)
        .init();
}

/// Reads the configuration and the program named by `source`.
fn load(source: &Source) -> Result<(Config, CodeSection), CliError> {
    let mut config = match &source.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    config.general.trace_instructions |= source.trace;

    let program = if source.raw {
        CodeSection {
            address: 0,
            bytes: loader::load_binary(&source.file)?,
        }
    } else {
        loader::load_code_section(&source.file)?
    };
    tracing::info!(
        path = %source.file.display(),
        len = program.bytes.len(),
        "loaded program"
    );
    Ok((config, program))
}

fn describe(path: &Path, program: &CodeSection) {
    println!(
        "[*] {}: {} bytes of code (section address {:#x})",
        path.display(),
        program.bytes.len(),
        program.address
    );
}

/// Maps a halt to the process exit status.
fn halt_exit_code(halt: &Halt) -> ExitCode {
    match halt {
        Halt::Exit { code } => ExitCode::from(*code as u8),
        Halt::Fault(_) => ExitCode::from(EXIT_FAULT),
    }
}

/// Runs the program to completion, then prints registers and statistics.
fn cmd_run(
    source: &Source,
    max_steps: Option<u64>,
    sections: &[String],
) -> Result<ExitCode, CliError> {
    let (mut config, program) = load(source)?;
    if max_steps.is_some() {
        config.general.max_steps = max_steps;
    }
    describe(&source.file, &program);

    let mut sim = Simulator::new(&config, &program.bytes);
    let outcome = sim.run();

    println!();
    print!("{}", RegisterView::new(&sim.cpu));
    let mut report = String::new();
    if sim.cpu.stats().write_sections(&mut report, sections).is_ok() {
        println!();
        print!("{report}");
    }

    Ok(match outcome {
        RunOutcome::Halted { steps, halt } => {
            match &halt {
                Halt::Exit { code } => {
                    println!("[*] Exit code {code} after {steps} instructions");
                }
                Halt::Fault(fault) => eprintln!("[!] FAULT after {steps} instructions: {fault}"),
            }
            halt_exit_code(&halt)
        }
        RunOutcome::StepLimit { steps } => {
            eprintln!("[!] Step limit reached after {steps} instructions");
            ExitCode::from(EXIT_FAULT)
        }
    })
}

/// Runs the interactive stepper on stdin/stdout.
fn cmd_step(source: &Source) -> Result<ExitCode, CliError> {
    let (config, program) = load(source)?;
    describe(&source.file, &program);

    let stdin = io::stdin();
    let mut stepper = Stepper::new(&config, &program.bytes, stdin.lock(), io::stdout());
    stepper.run()?;

    Ok(stepper
        .cpu()
        .halt_reason()
        .map_or(ExitCode::SUCCESS, halt_exit_code))
}
