//! Simulation utilities and program loading.
//!
//! Provides the code-section loader for executable containers and the
//! run-to-completion driver around a [`Cpu`](crate::core::Cpu).

/// Executable container parsing and raw image loading.
pub mod loader;

/// Run-to-completion driver.
pub mod simulator;

pub use loader::{CodeSection, LoaderError};
pub use simulator::{RunOutcome, Simulator};
