//! # Unit Components
//!
//! This module organizes the unit suites for each part of the emulator core:
//! shared types, architectural state, the step engine, the decoder, program
//! loading, configuration, statistics, and views.



/// Unit tests for the A64 decoder and instruction rendering.
///
/// This module aggregates tests for:
/// - Encoding classes and their aliases.
/// - Operand forms (immediates, extended registers, addressing modes).
/// - Rejection of unrecognized and unallocated words.
pub mod isa;
