//! Shared test infrastructure.

/// A64 instruction encoders.
pub mod encode;


/// Mock implementations of engine seams.
pub mod mocks;
