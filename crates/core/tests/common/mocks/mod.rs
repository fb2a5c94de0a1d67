//! Mock implementations of engine seams.

/// Scripted instruction decoder.
pub mod decoder;
