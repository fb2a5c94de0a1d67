//! Configuration system for the ARM64 emulator.
//!
//! This module defines the configuration structures used to parameterize the
//! emulator. It provides:
//! 1. **Defaults:** Baseline constants (memory size, memory window width).
//! 2. **Structures:** Hierarchical config for general, memory, and view settings.
//! 3. **Policies:** The out-of-bounds handling mode for data stores.
//! 4. **Validation:** Rejection of memory sizes and window widths the engine cannot use.
//!
//! Configuration is supplied as JSON (`Config::from_json`, `Config::from_file`) or
//! built with `Config::default()`.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::common::constants::{DEFAULT_MEMORY_SIZE, DEFAULT_WINDOW_BYTES, INSTRUCTION_SIZE};

/// Errors produced while reading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Path that was being read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The JSON document is malformed or has the wrong shape.
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A field holds a value the emulator cannot use.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Handling of data stores that fall outside memory.
///
/// Instruction fetches outside memory always fault; this policy only covers stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutOfBoundsPolicy {
    /// Halt the engine with a memory fault.
    #[default]
    Fault,
    /// Drop the store and continue with the next instruction.
    Ignore,
}

/// Root configuration for the emulator.
///
/// Every field has a default, so an empty JSON object is a valid configuration.
///
/// # Examples
///
/// ```
/// use armstep_core::config::{Config, OutOfBoundsPolicy};
///
/// let json = r#"{
///     "general": { "trace_instructions": true, "max_steps": 1000 },
///     "memory": { "size": 4096, "out_of_bounds": "ignore" },
///     "view": { "window_bytes": 16 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert!(config.general.trace_instructions);
/// assert_eq!(config.memory.size, 4096);
/// assert_eq!(config.memory.out_of_bounds, OutOfBoundsPolicy::Ignore);
/// assert_eq!(config.view.window_bytes, 16);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// General execution settings
    pub general: GeneralConfig,
    /// Emulated memory settings
    pub memory: MemoryConfig,
    /// Presentation settings for the text views
    pub view: ViewConfig,
}

impl Config {
    /// Parses and validates a configuration from a JSON string.
    ///
    /// # Arguments
    ///
    /// * `json` - The JSON document.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Json`] for malformed JSON, or [`ConfigError::Invalid`]
    /// when validation fails.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a configuration file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to a JSON configuration file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read, otherwise as [`Config::from_json`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Checks that the configuration describes a usable machine.
    ///
    /// Memory must hold at least one instruction and be a whole number of
    /// instruction words; the memory window must show at least one byte.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let word = INSTRUCTION_SIZE as usize;
        if self.memory.size < word || self.memory.size % word != 0 {
            return Err(ConfigError::Invalid(format!(
                "memory.size must be a non-zero multiple of {word}, got {}",
                self.memory.size
            )));
        }
        if self.view.window_bytes == 0 {
            return Err(ConfigError::Invalid(
                "view.window_bytes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// General execution settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneralConfig {
    /// Emit a `debug`-level trace event for every executed instruction
    pub trace_instructions: bool,

    /// Upper bound on steps for run-to-completion drivers (unbounded if not set)
    pub max_steps: Option<u64>,
}

/// Emulated memory settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MemoryConfig {
    /// Memory size in bytes
    pub size: usize,

    /// What happens to stores outside memory
    pub out_of_bounds: OutOfBoundsPolicy,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_MEMORY_SIZE,
            out_of_bounds: OutOfBoundsPolicy::default(),
        }
    }
}

/// Presentation settings for the text views.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewConfig {
    /// Number of bytes shown by the memory window
    pub window_bytes: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            window_bytes: DEFAULT_WINDOW_BYTES,
        }
    }
}
