//! Binary Loader.
//!
//! This module locates the machine code a program should start with. It performs:
//! 1. **Container parsing:** Reads Mach-O and ELF files through the `object` crate.
//! 2. **Architecture check:** Rejects files that do not target AArch64.
//! 3. **Section lookup:** Returns the bytes and virtual address of `__TEXT,__text`
//!    (Mach-O) or `.text` (ELF).
//! 4. **Raw images:** Reads a flat binary file unchanged.

use std::fs;
use std::path::Path;

use object::{Architecture, BinaryFormat, Object, ObjectSection};
use thiserror::Error;
use tracing::debug;

/// Mach-O segment holding executable code.
const MACHO_TEXT_SEGMENT: &str = "__TEXT";
/// Mach-O code section within [`MACHO_TEXT_SEGMENT`].
const MACHO_TEXT_SECTION: &str = "__text";
/// ELF code section.
const ELF_TEXT_SECTION: &str = ".text";

/// Errors produced while loading a program.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// The file could not be read.
    #[error("could not read file '{path}': {source}")]
    Io {
        /// Path that was being read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not a well-formed executable container.
    #[error("failed to parse executable: {0}")]
    Parse(#[from] object::Error),

    /// The container has no code section.
    #[error("code section not found")]
    SectionNotFound,

    /// The container format is parsed but not supported as a program source.
    #[error("unsupported container format {0:?}")]
    UnsupportedFormat(BinaryFormat),

    /// The file targets another architecture.
    #[error("unsupported architecture {0:?}, expected AArch64")]
    Architecture(Architecture),
}

/// Executable code extracted from a container.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeSection {
    /// Virtual address the section is mapped at.
    pub address: u64,
    /// Raw section contents.
    pub bytes: Vec<u8>,
}

/// Loads a file from disk into a byte vector.
///
/// # Arguments
///
/// * `path` - Path to the file.
///
/// # Errors
///
/// [`LoaderError::Io`] if the file cannot be read.
pub fn load_binary(path: impl AsRef<Path>) -> Result<Vec<u8>, LoaderError> {
    let path = path.as_ref();
    fs::read(path).map_err(|source| LoaderError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Reads an executable and returns its code section.
///
/// # Arguments
///
/// * `path` - Path to a Mach-O or ELF file targeting AArch64.
///
/// # Errors
///
/// Any error of [`load_binary`] or [`parse_code_section`].
pub fn load_code_section(path: impl AsRef<Path>) -> Result<CodeSection, LoaderError> {
    let data = load_binary(path)?;
    parse_code_section(&data)
}

/// Extracts the code section from an in-memory executable image.
///
/// # Arguments
///
/// * `data` - Complete contents of a Mach-O or ELF file.
///
/// # Errors
///
/// [`LoaderError::Parse`] for a malformed container,
/// [`LoaderError::Architecture`] for a non-AArch64 file,
/// [`LoaderError::UnsupportedFormat`] for containers other than Mach-O and ELF,
/// or [`LoaderError::SectionNotFound`] when there is no code section.
pub fn parse_code_section(data: &[u8]) -> Result<CodeSection, LoaderError> {
    let file = object::File::parse(data)?;

    let arch = file.architecture();
    if arch != Architecture::Aarch64 {
        return Err(LoaderError::Architecture(arch));
    }

    let section = match file.format() {
        BinaryFormat::MachO => file.sections().find(|section| {
            section.name().is_ok_and(|name| name == MACHO_TEXT_SECTION)
                && section.segment_name().ok().flatten() == Some(MACHO_TEXT_SEGMENT)
        }),
        BinaryFormat::Elf => file.section_by_name(ELF_TEXT_SECTION),
        other => return Err(LoaderError::UnsupportedFormat(other)),
    }
    .ok_or(LoaderError::SectionNotFound)?;

    let bytes = section.data()?.to_vec();
    debug!(
        address = format_args!("{:#x}", section.address()),
        len = bytes.len(),
        "located code section"
    );
    Ok(CodeSection {
        address: section.address(),
        bytes,
    })
}
