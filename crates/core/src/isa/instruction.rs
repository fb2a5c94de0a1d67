//! Instruction and operand types.
//!
//! Provides the structured form produced by the decoder: an [`Opcode`] plus an
//! ordered operand list. Every field the engine needs (including the register
//! embedded in an extended-register operand) is a public part of the type.

use std::fmt;

/// A register operand as named by an instruction.
///
/// Register number 31 means either the zero register or the stack pointer
/// depending on the encoding field, so the decoder resolves it into
/// [`Reg::Xzr`]/[`Reg::Wzr`] or [`Reg::Sp`]/[`Reg::Wsp`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Reg {
    /// 64-bit general-purpose register `X0`-`X30`.
    X(u8),
    /// 32-bit view `W0`-`W30` of a general-purpose register.
    W(u8),
    /// 64-bit zero register.
    Xzr,
    /// 32-bit zero register.
    Wzr,
    /// 64-bit stack pointer.
    Sp,
    /// 32-bit view of the stack pointer.
    Wsp,
}

impl Reg {
    /// Resolves a 5-bit register field where 31 is the zero register.
    pub const fn zr(num: u32, is_64: bool) -> Self {
        match (num & 0x1F, is_64) {
            (31, true) => Self::Xzr,
            (31, false) => Self::Wzr,
            (n, true) => Self::X(n as u8),
            (n, false) => Self::W(n as u8),
        }
    }

    /// Resolves a 5-bit register field where 31 is the stack pointer.
    pub const fn sp(num: u32, is_64: bool) -> Self {
        match (num & 0x1F, is_64) {
            (31, true) => Self::Sp,
            (31, false) => Self::Wsp,
            (n, true) => Self::X(n as u8),
            (n, false) => Self::W(n as u8),
        }
    }

    /// Returns `true` for the 64-bit views (`Xn`, `XZR`, `SP`).
    pub const fn is_64bit(self) -> bool {
        matches!(self, Self::X(_) | Self::Xzr | Self::Sp)
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X(n) => write!(f, "x{n}"),
            Self::W(n) => write!(f, "w{n}"),
            Self::Xzr => f.write_str("xzr"),
            Self::Wzr => f.write_str("wzr"),
            Self::Sp => f.write_str("sp"),
            Self::Wsp => f.write_str("wsp"),
        }
    }
}

/// Extend or shift applied to a register before it is used as an operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Extend {
    /// Zero-extend the low byte.
    Uxtb,
    /// Zero-extend the low halfword.
    Uxth,
    /// Zero-extend the low word.
    Uxtw,
    /// Use all 64 bits.
    Uxtx,
    /// Sign-extend the low byte.
    Sxtb,
    /// Sign-extend the low halfword.
    Sxth,
    /// Sign-extend the low word.
    Sxtw,
    /// Use all 64 bits (signed form).
    Sxtx,
    /// Logical shift left.
    Lsl,
    /// Logical shift right.
    Lsr,
    /// Arithmetic shift right.
    Asr,
    /// Rotate right.
    Ror,
}

impl Extend {
    /// Maps the 3-bit `option` field of extended-register encodings.
    pub const fn from_option(option: u32) -> Self {
        match option & 0x7 {
            0 => Self::Uxtb,
            1 => Self::Uxth,
            2 => Self::Uxtw,
            3 => Self::Uxtx,
            4 => Self::Sxtb,
            5 => Self::Sxth,
            6 => Self::Sxtw,
            _ => Self::Sxtx,
        }
    }

    /// Applies the extension (or shift) and the left shift `amount` to `value`.
    ///
    /// Shift amounts are taken modulo 64.
    pub const fn apply(self, value: u64, amount: u8) -> u64 {
        let amount = (amount & 0x3F) as u32;
        match self {
            Self::Uxtb => (value & 0xFF) << amount,
            Self::Uxth => (value & 0xFFFF) << amount,
            Self::Uxtw => (value & 0xFFFF_FFFF) << amount,
            Self::Uxtx | Self::Sxtx | Self::Lsl => value << amount,
            Self::Sxtb => ((value as u8 as i8 as i64) as u64) << amount,
            Self::Sxth => ((value as u16 as i16 as i64) as u64) << amount,
            Self::Sxtw => ((value as u32 as i32 as i64) as u64) << amount,
            Self::Lsr => value >> amount,
            Self::Asr => ((value as i64) >> amount) as u64,
            Self::Ror => value.rotate_right(amount),
        }
    }

    /// Returns `true` if the modifier leaves a 64-bit value unchanged at amount 0.
    pub const fn is_identity(self) -> bool {
        matches!(self, Self::Uxtx | Self::Lsl)
    }

    /// Assembler mnemonic of the modifier.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Uxtb => "uxtb",
            Self::Uxth => "uxth",
            Self::Uxtw => "uxtw",
            Self::Uxtx => "uxtx",
            Self::Sxtb => "sxtb",
            Self::Sxth => "sxth",
            Self::Sxtw => "sxtw",
            Self::Sxtx => "sxtx",
            Self::Lsl => "lsl",
            Self::Lsr => "lsr",
            Self::Asr => "asr",
            Self::Ror => "ror",
        }
    }
}

/// Addressing form of a load/store operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemOperand {
    /// `[base]`
    Base {
        /// Base address register.
        base: Reg,
    },
    /// `[base, #offset]`
    Offset {
        /// Base address register.
        base: Reg,
        /// Signed byte offset.
        offset: i64,
    },
    /// `[base, index{, extend #amount}]`
    Indexed {
        /// Base address register.
        base: Reg,
        /// Index register.
        index: Reg,
        /// Modifier applied to the index.
        extend: Extend,
        /// Left shift applied after extension.
        amount: u8,
    },
    /// `[base, #offset]!` (base written back before the access)
    PreIndex {
        /// Base address register.
        base: Reg,
        /// Signed byte offset.
        offset: i64,
    },
    /// `[base], #offset` (base written back after the access)
    PostIndex {
        /// Base address register.
        base: Reg,
        /// Signed byte offset.
        offset: i64,
    },
}

/// A single decoded operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operand {
    /// A register.
    Reg(Reg),
    /// An immediate, already shifted into its final value.
    Imm(u64),
    /// A register passed through an extend or shift modifier.
    Extended {
        /// The register named by the operand.
        reg: Reg,
        /// Modifier applied to the register value.
        extend: Extend,
        /// Left shift (extend forms) or shift distance (shift forms).
        amount: u8,
    },
    /// A memory address.
    Mem(MemOperand),
    /// A PC-relative branch offset in bytes.
    Label(i64),
}

impl fmt::Display for MemOperand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Base { base } => write!(f, "[{base}]"),
            Self::Offset { base, offset } => write!(f, "[{base}, #{}]", signed_hex(offset)),
            Self::Indexed {
                base,
                index,
                extend,
                amount,
            } => {
                if extend.is_identity() && index.is_64bit() {
                    if amount == 0 {
                        write!(f, "[{base}, {index}]")
                    } else {
                        write!(f, "[{base}, {index}, lsl #{amount}]")
                    }
                } else if amount == 0 {
                    write!(f, "[{base}, {index}, {}]", extend.mnemonic())
                } else {
                    write!(f, "[{base}, {index}, {} #{amount}]", extend.mnemonic())
                }
            }
            Self::PreIndex { base, offset } => write!(f, "[{base}, #{}]!", signed_hex(offset)),
            Self::PostIndex { base, offset } => write!(f, "[{base}], #{}", signed_hex(offset)),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Reg(reg) => write!(f, "{reg}"),
            Self::Imm(imm) => write!(f, "#{imm:#x}"),
            Self::Extended {
                reg,
                extend,
                amount,
            } => {
                if extend.is_identity() && amount == 0 {
                    write!(f, "{reg}")
                } else if amount == 0 {
                    write!(f, "{reg}, {}", extend.mnemonic())
                } else {
                    write!(f, "{reg}, {} #{amount}", extend.mnemonic())
                }
            }
            Self::Mem(mem) => write!(f, "{mem}"),
            Self::Label(offset) => write!(f, ".{:+}", offset),
        }
    }
}

fn signed_hex(value: i64) -> String {
    if value < 0 {
        format!("-{:#x}", value.unsigned_abs())
    } else {
        format!("{value:#x}")
    }
}

/// Operation named by a decoded instruction.
///
/// Only [`Opcode::Mov`], [`Opcode::Add`], [`Opcode::Sub`], [`Opcode::Str`],
/// [`Opcode::Stur`], and [`Opcode::Svc`] have semantics in the engine; the rest
/// decode so they can be displayed and reported as unsupported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Opcode {
    /// Move register or immediate.
    Mov,
    /// Add.
    Add,
    /// Subtract.
    Sub,
    /// Store register (scaled or register offset).
    Str,
    /// Store register (unscaled signed offset).
    Stur,
    /// Supervisor call.
    Svc,
    /// Add, setting flags.
    Adds,
    /// Subtract, setting flags.
    Subs,
    /// Compare (alias of `SUBS` to the zero register).
    Cmp,
    /// Compare negative (alias of `ADDS` to the zero register).
    Cmn,
    /// Bitwise AND.
    And,
    /// Bitwise AND, setting flags.
    Ands,
    /// Bitwise inclusive OR.
    Orr,
    /// Bitwise exclusive OR.
    Eor,
    /// Load register.
    Ldr,
    /// Load register (unscaled signed offset).
    Ldur,
    /// Branch.
    B,
    /// Branch with link.
    Bl,
    /// Return from subroutine.
    Ret,
    /// No operation.
    Nop,
}

impl Opcode {
    /// Assembler mnemonic of the opcode.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Mov => "mov",
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Str => "str",
            Self::Stur => "stur",
            Self::Svc => "svc",
            Self::Adds => "adds",
            Self::Subs => "subs",
            Self::Cmp => "cmp",
            Self::Cmn => "cmn",
            Self::And => "and",
            Self::Ands => "ands",
            Self::Orr => "orr",
            Self::Eor => "eor",
            Self::Ldr => "ldr",
            Self::Ldur => "ldur",
            Self::B => "b",
            Self::Bl => "bl",
            Self::Ret => "ret",
            Self::Nop => "nop",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// A decoded instruction: operation plus ordered operands.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Instruction {
    /// Raw 32-bit encoding.
    pub raw: u32,
    /// Operation.
    pub op: Opcode,
    /// Operands in assembler order.
    pub operands: Vec<Operand>,
}

impl Instruction {
    /// Creates an instruction from its parts.
    pub const fn new(raw: u32, op: Opcode, operands: Vec<Operand>) -> Self {
        Self { raw, op, operands }
    }

    /// Returns the operand at `idx`, if present.
    pub fn operand(&self, idx: usize) -> Option<&Operand> {
        self.operands.get(idx)
    }
}

impl fmt::Display for Instruction {
    /// Formats the instruction in lower-case assembler syntax, e.g. `add x2, x1, #0x3`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.op.mnemonic())?;
        for (i, operand) in self.operands.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{sep}{operand}")?;
        }
        Ok(())
    }
}
