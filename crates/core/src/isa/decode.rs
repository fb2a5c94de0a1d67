//! A64 Instruction Decoder.
//!
//! This module turns 32-bit little-endian A64 words into structured
//! [`Instruction`] values. It provides:
//! 1. **Decoder Seam:** The [`Decoder`] trait the engine is generic over, with
//!    [`A64Decoder`] as the production implementation.
//! 2. **Class Dispatch:** Recognition of the encoding classes the emulator knows
//!    (add/subtract, logical, move wide, load/store, branches, system).
//! 3. **Alias Resolution:** Preferred assembler aliases (`mov`, `cmp`, `cmn`) so
//!    that instructions display and execute the way they are written.
//! 4. **Immediate Expansion:** Sign extension of offsets and the bitmask
//!    immediates of logical instructions.

use crate::common::error::DecodeError;
use crate::isa::abi::REG_LR;
use crate::isa::instruction::{Extend, Instruction, MemOperand, Opcode, Operand, Reg};
use crate::isa::opcodes::{
    ADD_SUB_EXTENDED_MASK, ADD_SUB_EXTENDED_VALUE, ADD_SUB_IMM_MASK, ADD_SUB_IMM_VALUE,
    ADD_SUB_SHIFTED_MASK, ADD_SUB_SHIFTED_VALUE, BRANCH_IMM_MASK, BRANCH_IMM_VALUE,
    IMM9_POST_INDEX, IMM9_PRE_INDEX, IMM9_UNSCALED, LDST_IMM9_MASK, LDST_IMM9_VALUE,
    LDST_REG_MASK, LDST_REG_VALUE, LDST_SIMD_BIT, LDST_UIMM_MASK, LDST_UIMM_VALUE,
    LOGICAL_IMM_MASK, LOGICAL_IMM_VALUE, LOGICAL_SHIFTED_MASK, LOGICAL_SHIFTED_VALUE,
    MOVE_WIDE_MASK, MOVE_WIDE_MOVN, MOVE_WIDE_MOVZ, MOVE_WIDE_VALUE, NOP, RET_MASK, RET_VALUE,
    SVC_MASK, SVC_VALUE,
};

/// Total width of an A64 instruction in bits.
const INSTRUCTION_WIDTH: u32 = 32;

/// Mask for a 5-bit register field.
const REG_MASK: u32 = 0x1F;

/// Register number that encodes `SP` or the zero register.
const REG_31: u32 = 31;

/// Load/store `size` value for doubleword accesses.
const SIZE_DOUBLEWORD: u32 = 0b11;

/// Load/store `size` value for word accesses.
const SIZE_WORD: u32 = 0b10;

/// Load/store `opc` value for a store.
const LDST_OPC_STORE: u32 = 0b00;

/// Load/store `opc` value for a zero-extending load.
const LDST_OPC_LOAD: u32 = 0b01;

/// Field accessors shared by every A64 encoding class.
trait EncodingFields {
    /// Destination / transfer register (bits 0-4).
    fn rd(self) -> u32;
    /// First source / base register (bits 5-9).
    fn rn(self) -> u32;
    /// Second source / index register (bits 16-20).
    fn rm(self) -> u32;
    /// `sf` bit (bit 31): 64-bit operation when set.
    fn sf(self) -> bool;
    /// Extracts `width` bits starting at `lsb`.
    fn field(self, lsb: u32, width: u32) -> u32;
}

impl EncodingFields for u32 {
    fn rd(self) -> u32 {
        self & REG_MASK
    }

    fn rn(self) -> u32 {
        (self >> 5) & REG_MASK
    }

    fn rm(self) -> u32 {
        (self >> 16) & REG_MASK
    }

    fn sf(self) -> bool {
        self >> 31 == 1
    }

    fn field(self, lsb: u32, width: u32) -> u32 {
        (self >> lsb) & ((1 << width) - 1)
    }
}

/// Turns raw instruction words into structured instructions.
///
/// The engine is generic over this trait so that tests can substitute a
/// scripted decoder.
pub trait Decoder {
    /// Decodes a single 32-bit instruction word.
    ///
    /// # Arguments
    ///
    /// * `word` - The instruction word, already assembled from little-endian bytes.
    ///
    /// # Errors
    ///
    /// A [`DecodeError`] for words outside the supported encoding classes.
    fn decode(&self, word: u32) -> Result<Instruction, DecodeError>;
}

/// The production A64 decoder.
#[derive(Clone, Copy, Debug, Default)]
pub struct A64Decoder;

impl Decoder for A64Decoder {
    fn decode(&self, word: u32) -> Result<Instruction, DecodeError> {
        decode(word)
    }
}

/// Decodes four little-endian bytes as one instruction.
///
/// # Errors
///
/// Same as [`decode`].
pub fn decode_bytes(bytes: [u8; 4]) -> Result<Instruction, DecodeError> {
    decode(u32::from_le_bytes(bytes))
}

/// Decodes an A64 instruction word.
///
/// # Arguments
///
/// * `word` - The 32-bit instruction encoding to decode.
///
/// # Errors
///
/// [`DecodeError::Unallocated`] for reserved field combinations inside a known
/// class, or [`DecodeError::Unrecognized`] for any other word.
pub fn decode(word: u32) -> Result<Instruction, DecodeError> {
    if word & SVC_MASK == SVC_VALUE {
        let imm16 = word.field(5, 16);
        return Ok(Instruction::new(
            word,
            Opcode::Svc,
            vec![Operand::Imm(u64::from(imm16))],
        ));
    }
    if word == NOP {
        return Ok(Instruction::new(word, Opcode::Nop, Vec::new()));
    }
    if word & RET_MASK == RET_VALUE {
        let operands = if word.rn() as usize == REG_LR {
            Vec::new()
        } else {
            vec![Operand::Reg(Reg::zr(word.rn(), true))]
        };
        return Ok(Instruction::new(word, Opcode::Ret, operands));
    }
    if word & BRANCH_IMM_MASK == BRANCH_IMM_VALUE {
        return Ok(decode_branch_imm(word));
    }
    if word & ADD_SUB_IMM_MASK == ADD_SUB_IMM_VALUE {
        return Ok(decode_add_sub_imm(word));
    }
    if word & ADD_SUB_SHIFTED_MASK == ADD_SUB_SHIFTED_VALUE {
        return decode_add_sub_shifted(word);
    }
    if word & ADD_SUB_EXTENDED_MASK == ADD_SUB_EXTENDED_VALUE {
        return decode_add_sub_extended(word);
    }
    if word & LOGICAL_SHIFTED_MASK == LOGICAL_SHIFTED_VALUE {
        return decode_logical_shifted(word);
    }
    if word & LOGICAL_IMM_MASK == LOGICAL_IMM_VALUE {
        return decode_logical_imm(word);
    }
    if word & MOVE_WIDE_MASK == MOVE_WIDE_VALUE {
        return decode_move_wide(word);
    }
    if word & LDST_SIMD_BIT == 0 {
        if word & LDST_UIMM_MASK == LDST_UIMM_VALUE {
            return decode_load_store_uimm(word);
        }
        if word & LDST_REG_MASK == LDST_REG_VALUE {
            return decode_load_store_reg(word);
        }
        if word & LDST_IMM9_MASK == LDST_IMM9_VALUE {
            return decode_load_store_imm9(word);
        }
    }
    Err(DecodeError::Unrecognized(word))
}

/// `B`/`BL label`: `op 00101 imm26`, offset in words.
fn decode_branch_imm(word: u32) -> Instruction {
    let op = if word >> 31 == 1 { Opcode::Bl } else { Opcode::B };
    let offset = sign_extend(word.field(0, 26), 26) << 2;
    Instruction::new(word, op, vec![Operand::Label(offset)])
}

/// Add/subtract (immediate), including the `mov` (to/from SP), `cmp`, and `cmn` aliases.
fn decode_add_sub_imm(word: u32) -> Instruction {
    let is_64 = word.sf();
    let is_sub = word.field(30, 1) == 1;
    let set_flags = word.field(29, 1) == 1;
    let shift = word.field(22, 1) * 12;
    let imm = u64::from(word.field(10, 12)) << shift;

    let rn = Reg::sp(word.rn(), is_64);
    let rd = if set_flags {
        Reg::zr(word.rd(), is_64)
    } else {
        Reg::sp(word.rd(), is_64)
    };

    if !set_flags && !is_sub && imm == 0 && (word.rd() == REG_31 || word.rn() == REG_31) {
        return Instruction::new(word, Opcode::Mov, vec![Operand::Reg(rd), Operand::Reg(rn)]);
    }
    if set_flags && word.rd() == REG_31 {
        let op = if is_sub { Opcode::Cmp } else { Opcode::Cmn };
        return Instruction::new(word, op, vec![Operand::Reg(rn), Operand::Imm(imm)]);
    }

    let op = match (is_sub, set_flags) {
        (false, false) => Opcode::Add,
        (true, false) => Opcode::Sub,
        (false, true) => Opcode::Adds,
        (true, true) => Opcode::Subs,
    };
    Instruction::new(
        word,
        op,
        vec![Operand::Reg(rd), Operand::Reg(rn), Operand::Imm(imm)],
    )
}

/// Add/subtract (shifted register). Register 31 is the zero register throughout.
fn decode_add_sub_shifted(word: u32) -> Result<Instruction, DecodeError> {
    let is_64 = word.sf();
    let is_sub = word.field(30, 1) == 1;
    let set_flags = word.field(29, 1) == 1;
    let imm6 = word.field(10, 6);

    let extend = match word.field(22, 2) {
        0 => Extend::Lsl,
        1 => Extend::Lsr,
        2 => Extend::Asr,
        _ => return Err(DecodeError::Unallocated(word)),
    };
    if !is_64 && imm6 >= 32 {
        return Err(DecodeError::Unallocated(word));
    }

    let rd = Reg::zr(word.rd(), is_64);
    let rn = Reg::zr(word.rn(), is_64);
    let rm = Operand::Extended {
        reg: Reg::zr(word.rm(), is_64),
        extend,
        amount: imm6 as u8,
    };

    Ok(add_sub_register(word, is_sub, set_flags, rd, rn, rm))
}

/// Add/subtract (extended register). `Rd` and `Rn` may name the stack pointer.
fn decode_add_sub_extended(word: u32) -> Result<Instruction, DecodeError> {
    let is_64 = word.sf();
    let is_sub = word.field(30, 1) == 1;
    let set_flags = word.field(29, 1) == 1;
    let option = word.field(13, 3);
    let imm3 = word.field(10, 3);

    if word.field(22, 2) != 0 || imm3 > 4 {
        return Err(DecodeError::Unallocated(word));
    }

    let rd = if set_flags {
        Reg::zr(word.rd(), is_64)
    } else {
        Reg::sp(word.rd(), is_64)
    };
    let rn = Reg::sp(word.rn(), is_64);
    let rm_is_64 = is_64 && option & 0b011 == 0b011;

    // UXTX (or UXTW for 32-bit) next to SP is written as LSL.
    let lsl_option = if is_64 { 0b011 } else { 0b010 };
    let touches_sp = word.rn() == REG_31 || (!set_flags && word.rd() == REG_31);
    let extend = if option == lsl_option && touches_sp {
        Extend::Lsl
    } else {
        Extend::from_option(option)
    };

    let rm = Operand::Extended {
        reg: Reg::zr(word.rm(), rm_is_64),
        extend,
        amount: imm3 as u8,
    };

    Ok(add_sub_register(word, is_sub, set_flags, rd, rn, rm))
}

fn add_sub_register(
    word: u32,
    is_sub: bool,
    set_flags: bool,
    rd: Reg,
    rn: Reg,
    rm: Operand,
) -> Instruction {
    if set_flags && word.rd() == REG_31 {
        let op = if is_sub { Opcode::Cmp } else { Opcode::Cmn };
        return Instruction::new(word, op, vec![Operand::Reg(rn), rm]);
    }
    let op = match (is_sub, set_flags) {
        (false, false) => Opcode::Add,
        (true, false) => Opcode::Sub,
        (false, true) => Opcode::Adds,
        (true, true) => Opcode::Subs,
    };
    Instruction::new(word, op, vec![Operand::Reg(rd), Operand::Reg(rn), rm])
}

/// Logical (shifted register). Only the non-inverting forms (`N == 0`) are decoded.
fn decode_logical_shifted(word: u32) -> Result<Instruction, DecodeError> {
    let is_64 = word.sf();
    let imm6 = word.field(10, 6);
    let shift = word.field(22, 2);

    if !is_64 && imm6 >= 32 {
        return Err(DecodeError::Unallocated(word));
    }
    if word.field(21, 1) == 1 {
        return Err(DecodeError::Unrecognized(word));
    }

    let op = logical_opcode(word.field(29, 2));
    let rd = Reg::zr(word.rd(), is_64);
    let rm = Reg::zr(word.rm(), is_64);

    if op == Opcode::Orr && shift == 0 && imm6 == 0 && word.rn() == REG_31 {
        return Ok(Instruction::new(
            word,
            Opcode::Mov,
            vec![Operand::Reg(rd), Operand::Reg(rm)],
        ));
    }

    let extend = match shift {
        0 => Extend::Lsl,
        1 => Extend::Lsr,
        2 => Extend::Asr,
        _ => Extend::Ror,
    };
    Ok(Instruction::new(
        word,
        op,
        vec![
            Operand::Reg(rd),
            Operand::Reg(Reg::zr(word.rn(), is_64)),
            Operand::Extended {
                reg: rm,
                extend,
                amount: imm6 as u8,
            },
        ],
    ))
}

/// Logical (immediate), including the `mov` (bitmask immediate) alias.
fn decode_logical_imm(word: u32) -> Result<Instruction, DecodeError> {
    let is_64 = word.sf();
    let n = word.field(22, 1);
    if !is_64 && n == 1 {
        return Err(DecodeError::Unallocated(word));
    }

    let imm = decode_bit_masks(n, word.field(10, 6), word.field(16, 6), is_64)
        .ok_or(DecodeError::Unallocated(word))?;

    let op = logical_opcode(word.field(29, 2));
    let rd = if op == Opcode::Ands {
        Reg::zr(word.rd(), is_64)
    } else {
        Reg::sp(word.rd(), is_64)
    };

    if op == Opcode::Orr && word.rn() == REG_31 {
        return Ok(Instruction::new(
            word,
            Opcode::Mov,
            vec![Operand::Reg(rd), Operand::Imm(imm)],
        ));
    }

    Ok(Instruction::new(
        word,
        op,
        vec![
            Operand::Reg(rd),
            Operand::Reg(Reg::zr(word.rn(), is_64)),
            Operand::Imm(imm),
        ],
    ))
}

const fn logical_opcode(opc: u32) -> Opcode {
    match opc & 0b11 {
        0b00 => Opcode::And,
        0b01 => Opcode::Orr,
        0b10 => Opcode::Eor,
        _ => Opcode::Ands,
    }
}

/// Move wide (immediate). `MOVZ` and `MOVN` decode as `mov` with the final value;
/// `MOVK` is not decoded.
fn decode_move_wide(word: u32) -> Result<Instruction, DecodeError> {
    let is_64 = word.sf();
    let opc = word.field(29, 2);
    let hw = word.field(21, 2);

    if !is_64 && hw >= 2 {
        return Err(DecodeError::Unallocated(word));
    }

    let shifted = u64::from(word.field(5, 16)) << (hw * 16);
    let value = match opc {
        MOVE_WIDE_MOVZ => shifted,
        MOVE_WIDE_MOVN => !shifted,
        0b01 => return Err(DecodeError::Unallocated(word)),
        _ => return Err(DecodeError::Unrecognized(word)),
    };
    let value = if is_64 { value } else { value & 0xFFFF_FFFF };

    Ok(Instruction::new(
        word,
        Opcode::Mov,
        vec![Operand::Reg(Reg::zr(word.rd(), is_64)), Operand::Imm(value)],
    ))
}

/// Access width and direction shared by the load/store classes.
struct Access {
    is_64: bool,
    is_store: bool,
    scale: u32,
}

/// Accepts the doubleword and word, store and zero-extending load forms.
fn load_store_access(word: u32) -> Result<Access, DecodeError> {
    let size = word.field(30, 2);
    let opc = word.field(22, 2);
    let is_64 = match size {
        SIZE_DOUBLEWORD => true,
        SIZE_WORD => false,
        _ => return Err(DecodeError::Unrecognized(word)),
    };
    let is_store = match opc {
        LDST_OPC_STORE => true,
        LDST_OPC_LOAD => false,
        _ => return Err(DecodeError::Unrecognized(word)),
    };
    Ok(Access {
        is_64,
        is_store,
        scale: size,
    })
}

/// Load/store register (unsigned immediate): `[Xn|SP{, #pimm}]`.
fn decode_load_store_uimm(word: u32) -> Result<Instruction, DecodeError> {
    let access = load_store_access(word)?;
    let base = Reg::sp(word.rn(), true);
    let offset = i64::from(word.field(10, 12)) << access.scale;

    let mem = if offset == 0 {
        MemOperand::Base { base }
    } else {
        MemOperand::Offset { base, offset }
    };
    let op = if access.is_store { Opcode::Str } else { Opcode::Ldr };
    Ok(load_store(word, op, access.is_64, mem))
}

/// Load/store register (unscaled, pre-index, and post-index `imm9` forms).
fn decode_load_store_imm9(word: u32) -> Result<Instruction, DecodeError> {
    let access = load_store_access(word)?;
    let base = Reg::sp(word.rn(), true);
    let offset = sign_extend(word.field(12, 9), 9);

    let (op, mem) = match word.field(10, 2) {
        IMM9_UNSCALED => {
            let op = if access.is_store {
                Opcode::Stur
            } else {
                Opcode::Ldur
            };
            let mem = if offset == 0 {
                MemOperand::Base { base }
            } else {
                MemOperand::Offset { base, offset }
            };
            (op, mem)
        }
        IMM9_POST_INDEX => (
            indexed_opcode(access.is_store),
            MemOperand::PostIndex { base, offset },
        ),
        IMM9_PRE_INDEX => (
            indexed_opcode(access.is_store),
            MemOperand::PreIndex { base, offset },
        ),
        // Unprivileged STTR/LDTR.
        _ => return Err(DecodeError::Unrecognized(word)),
    };
    Ok(load_store(word, op, access.is_64, mem))
}

/// Load/store register (register offset): `[Xn|SP, Rm{, extend {#amount}}]`.
fn decode_load_store_reg(word: u32) -> Result<Instruction, DecodeError> {
    let access = load_store_access(word)?;
    let option = word.field(13, 3);
    if option & 0b010 == 0 {
        return Err(DecodeError::Unallocated(word));
    }

    let amount = if word.field(12, 1) == 1 {
        access.scale as u8
    } else {
        0
    };
    let extend = if option == 0b011 {
        Extend::Lsl
    } else {
        Extend::from_option(option)
    };
    let mem = MemOperand::Indexed {
        base: Reg::sp(word.rn(), true),
        index: Reg::zr(word.rm(), option & 0b001 == 1),
        extend,
        amount,
    };
    Ok(load_store(word, indexed_opcode(access.is_store), access.is_64, mem))
}

const fn indexed_opcode(is_store: bool) -> Opcode {
    if is_store { Opcode::Str } else { Opcode::Ldr }
}

fn load_store(word: u32, op: Opcode, is_64: bool, mem: MemOperand) -> Instruction {
    Instruction::new(
        word,
        op,
        vec![Operand::Reg(Reg::zr(word.rd(), is_64)), Operand::Mem(mem)],
    )
}

/// Expands the `N:immr:imms` bitmask immediate of logical instructions.
///
/// Returns `None` for the reserved encodings (element size below 2 bits, or an
/// all-ones element).
fn decode_bit_masks(n: u32, imms: u32, immr: u32, is_64: bool) -> Option<u64> {
    let combined = (n << 6) | (!imms & 0x3F);
    if combined == 0 {
        return None;
    }
    let len = combined.ilog2();
    if len < 1 || (!is_64 && len > 5) {
        return None;
    }

    let esize = 1_u32 << len;
    let levels = esize - 1;
    let s = imms & levels;
    let r = immr & levels;
    if s == levels {
        return None;
    }

    let welem = (1_u64 << (s + 1)) - 1;
    let emask = if esize == 64 {
        u64::MAX
    } else {
        (1_u64 << esize) - 1
    };
    let elem = if r == 0 {
        welem
    } else {
        ((welem >> r) | (welem << (esize - r))) & emask
    };

    let mut value = elem;
    let mut width = esize;
    while width < 64 {
        value |= value << width;
        width *= 2;
    }
    Some(if is_64 { value } else { value & 0xFFFF_FFFF })
}

/// Sign extends a value of `bits` width to a 64-bit signed integer.
///
/// # Arguments
///
/// * `val` - The value to extend.
/// * `bits` - The number of valid bits in `val`.
const fn sign_extend(val: u32, bits: u32) -> i64 {
    let shift = INSTRUCTION_WIDTH - bits;
    (((val << shift) as i32) >> shift) as i64
}
