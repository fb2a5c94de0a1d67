//! A64 encoding class masks and fixed values.
//!
//! Each class is identified by `word & *_MASK == *_VALUE`. Field positions
//! follow the Arm Architecture Reference Manual encoding diagrams.

/// `SVC #imm16`: `1101 0100 000 imm16 000 01`.
pub const SVC_MASK: u32 = 0xFFE0_001F;
/// Fixed bits of `SVC`.
pub const SVC_VALUE: u32 = 0xD400_0001;

/// `NOP` (hint #0).
pub const NOP: u32 = 0xD503_201F;

/// `RET Xn`: `1101 0110 0101 1111 0000 00 Rn 00000`.
pub const RET_MASK: u32 = 0xFFFF_FC1F;
/// Fixed bits of `RET`.
pub const RET_VALUE: u32 = 0xD65F_0000;

/// Unconditional branch (immediate): `op 00101 imm26`.
pub const BRANCH_IMM_MASK: u32 = 0x7C00_0000;
/// Fixed bits of `B`/`BL`.
pub const BRANCH_IMM_VALUE: u32 = 0x1400_0000;

/// Add/subtract (immediate): `sf op S 100010 sh imm12 Rn Rd`.
pub const ADD_SUB_IMM_MASK: u32 = 0x1F80_0000;
/// Fixed bits of add/subtract (immediate).
pub const ADD_SUB_IMM_VALUE: u32 = 0x1100_0000;

/// Add/subtract (shifted register): `sf op S 01011 shift 0 Rm imm6 Rn Rd`.
pub const ADD_SUB_SHIFTED_MASK: u32 = 0x1F20_0000;
/// Fixed bits of add/subtract (shifted register).
pub const ADD_SUB_SHIFTED_VALUE: u32 = 0x0B00_0000;

/// Add/subtract (extended register): `sf op S 01011 opt 1 Rm option imm3 Rn Rd`.
pub const ADD_SUB_EXTENDED_MASK: u32 = 0x1F20_0000;
/// Fixed bits of add/subtract (extended register).
pub const ADD_SUB_EXTENDED_VALUE: u32 = 0x0B20_0000;

/// Logical (shifted register): `sf opc 01010 shift N Rm imm6 Rn Rd`.
pub const LOGICAL_SHIFTED_MASK: u32 = 0x1F00_0000;
/// Fixed bits of logical (shifted register).
pub const LOGICAL_SHIFTED_VALUE: u32 = 0x0A00_0000;

/// Logical (immediate): `sf opc 100100 N immr imms Rn Rd`.
pub const LOGICAL_IMM_MASK: u32 = 0x1F80_0000;
/// Fixed bits of logical (immediate).
pub const LOGICAL_IMM_VALUE: u32 = 0x1200_0000;

/// Move wide (immediate): `sf opc 100101 hw imm16 Rd`.
pub const MOVE_WIDE_MASK: u32 = 0x1F80_0000;
/// Fixed bits of move wide (immediate).
pub const MOVE_WIDE_VALUE: u32 = 0x1280_0000;

/// Load/store register (unsigned immediate), GPR: `size 111 0 01 opc imm12 Rn Rt`.
pub const LDST_UIMM_MASK: u32 = 0x3B00_0000;
/// Fixed bits of load/store register (unsigned immediate).
pub const LDST_UIMM_VALUE: u32 = 0x3900_0000;

/// Load/store register (imm9 forms), GPR: `size 111 0 00 opc 0 imm9 mode Rn Rt`.
pub const LDST_IMM9_MASK: u32 = 0x3B20_0000;
/// Fixed bits of load/store register (imm9 forms).
pub const LDST_IMM9_VALUE: u32 = 0x3800_0000;

/// Load/store register (register offset), GPR: `size 111 0 00 opc 1 Rm option S 10 Rn Rt`.
pub const LDST_REG_MASK: u32 = 0x3B20_0C00;
/// Fixed bits of load/store register (register offset).
pub const LDST_REG_VALUE: u32 = 0x3820_0800;

/// Bit 26 (`V`) selects SIMD&FP registers in load/store encodings.
pub const LDST_SIMD_BIT: u32 = 1 << 26;

/// `imm9` addressing mode: unscaled (`STUR`/`LDUR`).
pub const IMM9_UNSCALED: u32 = 0b00;
/// `imm9` addressing mode: post-index.
pub const IMM9_POST_INDEX: u32 = 0b01;
/// `imm9` addressing mode: pre-index.
pub const IMM9_PRE_INDEX: u32 = 0b11;

/// Move wide `opc`: `MOVN`.
pub const MOVE_WIDE_MOVN: u32 = 0b00;
/// Move wide `opc`: `MOVZ`.
pub const MOVE_WIDE_MOVZ: u32 = 0b10;
