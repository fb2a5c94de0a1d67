//! A64 instruction encoders for building test programs.
//!
//! Register arguments are 5-bit register numbers; 31 means `SP` or the zero
//! register depending on the field, exactly as in the encoding.

/// `NOP`.
pub const NOP: u32 = 0xD503_201F;

/// `RET` (to `x30`).
pub const RET: u32 = 0xD65F_03C0;

/// Extended-register `option` values.
pub mod extend {
    pub const UXTB: u32 = 0b000;
    pub const UXTH: u32 = 0b001;
    pub const UXTW: u32 = 0b010;
    pub const UXTX: u32 = 0b011;
    pub const SXTB: u32 = 0b100;
    pub const SXTW: u32 = 0b110;
}

const fn rd_rn(rd: u32, rn: u32) -> u32 {
    (rn & 0x1F) << 5 | (rd & 0x1F)
}

/// `MOVZ Xd, #imm16` (`mov xd, #imm`).
pub const fn movz(rd: u32, imm16: u32) -> u32 {
    0xD280_0000 | (imm16 & 0xFFFF) << 5 | (rd & 0x1F)
}

/// `MOVZ Xd, #imm16, LSL #(hw * 16)`.
pub const fn movz_shifted(rd: u32, imm16: u32, hw: u32) -> u32 {
    movz(rd, imm16) | (hw & 0b11) << 21
}

/// `MOVZ Wd, #imm16`.
pub const fn movz_w(rd: u32, imm16: u32) -> u32 {
    0x5280_0000 | (imm16 & 0xFFFF) << 5 | (rd & 0x1F)
}

/// `MOVN Xd, #imm16`.
pub const fn movn(rd: u32, imm16: u32) -> u32 {
    0x9280_0000 | (imm16 & 0xFFFF) << 5 | (rd & 0x1F)
}

/// `ORR Xd, XZR, Xm` (`mov xd, xm`).
pub const fn mov_reg(rd: u32, rm: u32) -> u32 {
    0xAA00_03E0 | (rm & 0x1F) << 16 | (rd & 0x1F)
}

/// `ADD Xd|SP, Xn|SP, #imm12`.
pub const fn add_imm(rd: u32, rn: u32, imm12: u32) -> u32 {
    0x9100_0000 | (imm12 & 0xFFF) << 10 | rd_rn(rd, rn)
}

/// `ADD Xd|SP, Xn|SP, #imm12, LSL #12`.
pub const fn add_imm_lsl12(rd: u32, rn: u32, imm12: u32) -> u32 {
    add_imm(rd, rn, imm12) | 1 << 22
}

/// `ADD Wd, Wn, #imm12`.
pub const fn add_imm_w(rd: u32, rn: u32, imm12: u32) -> u32 {
    0x1100_0000 | (imm12 & 0xFFF) << 10 | rd_rn(rd, rn)
}

/// `SUB Xd|SP, Xn|SP, #imm12`.
pub const fn sub_imm(rd: u32, rn: u32, imm12: u32) -> u32 {
    0xD100_0000 | (imm12 & 0xFFF) << 10 | rd_rn(rd, rn)
}

/// `SUBS XZR, Xn, #imm12` (`cmp xn, #imm`).
pub const fn cmp_imm(rn: u32, imm12: u32) -> u32 {
    0xF100_0000 | (imm12 & 0xFFF) << 10 | rd_rn(31, rn)
}

/// `ADD Xd, Xn, Xm, <shift> #imm6` (shift: 0 LSL, 1 LSR, 2 ASR).
pub const fn add_shifted(rd: u32, rn: u32, rm: u32, shift: u32, imm6: u32) -> u32 {
    0x8B00_0000 | (shift & 0b11) << 22 | (rm & 0x1F) << 16 | (imm6 & 0x3F) << 10 | rd_rn(rd, rn)
}

/// `SUB Xd, Xn, Xm, <shift> #imm6`.
pub const fn sub_shifted(rd: u32, rn: u32, rm: u32, shift: u32, imm6: u32) -> u32 {
    add_shifted(rd, rn, rm, shift, imm6) | 1 << 30
}

/// `ADD Xd|SP, Xn|SP, Rm, <extend> #imm3`.
pub const fn add_ext(rd: u32, rn: u32, rm: u32, option: u32, imm3: u32) -> u32 {
    0x8B20_0000 | (rm & 0x1F) << 16 | (option & 0b111) << 13 | (imm3 & 0b111) << 10 | rd_rn(rd, rn)
}

/// `SUB Xd|SP, Xn|SP, Rm, <extend> #imm3`.
pub const fn sub_ext(rd: u32, rn: u32, rm: u32, option: u32, imm3: u32) -> u32 {
    add_ext(rd, rn, rm, option, imm3) | 1 << 30
}

/// `AND Xd, Xn, Xm`.
pub const fn and_reg(rd: u32, rn: u32, rm: u32) -> u32 {
    0x8A00_0000 | (rm & 0x1F) << 16 | rd_rn(rd, rn)
}

/// `STR Xt, [Xn|SP, #pimm]` with a byte offset that is a multiple of 8.
pub const fn str_imm(rt: u32, rn: u32, pimm: u32) -> u32 {
    0xF900_0000 | ((pimm / 8) & 0xFFF) << 10 | rd_rn(rt, rn)
}

/// `STR Wt, [Xn|SP, #pimm]` with a byte offset that is a multiple of 4.
pub const fn str_imm_w(rt: u32, rn: u32, pimm: u32) -> u32 {
    0xB900_0000 | ((pimm / 4) & 0xFFF) << 10 | rd_rn(rt, rn)
}

/// `LDR Xt, [Xn|SP, #pimm]` with a byte offset that is a multiple of 8.
pub const fn ldr_imm(rt: u32, rn: u32, pimm: u32) -> u32 {
    0xF940_0000 | ((pimm / 8) & 0xFFF) << 10 | rd_rn(rt, rn)
}

/// `STR Xt, [Xn|SP, Rm, <extend> {#3}]`.
pub const fn str_reg(rt: u32, rn: u32, rm: u32, option: u32, scaled: bool) -> u32 {
    0xF820_0800
        | (rm & 0x1F) << 16
        | (option & 0b111) << 13
        | (scaled as u32) << 12
        | rd_rn(rt, rn)
}

/// `STUR Xt, [Xn|SP, #simm9]`.
pub const fn stur(rt: u32, rn: u32, simm9: i32) -> u32 {
    0xF800_0000 | ((simm9 as u32) & 0x1FF) << 12 | rd_rn(rt, rn)
}

/// `STR Xt, [Xn|SP, #simm9]!`.
pub const fn str_pre(rt: u32, rn: u32, simm9: i32) -> u32 {
    stur(rt, rn, simm9) | 0b11 << 10
}

/// `STR Xt, [Xn|SP], #simm9`.
pub const fn str_post(rt: u32, rn: u32, simm9: i32) -> u32 {
    stur(rt, rn, simm9) | 0b01 << 10
}

/// `SVC #imm16`.
pub const fn svc(imm16: u32) -> u32 {
    0xD400_0001 | (imm16 & 0xFFFF) << 5
}

/// `B` with an offset in instructions.
pub const fn b(words: i32) -> u32 {
    0x1400_0000 | (words as u32 & 0x03FF_FFFF)
}

/// `BL` with an offset in instructions.
pub const fn bl(words: i32) -> u32 {
    b(words) | 1 << 31
}

/// Serializes instruction words as little-endian bytes.
pub fn program(words: &[u32]) -> Vec<u8> {
    words.iter().flat_map(|w| w.to_le_bytes()).collect()
}

/// The canonical exit sequence: `mov x0, #code; mov x16, #1; svc #0x80`.
pub const fn exit_with(code: u32) -> [u32; 3] {
    [movz(0, code), movz(16, 1), svc(0x80)]
}
