//! # A64 Decoder Tests
//!
//! Tests for every supported encoding class, checked through the rendered
//! instruction text, plus rejection of unrecognized and unallocated words.

use armstep_core::common::DecodeError;
use armstep_core::isa::decode::{self, A64Decoder, Decoder, decode_bytes};
use armstep_core::isa::{Extend, MemOperand, Opcode, Operand, Reg};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case::movz(0xD280_00A0, "mov x0, #0x5")]
#[case::movz_w(0x5280_00A0, "mov w0, #0x5")]
#[case::movn(0x9280_0000, "mov x0, #0xffffffffffffffff")]
#[case::orr_bitmask(0xB200_F3E0, "mov x0, #0x5555555555555555")]
#[case::orr_register(0xAA00_03E1, "mov x1, x0")]
#[case::mov_from_sp(0x9100_03FD, "mov x29, sp")]
#[case::add_imm(0x9100_0C22, "add x2, x1, #0x3")]
#[case::add_imm_w(0x1100_0420, "add w0, w1, #0x1")]
#[case::add_sp(0x9100_43FF, "add sp, sp, #0x10")]
#[case::sub_imm(0xD100_0422, "sub x2, x1, #0x1")]
#[case::cmp_imm(0xF100_041F, "cmp x0, #0x1")]
#[case::add_shifted(0x8B01_0002, "add x2, x0, x1")]
#[case::add_shifted_lsl(0x8B01_0802, "add x2, x0, x1, lsl #2")]
#[case::sub_shifted(0xCB01_0002, "sub x2, x0, x1")]
#[case::add_extended_uxtx(0x8B21_6002, "add x2, x0, x1")]
#[case::add_extended_uxtw(0x8B21_4002, "add x2, x0, w1, uxtw")]
#[case::and_register(0x8A02_0020, "and x0, x1, x2")]
#[case::str_base(0xF900_0020, "str x0, [x1]")]
#[case::str_uimm(0xF900_0420, "str x0, [x1, #0x8]")]
#[case::str_w(0xB900_0020, "str w0, [x1]")]
#[case::str_reg(0xF822_6820, "str x0, [x1, x2]")]
#[case::str_reg_scaled(0xF822_7820, "str x0, [x1, x2, lsl #3]")]
#[case::str_reg_uxtw(0xF822_4820, "str x0, [x1, w2, uxtw]")]
#[case::stur(0xF81F_8020, "stur x0, [x1, #-0x8]")]
#[case::str_pre(0xF81F_0FE0, "str x0, [sp, #-0x10]!")]
#[case::str_post(0xF800_8420, "str x0, [x1], #0x8")]
#[case::ldr(0xF940_0020, "ldr x0, [x1]")]
#[case::svc(0xD400_0001, "svc #0x0")]
#[case::svc_80(0xD400_1001, "svc #0x80")]
#[case::nop(0xD503_201F, "nop")]
#[case::ret(0xD65F_03C0, "ret")]
#[case::branch(0x1400_0002, "b .+8")]
#[case::branch_link(0x9400_0002, "bl .+8")]
fn test_decode_renders(#[case] word: u32, #[case] expected: &str) {
    let inst = decode::decode(word).unwrap();
    assert_eq!(inst.to_string(), expected);
    assert_eq!(inst.raw, word);
}

#[rstest]
#[case::zero(0x0000_0000)]
#[case::all_ones(0xFFFF_FFFF)]
#[case::movk(0xF280_0020)]
fn test_unrecognized(#[case] word: u32) {
    assert_eq!(decode::decode(word), Err(DecodeError::Unrecognized(word)));
}

#[rstest]
#[case::shift_ror_on_add(0x8BC1_0002)]
#[case::extend_amount_above_four(0x8B21_7402)]
#[case::movz_w_high_halfword(0x52C0_0000)]
#[case::bitmask_all_ones(0xB200_FC00)]
#[case::bitmask_one_bit_element(0xB200_FBE0)]
#[case::bitmask_all_ones_64bit_element(0xB240_FFE0)]
#[case::register_offset_uxtb(0xF820_0820)]
fn test_unallocated(#[case] word: u32) {
    assert_eq!(decode::decode(word), Err(DecodeError::Unallocated(word)));
}

#[test]
fn test_decode_bytes_is_little_endian() {
    let inst = decode_bytes([0xA0, 0x00, 0x80, 0xD2]).unwrap();
    assert_eq!(inst.to_string(), "mov x0, #0x5");
}

#[test]
fn test_decoder_trait_matches_free_function() {
    for word in [0xD280_00A0, 0xF900_0420, 0x0000_0000] {
        assert_eq!(A64Decoder.decode(word), decode::decode(word));
    }
}

#[test]
fn test_store_operands_are_structured() {
    let inst = decode::decode(0xF822_7820).unwrap();
    assert_eq!(inst.op, Opcode::Str);
    assert_eq!(inst.operand(0), Some(&Operand::Reg(Reg::X(0))));
    assert_eq!(
        inst.operand(1),
        Some(&Operand::Mem(MemOperand::Indexed {
            base: Reg::X(1),
            index: Reg::X(2),
            extend: Extend::Lsl,
            amount: 3,
        }))
    );
}

#[test]
fn test_extended_operand_exposes_register() {
    let inst = decode::decode(0x8B21_4002).unwrap();
    match inst.operand(2) {
        Some(&Operand::Extended {
            reg,
            extend,
            amount,
        }) => {
            assert_eq!(reg, Reg::W(1));
            assert_eq!(extend, Extend::Uxtw);
            assert_eq!(amount, 0);
        }
        other => panic!("expected extended operand, got {other:?}"),
    }
}

#[test]
fn test_register_31_resolution() {
    // Store value register 31 is XZR; base register 31 is SP.
    let inst = decode::decode(0xF900_03FF).unwrap();
    assert_eq!(inst.operand(0), Some(&Operand::Reg(Reg::Xzr)));
    assert_eq!(
        inst.operand(1),
        Some(&Operand::Mem(MemOperand::Base { base: Reg::Sp }))
    );
}

#[test]
fn test_stur_offset_is_sign_extended() {
    let inst = decode::decode(0xF81F_8020).unwrap();
    assert_eq!(inst.op, Opcode::Stur);
    assert_eq!(
        inst.operand(1),
        Some(&Operand::Mem(MemOperand::Offset {
            base: Reg::X(1),
            offset: -8,
        }))
    );
}

#[test]
fn test_ret_to_other_register_keeps_operand() {
    let inst = decode::decode(0xD65F_0020).unwrap();
    assert_eq!(inst.to_string(), "ret x1");
}
