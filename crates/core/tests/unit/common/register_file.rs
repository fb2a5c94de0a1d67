//! # Register File Tests
//!
//! Tests for slot access, the zero registers, the 32-bit views, and the
//! stack pointer.

use armstep_core::common::RegisterFile;
use armstep_core::isa::Reg;

#[test]
fn test_register_file_starts_zeroed() {
    let regs = RegisterFile::new();
    assert_eq!(regs.slots().len(), 32);
    assert!(regs.slots().iter().all(|&v| v == 0));
}

#[test]
fn test_slot_31_is_stack_pointer() {
    let mut regs = RegisterFile::new();
    regs.write(31, 0x7F0);
    assert_eq!(regs.sp(), 0x7F0);
    assert_eq!(regs.read_reg(Reg::Sp), 0x7F0);

    regs.set_sp(0x100);
    assert_eq!(regs.read(31), 0x100);
}

#[test]
fn test_zero_register_reads_zero_and_discards_writes() {
    let mut regs = RegisterFile::new();
    regs.set_sp(0x1234);
    regs.write_reg(Reg::Xzr, 0xFFFF);
    regs.write_reg(Reg::Wzr, 0xFFFF);

    assert_eq!(regs.read_reg(Reg::Xzr), 0);
    assert_eq!(regs.read_reg(Reg::Wzr), 0);
    assert_eq!(regs.sp(), 0x1234, "zero register must not alias SP");
}

#[test]
fn test_w_view_reads_low_half() {
    let mut regs = RegisterFile::new();
    regs.write(3, 0xAAAA_BBBB_CCCC_DDDD);
    assert_eq!(regs.read_reg(Reg::W(3)), 0xCCCC_DDDD);
    assert_eq!(regs.read_reg(Reg::X(3)), 0xAAAA_BBBB_CCCC_DDDD);
}

#[test]
fn test_w_view_write_zero_extends() {
    let mut regs = RegisterFile::new();
    regs.write(4, u64::MAX);
    regs.write_reg(Reg::W(4), 0x1_2345_6789);
    assert_eq!(regs.read(4), 0x2345_6789);
}

#[test]
fn test_wsp_view() {
    let mut regs = RegisterFile::new();
    regs.write_reg(Reg::Wsp, 0xFFFF_FFFF_0000_0010);
    assert_eq!(regs.sp(), 0x10);
    regs.set_sp(0x1_0000_0020);
    assert_eq!(regs.read_reg(Reg::Wsp), 0x20);
}

#[test]
fn test_out_of_range_slot_reads_zero() {
    let mut regs = RegisterFile::new();
    regs.write(32, 99);
    assert_eq!(regs.read(32), 0);
    assert_eq!(regs, RegisterFile::new());
}
