//! # General-Purpose Register Tests
//!
//! Tests for the AArch64 register storage: `X0`-`X30` plus the stack pointer slot.

use armstep_core::core::arch::gpr::Gpr;

#[test]
fn test_gpr_new_initializes_to_zero() {
    let gpr = Gpr::new();
    for i in 0..32 {
        assert_eq!(gpr.read(i), 0);
    }
}

#[test]
fn test_gpr_slot_0_is_writable() {
    let mut gpr = Gpr::new();
    gpr.write(0, 0xDEAD_BEEF);
    assert_eq!(gpr.read(0), 0xDEAD_BEEF);
}

#[test]
fn test_gpr_write_all_slots() {
    let mut gpr = Gpr::new();
    for i in 0..32 {
        let value = (i as u64) << 32 | (i as u64);
        gpr.write(i, value);
    }
    for i in 0..32 {
        assert_eq!(gpr.read(i), (i as u64) << 32 | (i as u64));
    }
}

#[test]
fn test_gpr_slots_are_independent() {
    let mut gpr = Gpr::new();
    gpr.write(30, u64::MAX);
    assert_eq!(gpr.read(29), 0);
    assert_eq!(gpr.read(31), 0);
    assert_eq!(gpr.slots()[30], u64::MAX);
}

#[test]
fn test_gpr_out_of_range_is_ignored() {
    let mut gpr = Gpr::new();
    gpr.write(100, 5);
    assert_eq!(gpr.read(100), 0);
    assert_eq!(gpr, Gpr::new());
}
