//! # Step Engine Tests
//!
//! Tests for the fetch-decode-execute cycle: program counter advance, trace
//! recording, statistics, and program loading.

use armstep_core::Cpu;
use armstep_core::config::Config;
use armstep_core::core::Status;
use armstep_core::isa::Opcode;

use crate::common::encode::{self, add_imm, movz, svc};
use crate::common::harness::TestContext;

#[test]
fn test_fresh_cpu_state() {
    let cpu = Cpu::new(&Config::default());
    assert_eq!(cpu.pc(), 0);
    assert_eq!(cpu.status(), &Status::Running);
    assert!(cpu.trace().is_empty());
    assert_eq!(cpu.memory().size(), 2048);
    assert!(cpu.regs().slots().iter().all(|&v| v == 0));
}

#[test]
fn test_step_advances_pc_by_four() {
    let mut ctx = TestContext::new().load_program(&[movz(0, 1), movz(1, 2), movz(2, 3)]);
    for expected in [4, 8, 12] {
        ctx.step().unwrap();
        assert_eq!(ctx.cpu.pc(), expected);
    }
    assert_eq!(ctx.get_reg(0), 1);
    assert_eq!(ctx.get_reg(1), 2);
    assert_eq!(ctx.get_reg(2), 3);
}

#[test]
fn test_trace_records_each_retired_instruction() {
    let mut ctx = TestContext::new().load_program(&[movz(1, 5), add_imm(2, 1, 3)]);
    ctx.step_n(2);
    assert_eq!(ctx.cpu.trace(), ["mov x1, #0x5", "add x2, x1, #0x3"]);
}

#[test]
fn test_stats_track_retired_opcodes() {
    let mut ctx =
        TestContext::new().load_program(&[movz(0, 1), add_imm(0, 0, 1), add_imm(0, 0, 1)]);
    ctx.step_n(3);

    let stats = ctx.cpu.stats();
    assert_eq!(stats.instructions_retired, 3);
    assert_eq!(stats.count(Opcode::Mov), 1);
    assert_eq!(stats.count(Opcode::Add), 2);
}

#[test]
fn test_unknown_syscall_retires_and_continues() {
    let mut ctx = TestContext::new().load_program(&[movz(16, 4), svc(0x80), movz(0, 9)]);
    ctx.step_n(3);
    assert_eq!(ctx.get_reg(0), 9);
    assert_eq!(ctx.cpu.stats().unknown_syscalls, 1);
    assert_eq!(ctx.cpu.trace()[1], "svc #0x80");
}

#[test]
fn test_fetch_decode_does_not_execute() {
    let ctx = TestContext::new().load_program(&[movz(0, 7)]);
    let inst = ctx.cpu.fetch_decode(0).unwrap();
    assert_eq!(inst.op, Opcode::Mov);
    assert_eq!(ctx.get_reg(0), 0);
    assert_eq!(ctx.cpu.pc(), 0);
    assert_eq!(ctx.cpu.current_instruction().unwrap(), inst);
}

#[test]
fn test_load_returns_copied_bytes() {
    let mut cpu = Cpu::new(&Config::default());
    let program = encode::program(&[movz(0, 1), movz(1, 1)]);
    assert_eq!(cpu.load(&program), 8);
    assert_eq!(cpu.memory().read_u32(4).unwrap(), movz(1, 1));
}

#[test]
fn test_load_truncates_oversized_program() {
    let mut config = Config::default();
    config.memory.size = 8;
    let mut cpu = Cpu::new(&config);
    let program = encode::program(&[movz(0, 1), movz(0, 2), movz(0, 3)]);
    assert_eq!(cpu.load(&program), 8);
}

#[test]
fn test_byte_accessors_honour_policy() {
    let mut ctx = TestContext::new();
    ctx.cpu.write_byte(10, 0x41).unwrap();
    assert_eq!(ctx.cpu.read_byte(10).unwrap(), 0x41);
    assert!(ctx.cpu.read_byte(4096).is_err());
    assert!(ctx.cpu.write_byte(4096, 1).is_err());

    let mut ctx =
        TestContext::with_memory(16, armstep_core::config::OutOfBoundsPolicy::Ignore);
    assert_eq!(ctx.cpu.read_byte(4096).unwrap(), 0);
    assert!(ctx.cpu.write_byte(4096, 1).is_ok());
}
