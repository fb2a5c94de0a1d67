//! Instruction Semantics.
//!
//! This module applies decoded instructions to the architectural state. It provides:
//! 1. **Moves and Arithmetic:** `mov`, `add`, and `sub` with wrapping 64-bit results.
//! 2. **Stores:** `str` and `stur` with base, offset, and register-offset addressing.
//! 3. **Supervisor Calls:** The exit service and logging of unknown services.
//! 4. **Operand Validation:** Rejection of operand forms the engine does not support.
//!
//! Only 64-bit register views are accepted as destinations, sources, and store
//! values. A 32-bit register inside an extend operand (e.g. `uxtw`) is allowed,
//! since the extend itself produces the 64-bit value.

use tracing::warn;

use super::Cpu;
use crate::common::constants::DOUBLEWORD_SIZE;
use crate::common::error::Fault;
use crate::config::OutOfBoundsPolicy;
use crate::isa::abi::{REG_EXIT_CODE, REG_SYSCALL, SYS_EXIT};
use crate::isa::instruction::{Instruction, MemOperand, Opcode, Operand, Reg};

/// Result of executing one instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Outcome {
    /// Advance to the next instruction.
    Continue,
    /// The program requested exit with the given status.
    Exit(u64),
}

fn mismatch(pc: u64, inst: &Instruction, reason: &'static str) -> Fault {
    Fault::OperandMismatch {
        pc,
        inst: inst.clone(),
        reason,
    }
}

/// Accepts only a 64-bit register view (`Xn`, `XZR`, `SP`).
const fn x_reg(operand: &Operand) -> Option<Reg> {
    match *operand {
        Operand::Reg(reg) if reg.is_64bit() => Some(reg),
        _ => None,
    }
}

impl<D> Cpu<D> {
    /// Executes a decoded instruction located at `pc`.
    ///
    /// The program counter is not touched here; the caller advances it when
    /// the outcome is [`Outcome::Continue`]. Only `try_step` calls this, after
    /// it has checked that the engine is still running.
    pub(super) fn execute(&mut self, pc: u64, inst: &Instruction) -> Result<Outcome, Fault> {
        match inst.op {
            Opcode::Mov => self.exec_mov(pc, inst),
            Opcode::Add => self.exec_arith(pc, inst, u64::wrapping_add),
            Opcode::Sub => self.exec_arith(pc, inst, u64::wrapping_sub),
            Opcode::Str | Opcode::Stur => self.exec_store(pc, inst),
            Opcode::Svc => Ok(self.exec_svc(pc)),
            _ => Err(Fault::UnknownInstruction {
                pc,
                inst: inst.clone(),
            }),
        }
    }

    /// `mov Xd, #imm` / `mov Xd, Xn`.
    fn exec_mov(&mut self, pc: u64, inst: &Instruction) -> Result<Outcome, Fault> {
        let [dst, src] = inst.operands.as_slice() else {
            return Err(mismatch(pc, inst, "expected two operands"));
        };
        let dst = x_reg(dst)
            .ok_or_else(|| mismatch(pc, inst, "destination must be a 64-bit register"))?;
        let value = match *src {
            Operand::Imm(imm) => imm,
            Operand::Reg(reg) if reg.is_64bit() => self.regs.read_reg(reg),
            _ => {
                return Err(mismatch(
                    pc,
                    inst,
                    "source must be an immediate or a 64-bit register",
                ));
            }
        };
        self.regs.write_reg(dst, value);
        Ok(Outcome::Continue)
    }

    /// `add`/`sub Xd, Xn, #imm` and `add`/`sub Xd, Xn, Rm{, extend #amount}`.
    fn exec_arith(
        &mut self,
        pc: u64,
        inst: &Instruction,
        op: fn(u64, u64) -> u64,
    ) -> Result<Outcome, Fault> {
        let [dst, src, rhs] = inst.operands.as_slice() else {
            return Err(mismatch(pc, inst, "expected three operands"));
        };
        let dst = x_reg(dst)
            .ok_or_else(|| mismatch(pc, inst, "destination must be a 64-bit register"))?;
        let src = x_reg(src)
            .ok_or_else(|| mismatch(pc, inst, "first source must be a 64-bit register"))?;
        let rhs = match *rhs {
            Operand::Imm(imm) => imm,
            Operand::Extended {
                reg,
                extend,
                amount,
            } => extend.apply(self.regs.read_reg(reg), amount),
            _ => {
                return Err(mismatch(
                    pc,
                    inst,
                    "second source must be an immediate or an extended register",
                ));
            }
        };
        let value = op(self.regs.read_reg(src), rhs);
        self.regs.write_reg(dst, value);
        Ok(Outcome::Continue)
    }

    /// `str`/`stur Xt, <address>`: stores all eight bytes of `Xt`, little-endian.
    fn exec_store(&mut self, pc: u64, inst: &Instruction) -> Result<Outcome, Fault> {
        let [value, Operand::Mem(mem)] = inst.operands.as_slice() else {
            return Err(mismatch(pc, inst, "expected a register and a memory operand"));
        };
        let value = x_reg(value)
            .ok_or_else(|| mismatch(pc, inst, "stored value must be a 64-bit register"))?;
        let addr = self.effective_address(pc, inst, *mem)?;
        let value = self.regs.read_reg(value);

        match self.memory.write_u64(addr, value) {
            Ok(()) => self.stats.bytes_stored += DOUBLEWORD_SIZE,
            Err(source) => match self.memory.policy() {
                OutOfBoundsPolicy::Fault => {
                    return Err(Fault::Memory {
                        pc,
                        inst: inst.clone(),
                        source,
                    });
                }
                OutOfBoundsPolicy::Ignore => {
                    warn!(addr, pc, "store outside memory ignored");
                    self.stats.stores_dropped += 1;
                }
            },
        }
        Ok(Outcome::Continue)
    }

    /// Resolves a memory operand to a byte address. Write-back forms are rejected.
    fn effective_address(
        &self,
        pc: u64,
        inst: &Instruction,
        mem: MemOperand,
    ) -> Result<u64, Fault> {
        let (base, offset) = match mem {
            MemOperand::Base { base } => (base, 0),
            MemOperand::Offset { base, offset } => (base, offset as u64),
            MemOperand::Indexed {
                base,
                index,
                extend,
                amount,
            } => (base, extend.apply(self.regs.read_reg(index), amount)),
            MemOperand::PreIndex { .. } | MemOperand::PostIndex { .. } => {
                return Err(mismatch(
                    pc,
                    inst,
                    "pre- and post-indexed addressing is not supported",
                ));
            }
        };
        if !base.is_64bit() {
            return Err(mismatch(pc, inst, "base must be a 64-bit register"));
        }
        Ok(self.regs.read_reg(base).wrapping_add(offset))
    }

    /// `svc #imm`: service number in `x16`, exit status in `x0`.
    fn exec_svc(&mut self, pc: u64) -> Outcome {
        let service = self.regs.read(REG_SYSCALL);
        if service == SYS_EXIT {
            return Outcome::Exit(self.regs.read(REG_EXIT_CODE));
        }
        warn!(syscall = service, pc, "unknown syscall");
        self.stats.unknown_syscalls += 1;
        Outcome::Continue
    }
}
