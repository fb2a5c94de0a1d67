//! AArch64 supervisor-call ABI register constants.
//!
//! Defines the registers and service numbers the emulator inspects when a
//! program executes `svc`.

/// Register `x0`: first argument, and the exit status for the exit service.
pub const REG_EXIT_CODE: usize = 0;
/// Register `x16`: service number selected by the program before `svc`.
pub const REG_SYSCALL: usize = 16;
/// Register `x30`: link register, the implicit `ret` target.
pub const REG_LR: usize = 30;

/// Service number that terminates the program.
pub const SYS_EXIT: u64 = 1;
