/*!
regs.rs - `CpuRegs` trait: a minimal, generic register + flag
manipulation interface for LS-8 execution and dispatch code.

The trait deliberately does NOT include:
  - Stack push/pop
  - Memory access of any kind

Memory and stack operations stay explicit at call sites via `&mut Ram`
to avoid over-borrowing and to keep implementations simple. Dispatch and
instruction helpers are generic over `C: CpuRegs` (static dispatch, no
trait objects), so they can run against the canonical `CpuState` or any
instrumented stand-in a test might supply.

Method names mirror `CpuState` to keep call sites mechanical.
*/

use crate::cpu::HaltReason;
use crate::cpu::state::{CpuState, Reg};

/// Minimal architectural register + flag API needed by instruction
/// semantics, the interrupt controller, and the dispatcher.
pub trait CpuRegs {
    // ---------------------------------------------------------------------
    // Register file
    // ---------------------------------------------------------------------
    fn reg(&self, r: Reg) -> u8;
    fn set_reg(&mut self, r: Reg, v: u8);

    /// Stack pointer (alias of R7). Default implemented via `reg`.
    #[inline]
    fn sp(&self) -> u8 {
        self.reg(Reg::SP)
    }

    #[inline]
    fn set_sp(&mut self, v: u8) {
        self.set_reg(Reg::SP, v);
    }

    // ---------------------------------------------------------------------
    // Program counter
    // ---------------------------------------------------------------------
    fn pc(&self) -> u8;
    fn set_pc(&mut self, v: u8);
    fn advance_pc(&mut self, delta: u8);
    fn jump(&mut self, target: u8);
    fn take_pc_written(&mut self) -> bool;

    // ---------------------------------------------------------------------
    // Flags
    // ---------------------------------------------------------------------
    fn fl(&self) -> u8;
    fn set_fl(&mut self, v: u8);
    fn is_flag_set(&self, mask: u8) -> bool;
    fn update_cmp(&mut self, a: u8, b: u8);

    // ---------------------------------------------------------------------
    // Interrupt latch / halt
    // ---------------------------------------------------------------------
    fn interrupts_enabled(&self) -> bool;
    fn set_interrupts_enabled(&mut self, on: bool);
    fn halted(&self) -> Option<HaltReason>;
    fn halt(&mut self, reason: HaltReason);
}

impl CpuRegs for CpuState {
    #[inline]
    fn reg(&self, r: Reg) -> u8 {
        self.reg(r)
    }
    #[inline]
    fn set_reg(&mut self, r: Reg, v: u8) {
        self.set_reg(r, v);
    }
    #[inline]
    fn pc(&self) -> u8 {
        self.pc()
    }
    #[inline]
    fn set_pc(&mut self, v: u8) {
        self.set_pc(v);
    }
    #[inline]
    fn advance_pc(&mut self, delta: u8) {
        self.advance_pc(delta);
    }
    #[inline]
    fn jump(&mut self, target: u8) {
        self.jump(target);
    }
    #[inline]
    fn take_pc_written(&mut self) -> bool {
        self.take_pc_written()
    }
    #[inline]
    fn fl(&self) -> u8 {
        self.fl()
    }
    #[inline]
    fn set_fl(&mut self, v: u8) {
        self.set_fl(v);
    }
    #[inline]
    fn is_flag_set(&self, mask: u8) -> bool {
        self.is_flag_set(mask)
    }
    #[inline]
    fn update_cmp(&mut self, a: u8, b: u8) {
        self.update_cmp(a, b);
    }
    #[inline]
    fn interrupts_enabled(&self) -> bool {
        self.interrupts_enabled()
    }
    #[inline]
    fn set_interrupts_enabled(&mut self, on: bool) {
        self.set_interrupts_enabled(on);
    }
    #[inline]
    fn halted(&self) -> Option<HaltReason> {
        self.halted()
    }
    #[inline]
    fn halt(&mut self, reason: HaltReason) {
        self.halt(reason);
    }
}
