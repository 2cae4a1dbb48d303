/*!
state.rs - Canonical LS-8 architectural state (register file + flags) and
inline-friendly helpers.

Overview
========
`CpuState` is the single authoritative owner of all architecturally
visible registers and execution control latches. It intentionally
excludes:
  - Memory logic (lives in `Ram`)
  - Instruction decode / dispatch logic
  - Clock pacing / peripheral wiring
Those live in higher layers (dispatch, machine).

Register file layout
====================
Eight general-purpose byte registers R0..R7, three of which carry a
conventional alias:
  R5 = IM  interrupt mask (one bit per line)
  R6 = IS  interrupt status (one bit per pending line)
  R7 = SP  stack pointer; stack grows downward from 0xF4

Special registers:
  PC  program counter (u8 address into the 256-byte memory)
  FL  flags, set exclusively by CMP-class instructions:
      bit 0 = Equal, bit 1 = Greater, bit 2 = Less
      (at most one bit asserted at any time)

Control latches:
  interrupts_enabled  global interrupt latch; cleared on interrupt entry
                      and set again only by IRET
  pc_written          set by control-transfer handlers so the dispatcher
                      skips the generic PC advance; reset every cycle
*/

use crate::cpu::HaltReason;
use std::cmp::Ordering;
use std::fmt;

/// Flags register bit masks (canonical definitions).
pub const FLAG_EQ: u8 = 0b0000_0001;
pub const FLAG_GT: u8 = 0b0000_0010;
pub const FLAG_LT: u8 = 0b0000_0100;

/// Reset value of the stack pointer: one above the top of the stack
/// region (first push lands at 0xF3). Shared with the keyboard cell by
/// the LS-8 memory map.
pub const SP_RESET: u8 = 0xF4;

/// A validated index into the eight-entry register file.
///
/// Constructed from an operand byte by masking to the low three bits,
/// so indexing the register array can never go out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reg(u8);

impl Reg {
    /// Interrupt mask alias.
    pub const IM: Reg = Reg(5);
    /// Interrupt status alias.
    pub const IS: Reg = Reg(6);
    /// Stack pointer alias.
    pub const SP: Reg = Reg(7);

    /// Build a register index from a raw operand byte. Only the low
    /// three bits select the register; upper bits are ignored.
    #[inline]
    pub fn from_operand(byte: u8) -> Reg {
        Reg(byte & 0x07)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn number(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}", self.0)
    }
}

/// Pure architectural register / flag container for the LS-8 CPU.
#[derive(Debug, Clone, Copy)]
pub struct CpuState {
    pub regs: [u8; 8],
    pub pc: u8,
    pub fl: u8,
    pub interrupts_enabled: bool,
    pub pc_written: bool,
    pub halted: Option<HaltReason>,
}

impl Default for CpuState {
    fn default() -> Self {
        let mut regs = [0u8; 8];
        regs[Reg::SP.index()] = SP_RESET;
        Self {
            regs,
            pc: 0,
            fl: 0,
            interrupts_enabled: true,
            pc_written: false,
            halted: None,
        }
    }
}

impl CpuState {
    /// Create a new CPU state using power-up defaults.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    // ---------------------------------------------------------------------
    // Register file
    // ---------------------------------------------------------------------
    #[inline]
    pub fn reg(&self, r: Reg) -> u8 {
        self.regs[r.index()]
    }

    #[inline]
    pub fn set_reg(&mut self, r: Reg, v: u8) {
        self.regs[r.index()] = v;
    }

    #[inline]
    pub fn sp(&self) -> u8 {
        self.reg(Reg::SP)
    }

    #[inline]
    pub fn set_sp(&mut self, v: u8) {
        self.set_reg(Reg::SP, v);
    }

    // ---------------------------------------------------------------------
    // Program counter
    // ---------------------------------------------------------------------
    #[inline]
    pub fn pc(&self) -> u8 {
        self.pc
    }

    #[inline]
    pub fn set_pc(&mut self, v: u8) {
        self.pc = v;
    }

    /// Advance PC by `delta` (wrapping at 8 bits).
    #[inline]
    pub fn advance_pc(&mut self, delta: u8) {
        self.pc = self.pc.wrapping_add(delta);
    }

    /// Control transfer: set PC and latch `pc_written` so the dispatcher
    /// suppresses the generic advance for this cycle.
    #[inline]
    pub fn jump(&mut self, target: u8) {
        self.pc = target;
        self.pc_written = true;
    }

    /// Read and clear the `pc_written` latch (called once per cycle).
    #[inline]
    pub fn take_pc_written(&mut self) -> bool {
        std::mem::take(&mut self.pc_written)
    }

    // ---------------------------------------------------------------------
    // Flags
    // ---------------------------------------------------------------------
    #[inline]
    pub fn fl(&self) -> u8 {
        self.fl
    }

    #[inline]
    pub fn set_fl(&mut self, v: u8) {
        self.fl = v;
    }

    #[inline]
    pub fn is_flag_set(&self, mask: u8) -> bool {
        (self.fl & mask) != 0
    }

    /// Record a comparison result. The whole flags register is
    /// overwritten so exactly one of Equal/Greater/Less is asserted.
    #[inline]
    pub fn update_cmp(&mut self, a: u8, b: u8) {
        self.fl = match a.cmp(&b) {
            Ordering::Equal => FLAG_EQ,
            Ordering::Greater => FLAG_GT,
            Ordering::Less => FLAG_LT,
        };
    }

    // ---------------------------------------------------------------------
    // Interrupt latch / halt
    // ---------------------------------------------------------------------
    #[inline]
    pub fn interrupts_enabled(&self) -> bool {
        self.interrupts_enabled
    }

    #[inline]
    pub fn set_interrupts_enabled(&mut self, on: bool) {
        self.interrupts_enabled = on;
    }

    #[inline]
    pub fn halted(&self) -> Option<HaltReason> {
        self.halted
    }

    /// Enter the terminal halted state. The first reason wins; a halted
    /// CPU never runs another instruction.
    #[inline]
    pub fn halt(&mut self, reason: HaltReason) {
        if self.halted.is_none() {
            self.halted = Some(reason);
        }
    }
}
