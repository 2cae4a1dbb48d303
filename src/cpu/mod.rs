/*!
CPU module root: the fetch-decode-execute core of the LS-8 machine.

Submodules
==========
- state: canonical register file, flags, and control latches
- regs: `CpuRegs` trait for generic register/flag access
- core: `Cpu` facade wrapping `CpuState` (the public entry point)
- opcode: instruction encoding and the static decode table
- alu: arithmetic/logic/compare semantics
- stack: push/pop primitives over `Ram` + SP
- interrupt: priority arbitration and context save/restore
- dispatch: per-family instruction handlers and the tick orchestrator

This module also defines the tick outcome types shared by all of them.
*/

pub mod alu;
pub mod core;
pub mod dispatch;
pub mod interrupt;
pub mod opcode;
pub mod regs;
pub mod stack;
pub mod state;

pub use crate::cpu::core::Cpu;
pub use crate::cpu::opcode::Opcode;
pub use crate::cpu::regs::CpuRegs;
pub use crate::cpu::state::{CpuState, FLAG_EQ, FLAG_GT, FLAG_LT, Reg, SP_RESET};

use std::fmt;
use thiserror::Error;

/// Fatal execution faults. Halting on one of these is the machine's
/// only error channel; there is no exception propagation across ticks.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// DIV or MOD (register or immediate form) with a zero divisor.
    #[error("divide by zero at pc {pc:#04x} (destination {dst})")]
    DivideByZero { pc: u8, dst: Reg },
}

/// Why the machine stopped. Terminal: once halted, every further tick
/// reports the same reason without executing anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HaltReason {
    /// The program executed HLT.
    Program,
    /// A fatal fault (see `Fault`).
    Fault(Fault),
}

impl fmt::Display for HaltReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HaltReason::Program => write!(f, "halted by HLT"),
            HaltReason::Fault(fault) => write!(f, "{fault}"),
        }
    }
}

/// Outcome of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// One instruction executed (including the unknown-opcode no-op).
    Ran,
    /// An interrupt entry consumed the tick; no instruction ran.
    Interrupt,
    /// The machine is halted (this tick, or a previous one).
    Halted(HaltReason),
}
