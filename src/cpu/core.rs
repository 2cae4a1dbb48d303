/*!
core.rs - Cpu facade over the register file and dispatch loop.

Owns a `CpuState` and exposes the cycle-level API the machine driver
uses: `step` runs one cycle against a RAM and a screen, `run` loops
until halt or a tick budget is exhausted. An optional trace mode prints
one line per fetched instruction to stderr.
*/

use crate::cpu::dispatch;
use crate::cpu::interrupt;
use crate::cpu::opcode::{self, Opcode};
use crate::cpu::state::{CpuState, Reg};
use crate::cpu::{HaltReason, Tick};
use crate::peripheral::Screen;
use crate::ram::Ram;

#[derive(Debug, Default)]
pub struct Cpu {
    state: CpuState,
    trace: bool,
}

impl Cpu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the underlying register file.
    pub fn state(&self) -> &CpuState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut CpuState {
        &mut self.state
    }

    /// Return the register file to power-on values.
    pub fn reset(&mut self) {
        self.state = CpuState::new();
    }

    pub fn pc(&self) -> u8 {
        self.state.pc()
    }

    pub fn fl(&self) -> u8 {
        self.state.fl()
    }

    pub fn reg(&self, reg: Reg) -> u8 {
        self.state.reg(reg)
    }

    pub fn sp(&self) -> u8 {
        self.state.sp()
    }

    pub fn is_halted(&self) -> bool {
        self.state.halted().is_some()
    }

    pub fn halted(&self) -> Option<HaltReason> {
        self.state.halted()
    }

    /// Print one line per executed instruction to stderr.
    pub fn set_trace(&mut self, on: bool) {
        self.trace = on;
    }

    /// Latch an external interrupt line into the status register.
    pub fn raise_interrupt(&mut self, line: u8) {
        interrupt::raise(&mut self.state, line);
    }

    /// Run one machine cycle.
    pub fn step(&mut self, ram: &mut Ram, screen: &mut dyn Screen) -> Tick {
        if self.trace && self.state.halted().is_none() {
            self.trace_instruction(ram);
        }
        dispatch::step(&mut self.state, ram, screen)
    }

    /// Step until the machine halts or `max_ticks` cycles have run.
    /// Returns the halt reason if the machine stopped within budget.
    pub fn run(
        &mut self,
        ram: &mut Ram,
        screen: &mut dyn Screen,
        max_ticks: u64,
    ) -> Option<HaltReason> {
        for _ in 0..max_ticks {
            if let Tick::Halted(reason) = self.step(ram, screen) {
                return Some(reason);
            }
        }
        None
    }

    fn trace_instruction(&self, ram: &Ram) {
        let pc = self.state.pc();
        let byte = ram.read(pc);
        match Opcode::from_byte(byte) {
            Some(op) => {
                let a = ram.read(pc.wrapping_add(1));
                let b = ram.read(pc.wrapping_add(2));
                eprintln!("{pc:02X}: {}", opcode::disassemble(op, a, b));
            }
            None => eprintln!("{pc:02X}: ??? ({byte:#010b})"),
        }
    }
}
