/*!
machine.rs - Whole-machine facade and clock driver.

Bundles the CPU, RAM, and a screen peripheral, and owns the real-time
clock: `run` ticks the CPU once per millisecond and pulses the timer
interrupt line once per second. `run_budget` ticks without sleeping for
deterministic tests. Shutdown is idempotent; the screen's `stop` hook
fires exactly once no matter how the machine ends.
*/

use std::thread;
use std::time::{Duration, Instant};

use crate::cpu::{Cpu, HaltReason, Tick};
use crate::loader::{self, LoadError};
use crate::peripheral::{Screen, StdoutScreen};
use crate::ram::{Ram, RAM_SIZE};

/// Memory cell the keyboard driver stores the last key press in.
pub const KEY_CELL: u8 = 0xF4;
/// Interrupt line pulsed by the wall-clock timer.
pub const TIMER_LINE: u8 = 0;
/// Interrupt line raised on key press.
pub const KEYBOARD_LINE: u8 = 1;

/// Wall-clock duration of one CPU cycle.
pub const TICK_INTERVAL: Duration = Duration::from_millis(1);
/// Wall-clock period of the timer interrupt.
pub const TIMER_INTERVAL: Duration = Duration::from_secs(1);

pub struct Machine {
    cpu: Cpu,
    ram: Ram,
    screen: Box<dyn Screen>,
    stopped: bool,
}

impl Machine {
    pub fn new() -> Self {
        Self::with_screen(Box::new(StdoutScreen::new()))
    }

    pub fn with_screen(screen: Box<dyn Screen>) -> Self {
        Self {
            cpu: Cpu::new(),
            ram: Ram::new(),
            screen,
            stopped: false,
        }
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    pub fn ram(&self) -> &Ram {
        &self.ram
    }

    pub fn ram_mut(&mut self) -> &mut Ram {
        &mut self.ram
    }

    /// Copy a program image into memory starting at address 0.
    pub fn load(&mut self, image: &[u8]) -> Result<(), LoadError> {
        if image.len() > RAM_SIZE {
            return Err(LoadError::TooLarge {
                len: image.len(),
                limit: RAM_SIZE,
            });
        }
        self.ram.load(image);
        Ok(())
    }

    /// Parse assembler text and load the resulting image.
    pub fn load_source(&mut self, source: &str) -> Result<(), LoadError> {
        let image = loader::parse_source(source)?;
        self.load(&image)
    }

    /// Write a byte directly into memory. Device drivers use this to
    /// deposit data (e.g. the key-press cell) before raising a line.
    pub fn poke(&mut self, addr: u8, value: u8) {
        self.ram.write(addr, value);
    }

    pub fn raise_interrupt(&mut self, line: u8) {
        self.cpu.raise_interrupt(line);
    }

    pub fn halted(&self) -> Option<HaltReason> {
        self.cpu.halted()
    }

    /// Run one CPU cycle. Returns what the cycle did; on halt the
    /// machine shuts down its peripherals.
    pub fn tick(&mut self) -> Tick {
        let tick = self.cpu.step(&mut self.ram, self.screen.as_mut());
        if matches!(tick, Tick::Halted(_)) {
            self.shutdown();
        }
        tick
    }

    /// Run at real-time speed until the program halts: one cycle per
    /// millisecond, with the timer line pulsed once per second.
    pub fn run(&mut self) -> HaltReason {
        let mut next_timer = Instant::now() + TIMER_INTERVAL;
        loop {
            if Instant::now() >= next_timer {
                self.raise_interrupt(TIMER_LINE);
                next_timer += TIMER_INTERVAL;
            }
            if let Tick::Halted(reason) = self.tick() {
                return reason;
            }
            thread::sleep(TICK_INTERVAL);
        }
    }

    /// Run up to `max_ticks` cycles as fast as possible, with no timer.
    /// Returns the halt reason if the machine stopped within budget.
    pub fn run_budget(&mut self, max_ticks: u64) -> Option<HaltReason> {
        for _ in 0..max_ticks {
            if let Tick::Halted(reason) = self.tick() {
                return Some(reason);
            }
        }
        None
    }

    /// Halt the machine from outside the program (e.g. Ctrl-C).
    pub fn stop(&mut self) {
        self.cpu.state_mut().halt(HaltReason::Program);
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if !self.stopped {
            self.stopped = true;
            self.screen.stop();
        }
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}
