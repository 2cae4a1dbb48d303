/*!
test_utils - Shared helpers for unit tests.
*/

#![allow(dead_code)]

use crate::cpu::Cpu;
use crate::machine::Machine;
use crate::peripheral::BufferScreen;
use crate::ram::Ram;

/// CPU, RAM preloaded with `program`, and a capture screen.
pub fn setup(program: &[u8]) -> (Cpu, Ram, BufferScreen) {
    let mut ram = Ram::new();
    ram.load(program);
    (Cpu::new(), ram, BufferScreen::new())
}

/// Machine preloaded with a binary image, plus a handle onto its
/// capture screen (the screen is shared, clone-on-handle).
pub fn machine_with(program: &[u8]) -> (Machine, BufferScreen) {
    let screen = BufferScreen::new();
    let mut machine = Machine::with_screen(Box::new(screen.clone()));
    machine.load(program).expect("test image fits in memory");
    (machine, screen)
}

/// Machine loaded from assembler text, plus its capture screen.
pub fn machine_with_source(source: &str) -> (Machine, BufferScreen) {
    let screen = BufferScreen::new();
    let mut machine = Machine::with_screen(Box::new(screen.clone()));
    machine.load_source(source).expect("test source parses");
    (machine, screen)
}
