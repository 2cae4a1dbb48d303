/*!
ls8 - An emulator for the LS-8, an 8-bit CPU with 256 bytes of RAM.

Architecture
============
- `ram`: the 256-byte flat memory.
- `cpu`: register file, opcode table, ALU, stack and interrupt
  primitives, and the per-cycle dispatch loop, fronted by `Cpu`.
- `peripheral`: the `Screen` output trait and stock implementations.
- `loader`: the binary-text program format.
- `machine`: whole-machine facade and real-time clock driver.
- `term` (feature `terminal`): raw-mode interactive frontend with
  keyboard interrupts and point plotting.

The quickest way in is `Machine`:

```
use ls8::Machine;

let mut machine = Machine::new();
machine.load_source("10011001\n00000000\n00001000\n01000011\n00000000\n00000001\n").unwrap();
machine.run_budget(100);
```
*/

pub mod cpu;
pub mod loader;
pub mod machine;
pub mod peripheral;
pub mod ram;
#[cfg(feature = "terminal")]
pub mod term;

#[cfg(test)]
pub mod test_utils;

pub use crate::cpu::{Cpu, CpuState, Fault, HaltReason, Opcode, Reg, Tick};
pub use crate::loader::{load_file, parse_source, LoadError};
pub use crate::machine::{Machine, KEYBOARD_LINE, KEY_CELL, TIMER_LINE};
pub use crate::peripheral::{BufferScreen, Screen, StdoutScreen};
pub use crate::ram::{Ram, RAM_SIZE};
