/*!
interrupt.rs - Interrupt controller: priority arbitration, context
save/restore, and the vector table.

State lives in the register file (IM = R5 mask, IS = R6 pending bits)
plus the global `interrupts_enabled` latch on `CpuState`. The vector
table occupies the top eight bytes of memory: entry *i* at
`VECTOR_BASE + i` holds the handler address for line *i*.

Algorithm (run at the start of every tick, before instruction fetch):
1. If the global latch is off, skip entirely.
2. `pending = IS & IM`; scan lines 0..7 in ascending order (lower line
   number = higher priority). On the first asserted line:
   - clear the global latch (no nesting until IRET),
   - clear that line's IS bit,
   - push PC, FL, then R0..R6 ascending (not SP),
   - load PC from the line's vector entry.
   Only one line is serviced per tick.

IRET mirrors the frame exactly: pop R6..R0 descending, then FL, then
PC, and re-enables the latch. It counts as a control transfer.
*/

use crate::cpu::regs::CpuRegs;
use crate::cpu::stack;
use crate::cpu::state::Reg;
use crate::ram::Ram;

/// Base address of the interrupt vector table (top of memory).
pub const VECTOR_BASE: u8 = 0xF8;

/// Number of interrupt lines (one bit each in IM/IS).
pub const NUM_LINES: u8 = 8;

/// Assert an interrupt line: OR its bit into IS. Peripherals call this
/// through the machine facade; the INT instruction lands here too.
#[inline]
pub(crate) fn raise<C: CpuRegs>(cpu: &mut C, line: u8) {
    let bit = 1u8 << (line % NUM_LINES);
    let is = cpu.reg(Reg::IS) | bit;
    cpu.set_reg(Reg::IS, is);
}

/// Scan for a pending, unmasked interrupt and service the
/// highest-priority one. Returns true if an interrupt entry consumed
/// this tick.
pub(crate) fn poll<C: CpuRegs>(cpu: &mut C, ram: &mut Ram) -> bool {
    if !cpu.interrupts_enabled() {
        return false;
    }
    let pending = cpu.reg(Reg::IS) & cpu.reg(Reg::IM);
    if pending == 0 {
        return false;
    }
    for line in 0..NUM_LINES {
        if pending & (1 << line) != 0 {
            service(cpu, ram, line);
            return true;
        }
    }
    false
}

/// Interrupt entry: latch off, acknowledge the line, save context, and
/// redirect through the vector table.
fn service<C: CpuRegs>(cpu: &mut C, ram: &mut Ram, line: u8) {
    cpu.set_interrupts_enabled(false);

    let is = cpu.reg(Reg::IS) & !(1 << line);
    cpu.set_reg(Reg::IS, is);

    let pc = cpu.pc();
    stack::push(cpu, ram, pc);
    let fl = cpu.fl();
    stack::push(cpu, ram, fl);
    for r in 0..7u8 {
        let v = cpu.reg(Reg::from_operand(r));
        stack::push(cpu, ram, v);
    }

    let target = ram.read(VECTOR_BASE.wrapping_add(line));
    cpu.set_pc(target);
}

/// IRET: restore the saved frame in mirror order and re-enable the
/// global latch. Sets PC through `jump` so the dispatcher suppresses
/// the generic advance.
pub(crate) fn return_from_interrupt<C: CpuRegs>(cpu: &mut C, ram: &mut Ram) {
    for r in (0..7u8).rev() {
        let v = stack::pop(cpu, ram);
        cpu.set_reg(Reg::from_operand(r), v);
    }
    let fl = stack::pop(cpu, ram);
    cpu.set_fl(fl);
    let pc = stack::pop(cpu, ram);
    cpu.jump(pc);
    cpu.set_interrupts_enabled(true);
}
