/*!
stack_ops.rs - PUSH/POP opcode family handler.

Thin wrappers over the shared stack primitives. The stack grows down
from the reset pointer; PUSH decrements before writing and POP reads
before incrementing, so the two always mirror.
*/

use crate::cpu::opcode::Opcode;
use crate::cpu::regs::CpuRegs;
use crate::cpu::stack;
use crate::cpu::state::Reg;
use crate::ram::Ram;

pub(crate) fn handle<C: CpuRegs>(op: Opcode, cpu: &mut C, ram: &mut Ram, a: u8) {
    let reg = Reg::from_operand(a);
    match op {
        Opcode::Push => {
            let value = cpu.reg(reg);
            stack::push(cpu, ram, value);
        }
        Opcode::Pop => {
            let value = stack::pop(cpu, ram);
            cpu.set_reg(reg, value);
        }
        other => unreachable!("not a stack opcode: {other:?}"),
    }
}
