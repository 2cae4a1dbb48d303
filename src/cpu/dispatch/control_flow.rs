/*!
control_flow.rs - Control transfer opcode family handler
(JMP/JMPI, conditional jumps, CALL/CALI, RET).

Every transfer goes through `CpuRegs::jump`, which latches `pc_written`
so the orchestrator suppresses the generic PC advance for this cycle. A
conditional jump that is not taken performs no transfer and falls
through to the normal advance.

CALL pushes the address of the *next* instruction (PC + 2, since both
CALL forms are two bytes long) before transferring; RET pops it back.
*/

use crate::cpu::opcode::Opcode;
use crate::cpu::regs::CpuRegs;
use crate::cpu::stack;
use crate::cpu::state::{FLAG_EQ, FLAG_GT, FLAG_LT, Reg};
use crate::ram::Ram;

pub(crate) fn handle<C: CpuRegs>(op: Opcode, cpu: &mut C, ram: &mut Ram, a: u8) {
    match op {
        Opcode::Jmp => {
            let target = cpu.reg(Reg::from_operand(a));
            cpu.jump(target);
        }
        Opcode::Jmpi => cpu.jump(a),
        Opcode::Jeq => jump_if(cpu, FLAG_EQ, true, a),
        Opcode::Jne => jump_if(cpu, FLAG_EQ, false, a),
        Opcode::Jlt => jump_if(cpu, FLAG_LT, true, a),
        Opcode::Jgt => jump_if(cpu, FLAG_GT, true, a),
        Opcode::Call => {
            let target = cpu.reg(Reg::from_operand(a));
            call(cpu, ram, target);
        }
        Opcode::Cali => call(cpu, ram, a),
        Opcode::Ret => {
            let target = stack::pop(cpu, ram);
            cpu.jump(target);
        }
        other => unreachable!("not a control-flow opcode: {other:?}"),
    }
}

/// Jump to the address in the operand register when `flag` matches
/// `wanted` (set for JEQ/JLT/JGT, clear for JNE).
fn jump_if<C: CpuRegs>(cpu: &mut C, flag: u8, wanted: bool, a: u8) {
    if cpu.is_flag_set(flag) == wanted {
        let target = cpu.reg(Reg::from_operand(a));
        cpu.jump(target);
    }
}

fn call<C: CpuRegs>(cpu: &mut C, ram: &mut Ram, target: u8) {
    let ret = cpu.pc().wrapping_add(2);
    stack::push(cpu, ram, ret);
    cpu.jump(target);
}
