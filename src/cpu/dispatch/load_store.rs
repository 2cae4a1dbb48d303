/*!
load_store.rs - Data movement opcode family handler (LDI / LD / ST).

LDI loads an immediate into a register; LD and ST move a byte between a
register and the memory cell addressed by another register
(register-indirect). No bounds checking beyond the 8-bit address space.
*/

use crate::cpu::opcode::Opcode;
use crate::cpu::regs::CpuRegs;
use crate::cpu::state::Reg;
use crate::ram::Ram;

pub(crate) fn handle<C: CpuRegs>(op: Opcode, cpu: &mut C, ram: &mut Ram, a: u8, b: u8) {
    let ra = Reg::from_operand(a);
    match op {
        Opcode::Ldi => cpu.set_reg(ra, b),
        Opcode::Ld => {
            let addr = cpu.reg(Reg::from_operand(b));
            let value = ram.read(addr);
            cpu.set_reg(ra, value);
        }
        Opcode::St => {
            let addr = cpu.reg(ra);
            let value = cpu.reg(Reg::from_operand(b));
            ram.write(addr, value);
        }
        other => unreachable!("not a load/store opcode: {other:?}"),
    }
}
