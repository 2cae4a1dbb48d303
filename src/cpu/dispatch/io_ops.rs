/*!
io_ops.rs - Output opcode family handler (PRA, PRN, PLOT).

All output is routed through the `Screen` trait so the core never
touches stdout directly. PRN formats the register value as unsigned
decimal and emits it digit by digit, followed by a newline.
*/

use crate::cpu::opcode::Opcode;
use crate::cpu::regs::CpuRegs;
use crate::cpu::state::Reg;
use crate::peripheral::Screen;

pub(crate) fn handle<C: CpuRegs>(op: Opcode, cpu: &mut C, screen: &mut dyn Screen, a: u8, b: u8) {
    match op {
        Opcode::Pra => {
            let ch = cpu.reg(Reg::from_operand(a));
            screen.putc(ch);
        }
        Opcode::Prn => {
            let value = cpu.reg(Reg::from_operand(a));
            for digit in value.to_string().bytes() {
                screen.putc(digit);
            }
            screen.putc(b'\n');
        }
        Opcode::Plot => {
            let x = cpu.reg(Reg::from_operand(a));
            let y = cpu.reg(Reg::from_operand(b));
            screen.plot(x, y);
        }
        other => unreachable!("not an output opcode: {other:?}"),
    }
}
