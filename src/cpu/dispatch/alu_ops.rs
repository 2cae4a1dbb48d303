/*!
alu_ops.rs - Arithmetic/logic opcode family handler.

Maps each ALU-class opcode to an `AluOp` and resolves the right-hand
operand: register-register forms read the second operand byte as a
register index, immediate forms use the byte itself, unary forms ignore
it. A zero divisor propagates as a `Fault` that the orchestrator turns
into a machine halt.
*/

use crate::cpu::Fault;
use crate::cpu::alu::{self, AluOp};
use crate::cpu::opcode::Opcode;
use crate::cpu::regs::CpuRegs;
use crate::cpu::state::Reg;

pub(crate) fn handle<C: CpuRegs>(op: Opcode, cpu: &mut C, a: u8, b: u8) -> Result<(), Fault> {
    let dst = Reg::from_operand(a);
    let (alu_op, rhs) = match op {
        // Register-register forms
        Opcode::Add => (AluOp::Add, cpu.reg(Reg::from_operand(b))),
        Opcode::Sub => (AluOp::Sub, cpu.reg(Reg::from_operand(b))),
        Opcode::Mul => (AluOp::Mul, cpu.reg(Reg::from_operand(b))),
        Opcode::Div => (AluOp::Div, cpu.reg(Reg::from_operand(b))),
        Opcode::Mod => (AluOp::Mod, cpu.reg(Reg::from_operand(b))),
        Opcode::Cmp => (AluOp::Cmp, cpu.reg(Reg::from_operand(b))),
        Opcode::And => (AluOp::And, cpu.reg(Reg::from_operand(b))),
        Opcode::Or => (AluOp::Or, cpu.reg(Reg::from_operand(b))),
        Opcode::Xor => (AluOp::Xor, cpu.reg(Reg::from_operand(b))),
        // Immediate forms
        Opcode::Addi => (AluOp::Add, b),
        Opcode::Subi => (AluOp::Sub, b),
        Opcode::Muli => (AluOp::Mul, b),
        Opcode::Divi => (AluOp::Div, b),
        Opcode::Modi => (AluOp::Mod, b),
        Opcode::Cmpi => (AluOp::Cmp, b),
        // Unary forms
        Opcode::Inc => (AluOp::Inc, 0),
        Opcode::Dec => (AluOp::Dec, 0),
        Opcode::Not => (AluOp::Not, 0),
        // Routed here only for the opcodes above.
        other => unreachable!("not an ALU opcode: {other:?}"),
    };
    alu::apply(cpu, alu_op, dst, rhs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::state::{CpuState, FLAG_LT};

    fn setup() -> CpuState {
        CpuState::new()
    }

    #[test]
    fn register_form_reads_second_register() {
        let mut cpu = setup();
        cpu.set_reg(Reg::from_operand(0), 7);
        cpu.set_reg(Reg::from_operand(1), 5);
        handle(Opcode::Add, &mut cpu, 0, 1).unwrap();
        assert_eq!(cpu.reg(Reg::from_operand(0)), 12);
    }

    #[test]
    fn immediate_form_uses_raw_byte() {
        let mut cpu = setup();
        cpu.set_reg(Reg::from_operand(2), 10);
        handle(Opcode::Subi, &mut cpu, 2, 4).unwrap();
        assert_eq!(cpu.reg(Reg::from_operand(2)), 6);
    }

    #[test]
    fn cmpi_sets_flags() {
        let mut cpu = setup();
        cpu.set_reg(Reg::from_operand(0), 3);
        handle(Opcode::Cmpi, &mut cpu, 0, 5).unwrap();
        assert_eq!(cpu.fl(), FLAG_LT);
    }

    #[test]
    fn div_by_zero_register_form_faults() {
        let mut cpu = setup();
        cpu.set_reg(Reg::from_operand(0), 8);
        // R1 is zero.
        let err = handle(Opcode::Div, &mut cpu, 0, 1).unwrap_err();
        assert!(matches!(err, Fault::DivideByZero { .. }));
    }

    #[test]
    fn divi_by_zero_faults() {
        let mut cpu = setup();
        assert!(handle(Opcode::Divi, &mut cpu, 0, 0).is_err());
    }
}
