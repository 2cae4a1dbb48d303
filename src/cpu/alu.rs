/*!
alu.rs - Arithmetic-logic unit semantics.

The ALU mutates the destination register and/or the flags register in
place; it never touches memory or the program counter. Callers resolve
the right-hand operand first (register value or immediate), so each
operation here takes a destination register plus a plain byte.

All arithmetic is fixed-width: results wrap mod 256 (`wrapping_*`).
Divide or modulo by zero is a fatal condition surfaced as
`Fault::DivideByZero`; the dispatcher turns it into a machine halt
rather than producing a sentinel value.
*/

use crate::cpu::Fault;
use crate::cpu::regs::CpuRegs;
use crate::cpu::state::Reg;

/// The operation families the ALU computes. Unary operations (INC, DEC,
/// NOT) ignore the right-hand operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AluOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Inc,
    Dec,
    Cmp,
    And,
    Or,
    Xor,
    Not,
}

/// Apply `op` to the destination register and right-hand byte, writing
/// the destination register and/or flags.
pub(crate) fn apply<C: CpuRegs>(cpu: &mut C, op: AluOp, dst: Reg, rhs: u8) -> Result<(), Fault> {
    let lhs = cpu.reg(dst);
    let result = match op {
        AluOp::Add => lhs.wrapping_add(rhs),
        AluOp::Sub => lhs.wrapping_sub(rhs),
        AluOp::Mul => lhs.wrapping_mul(rhs),
        AluOp::Div => {
            if rhs == 0 {
                return Err(Fault::DivideByZero { pc: cpu.pc(), dst });
            }
            lhs / rhs
        }
        AluOp::Mod => {
            if rhs == 0 {
                return Err(Fault::DivideByZero { pc: cpu.pc(), dst });
            }
            lhs % rhs
        }
        AluOp::Inc => lhs.wrapping_add(1),
        AluOp::Dec => lhs.wrapping_sub(1),
        AluOp::And => lhs & rhs,
        AluOp::Or => lhs | rhs,
        AluOp::Xor => lhs ^ rhs,
        AluOp::Not => !lhs,
        AluOp::Cmp => {
            cpu.update_cmp(lhs, rhs);
            return Ok(());
        }
    };
    cpu.set_reg(dst, result);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::state::{CpuState, FLAG_EQ, FLAG_GT, FLAG_LT};

    fn setup(lhs: u8) -> (CpuState, Reg) {
        let mut s = CpuState::new();
        let r0 = Reg::from_operand(0);
        s.set_reg(r0, lhs);
        (s, r0)
    }

    #[test]
    fn add_wraps_mod_256() {
        let (mut s, r0) = setup(0xFF);
        apply(&mut s, AluOp::Add, r0, 2).unwrap();
        assert_eq!(s.reg(r0), 1);
    }

    #[test]
    fn mul_wraps_mod_256() {
        let (mut s, r0) = setup(0x40);
        apply(&mut s, AluOp::Mul, r0, 8).unwrap();
        assert_eq!(s.reg(r0), 0);
    }

    #[test]
    fn div_and_mod() {
        let (mut s, r0) = setup(17);
        apply(&mut s, AluOp::Div, r0, 5).unwrap();
        assert_eq!(s.reg(r0), 3);
        s.set_reg(r0, 17);
        apply(&mut s, AluOp::Mod, r0, 5).unwrap();
        assert_eq!(s.reg(r0), 2);
    }

    #[test]
    fn div_by_zero_is_a_fault() {
        let (mut s, r0) = setup(9);
        s.set_pc(0x12);
        let err = apply(&mut s, AluOp::Div, r0, 0).unwrap_err();
        assert_eq!(err, Fault::DivideByZero { pc: 0x12, dst: r0 });
        // Destination untouched on fault.
        assert_eq!(s.reg(r0), 9);
    }

    #[test]
    fn mod_by_zero_is_a_fault() {
        let (mut s, r0) = setup(9);
        assert!(apply(&mut s, AluOp::Mod, r0, 0).is_err());
    }

    #[test]
    fn unary_ops_ignore_rhs() {
        let (mut s, r0) = setup(0);
        apply(&mut s, AluOp::Dec, r0, 0xAA).unwrap();
        assert_eq!(s.reg(r0), 0xFF);
        apply(&mut s, AluOp::Inc, r0, 0xAA).unwrap();
        assert_eq!(s.reg(r0), 0);
        s.set_reg(r0, 0b1010_1010);
        apply(&mut s, AluOp::Not, r0, 0xAA).unwrap();
        assert_eq!(s.reg(r0), 0b0101_0101);
    }

    #[test]
    fn bitwise_ops() {
        let (mut s, r0) = setup(0b1100);
        apply(&mut s, AluOp::And, r0, 0b1010).unwrap();
        assert_eq!(s.reg(r0), 0b1000);
        apply(&mut s, AluOp::Or, r0, 0b0011).unwrap();
        assert_eq!(s.reg(r0), 0b1011);
        apply(&mut s, AluOp::Xor, r0, 0b1111).unwrap();
        assert_eq!(s.reg(r0), 0b0100);
    }

    #[test]
    fn cmp_writes_flags_not_registers() {
        let (mut s, r0) = setup(5);
        apply(&mut s, AluOp::Cmp, r0, 5).unwrap();
        assert_eq!(s.fl(), FLAG_EQ);
        apply(&mut s, AluOp::Cmp, r0, 3).unwrap();
        assert_eq!(s.fl(), FLAG_GT);
        apply(&mut s, AluOp::Cmp, r0, 9).unwrap();
        assert_eq!(s.fl(), FLAG_LT);
        assert_eq!(s.reg(r0), 5);
    }
}
