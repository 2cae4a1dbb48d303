/*!
stack.rs - Stack push/pop primitives over `Ram` + the stack pointer.

The LS-8 stack grows toward lower addresses from `SP_RESET` (0xF4):
  Push: SP = SP - 1, then write at SP
  Pop:  read at SP, then SP = SP + 1

The order is deliberately symmetric so nested calls, pushes, and
interrupt frames unwind exactly. Subroutine linkage and the interrupt
controller both build on these two helpers.
*/

use crate::cpu::regs::CpuRegs;
use crate::ram::Ram;

#[inline]
pub(crate) fn push<C: CpuRegs>(cpu: &mut C, ram: &mut Ram, value: u8) {
    let sp = cpu.sp().wrapping_sub(1);
    cpu.set_sp(sp);
    ram.write(sp, value);
}

#[inline]
pub(crate) fn pop<C: CpuRegs>(cpu: &mut C, ram: &mut Ram) -> u8 {
    let sp = cpu.sp();
    let value = ram.read(sp);
    cpu.set_sp(sp.wrapping_add(1));
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::state::{CpuState, SP_RESET};

    #[test]
    fn push_pop_round_trip_restores_sp() {
        let mut cpu = CpuState::new();
        let mut ram = Ram::new();
        push(&mut cpu, &mut ram, 0xAB);
        push(&mut cpu, &mut ram, 0xCD);
        assert_eq!(cpu.sp(), SP_RESET - 2);
        assert_eq!(pop(&mut cpu, &mut ram), 0xCD);
        assert_eq!(pop(&mut cpu, &mut ram), 0xAB);
        assert_eq!(cpu.sp(), SP_RESET);
    }

    #[test]
    fn first_push_lands_below_reset_value() {
        let mut cpu = CpuState::new();
        let mut ram = Ram::new();
        push(&mut cpu, &mut ram, 0x42);
        assert_eq!(cpu.sp(), 0xF3);
        assert_eq!(ram.read(0xF3), 0x42);
    }

    #[test]
    fn sp_wraps_at_zero() {
        let mut cpu = CpuState::new();
        let mut ram = Ram::new();
        cpu.set_sp(0);
        push(&mut cpu, &mut ram, 0x99);
        assert_eq!(cpu.sp(), 0xFF);
        assert_eq!(pop(&mut cpu, &mut ram), 0x99);
        assert_eq!(cpu.sp(), 0);
    }
}
