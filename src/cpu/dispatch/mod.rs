/*!
dispatch - Per-cycle fetch/decode/execute orchestrator.

Cycle order
===========
1. If the machine is already halted, report that and do nothing else.
2. Poll the interrupt controller; servicing an interrupt consumes the
   whole cycle.
3. Fetch the opcode byte and both operand slots at PC.
4. Decode through the static opcode table. A byte with no assigned
   opcode is a no-op: PC advances past it and its encoded operand count
   and execution continues.
5. Execute via an exhaustive match that routes to the family handlers.
6. Unless the instruction transferred control (the `pc_written` latch),
   advance PC by the instruction length. An ALU fault halts the machine
   instead.
*/

pub(crate) mod alu_ops;
pub(crate) mod control_flow;
pub(crate) mod io_ops;
pub(crate) mod load_store;
pub(crate) mod stack_ops;

use crate::cpu::interrupt;
use crate::cpu::opcode::{self, Opcode};
use crate::cpu::regs::CpuRegs;
use crate::cpu::state::Reg;
use crate::cpu::{Fault, HaltReason, Tick};
use crate::peripheral::Screen;
use crate::ram::Ram;

/// Run one machine cycle.
pub(crate) fn step<C: CpuRegs>(cpu: &mut C, ram: &mut Ram, screen: &mut dyn Screen) -> Tick {
    if let Some(reason) = cpu.halted() {
        return Tick::Halted(reason);
    }
    if interrupt::poll(cpu, ram) {
        return Tick::Interrupt;
    }

    let pc = cpu.pc();
    let byte = ram.read(pc);
    let a = ram.read(pc.wrapping_add(1));
    let b = ram.read(pc.wrapping_add(2));

    let Some(op) = Opcode::from_byte(byte) else {
        cpu.advance_pc(1 + opcode::operand_count_of(byte));
        return Tick::Ran;
    };

    match exec(op, cpu, ram, screen, a, b) {
        Ok(()) => {
            let jumped = cpu.take_pc_written();
            if let Some(reason) = cpu.halted() {
                return Tick::Halted(reason);
            }
            if !jumped {
                cpu.advance_pc(op.len());
            }
            Tick::Ran
        }
        Err(fault) => {
            let _ = cpu.take_pc_written();
            cpu.halt(HaltReason::Fault(fault));
            Tick::Halted(HaltReason::Fault(fault))
        }
    }
}

fn exec<C: CpuRegs>(
    op: Opcode,
    cpu: &mut C,
    ram: &mut Ram,
    screen: &mut dyn Screen,
    a: u8,
    b: u8,
) -> Result<(), Fault> {
    match op {
        Opcode::Nop => {}
        Opcode::Hlt => cpu.halt(HaltReason::Program),

        Opcode::Int => {
            let line = cpu.reg(Reg::from_operand(a));
            interrupt::raise(cpu, line);
        }
        Opcode::Iret => interrupt::return_from_interrupt(cpu, ram),

        Opcode::Add
        | Opcode::Sub
        | Opcode::Mul
        | Opcode::Div
        | Opcode::Mod
        | Opcode::Addi
        | Opcode::Subi
        | Opcode::Muli
        | Opcode::Divi
        | Opcode::Modi
        | Opcode::Inc
        | Opcode::Dec
        | Opcode::Cmp
        | Opcode::Cmpi
        | Opcode::And
        | Opcode::Or
        | Opcode::Xor
        | Opcode::Not => alu_ops::handle(op, cpu, a, b)?,

        Opcode::Ldi | Opcode::Ld | Opcode::St => load_store::handle(op, cpu, ram, a, b),

        Opcode::Jmp
        | Opcode::Jmpi
        | Opcode::Jeq
        | Opcode::Jne
        | Opcode::Jlt
        | Opcode::Jgt
        | Opcode::Call
        | Opcode::Cali
        | Opcode::Ret => control_flow::handle(op, cpu, ram, a),

        Opcode::Push | Opcode::Pop => stack_ops::handle(op, cpu, ram, a),

        Opcode::Pra | Opcode::Prn | Opcode::Plot => io_ops::handle(op, cpu, screen, a, b),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::state::CpuState;
    use crate::peripheral::BufferScreen;

    fn setup(program: &[u8]) -> (CpuState, Ram, BufferScreen) {
        let mut ram = Ram::new();
        ram.load(program);
        (CpuState::new(), ram, BufferScreen::new())
    }

    #[test]
    fn advances_pc_by_instruction_length() {
        let (mut cpu, mut ram, mut screen) = setup(&[
            Opcode::Nop.byte(),          // 1 byte
            Opcode::Inc.byte(), 0,       // 2 bytes
            Opcode::Ldi.byte(), 1, 0x2A, // 3 bytes
        ]);
        assert_eq!(step(&mut cpu, &mut ram, &mut screen), Tick::Ran);
        assert_eq!(cpu.pc(), 1);
        assert_eq!(step(&mut cpu, &mut ram, &mut screen), Tick::Ran);
        assert_eq!(cpu.pc(), 3);
        assert_eq!(step(&mut cpu, &mut ram, &mut screen), Tick::Ran);
        assert_eq!(cpu.pc(), 6);
        assert_eq!(cpu.reg(Reg::from_operand(1)), 0x2A);
    }

    #[test]
    fn unknown_opcode_skips_itself_and_operands() {
        // 0x02: zero-operand block, unassigned.
        let (mut cpu, mut ram, mut screen) = setup(&[0x02]);
        assert_eq!(step(&mut cpu, &mut ram, &mut screen), Tick::Ran);
        assert_eq!(cpu.pc(), 1);
        assert_eq!(cpu.regs, [0, 0, 0, 0, 0, 0x00, 0x00, 0xF4]);

        // 0xFF: reserved block, encoded operand count 3.
        let (mut cpu, mut ram, mut screen) = setup(&[0xFF, 1, 2, 3]);
        assert_eq!(step(&mut cpu, &mut ram, &mut screen), Tick::Ran);
        assert_eq!(cpu.pc(), 4);
    }

    #[test]
    fn hlt_halts_and_stays_halted() {
        let (mut cpu, mut ram, mut screen) = setup(&[Opcode::Hlt.byte()]);
        assert_eq!(
            step(&mut cpu, &mut ram, &mut screen),
            Tick::Halted(HaltReason::Program)
        );
        // PC does not move past a halt, and further steps are inert.
        assert_eq!(cpu.pc(), 0);
        assert_eq!(
            step(&mut cpu, &mut ram, &mut screen),
            Tick::Halted(HaltReason::Program)
        );
    }

    #[test]
    fn divide_by_zero_faults_the_machine() {
        let (mut cpu, mut ram, mut screen) = setup(&[Opcode::Div.byte(), 0, 1]);
        cpu.set_reg(Reg::from_operand(0), 10);
        let tick = step(&mut cpu, &mut ram, &mut screen);
        let fault = Fault::DivideByZero {
            pc: 0,
            dst: Reg::from_operand(0),
        };
        assert_eq!(tick, Tick::Halted(HaltReason::Fault(fault)));
        assert_eq!(cpu.halted(), Some(HaltReason::Fault(fault)));
        assert_eq!(cpu.reg(Reg::from_operand(0)), 10);
        // Later ticks report the same fault without running anything.
        assert_eq!(
            step(&mut cpu, &mut ram, &mut screen),
            Tick::Halted(HaltReason::Fault(fault))
        );
    }

    #[test]
    fn transfer_suppresses_generic_advance() {
        let (mut cpu, mut ram, mut screen) = setup(&[Opcode::Jmpi.byte(), 0x20]);
        assert_eq!(step(&mut cpu, &mut ram, &mut screen), Tick::Ran);
        assert_eq!(cpu.pc(), 0x20);
    }

    #[test]
    fn int_raises_then_next_cycle_services() {
        let mut program = vec![
            Opcode::Ldi.byte(), 0, 2,    // R0 = line 2
            Opcode::Int.byte(), 0,       // raise line 2
        ];
        program.resize(0x100, 0);
        program[0xFA] = 0x40; // vector for line 2
        let (mut cpu, mut ram, mut screen) = setup(&program);
        cpu.set_reg(Reg::IM, 0b0000_0100);

        assert_eq!(step(&mut cpu, &mut ram, &mut screen), Tick::Ran);
        assert_eq!(step(&mut cpu, &mut ram, &mut screen), Tick::Ran);
        assert_eq!(step(&mut cpu, &mut ram, &mut screen), Tick::Interrupt);
        assert_eq!(cpu.pc(), 0x40);
    }
}
