/*!
opcode.rs - LS-8 instruction encoding: the `Opcode` enum and the static
decode table.

Encoding
========
The top two bits of an opcode byte give the number of trailing operand
bytes (0, 1, or 2); the remaining bits identify the instruction. Values
follow the LS-8 v2.0 table (`LDI = 0b10011001`, `PRN = 0b01000011`,
`HLT = 0b00000001`); the immediate ALU variants and the PLOT/JMPI/CALI
extensions occupy free code points in the matching operand-count blocks.

Decoding is a statically constructed 256-entry lookup table built once
at compile time, so dispatch never allocates and unknown bytes map to
`None` rather than a silent fallthrough inside a handler.
*/

use crate::cpu::state::Reg;

/// Every instruction the machine understands, tagged with its encoded
/// byte value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Opcode {
    // No operands (00xxxxxx)
    Nop = 0x00,
    Hlt = 0x01,
    Ret = 0x09,
    Iret = 0x0B,

    // One operand (01xxxxxx)
    Pra = 0x42,
    Prn = 0x43,
    Call = 0x48,
    Cali = 0x49,
    Int = 0x4A,
    Pop = 0x4C,
    Push = 0x4D,
    Jmp = 0x50,
    Jeq = 0x51,
    Jne = 0x52,
    Jlt = 0x53,
    Jgt = 0x54,
    Jmpi = 0x55,
    Not = 0x70,
    Inc = 0x78,
    Dec = 0x79,

    // Two operands (10xxxxxx)
    Ld = 0x98,
    Ldi = 0x99,
    St = 0x9A,
    Cmp = 0xA0,
    Addi = 0xA1,
    Subi = 0xA2,
    Muli = 0xA3,
    Divi = 0xA4,
    Modi = 0xA5,
    Cmpi = 0xA6,
    Add = 0xA8,
    Sub = 0xA9,
    Mul = 0xAA,
    Div = 0xAB,
    Mod = 0xAC,
    Or = 0xB1,
    Xor = 0xB2,
    And = 0xB3,
    Plot = 0xB4,
}

/// Operand count implied by a raw opcode byte (its two high bits).
/// Valid for unknown opcodes too, which is what lets the decoder skip
/// them by the right length.
#[inline]
pub fn operand_count_of(byte: u8) -> u8 {
    byte >> 6
}

impl Opcode {
    /// Decode an opcode byte. Unknown bytes yield `None`; the dispatcher
    /// treats those as a no-op of the implied length.
    #[inline]
    pub fn from_byte(byte: u8) -> Option<Opcode> {
        DECODE[byte as usize]
    }

    /// The encoded byte value.
    #[inline]
    pub fn byte(self) -> u8 {
        self as u8
    }

    /// Number of operand bytes following the opcode byte.
    #[inline]
    pub fn operand_count(self) -> u8 {
        operand_count_of(self as u8)
    }

    /// Total encoded length in bytes (opcode + operands).
    #[inline]
    pub fn len(self) -> u8 {
        1 + self.operand_count()
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Nop => "NOP",
            Opcode::Hlt => "HLT",
            Opcode::Ret => "RET",
            Opcode::Iret => "IRET",
            Opcode::Pra => "PRA",
            Opcode::Prn => "PRN",
            Opcode::Call => "CALL",
            Opcode::Cali => "CALI",
            Opcode::Int => "INT",
            Opcode::Pop => "POP",
            Opcode::Push => "PUSH",
            Opcode::Jmp => "JMP",
            Opcode::Jeq => "JEQ",
            Opcode::Jne => "JNE",
            Opcode::Jlt => "JLT",
            Opcode::Jgt => "JGT",
            Opcode::Jmpi => "JMPI",
            Opcode::Not => "NOT",
            Opcode::Inc => "INC",
            Opcode::Dec => "DEC",
            Opcode::Ld => "LD",
            Opcode::Ldi => "LDI",
            Opcode::St => "ST",
            Opcode::Cmp => "CMP",
            Opcode::Addi => "ADDI",
            Opcode::Subi => "SUBI",
            Opcode::Muli => "MULI",
            Opcode::Divi => "DIVI",
            Opcode::Modi => "MODI",
            Opcode::Cmpi => "CMPI",
            Opcode::Add => "ADD",
            Opcode::Sub => "SUB",
            Opcode::Mul => "MUL",
            Opcode::Div => "DIV",
            Opcode::Mod => "MOD",
            Opcode::Or => "OR",
            Opcode::Xor => "XOR",
            Opcode::And => "AND",
            Opcode::Plot => "PLOT",
        }
    }
}

/// Convenience for trace output: render an instruction with its
/// already-fetched operand bytes.
pub fn disassemble(op: Opcode, a: u8, b: u8) -> String {
    match op.operand_count() {
        0 => op.mnemonic().to_string(),
        1 => format!("{} {}", op.mnemonic(), Reg::from_operand(a)),
        _ => format!("{} {} {:#04x}", op.mnemonic(), Reg::from_operand(a), b),
    }
}

const fn build_decode_table() -> [Option<Opcode>; 256] {
    let mut t: [Option<Opcode>; 256] = [None; 256];
    t[Opcode::Nop as usize] = Some(Opcode::Nop);
    t[Opcode::Hlt as usize] = Some(Opcode::Hlt);
    t[Opcode::Ret as usize] = Some(Opcode::Ret);
    t[Opcode::Iret as usize] = Some(Opcode::Iret);
    t[Opcode::Pra as usize] = Some(Opcode::Pra);
    t[Opcode::Prn as usize] = Some(Opcode::Prn);
    t[Opcode::Call as usize] = Some(Opcode::Call);
    t[Opcode::Cali as usize] = Some(Opcode::Cali);
    t[Opcode::Int as usize] = Some(Opcode::Int);
    t[Opcode::Pop as usize] = Some(Opcode::Pop);
    t[Opcode::Push as usize] = Some(Opcode::Push);
    t[Opcode::Jmp as usize] = Some(Opcode::Jmp);
    t[Opcode::Jeq as usize] = Some(Opcode::Jeq);
    t[Opcode::Jne as usize] = Some(Opcode::Jne);
    t[Opcode::Jlt as usize] = Some(Opcode::Jlt);
    t[Opcode::Jgt as usize] = Some(Opcode::Jgt);
    t[Opcode::Jmpi as usize] = Some(Opcode::Jmpi);
    t[Opcode::Not as usize] = Some(Opcode::Not);
    t[Opcode::Inc as usize] = Some(Opcode::Inc);
    t[Opcode::Dec as usize] = Some(Opcode::Dec);
    t[Opcode::Ld as usize] = Some(Opcode::Ld);
    t[Opcode::Ldi as usize] = Some(Opcode::Ldi);
    t[Opcode::St as usize] = Some(Opcode::St);
    t[Opcode::Cmp as usize] = Some(Opcode::Cmp);
    t[Opcode::Addi as usize] = Some(Opcode::Addi);
    t[Opcode::Subi as usize] = Some(Opcode::Subi);
    t[Opcode::Muli as usize] = Some(Opcode::Muli);
    t[Opcode::Divi as usize] = Some(Opcode::Divi);
    t[Opcode::Modi as usize] = Some(Opcode::Modi);
    t[Opcode::Cmpi as usize] = Some(Opcode::Cmpi);
    t[Opcode::Add as usize] = Some(Opcode::Add);
    t[Opcode::Sub as usize] = Some(Opcode::Sub);
    t[Opcode::Mul as usize] = Some(Opcode::Mul);
    t[Opcode::Div as usize] = Some(Opcode::Div);
    t[Opcode::Mod as usize] = Some(Opcode::Mod);
    t[Opcode::Or as usize] = Some(Opcode::Or);
    t[Opcode::Xor as usize] = Some(Opcode::Xor);
    t[Opcode::And as usize] = Some(Opcode::And);
    t[Opcode::Plot as usize] = Some(Opcode::Plot);
    t
}

static DECODE: [Option<Opcode>; 256] = build_decode_table();

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_round_trip() {
        let all = [
            Opcode::Nop,
            Opcode::Hlt,
            Opcode::Ret,
            Opcode::Iret,
            Opcode::Pra,
            Opcode::Prn,
            Opcode::Call,
            Opcode::Cali,
            Opcode::Int,
            Opcode::Pop,
            Opcode::Push,
            Opcode::Jmp,
            Opcode::Jeq,
            Opcode::Jne,
            Opcode::Jlt,
            Opcode::Jgt,
            Opcode::Jmpi,
            Opcode::Not,
            Opcode::Inc,
            Opcode::Dec,
            Opcode::Ld,
            Opcode::Ldi,
            Opcode::St,
            Opcode::Cmp,
            Opcode::Addi,
            Opcode::Subi,
            Opcode::Muli,
            Opcode::Divi,
            Opcode::Modi,
            Opcode::Cmpi,
            Opcode::Add,
            Opcode::Sub,
            Opcode::Mul,
            Opcode::Div,
            Opcode::Mod,
            Opcode::Or,
            Opcode::Xor,
            Opcode::And,
            Opcode::Plot,
        ];
        for op in all {
            assert_eq!(Opcode::from_byte(op.byte()), Some(op), "{op:?}");
        }
    }

    #[test]
    fn operand_counts_come_from_high_bits() {
        assert_eq!(Opcode::Hlt.operand_count(), 0);
        assert_eq!(Opcode::Prn.operand_count(), 1);
        assert_eq!(Opcode::Ldi.operand_count(), 2);
        assert_eq!(Opcode::Ldi.len(), 3);
        // Unknown bytes still imply a length, including the reserved 11 block.
        assert_eq!(operand_count_of(0b1100_0000), 3);
        assert_eq!(operand_count_of(0b0011_1111), 0);
        assert_eq!(operand_count_of(0b0111_1111), 1);
    }

    #[test]
    fn unknown_bytes_do_not_decode() {
        assert_eq!(Opcode::from_byte(0xFF), None);
        assert_eq!(Opcode::from_byte(0x02), None);
        assert_eq!(Opcode::from_byte(0xA7), None);
    }

    #[test]
    fn disassemble_formats_by_arity() {
        assert_eq!(disassemble(Opcode::Hlt, 0, 0), "HLT");
        assert_eq!(disassemble(Opcode::Prn, 0, 0), "PRN R0");
        assert_eq!(disassemble(Opcode::Ldi, 0, 8), "LDI R0 0x08");
    }
}
