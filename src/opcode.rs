//! LS-8 instruction set.
//!
//! Bits 7-6 of every opcode hold the operand count and bit 5 marks ALU
//! instructions. The table below is the source of truth for dispatch width.

use crate::alu::AluOp;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Nop,
    Hlt,
    Ldi,
    Ld,
    Prn,
    Pra,
    Push,
    Pop,
    Call,
    Ret,
    Int,
    Iret,
    Jump(Cond),
    Alu(AluOp),
}

/// Branch condition, evaluated against the flags byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cond {
    Always,
    Eq,
    Ne,
    Gt,
    Lt,
    Ge,
    Le,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpInfo {
    pub code: u8,
    pub mnemonic: &'static str,
    pub operands: u8,
    pub kind: Kind,
}

impl OpInfo {
    /// Instruction width in bytes, opcode included.
    pub fn width(&self) -> u8 {
        self.operands + 1
    }
}

const fn op(code: u8, mnemonic: &'static str, operands: u8, kind: Kind) -> OpInfo {
    OpInfo {
        code,
        mnemonic,
        operands,
        kind,
    }
}

pub const NOP: u8 = 0b0000_0000;
pub const HLT: u8 = 0b0000_0001;
pub const RET: u8 = 0b0001_0001;
pub const IRET: u8 = 0b0001_0011;
pub const PUSH: u8 = 0b0100_0101;
pub const POP: u8 = 0b0100_0110;
pub const PRN: u8 = 0b0100_0111;
pub const PRA: u8 = 0b0100_1000;
pub const CALL: u8 = 0b0101_0000;
pub const INT: u8 = 0b0101_0010;
pub const JMP: u8 = 0b0101_0100;
pub const JEQ: u8 = 0b0101_0101;
pub const JNE: u8 = 0b0101_0110;
pub const JGT: u8 = 0b0101_0111;
pub const JLT: u8 = 0b0101_1000;
pub const JLE: u8 = 0b0101_1001;
pub const JGE: u8 = 0b0101_1010;
pub const INC: u8 = 0b0110_0101;
pub const DEC: u8 = 0b0110_0110;
pub const NOT: u8 = 0b0110_1001;
pub const LDI: u8 = 0b1000_0010;
pub const LD: u8 = 0b1000_0011;
pub const ST: u8 = 0b1000_0100;
pub const ADD: u8 = 0b1010_0000;
pub const SUB: u8 = 0b1010_0001;
pub const MUL: u8 = 0b1010_0010;
pub const DIV: u8 = 0b1010_0011;
pub const MOD: u8 = 0b1010_0100;
pub const CMP: u8 = 0b1010_0111;
pub const AND: u8 = 0b1010_1000;
pub const OR: u8 = 0b1010_1010;
pub const XOR: u8 = 0b1010_1011;
pub const SHL: u8 = 0b1010_1100;
pub const SHR: u8 = 0b1010_1101;

pub static OPCODES: [OpInfo; 34] = [
    op(NOP, "NOP", 0, Kind::Nop),
    op(HLT, "HLT", 0, Kind::Hlt),
    op(RET, "RET", 0, Kind::Ret),
    op(IRET, "IRET", 0, Kind::Iret),
    op(INC, "INC", 1, Kind::Alu(AluOp::Inc)),
    op(DEC, "DEC", 1, Kind::Alu(AluOp::Dec)),
    op(PRN, "PRN", 1, Kind::Prn),
    op(PRA, "PRA", 1, Kind::Pra),
    op(CALL, "CALL", 1, Kind::Call),
    op(INT, "INT", 1, Kind::Int),
    op(JMP, "JMP", 1, Kind::Jump(Cond::Always)),
    op(JEQ, "JEQ", 1, Kind::Jump(Cond::Eq)),
    op(JNE, "JNE", 1, Kind::Jump(Cond::Ne)),
    op(JGT, "JGT", 1, Kind::Jump(Cond::Gt)),
    op(JLT, "JLT", 1, Kind::Jump(Cond::Lt)),
    op(JLE, "JLE", 1, Kind::Jump(Cond::Le)),
    op(JGE, "JGE", 1, Kind::Jump(Cond::Ge)),
    op(NOT, "NOT", 1, Kind::Alu(AluOp::Not)),
    op(POP, "POP", 1, Kind::Pop),
    op(PUSH, "PUSH", 1, Kind::Push),
    op(LDI, "LDI", 2, Kind::Ldi),
    op(LD, "LD", 2, Kind::Ld),
    op(ST, "ST", 2, Kind::Alu(AluOp::St)),
    op(ADD, "ADD", 2, Kind::Alu(AluOp::Add)),
    op(SUB, "SUB", 2, Kind::Alu(AluOp::Sub)),
    op(MUL, "MUL", 2, Kind::Alu(AluOp::Mul)),
    op(DIV, "DIV", 2, Kind::Alu(AluOp::Div)),
    op(MOD, "MOD", 2, Kind::Alu(AluOp::Mod)),
    op(AND, "AND", 2, Kind::Alu(AluOp::And)),
    op(OR, "OR", 2, Kind::Alu(AluOp::Or)),
    op(XOR, "XOR", 2, Kind::Alu(AluOp::Xor)),
    op(SHL, "SHL", 2, Kind::Alu(AluOp::Shl)),
    op(SHR, "SHR", 2, Kind::Alu(AluOp::Shr)),
    op(CMP, "CMP", 2, Kind::Alu(AluOp::Cmp)),
];

pub fn decode(opcode: u8) -> Option<&'static OpInfo> {
    OPCODES.iter().find(|info| info.code == opcode)
}
