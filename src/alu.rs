use std::str::FromStr;

use crate::cpu::CpuState;
use crate::error::{CpuError, Result};

// Flags byte, `00000LGE`. Exactly one bit is set after a CMP.
pub const FL_EQ: u8 = 0b0000_0001;
pub const FL_GT: u8 = 0b0000_0010;
pub const FL_LT: u8 = 0b0000_0100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AluOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Inc,
    Dec,
    And,
    Or,
    Xor,
    Not,
    Shl,
    Shr,
    Cmp,
    St,
}

impl AluOp {
    pub fn name(self) -> &'static str {
        match self {
            AluOp::Add => "ADD",
            AluOp::Sub => "SUB",
            AluOp::Mul => "MUL",
            AluOp::Div => "DIV",
            AluOp::Mod => "MOD",
            AluOp::Inc => "INC",
            AluOp::Dec => "DEC",
            AluOp::And => "AND",
            AluOp::Or => "OR",
            AluOp::Xor => "XOR",
            AluOp::Not => "NOT",
            AluOp::Shl => "SHL",
            AluOp::Shr => "SHR",
            AluOp::Cmp => "CMP",
            AluOp::St => "ST",
        }
    }

    pub fn is_unary(self) -> bool {
        matches!(self, AluOp::Inc | AluOp::Dec | AluOp::Not)
    }
}

/// Looks an operation up by mnemonic; names outside the ALU table are
/// `CpuError::UnsupportedAluOp`.
impl FromStr for AluOp {
    type Err = CpuError;

    fn from_str(s: &str) -> Result<Self> {
        let op = match s.to_ascii_uppercase().as_str() {
            "ADD" => AluOp::Add,
            "SUB" => AluOp::Sub,
            "MUL" => AluOp::Mul,
            "DIV" => AluOp::Div,
            "MOD" => AluOp::Mod,
            "INC" => AluOp::Inc,
            "DEC" => AluOp::Dec,
            "AND" => AluOp::And,
            "OR" => AluOp::Or,
            "XOR" => AluOp::Xor,
            "NOT" => AluOp::Not,
            "SHL" => AluOp::Shl,
            "SHR" => AluOp::Shr,
            "CMP" => AluOp::Cmp,
            "ST" => AluOp::St,
            _ => return Err(CpuError::UnsupportedAluOp(s.to_string())),
        };
        Ok(op)
    }
}

// -- Helper functions --

fn compare(a: u8, b: u8) -> u8 {
    use std::cmp::Ordering;

    match a.cmp(&b) {
        Ordering::Equal => FL_EQ,
        Ordering::Less => FL_LT,
        Ordering::Greater => FL_GT,
    }
}

fn shift_left(a: u8, b: u8) -> u8 {
    a.checked_shl(b as u32).unwrap_or(0)
}

fn shift_right(a: u8, b: u8) -> u8 {
    a.checked_shr(b as u32).unwrap_or(0)
}

/// Computes `op` over two byte values. Returns `None` for CMP, which only
/// produces flags.
pub fn apply(op: AluOp, a: u8, b: u8) -> Option<u8> {
    let value = match op {
        AluOp::Add => a.wrapping_add(b),
        AluOp::Sub => a.wrapping_sub(b),
        AluOp::Mul => a.wrapping_mul(b),
        AluOp::Div => a.checked_div(b)?,
        AluOp::Mod => a.checked_rem(b)?,
        AluOp::Inc => a.wrapping_add(1),
        AluOp::Dec => a.wrapping_sub(1),
        AluOp::And => a & b,
        AluOp::Or => a | b,
        AluOp::Xor => a ^ b,
        AluOp::Not => !a,
        AluOp::Shl => shift_left(a, b),
        AluOp::Shr => shift_right(a, b),
        AluOp::St => b,
        AluOp::Cmp => return None,
    };
    Some(value)
}

// -- ALU --

/// Runs `op` on `reg_a` and `reg_b`, writing the result back into `reg_a`.
/// Unary ops ignore `reg_b`. On error no register or flag is touched.
pub fn alu(cpu: &mut CpuState, op: AluOp, reg_a: u8, reg_b: u8) -> Result<()> {
    let a = cpu.reg.get(reg_a)?;
    let b = if op.is_unary() {
        0
    } else {
        cpu.reg.get(reg_b)?
    };

    if op == AluOp::Cmp {
        cpu.fl = compare(a, b);
        return Ok(());
    }

    match apply(op, a, b) {
        Some(value) => cpu.reg.set(reg_a, value),
        None => Err(CpuError::DivisionByZero {
            op: op.name(),
            pc: cpu.pc,
        }),
    }
}
