use std::io::Write;

use tracing::{debug, trace, warn};

use crate::alu::{alu, FL_EQ, FL_GT, FL_LT};
use crate::config::{CpuConfig, UnknownOpcodePolicy};
use crate::error::{CpuError, Result};
use crate::memory::Memory;
use crate::opcode::{self, Cond, Kind};
use crate::registers::RegisterFile;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CpuState {
    pub reg: RegisterFile,
    pub pc: usize,
    // flags, 00000LGE
    pub fl: u8,
}

#[derive(Debug, Clone)]
pub struct SystemState {
    pub cpu_state: CpuState,
    pub memory: Memory,
    pub unknown_opcode: UnknownOpcodePolicy,
}

impl Default for SystemState {
    fn default() -> Self {
        SystemState {
            cpu_state: CpuState::default(),
            memory: Memory::default(),
            unknown_opcode: UnknownOpcodePolicy::default(),
        }
    }
}

impl SystemState {
    pub fn new(config: &CpuConfig) -> Result<Self> {
        Ok(SystemState {
            cpu_state: CpuState {
                reg: RegisterFile::new(config.stack_start),
                pc: 0,
                fl: 0,
            },
            memory: Memory::new(config.memory_size)?,
            unknown_opcode: config.unknown_opcode,
        })
    }

    /// Builds a processor from `config` with `program` loaded at address 0.
    pub fn with_program(config: &CpuConfig, program: &[u8]) -> Result<Self> {
        let mut sys = SystemState::new(config)?;
        sys.memory.load(program)?;
        debug!(bytes = program.len(), "program loaded");
        Ok(sys)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    Halted,
    /// The program counter ran past the last memory cell without a HLT.
    EndOfMemory,
}

// -- Helper functions --

fn get_immediate_byte(sys: &SystemState, offset: usize) -> Result<u8> {
    sys.memory.read(sys.cpu_state.pc + offset)
}

fn increment_pc(sys: &mut SystemState, num: u8) {
    sys.cpu_state.pc += num as usize;
}

fn condition_holds(cond: Cond, fl: u8) -> bool {
    match cond {
        Cond::Always => true,
        Cond::Eq => fl & FL_EQ != 0,
        Cond::Ne => fl & FL_EQ == 0,
        Cond::Gt => fl & FL_GT != 0,
        Cond::Lt => fl & FL_LT != 0,
        Cond::Ge => fl & (FL_EQ | FL_GT) != 0,
        Cond::Le => fl & (FL_EQ | FL_LT) != 0,
    }
}

// -- Stack --

pub fn push(sys: &mut SystemState, value: u8) -> Result<()> {
    let sp = sys.cpu_state.reg.sp().wrapping_sub(1);
    sys.memory.write(sp as usize, value)?;
    sys.cpu_state.reg.set_sp(sp);
    Ok(())
}

pub fn pop(sys: &mut SystemState) -> Result<u8> {
    let sp = sys.cpu_state.reg.sp();
    let value = sys.memory.read(sp as usize)?;
    sys.cpu_state.reg.set_sp(sp.wrapping_add(1));
    Ok(value)
}

// -- Control transfer --

fn call(sys: &mut SystemState, reg: u8) -> Result<()> {
    let pc = sys.cpu_state.pc;
    let ret = u8::try_from(pc + 2).map_err(|_| CpuError::ReturnAddressOverflow { pc })?;
    push(sys, ret)?;
    sys.cpu_state.pc = sys.cpu_state.reg.get(reg)? as usize;
    Ok(())
}

fn ret(sys: &mut SystemState) -> Result<()> {
    sys.cpu_state.pc = pop(sys)? as usize;
    Ok(())
}

/// Returns true when the branch was taken.
fn jump(sys: &mut SystemState, cond: Cond, reg: u8) -> Result<bool> {
    if !condition_holds(cond, sys.cpu_state.fl) {
        return Ok(false);
    }
    sys.cpu_state.pc = sys.cpu_state.reg.get(reg)? as usize;
    Ok(true)
}

fn unknown_op(sys: &mut SystemState, out: &mut impl Write, opcode: u8) -> Result<Status> {
    let pc = sys.cpu_state.pc;
    match sys.unknown_opcode {
        UnknownOpcodePolicy::Fatal => Err(CpuError::UnknownOpcode { opcode, pc }),
        UnknownOpcodePolicy::Skip => {
            warn!(opcode, pc, "skipping unknown instruction");
            writeln!(out, "Unknown instruction {}", opcode)?;
            increment_pc(sys, 1);
            Ok(Status::Running)
        }
    }
}

/// One line of processor state: `TRACE: PC | IR A B | R0 .. R7`.
pub fn trace(sys: &SystemState) -> String {
    let pc = sys.cpu_state.pc;
    let byte_at = |addr: usize| sys.memory.read(addr).unwrap_or_default();
    let mut line = format!(
        "TRACE: {:02X} | {:02X} {:02X} {:02X} |",
        pc,
        byte_at(pc),
        byte_at(pc + 1),
        byte_at(pc + 2)
    );
    for value in sys.cpu_state.reg.as_slice() {
        line.push_str(&format!(" {:02X}", value));
    }
    line
}

// -- Emulation zone --

pub fn emulate_op(sys: &mut SystemState, out: &mut impl Write) -> Result<Status> {
    let pc = sys.cpu_state.pc;
    if pc == sys.memory.capacity() {
        return Ok(Status::EndOfMemory);
    }

    let ir = get_immediate_byte(sys, 0)?;
    trace!("{}", trace(sys));

    let Some(info) = opcode::decode(ir) else {
        return unknown_op(sys, out, ir);
    };

    let operand_a = if info.operands >= 1 {
        get_immediate_byte(sys, 1)?
    } else {
        0
    };
    let operand_b = if info.operands >= 2 {
        get_immediate_byte(sys, 2)?
    } else {
        0
    };

    let advance = match info.kind {
        Kind::Nop => true,
        Kind::Hlt => return Ok(Status::Halted),
        Kind::Ldi => {
            sys.cpu_state.reg.set(operand_a, operand_b)?;
            true
        }
        Kind::Ld => {
            let addr = sys.cpu_state.reg.get(operand_b)?;
            let value = sys.memory.read(addr as usize)?;
            sys.cpu_state.reg.set(operand_a, value)?;
            true
        }
        Kind::Prn => {
            writeln!(out, "{}", sys.cpu_state.reg.get(operand_a)?)?;
            true
        }
        Kind::Pra => {
            writeln!(out, "{}", sys.cpu_state.reg.get(operand_a)? as char)?;
            true
        }
        Kind::Push => {
            let value = sys.cpu_state.reg.get(operand_a)?;
            push(sys, value)?;
            true
        }
        Kind::Pop => {
            // check the destination before moving the stack pointer
            sys.cpu_state.reg.get(operand_a)?;
            let value = pop(sys)?;
            sys.cpu_state.reg.set(operand_a, value)?;
            true
        }
        Kind::Call => {
            call(sys, operand_a)?;
            false
        }
        Kind::Ret => {
            ret(sys)?;
            false
        }
        Kind::Jump(cond) => !jump(sys, cond, operand_a)?,
        Kind::Int | Kind::Iret => {
            return Err(CpuError::UnimplementedOpcode {
                mnemonic: info.mnemonic,
                pc,
            })
        }
        Kind::Alu(op) => {
            alu(&mut sys.cpu_state, op, operand_a, operand_b)?;
            true
        }
    };

    if advance {
        increment_pc(sys, info.width());
    }

    Ok(Status::Running)
}

/// Runs until HLT or the end of memory. Errors stop the run with the
/// processor state left as it was at the failing instruction.
pub fn run(sys: &mut SystemState, out: &mut impl Write) -> Result<Status> {
    loop {
        match emulate_op(sys, out)? {
            Status::Running => continue,
            Status::Halted => {
                debug!(pc = sys.cpu_state.pc, "halted");
                return Ok(Status::Halted);
            }
            Status::EndOfMemory => {
                warn!("ran off the end of memory without HLT");
                return Ok(Status::EndOfMemory);
            }
        }
    }
}
