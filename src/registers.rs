use crate::error::{CpuError, Result};

pub const NUM_REGISTERS: usize = 8;
/// R7 holds the stack pointer.
pub const SP: u8 = 7;
pub const STACK_START: u8 = 0xf4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterFile {
    reg: [u8; NUM_REGISTERS],
}

impl Default for RegisterFile {
    fn default() -> Self {
        RegisterFile::new(STACK_START)
    }
}

impl RegisterFile {
    pub fn new(stack_start: u8) -> Self {
        let mut reg = [0; NUM_REGISTERS];
        reg[SP as usize] = stack_start;
        RegisterFile { reg }
    }

    pub fn get(&self, index: u8) -> Result<u8> {
        self.reg
            .get(index as usize)
            .copied()
            .ok_or(CpuError::RegisterOutOfBounds { index })
    }

    pub fn set(&mut self, index: u8, value: u8) -> Result<()> {
        let slot = self
            .reg
            .get_mut(index as usize)
            .ok_or(CpuError::RegisterOutOfBounds { index })?;
        *slot = value;
        Ok(())
    }

    pub fn sp(&self) -> u8 {
        self.reg[SP as usize]
    }

    pub fn set_sp(&mut self, value: u8) {
        self.reg[SP as usize] = value;
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.reg
    }
}
