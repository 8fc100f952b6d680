use crate::error::{CpuError, Result};

pub const DEFAULT_MEMORY_SIZE: usize = 256;
/// Registers and the program counter are a byte wide, so nothing past this is reachable.
pub const MAX_MEMORY_SIZE: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memory {
    cells: Vec<u8>,
}

impl Default for Memory {
    fn default() -> Self {
        Memory {
            cells: vec![0; DEFAULT_MEMORY_SIZE],
        }
    }
}

impl Memory {
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 || size > MAX_MEMORY_SIZE {
            return Err(CpuError::InvalidMemorySize(size));
        }
        Ok(Memory {
            cells: vec![0; size],
        })
    }

    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    pub fn read(&self, address: usize) -> Result<u8> {
        self.cells
            .get(address)
            .copied()
            .ok_or(CpuError::MemoryOutOfBounds {
                address,
                capacity: self.capacity(),
            })
    }

    pub fn write(&mut self, address: usize, value: u8) -> Result<()> {
        let capacity = self.capacity();
        let cell = self
            .cells
            .get_mut(address)
            .ok_or(CpuError::MemoryOutOfBounds { address, capacity })?;
        *cell = value;
        Ok(())
    }

    /// Copies `bytes` in starting at address 0.
    pub fn load(&mut self, bytes: &[u8]) -> Result<()> {
        if bytes.len() > self.capacity() {
            return Err(CpuError::MemoryOutOfBounds {
                address: bytes.len() - 1,
                capacity: self.capacity(),
            });
        }
        self.cells[..bytes.len()].copy_from_slice(bytes);
        Ok(())
    }
}
