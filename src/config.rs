use crate::memory::DEFAULT_MEMORY_SIZE;
use crate::registers::STACK_START;

/// What the engine does when it fetches a byte that is not in the opcode table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownOpcodePolicy {
    /// Print a diagnostic line and step over the byte.
    #[default]
    Skip,
    /// Stop the run with `CpuError::UnknownOpcode`.
    Fatal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpuConfig {
    pub memory_size: usize,
    pub stack_start: u8,
    pub unknown_opcode: UnknownOpcodePolicy,
}

impl Default for CpuConfig {
    fn default() -> Self {
        CpuConfig {
            memory_size: DEFAULT_MEMORY_SIZE,
            stack_start: STACK_START,
            unknown_opcode: UnknownOpcodePolicy::Skip,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = CpuConfig::default();
        assert_eq!(config.memory_size, 256);
        assert_eq!(config.stack_start, 0xf4);
        assert_eq!(config.unknown_opcode, UnknownOpcodePolicy::Skip);
    }
}
