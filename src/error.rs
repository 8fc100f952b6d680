use thiserror::Error;

pub type Result<T> = std::result::Result<T, CpuError>;

#[derive(Debug, Error)]
pub enum CpuError {
    #[error("memory access at {address:#04x} out of bounds (capacity {capacity})")]
    MemoryOutOfBounds { address: usize, capacity: usize },
    #[error("register R{index} out of bounds")]
    RegisterOutOfBounds { index: u8 },
    #[error("division by zero in {op} at pc {pc:#04x}")]
    DivisionByZero { op: &'static str, pc: usize },
    #[error("unsupported ALU operation {0}")]
    UnsupportedAluOp(String),
    #[error("unknown instruction {opcode:#010b} at pc {pc:#04x}")]
    UnknownOpcode { opcode: u8, pc: usize },
    #[error("instruction {mnemonic} at pc {pc:#04x} is not implemented")]
    UnimplementedOpcode { mnemonic: &'static str, pc: usize },
    #[error("return address after pc {pc:#04x} does not fit in a byte")]
    ReturnAddressOverflow { pc: usize },
    #[error("invalid memory size {0} (must be 1..=256)")]
    InvalidMemorySize(usize),
    #[error("line {line}: invalid instruction byte {text:?}")]
    Parse { line: usize, text: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CpuError {
    /// Unknown opcodes are the one recoverable class; the engine only raises
    /// them when configured to treat them as fatal.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, CpuError::UnknownOpcode { .. })
    }
}
