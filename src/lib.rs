//! LS-8: an 8-bit emulated processor.
//!
//! 256 bytes of memory shared by program and stack, eight byte-wide
//! registers (R7 is the stack pointer) and a flags byte set by CMP.

pub mod alu;
pub mod config;
pub mod cpu;
pub mod error;
pub mod loader;
pub mod memory;
pub mod opcode;
pub mod registers;

pub use config::{CpuConfig, UnknownOpcodePolicy};
pub use cpu::{emulate_op, run, Status, SystemState};
pub use error::{CpuError, Result};
