use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use ls8::{cpu, loader, CpuConfig, Status, SystemState, UnknownOpcodePolicy};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ls8")]
#[command(about = "Run an LS-8 program", long_about = None)]
struct Args {
    /// Path to an .ls8 program; runs the built-in print-8 program if omitted
    program: Option<PathBuf>,

    /// Stop on unknown opcodes instead of skipping them
    #[arg(long, default_value_t = false)]
    strict: bool,

    /// Memory size in bytes (1..=256)
    #[arg(long, default_value_t = 256)]
    memory_size: usize,

    /// Log processor state before every instruction
    #[arg(long, default_value_t = false)]
    trace: bool,
}

fn execute(args: &Args) -> Result<Status> {
    let program = match &args.program {
        Some(path) => loader::load_file(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => {
            println!("-----------------------------------");
            println!("A default program will be executed.");
            println!("-----------------------------------");
            loader::DEFAULT_PROGRAM.to_vec()
        }
    };

    let config = CpuConfig {
        memory_size: args.memory_size,
        unknown_opcode: if args.strict {
            UnknownOpcodePolicy::Fatal
        } else {
            UnknownOpcodePolicy::Skip
        },
        ..CpuConfig::default()
    };
    let mut sys = SystemState::with_program(&config, &program)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let status = cpu::run(&mut sys, &mut out)
        .with_context(|| format!("execution stopped at pc {:#04x}", sys.cpu_state.pc))?;
    out.flush()?;
    Ok(status)
}

fn main() {
    let args = Args::parse();

    let default_filter = if args.trace { "ls8=trace" } else { "ls8=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = execute(&args) {
        error!("{:#}", e);
        // still reported when RUST_LOG silences the logger
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}
