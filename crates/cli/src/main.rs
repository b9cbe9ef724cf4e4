//! x86-64 user-mode emulator CLI.
//!
//! This binary loads an executable and runs it on the emulated CPU. It performs:
//! 1. **Load:** Parse an ELF executable (entry symbol `main`) or place a flat binary.
//! 2. **Free run:** Flood the step gate until the program returns to the sentinel.
//! 3. **Debug:** With `--debug`, drive the engine one step at a time from stdin.
//!
//! The process exits with the program's `rax` at halt, or 1 on a load error or fault.

mod command;
mod repl;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::{fs, process};

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use amd64emu_core::{Config, Cpu};
use amd64emu_core::common::error::EngineError;
use amd64emu_core::sim::{RunOutcome, Simulator, loader};

use crate::repl::Repl;

#[derive(Parser, Debug)]
#[command(
    name = "amd64emu",
    author,
    version,
    about = "Minimal user-mode x86-64 emulator",
    long_about = "Run a statically-linked x86-64 executable, or step through it.\n\nExamples:\n  amd64emu ./prog\n  amd64emu ./prog --debug\n  amd64emu --flat code.bin --base 0x1000"
)]
struct Cli {
    /// Executable to run.
    binary: PathBuf,

    /// Step through the program interactively instead of free-running.
    #[arg(short, long)]
    debug: bool,

    /// Entry symbol to start from (overrides the config; default `main`).
    #[arg(long, value_name = "SYMBOL")]
    entry: Option<String>,

    /// Treat the binary as raw code placed and entered at `--base`.
    #[arg(long)]
    flat: bool,

    /// Load and entry address for `--flat` (hex with 0x, or decimal).
    #[arg(long, default_value = "0", value_parser = parse_address)]
    base: u64,

    /// JSON configuration file.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log every executed instruction.
    #[arg(long)]
    trace: bool,
}

fn parse_address(s: &str) -> Result<u64, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid address '{s}': {e}"))
}

/// Prints a fatal message and exits with status 1.
fn fatal(msg: impl std::fmt::Display) -> ! {
    eprintln!("\n[!] FATAL: {msg}");
    process::exit(1);
}

fn init_tracing(trace: bool) {
    let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if trace && let Ok(directive) = "amd64emu::trace=info".parse() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Config {
    let Some(path) = path else {
        return Config::default();
    };
    let json = fs::read_to_string(path)
        .unwrap_or_else(|e| fatal(format_args!("could not read config '{}': {e}", path.display())));
    Config::from_json(&json)
        .unwrap_or_else(|e| fatal(format_args!("invalid config '{}': {e}", path.display())))
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.trace);

    let mut config = load_config(cli.config.as_deref());
    if let Some(entry) = cli.entry {
        config.general.entry_symbol = entry;
    }
    config.general.trace_instructions |= cli.trace;
    debug!(
        binary = %cli.binary.display(),
        entry = %config.general.entry_symbol,
        ram_size = config.memory.ram_size,
        flat = cli.flat,
        "configuration resolved"
    );

    let image = if cli.flat {
        loader::load_flat(&cli.binary, cli.base)
    } else {
        loader::load_elf(&cli.binary, &config.general.entry_symbol)
    }
    .unwrap_or_else(|e| fatal(e));

    let mut sim = Simulator::start(&config, &image).unwrap_or_else(|e| fatal(e));

    let outcome = if cli.debug {
        let stdin = io::stdin();
        let stdout = io::stdout();
        if let Err(e) = Repl::new(&sim, stdout.lock()).run(stdin.lock()) {
            eprintln!("[!] debugger I/O error: {e}");
        }
        sim.shutdown()
    } else {
        sim.run()
    };
    let _ = io::stdout().flush();

    let code = exit_code(outcome, || sim.inspect(Cpu::dump_state), &mut io::stderr());
    process::exit(code);
}

/// Maps the engine's final outcome to the process exit code.
///
/// A halt exits with the program's `rax`; a debug session that ended before
/// the program did exits with 0. Faults print the diagnostic and the register
/// dump to `err` and exit with 1.
fn exit_code(
    outcome: Result<RunOutcome, EngineError>,
    dump: impl FnOnce() -> String,
    err: &mut impl Write,
) -> i32 {
    match outcome {
        Ok(RunOutcome::Halted(status)) => status.code(),
        Ok(RunOutcome::Stopped) => 0,
        Err(EngineError::Fault(fault)) => {
            let _ = writeln!(err, "\n[!] FATAL FAULT: {fault}");
            let _ = write!(err, "{}", dump());
            1
        }
        Err(e) => {
            let _ = writeln!(err, "\n[!] FATAL: {e}");
            1
        }
    }
}
