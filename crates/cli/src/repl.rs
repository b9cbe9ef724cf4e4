//! Interactive single-step controller.
//!
//! Reads commands line by line, produces one step per `step` command, and
//! prints registers or memory between steps. Malformed input prints a message
//! and leaves all state untouched. The loop ends at end of input, on an I/O
//! error, or as soon as a step halts or faults the program.

use std::io::{self, BufRead, Write};
use std::ops::ControlFlow;

use amd64emu_core::Simulator;
use amd64emu_core::common::error::hex_bytes;
use amd64emu_core::isa::Register;
use amd64emu_core::sim::debugger::resolve;

use crate::command::{self, Command, HELP, MEMORY_USAGE, ParseError};

/// Radix used for addresses and register values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Radix {
    /// Plain decimal (`16`).
    #[default]
    Decimal,
    /// Prefixed hex (`0x10`).
    Hex,
}

impl Radix {
    fn format(self, value: u64) -> String {
        match self {
            Self::Decimal => value.to_string(),
            Self::Hex => format!("{value:#x}"),
        }
    }
}

/// Debugger loop bound to a running simulator.
#[derive(Debug)]
pub struct Repl<'a, W> {
    sim: &'a Simulator,
    out: W,
    radix: Radix,
}

impl<'a, W: Write> Repl<'a, W> {
    /// Creates a controller writing to `out`.
    pub fn new(sim: &'a Simulator, out: W) -> Self {
        Self {
            sim,
            out,
            radix: Radix::default(),
        }
    }

    /// Reads and executes commands until `input` is exhausted or the program stops.
    ///
    /// # Errors
    ///
    /// Any I/O error reading `input` or writing output.
    pub fn run(&mut self, input: impl BufRead) -> io::Result<()> {
        writeln!(self.out, "amd64emu debugger")?;
        writeln!(self.out, "{HELP}")?;
        let mut lines = input.lines();
        loop {
            write!(self.out, "> ")?;
            self.out.flush()?;
            let Some(line) = lines.next() else {
                break;
            };
            if self.execute(&line?)?.is_break() {
                return Ok(());
            }
        }
        writeln!(self.out)
    }

    /// Executes a single command line.
    ///
    /// Returns `ControlFlow::Break` once the program has stopped; no further
    /// commands should be read.
    ///
    /// # Errors
    ///
    /// Any I/O error writing output.
    pub fn execute(&mut self, line: &str) -> io::Result<ControlFlow<()>> {
        match command::parse(line) {
            Ok(Command::Empty) => {}
            Ok(Command::Help) => writeln!(self.out, "{HELP}")?,
            Ok(Command::Step) => return self.step(),
            Ok(Command::Registers(filter)) => self.registers(filter)?,
            Ok(Command::Memory { from, count }) => self.memory(from, count)?,
            Ok(Command::ToggleRadix) => self.toggle_radix()?,
            Err(ParseError::Usage(usage)) => writeln!(self.out, "{usage}")?,
            Err(ParseError::Unknown(name)) => {
                writeln!(self.out, "unknown command '{name}'; type h for help")?;
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    fn step(&mut self) -> io::Result<ControlFlow<()>> {
        if self.sim.step().is_err() {
            writeln!(self.out, "program is no longer running")?;
            return Ok(ControlFlow::Break(()));
        }

        let radix = self.radix;
        let running = self.sim.is_running();
        let report = self.sim.inspect(|cpu| {
            if let Some(status) = cpu.halted() {
                return format!("program halted with status {}", status.code());
            }
            let rip = radix.format(cpu.regs.get(Register::Rip));
            if !running {
                return format!("program stopped by a fault at {rip}");
            }
            match cpu.peek() {
                Ok(next) => format!("=> {rip}: {}", next.inst),
                Err(fault) => format!("=> {rip}: {fault}"),
            }
        });
        writeln!(self.out, "{report}")?;

        Ok(if running {
            ControlFlow::Continue(())
        } else {
            ControlFlow::Break(())
        })
    }

    fn registers(&mut self, filter: Option<&str>) -> io::Result<()> {
        if let Some(name) = filter
            && Register::from_name(name).is_none()
        {
            return writeln!(self.out, "unknown register '{name}'");
        }

        let radix = self.radix;
        let lines: Vec<String> = self.sim.inspect(|cpu| {
            cpu.regs
                .iter()
                .filter(|(reg, _)| filter.is_none_or(|name| name == reg.name()))
                .map(|(reg, value)| format!("{reg}:\t{}", radix.format(value)))
                .collect()
        });
        for line in lines {
            writeln!(self.out, "{line}")?;
        }
        Ok(())
    }

    fn memory(&mut self, from: &str, count: &str) -> io::Result<()> {
        let radix = self.radix;
        let report = self.sim.inspect(|cpu| {
            let (Ok(start), Ok(len)) = (resolve(&cpu.regs, from), resolve(&cpu.regs, count))
            else {
                return MEMORY_USAGE.to_string();
            };
            let Ok(len) = usize::try_from(len) else {
                return MEMORY_USAGE.to_string();
            };
            match cpu.memory.slice(start, len) {
                Ok(bytes) => format!(
                    "memory[{}:{}]: {}",
                    radix.format(start),
                    radix.format(start.saturating_add(len as u64)),
                    hex_bytes(bytes).to_uppercase()
                ),
                Err(fault) => format!("cannot display memory: {fault}"),
            }
        });
        writeln!(self.out, "{report}")
    }

    fn toggle_radix(&mut self) -> io::Result<()> {
        self.radix = match self.radix {
            Radix::Decimal => {
                writeln!(self.out, "Numbers displayed as hex")?;
                Radix::Hex
            }
            Radix::Hex => {
                writeln!(self.out, "Numbers displayed as decimal")?;
                Radix::Decimal
            }
        };
        Ok(())
    }
}
