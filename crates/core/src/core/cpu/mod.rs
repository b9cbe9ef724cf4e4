//! CPU Core Definition and Bootstrap.
//!
//! This module defines the central `Cpu` structure, the explicitly owned
//! container for all emulated state. It coordinates the following:
//! 1. **State Management:** Owns the register file and flat memory.
//! 2. **Bootstrap:** Places a `ProcessImage`, sets the entry point, and plants
//!    the sentinel return address at the top of the stack.
//! 3. **Termination:** Reports halt and the exit status once the entry
//!    function returns to the sentinel.

/// Instruction execution (one fetch/decode/execute/advance per call).
pub mod execution;

/// Stack helpers built on memory access.
pub mod memory;

use tracing::debug;

use crate::common::RegisterFile;
use crate::common::constants::STACK_SLOT;
use crate::common::error::LoadError;
use crate::config::Config;
use crate::isa::Register;
use crate::memory::Memory;
use crate::sim::image::ProcessImage;

/// Exit status of a halted program: the accumulator at the moment of halt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExitStatus {
    /// Full 64-bit `rax` value.
    pub rax: u64,
}

impl ExitStatus {
    /// `rax` truncated to the host exit-code width.
    pub const fn code(self) -> i32 {
        self.rax as i32
    }
}

/// Result of executing one instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The program continues at the new instruction pointer.
    Continue,
    /// The entry function returned to the sentinel; the run is over.
    Halted(ExitStatus),
}

/// Emulated CPU: register file plus memory.
#[derive(Debug)]
pub struct Cpu {
    /// Architectural registers.
    pub regs: RegisterFile,
    /// Flat simulated memory.
    pub memory: Memory,
    /// Sentinel return address planted by `boot`; `None` before boot.
    pub sentinel: Option<u64>,
    /// Number of instructions retired since boot.
    pub retired: u64,
    /// Log retired instructions at `info` instead of `trace`.
    pub trace: bool,
}

impl Cpu {
    /// Creates a CPU with zeroed registers and `config.memory.ram_size` bytes of memory.
    pub fn new(config: &Config) -> Self {
        Self::with_memory(config.memory.ram_size, config.general.trace_instructions)
    }

    /// Creates a CPU with `size` bytes of memory.
    pub fn with_memory(size: usize, trace: bool) -> Self {
        Self {
            regs: RegisterFile::new(),
            memory: Memory::new(size),
            sentinel: None,
            retired: 0,
            trace,
        }
    }

    /// Loads `image` and prepares the stack; returns the sentinel address.
    ///
    /// The image bytes are copied to the load address and `rip` is set to the
    /// entry address. The top stack slot (`len(memory) - 8`) holds its own
    /// address, and `rsp` points at it, so the entry function's final `ret`
    /// jumps to the sentinel.
    ///
    /// # Errors
    ///
    /// `LoadError::ImageTooLarge` if the image or the stack slot does not fit.
    pub fn boot(&mut self, image: &ProcessImage) -> Result<u64, LoadError> {
        let memory_size = self.memory.len();
        self.memory
            .load(image.load_address(), image.bytes())
            .map_err(|_| LoadError::ImageTooLarge {
                load_address: image.load_address(),
                len: image.bytes().len(),
                memory_size,
            })?;

        let sentinel = (memory_size as u64).saturating_sub(STACK_SLOT);
        self.memory
            .write(sentinel, STACK_SLOT as usize, sentinel)
            .map_err(|_| LoadError::ImageTooLarge {
                load_address: sentinel,
                len: STACK_SLOT as usize,
                memory_size,
            })?;

        self.regs.set(Register::Rip, image.entry_address());
        self.regs.set(Register::Rsp, sentinel);
        self.sentinel = Some(sentinel);
        self.retired = 0;

        debug!(
            load_address = format_args!("{:#x}", image.load_address()),
            entry = format_args!("{:#x}", image.entry_address()),
            len = image.bytes().len(),
            sentinel = format_args!("{sentinel:#x}"),
            "image booted"
        );
        Ok(sentinel)
    }

    /// Returns the exit status if `rip` has reached the sentinel.
    pub fn halted(&self) -> Option<ExitStatus> {
        let sentinel = self.sentinel?;
        (self.regs.get(Register::Rip) == sentinel).then(|| self.exit_status())
    }

    /// Current exit status (`rax`), whether or not the program has halted.
    pub fn exit_status(&self) -> ExitStatus {
        ExitStatus {
            rax: self.regs.get(Register::Rax),
        }
    }

    /// Renders the instruction pointer, retired count, and all registers.
    pub fn dump_state(&self) -> String {
        format!(
            "RIP = {:#018x}  retired = {}\n{}",
            self.regs.get(Register::Rip),
            self.retired,
            self.regs.dump()
        )
    }
}
