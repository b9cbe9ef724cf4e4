//! Instruction Execution.
//!
//! One call to `Cpu::step` runs a full `Fetch -> PrefixScan -> Decode ->
//! Execute -> Advance` cycle. The instruction pointer advances by the decoded
//! length for every instruction except `ret`, whose jump replaces the advance.

use tracing::{info, trace};

use super::{Cpu, StepOutcome};
use crate::common::error::Fault;
use crate::isa::{Decoded, Instruction, Register, decode};

impl Cpu {
    /// Executes exactly one instruction.
    ///
    /// Returns `StepOutcome::Halted` without executing anything if `rip`
    /// already equals the sentinel.
    ///
    /// # Errors
    ///
    /// Any `Fault` from decoding or memory access. State after a fault is not
    /// meaningful and the run must end.
    pub fn step(&mut self) -> Result<StepOutcome, Fault> {
        if let Some(status) = self.halted() {
            return Ok(StepOutcome::Halted(status));
        }

        let ip = self.regs.get(Register::Rip);
        let Decoded { inst, len } = decode(&self.memory, ip)?;

        if self.trace {
            info!(target: "amd64emu::trace", "{ip:#010x}: {inst}");
        } else {
            trace!("{ip:#010x}: {inst}");
        }

        let next_ip = match inst {
            Instruction::Push(reg) => {
                let value = self.regs.get(reg);
                self.push(value)?;
                ip + len
            }
            Instruction::Pop(reg) => {
                let value = self.pop()?;
                self.regs.set(reg, value);
                ip + len
            }
            Instruction::MovRegReg { dst, src } => {
                self.regs.set(dst, self.regs.get(src));
                ip + len
            }
            Instruction::MovImm { dst, imm, .. } => {
                self.regs.set(dst, imm);
                ip + len
            }
            Instruction::Ret => self.pop()?,
        };

        self.regs.set(Register::Rip, next_ip);
        self.retired += 1;

        Ok(self
            .halted()
            .map_or(StepOutcome::Continue, StepOutcome::Halted))
    }

    /// Decodes the instruction at `rip` without executing it.
    pub fn peek(&self) -> Result<Decoded, Fault> {
        decode(&self.memory, self.regs.get(Register::Rip))
    }
}
