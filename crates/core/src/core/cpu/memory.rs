//! Stack Access Helpers.
//!
//! `push`, `pop`, and `ret` all move 8-byte slots through `rsp`. A faulting
//! access leaves `rsp` unchanged.

use super::Cpu;
use crate::common::constants::STACK_SLOT;
use crate::common::error::Fault;
use crate::isa::Register;

impl Cpu {
    /// Writes `value` to `rsp - 8`, then decrements `rsp` by 8.
    pub fn push(&mut self, value: u64) -> Result<(), Fault> {
        let sp = self.regs.get(Register::Rsp).wrapping_sub(STACK_SLOT);
        self.memory.write(sp, STACK_SLOT as usize, value)?;
        self.regs.set(Register::Rsp, sp);
        Ok(())
    }

    /// Reads 8 bytes at `rsp`, then increments `rsp` by 8.
    pub fn pop(&mut self) -> Result<u64, Fault> {
        let sp = self.regs.get(Register::Rsp);
        let value = self.memory.read(sp, STACK_SLOT as usize)?;
        self.regs.set(Register::Rsp, sp.wrapping_add(STACK_SLOT));
        Ok(value)
    }
}
