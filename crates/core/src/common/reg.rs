//! Register File.
//!
//! This module provides the `RegisterFile` struct, the fixed set of 18 unsigned
//! 64-bit slots backing every architectural register. It provides:
//! 1. **Storage:** One slot per `Register`, indexed by hardware encoding.
//! 2. **Access:** Total `get`/`set` over the closed register enum.
//! 3. **Observability:** A textual dump of every slot for fault diagnostics.

use std::fmt::Write as _;

use crate::isa::abi::{REGISTER_COUNT, Register};

/// Register file holding every architectural register.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterFile {
    regs: [u64; REGISTER_COUNT],
}

impl RegisterFile {
    /// Creates a register file with every slot zeroed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a register.
    #[inline]
    pub fn get(&self, reg: Register) -> u64 {
        self.regs[reg.index()]
    }

    /// Writes a register.
    #[inline]
    pub fn set(&mut self, reg: Register, val: u64) {
        self.regs[reg.index()] = val;
    }

    /// Iterates over `(register, value)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (Register, u64)> + '_ {
        Register::ALL.into_iter().map(|r| (r, self.get(r)))
    }

    /// Renders every register in pairs with hexadecimal formatting.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for pair in Register::ALL.chunks(2) {
            for (i, reg) in pair.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                let _ = write!(out, "{:<6}={:#018x}", reg.name(), self.get(*reg));
            }
            out.push('\n');
        }
        out
    }
}
