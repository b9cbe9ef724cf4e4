//! Memory Access Types.
//!
//! This module defines the classification of memory accesses used when reporting
//! faults. An out-of-bounds access names the kind of operation that caused it so
//! the diagnostic distinguishes a runaway instruction pointer from a bad stack.

use std::fmt;

/// Type of memory access operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessType {
    /// Instruction fetch access (opcode, prefix, or operand bytes).
    Fetch,

    /// Data read access (`pop`, `ret`, debugger inspection).
    Read,

    /// Data write access (`push`, image placement).
    Write,
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fetch => "fetch",
            Self::Read => "read",
            Self::Write => "write",
        };
        f.write_str(name)
    }
}
