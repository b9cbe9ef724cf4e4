//! Instruction Disassembler.
//!
//! Renders decoded instructions in Intel syntax for the instruction trace and
//! the debugger (`push rbp`, `mov rbp, rsp`, `mov eax, 0x5`, `ret`).

use std::fmt;

use super::instruction::{Instruction, OperandWidth};

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Push(reg) => write!(f, "push {reg}"),
            Self::Pop(reg) => write!(f, "pop {reg}"),
            Self::MovRegReg { dst, src } => write!(f, "mov {dst}, {src}"),
            Self::MovImm { dst, width, imm } => {
                write!(f, "mov {}, {imm:#x}", dst.name_for_width(width))
            }
            Self::Ret => f.write_str("ret"),
        }
    }
}

impl fmt::Display for OperandWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}
