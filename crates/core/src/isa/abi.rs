//! x86-64 register names and encodings.
//!
//! Defines the closed set of architectural registers the emulator models, in
//! the order of their hardware encoding (so `rbp` is 5), followed by the
//! instruction pointer and flags slots which have no 3/4-bit encoding.

use std::fmt;
use std::str::FromStr;

use crate::common::error::ResolveError;

use super::instruction::OperandWidth;

/// Number of register slots in the register file.
pub const REGISTER_COUNT: usize = 18;

/// Architectural register, indexed by hardware encoding for the first sixteen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Register {
    /// Accumulator; carries the exit status at halt.
    Rax = 0,
    /// Counter register.
    Rcx = 1,
    /// Data register.
    Rdx = 2,
    /// Base register.
    Rbx = 3,
    /// Stack pointer.
    Rsp = 4,
    /// Frame pointer.
    Rbp = 5,
    /// Source index.
    Rsi = 6,
    /// Destination index.
    Rdi = 7,
    /// General-purpose register r8.
    R8 = 8,
    /// General-purpose register r9.
    R9 = 9,
    /// General-purpose register r10.
    R10 = 10,
    /// General-purpose register r11.
    R11 = 11,
    /// General-purpose register r12.
    R12 = 12,
    /// General-purpose register r13.
    R13 = 13,
    /// General-purpose register r14.
    R14 = 14,
    /// General-purpose register r15.
    R15 = 15,
    /// Instruction pointer.
    Rip = 16,
    /// Flags register.
    Rflags = 17,
}

impl Register {
    /// Every register, in slot order.
    pub const ALL: [Self; REGISTER_COUNT] = [
        Self::Rax,
        Self::Rcx,
        Self::Rdx,
        Self::Rbx,
        Self::Rsp,
        Self::Rbp,
        Self::Rsi,
        Self::Rdi,
        Self::R8,
        Self::R9,
        Self::R10,
        Self::R11,
        Self::R12,
        Self::R13,
        Self::R14,
        Self::R15,
        Self::Rip,
        Self::Rflags,
    ];

    /// Slot index in the register file.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Register for a hardware encoding (0-15); `None` for anything wider.
    pub fn from_encoding(encoding: u8) -> Option<Self> {
        if encoding < 16 {
            Some(Self::ALL[encoding as usize])
        } else {
            None
        }
    }

    /// Lower-case 64-bit register name (`rax`, `r12`, `rflags`).
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rax => "rax",
            Self::Rcx => "rcx",
            Self::Rdx => "rdx",
            Self::Rbx => "rbx",
            Self::Rsp => "rsp",
            Self::Rbp => "rbp",
            Self::Rsi => "rsi",
            Self::Rdi => "rdi",
            Self::R8 => "r8",
            Self::R9 => "r9",
            Self::R10 => "r10",
            Self::R11 => "r11",
            Self::R12 => "r12",
            Self::R13 => "r13",
            Self::R14 => "r14",
            Self::R15 => "r15",
            Self::Rip => "rip",
            Self::Rflags => "rflags",
        }
    }

    /// Exact-match lookup by 64-bit name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.name() == name)
    }

    /// Name of the register viewed at `width`, as the disassembler prints it.
    ///
    /// Only the eight legacy registers have sub-width names here; the rest keep
    /// their 64-bit name.
    pub const fn name_for_width(self, width: OperandWidth) -> &'static str {
        match (width, self) {
            (OperandWidth::Qword, _) => self.name(),
            (OperandWidth::Dword, Self::Rax) => "eax",
            (OperandWidth::Dword, Self::Rcx) => "ecx",
            (OperandWidth::Dword, Self::Rdx) => "edx",
            (OperandWidth::Dword, Self::Rbx) => "ebx",
            (OperandWidth::Dword, Self::Rsp) => "esp",
            (OperandWidth::Dword, Self::Rbp) => "ebp",
            (OperandWidth::Dword, Self::Rsi) => "esi",
            (OperandWidth::Dword, Self::Rdi) => "edi",
            (OperandWidth::Word, Self::Rax) => "ax",
            (OperandWidth::Word, Self::Rcx) => "cx",
            (OperandWidth::Word, Self::Rdx) => "dx",
            (OperandWidth::Word, Self::Rbx) => "bx",
            (OperandWidth::Word, Self::Rsp) => "sp",
            (OperandWidth::Word, Self::Rbp) => "bp",
            (OperandWidth::Word, Self::Rsi) => "si",
            (OperandWidth::Word, Self::Rdi) => "di",
            _ => self.name(),
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Register {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ResolveError::Unresolvable(s.to_string()))
    }
}
