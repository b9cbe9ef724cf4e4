//! Decoded instruction representation.
//!
//! The decoder turns raw bytes into an `Instruction` plus the number of bytes
//! it occupies; the executor only ever sees this structured form.

use super::abi::Register;

/// Operand size selected by prefixes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OperandWidth {
    /// 16-bit, selected by the `0x66` prefix.
    Word,
    /// 32-bit, the default without a prefix.
    #[default]
    Dword,
    /// 64-bit, selected by the `0x48` prefix.
    Qword,
}

impl OperandWidth {
    /// Width in bytes.
    pub const fn bytes(self) -> usize {
        match self {
            Self::Word => 2,
            Self::Dword => 4,
            Self::Qword => 8,
        }
    }

    /// Width in bits.
    pub const fn bits(self) -> u32 {
        (self.bytes() * 8) as u32
    }
}

/// A decoded instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// Push a register's full 64-bit value.
    Push(Register),
    /// Pop 8 bytes into a register.
    Pop(Register),
    /// Copy a register's full value into another register.
    MovRegReg {
        /// Destination (mode byte bits 0-2).
        dst: Register,
        /// Source (mode byte bits 3-5).
        src: Register,
    },
    /// Load a raw little-endian immediate of `width` bytes into a register.
    MovImm {
        /// Destination register.
        dst: Register,
        /// Operand width that determined the immediate size.
        width: OperandWidth,
        /// Immediate bits, zero-extended.
        imm: u64,
    },
    /// Return through the address on top of the stack.
    Ret,
}

/// An instruction together with its encoded length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decoded {
    /// The decoded instruction.
    pub inst: Instruction,
    /// Bytes consumed: prefixes, opcode, and operands.
    pub len: u64,
}
