//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the register set, opcode values, decoding logic, and disassembly
//! for the small x86-64 subset the emulator executes: `push`/`pop` of a
//! register, register-to-register `mov`, `mov` of an immediate, and `ret`,
//! with the `0x48` and `0x66` operand-size prefixes.

/// Register names, encodings, and width-specific aliases.
pub mod abi;

/// Prefix scan and opcode dispatch.
pub mod decode;

/// Intel-syntax rendering of decoded instructions.
pub mod disasm;

/// Decoded instruction representation.
pub mod instruction;

/// Opcode, prefix, and mode-byte constants.
pub mod opcodes;

pub use abi::Register;
pub use decode::decode;
pub use instruction::{Decoded, Instruction, OperandWidth};
