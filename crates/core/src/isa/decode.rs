//! x86-64 Instruction Decoder.
//!
//! Decodes the instruction at an address into a structured `Decoded` value.
//! Decoding runs in two phases:
//! 1. **Prefix scan:** operand-size prefixes are consumed; the last one seen
//!    selects the operand width (32-bit when none is present).
//! 2. **Opcode dispatch:** an ordered match over opcode ranges consumes the
//!    operand bytes of the selected instruction.
//!
//! Any byte outside the recognized set is a fatal `Fault::UnknownOpcode`, and a
//! memory-indirect `mov` mode byte is a fatal `Fault::UnsupportedOperand`.

use crate::common::data::AccessType;
use crate::common::error::Fault;
use crate::memory::Memory;

use super::abi::Register;
use super::instruction::{Decoded, Instruction, OperandWidth};
use super::opcodes::{
    MODRM_MOD_MASK, MODRM_MOD_REGISTER, MODRM_REG_MASK, MODRM_REG_SHIFT, MODRM_RM_MASK,
    MOV_R_IMM, MOV_R_IMM_LAST, MOV_RM_R, OPCODE_REG_MASK, POP_R, POP_R_LAST, PREFIX_OPERAND_SIZE,
    PREFIX_REX_W, PUSH_R, PUSH_R_LAST, RET,
};

/// Register selected by the low three bits of `byte`.
#[inline]
fn low_register(byte: u8) -> Register {
    Register::ALL[(byte & OPCODE_REG_MASK) as usize]
}

/// Width selected by a prefix byte, or `None` if `byte` is not a prefix.
#[inline]
fn prefix_width(byte: u8) -> Option<OperandWidth> {
    match byte {
        PREFIX_REX_W => Some(OperandWidth::Qword),
        PREFIX_OPERAND_SIZE => Some(OperandWidth::Word),
        _ => None,
    }
}

/// Decodes the instruction starting at `address`.
///
/// # Errors
///
/// * `Fault::OutOfBounds` if any instruction byte lies outside memory.
/// * `Fault::UnknownOpcode` if the opcode byte is not recognized.
/// * `Fault::UnsupportedOperand` ("unsupported memory operand") if a
///   `mov r/m, r` mode byte selects a memory operand (`mod != 0b11`). Only
///   register-to-register pairs are decoded.
pub fn decode(mem: &Memory, address: u64) -> Result<Decoded, Fault> {
    let mut cursor = address;
    let mut width = OperandWidth::default();
    let mut opcode = mem.fetch_u8(cursor)?;

    while let Some(w) = prefix_width(opcode) {
        width = w;
        cursor += 1;
        opcode = mem.fetch_u8(cursor)?;
    }

    let inst = match opcode {
        PUSH_R..=PUSH_R_LAST => Instruction::Push(low_register(opcode)),
        POP_R..=POP_R_LAST => Instruction::Pop(low_register(opcode)),
        MOV_RM_R => {
            cursor += 1;
            let modrm = mem.fetch_u8(cursor)?;
            if modrm & MODRM_MOD_MASK != MODRM_MOD_REGISTER {
                return Err(Fault::UnsupportedOperand {
                    address,
                    modrm,
                    context: mem.window(address),
                });
            }
            Instruction::MovRegReg {
                dst: low_register(modrm & MODRM_RM_MASK),
                src: low_register((modrm & MODRM_REG_MASK) >> MODRM_REG_SHIFT),
            }
        }
        MOV_R_IMM..=MOV_R_IMM_LAST => {
            let imm = mem.read_as(AccessType::Fetch, cursor + 1, width.bytes())?;
            cursor += width.bytes() as u64;
            Instruction::MovImm {
                dst: low_register(opcode),
                width,
                imm,
            }
        }
        RET => Instruction::Ret,
        _ => {
            return Err(Fault::UnknownOpcode {
                address,
                opcode,
                context: mem.window(address),
            });
        }
    };

    Ok(Decoded {
        inst,
        len: cursor - address + 1,
    })
}
