//! x86-64 opcode and prefix bytes.
//!
//! Defines the one-byte opcodes and operand-size prefixes the decoder
//! recognizes. Register-encoding opcodes are given as their base value; the
//! low three bits of the byte select the register.

/// REX prefix with only the W bit set: selects 64-bit operand size.
pub const PREFIX_REX_W: u8 = 0x48;

/// Operand-size override prefix: selects 16-bit operand size.
pub const PREFIX_OPERAND_SIZE: u8 = 0x66;

/// `push r64` (0x50-0x57).
pub const PUSH_R: u8 = 0x50;

/// Last `push r64` opcode.
pub const PUSH_R_LAST: u8 = PUSH_R + 7;

/// `pop r64` (0x58-0x5F).
pub const POP_R: u8 = 0x58;

/// Last `pop r64` opcode.
pub const POP_R_LAST: u8 = POP_R + 7;

/// `mov r/m, r` (register/register form only).
pub const MOV_RM_R: u8 = 0x89;

/// `mov r, imm` (0xB8-0xBF).
pub const MOV_R_IMM: u8 = 0xB8;

/// Last `mov r, imm` opcode.
pub const MOV_R_IMM_LAST: u8 = MOV_R_IMM + 7;

/// Near `ret`.
pub const RET: u8 = 0xC3;

/// Mask for the register selected by the low bits of an opcode.
pub const OPCODE_REG_MASK: u8 = 0b0000_0111;

/// Mask for the `mod` field of a mode byte (bits 6-7).
pub const MODRM_MOD_MASK: u8 = 0b1100_0000;

/// `mod` value selecting a register operand rather than memory.
pub const MODRM_MOD_REGISTER: u8 = 0b1100_0000;

/// Mask for the `reg` field of a mode byte (bits 3-5), the source of `mov r/m, r`.
pub const MODRM_REG_MASK: u8 = 0b0011_1000;

/// Shift for the `reg` field of a mode byte.
pub const MODRM_REG_SHIFT: u32 = 3;

/// Mask for the `rm` field of a mode byte (bits 0-2), the destination of `mov r/m, r`.
pub const MODRM_RM_MASK: u8 = 0b0000_0111;
