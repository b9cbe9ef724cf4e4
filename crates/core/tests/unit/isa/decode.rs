//! # Decoder Tests
//!
//! Each case places raw bytes at address 0 of a small memory and checks the
//! decoded instruction and its length in bytes.

use amd64emu_core::common::{AccessType, Fault};
use amd64emu_core::isa::{Decoded, Instruction, OperandWidth, Register, decode};
use amd64emu_core::memory::Memory;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn decode_bytes(bytes: &[u8]) -> Result<Decoded, Fault> {
    let mut mem = Memory::new(64);
    mem.load(0, bytes).unwrap();
    decode(&mem, 0)
}

#[rstest]
#[case::push_rax(&[0x50], Instruction::Push(Register::Rax), 1)]
#[case::push_rdi(&[0x57], Instruction::Push(Register::Rdi), 1)]
#[case::pop_rbp(&[0x5D], Instruction::Pop(Register::Rbp), 1)]
#[case::pop_rax(&[0x58], Instruction::Pop(Register::Rax), 1)]
#[case::ret(&[0xC3], Instruction::Ret, 1)]
#[case::prefixed_push(&[0x48, 0x50], Instruction::Push(Register::Rax), 2)]
#[case::mov_rbp_rsp(
    &[0x48, 0x89, 0xE5],
    Instruction::MovRegReg { dst: Register::Rbp, src: Register::Rsp },
    3
)]
#[case::mov_rbx_rax_unprefixed(
    &[0x89, 0xC3],
    Instruction::MovRegReg { dst: Register::Rbx, src: Register::Rax },
    2
)]
#[case::mov_eax_imm32(
    &[0xB8, 0x05, 0x00, 0x00, 0x00],
    Instruction::MovImm { dst: Register::Rax, width: OperandWidth::Dword, imm: 5 },
    5
)]
#[case::mov_rcx_imm64(
    &[0x48, 0xB9, 0xEF, 0xCD, 0xAB, 0x89, 0x67, 0x45, 0x23, 0x01],
    Instruction::MovImm { dst: Register::Rcx, width: OperandWidth::Qword, imm: 0x0123_4567_89AB_CDEF },
    10
)]
#[case::mov_dx_imm16(
    &[0x66, 0xBA, 0x34, 0x12],
    Instruction::MovImm { dst: Register::Rdx, width: OperandWidth::Word, imm: 0x1234 },
    4
)]
fn decodes_supported_forms(
    #[case] bytes: &[u8],
    #[case] inst: Instruction,
    #[case] len: u64,
) {
    assert_eq!(decode_bytes(bytes).unwrap(), Decoded { inst, len });
}

/// Every register in each one-byte opcode range maps to its encoding.
#[test]
fn opcode_ranges_cover_legacy_registers() {
    for enc in 0u8..8 {
        let reg = Register::from_encoding(enc).unwrap();
        assert_eq!(decode_bytes(&[0x50 + enc]).unwrap().inst, Instruction::Push(reg));
        assert_eq!(decode_bytes(&[0x58 + enc]).unwrap().inst, Instruction::Pop(reg));
        assert!(matches!(
            decode_bytes(&[0xB8 + enc, 0, 0, 0, 0]).unwrap().inst,
            Instruction::MovImm { dst, .. } if dst == reg
        ));
    }
}

/// The last prefix before the opcode wins; each prefix adds to the length.
#[rstest]
#[case::word_then_qword(&[0x66, 0x48], OperandWidth::Qword)]
#[case::qword_then_word(&[0x48, 0x66], OperandWidth::Word)]
#[case::repeated_word(&[0x66, 0x66], OperandWidth::Word)]
fn last_prefix_selects_width(#[case] prefixes: &[u8], #[case] width: OperandWidth) {
    let mut bytes = prefixes.to_vec();
    bytes.push(0xB8);
    bytes.extend([0x11; 8]);
    let decoded = decode_bytes(&bytes).unwrap();
    assert_eq!(decoded.len, prefixes.len() as u64 + 1 + width.bytes() as u64);
    assert!(matches!(decoded.inst, Instruction::MovImm { width: w, .. } if w == width));
}

#[test]
fn decodes_at_nonzero_address() {
    let mut mem = Memory::new(64);
    mem.load(0x20, &[0x48, 0x89, 0xE5]).unwrap();
    let decoded = decode(&mem, 0x20).unwrap();
    assert_eq!(decoded.len, 3);
}

#[rstest]
#[case::syscall(&[0x0F, 0x05], 0x0F)]
#[case::zero_byte(&[0x00], 0x00)]
#[case::call(&[0xE8, 0, 0, 0, 0], 0xE8)]
fn unknown_opcodes_fault(#[case] bytes: &[u8], #[case] opcode: u8) {
    match decode_bytes(bytes) {
        Err(Fault::UnknownOpcode { address, opcode: got, context }) => {
            assert_eq!(address, 0);
            assert_eq!(got, opcode);
            assert_eq!(&context[..bytes.len()], bytes);
        }
        other => panic!("expected UnknownOpcode, got {other:?}"),
    }
}

/// A prefixed unknown opcode is reported at the first prefix byte.
#[test]
fn unknown_opcode_after_prefix_reports_instruction_start() {
    match decode_bytes(&[0x48, 0x0F, 0x05]) {
        Err(Fault::UnknownOpcode { address, opcode, context }) => {
            assert_eq!(address, 0);
            assert_eq!(opcode, 0x0F);
            assert_eq!(&context[..3], &[0x48, 0x0F, 0x05]);
        }
        other => panic!("expected UnknownOpcode, got {other:?}"),
    }
}

/// `mov [rbp-8], rax` uses a memory-indirect mode byte.
#[test]
fn memory_operand_is_unsupported() {
    match decode_bytes(&[0x48, 0x89, 0x45, 0xF8]) {
        Err(Fault::UnsupportedOperand { address, modrm, .. }) => {
            assert_eq!(address, 0);
            assert_eq!(modrm, 0x45);
        }
        other => panic!("expected UnsupportedOperand, got {other:?}"),
    }
}

#[test]
fn truncated_immediate_faults_on_fetch() {
    let mut mem = Memory::new(3);
    mem.load(0, &[0xB8, 0x01, 0x02]).unwrap();
    assert_eq!(
        decode(&mem, 0),
        Err(Fault::OutOfBounds {
            access: AccessType::Fetch,
            address: 1,
            width: 4
        })
    );
}

#[test]
fn fetch_past_memory_faults() {
    let mem = Memory::new(8);
    assert!(matches!(
        decode(&mem, 8),
        Err(Fault::OutOfBounds { access: AccessType::Fetch, address: 8, .. })
    ));
}
