//! # Value Resolver Tests
//!
//! Tokens resolve as a register name first, then a `0x` hex literal, then a
//! decimal literal.

use amd64emu_core::common::{RegisterFile, ResolveError};
use amd64emu_core::isa::Register;
use amd64emu_core::sim::debugger::resolve;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn regs() -> RegisterFile {
    let mut regs = RegisterFile::new();
    regs.set(Register::Rsp, 0xFF8);
    regs.set(Register::Rip, 0x401000);
    regs
}

#[rstest]
#[case::register("rsp", 0xFF8)]
#[case::instruction_pointer("rip", 0x401000)]
#[case::zero_register("r15", 0)]
#[case::hex("0x10", 16)]
#[case::upper_prefix("0X1f", 31)]
#[case::upper_digits("0xFF", 255)]
#[case::decimal("10", 10)]
#[case::leading_zero("010", 10)]
#[case::max("18446744073709551615", u64::MAX)]
fn resolves(#[case] token: &str, #[case] expected: u64) {
    assert_eq!(resolve(&regs(), token), Ok(expected));
}

#[rstest]
#[case::empty("")]
#[case::bare_prefix("0x")]
#[case::bad_hex("0xzz")]
#[case::word("zz")]
#[case::negative("-1")]
#[case::plus_sign("+16")]
#[case::hex_plus("0x+10")]
#[case::inner_space("1 0")]
#[case::overflow("18446744073709551616")]
#[case::uppercase_register("RSP")]
#[case::sub_width_register("eax")]
fn rejects(#[case] token: &str) {
    assert_eq!(
        resolve(&regs(), token),
        Err(ResolveError::Unresolvable(token.to_string()))
    );
}

/// Resolution reads registers and leaves them untouched.
#[test]
fn resolution_does_not_mutate() {
    let regs = regs();
    let before = regs.clone();
    let _ = resolve(&regs, "rsp");
    let _ = resolve(&regs, "nope");
    assert_eq!(regs, before);
}
