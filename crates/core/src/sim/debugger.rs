//! Debugger value resolution.
//!
//! Turns an operator token into a number, trying in order: a register name,
//! a `0x`/`0X` hexadecimal literal, a decimal literal.

use crate::common::RegisterFile;
use crate::common::error::ResolveError;
use crate::isa::Register;

/// Resolves `token` against the current register values.
///
/// # Errors
///
/// `ResolveError::Unresolvable` if no tier applies. Nothing is mutated.
pub fn resolve(regs: &RegisterFile, token: &str) -> Result<u64, ResolveError> {
    if let Some(reg) = Register::from_name(token) {
        return Ok(regs.get(reg));
    }

    let (digits, radix) = match token.strip_prefix("0x").or_else(|| token.strip_prefix("0X")) {
        Some(hex) => (hex, 16),
        None => (token, 10),
    };
    // `from_str_radix` alone would also take a leading `+`.
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(ResolveError::Unresolvable(token.to_string()));
    }
    u64::from_str_radix(digits, radix).map_err(|_| ResolveError::Unresolvable(token.to_string()))
}
