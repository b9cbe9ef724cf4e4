//! Global Emulator Constants.
//!
//! This module defines constants shared across the emulator. It includes:
//! 1. **Memory Constants:** The reference memory size and the stack slot width.
//! 2. **Diagnostic Constants:** How many bytes a fault dump shows.

/// One mebibyte (`4 * MIB` is the unit the reference memory size is counted in).
pub const MIB: usize = 1024 * 1024;

/// Reference memory size: ten 4 MiB blocks.
pub const DEFAULT_MEMORY_SIZE: usize = 10 * 4 * MIB;

/// Width in bytes of a stack slot (`push`, `pop`, return addresses).
pub const STACK_SLOT: u64 = 8;

/// Number of bytes starting at a faulting instruction included in a fault diagnostic.
pub const FAULT_WINDOW: usize = 10;

/// Entry symbol resolved by the ELF loader when none is configured.
pub const DEFAULT_ENTRY_SYMBOL: &str = "main";
