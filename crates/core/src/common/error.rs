//! Fault and Error definitions.
//!
//! This module defines the error taxonomy of the emulator. It provides:
//! 1. **Execution Faults:** Unrecoverable conditions raised while executing guest code.
//! 2. **Load Errors:** Failures while reading or placing an executable image.
//! 3. **Controller Errors:** Local, recoverable failures of the debugger surface.
//!
//! Execution faults and load errors are fatal at the process boundary; the
//! engine never retries or swallows them.

use std::fmt::Write as _;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::data::AccessType;

/// Formats a byte window as space-separated two-digit hex (`0f 00 c3`).
pub fn hex_bytes(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{b:02x}");
    }
    out
}

/// Unrecoverable execution fault.
///
/// Register and memory state at the fault point is not validated, so the run
/// must end. Each variant carries enough context for a diagnostic dump.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Fault {
    /// The byte at `address` (after prefix scanning) is not a recognized opcode.
    ///
    /// `context` holds the bytes starting at the instruction's first byte.
    #[error("unknown instruction {opcode:#04x} at {address:#x} [{}]", hex_bytes(.context))]
    UnknownOpcode {
        /// Address of the first byte of the faulting instruction (including prefixes).
        address: u64,
        /// The opcode byte that failed to decode.
        opcode: u8,
        /// Diagnostic byte window starting at `address`.
        context: Vec<u8>,
    },

    /// A register-to-register `mov` carried a memory-indirect mode byte.
    #[error("unsupported memory operand (mode byte {modrm:#04x}) at {address:#x} [{}]", hex_bytes(.context))]
    UnsupportedOperand {
        /// Address of the first byte of the faulting instruction.
        address: u64,
        /// The mode byte following the opcode.
        modrm: u8,
        /// Diagnostic byte window starting at `address`.
        context: Vec<u8>,
    },

    /// An access of `width` bytes at `address` falls outside simulated memory.
    #[error("{access} of {width} byte(s) at {address:#x} is out of bounds")]
    OutOfBounds {
        /// Kind of access that faulted.
        access: AccessType,
        /// First byte of the access.
        address: u64,
        /// Number of bytes requested.
        width: usize,
    },
}

impl Fault {
    /// Returns the diagnostic byte window, if the fault carries one.
    pub fn context(&self) -> Option<&[u8]> {
        match self {
            Self::UnknownOpcode { context, .. } | Self::UnsupportedOperand { context, .. } => {
                Some(context)
            }
            Self::OutOfBounds { .. } => None,
        }
    }

    /// Returns the address the fault is reported against.
    pub fn address(&self) -> u64 {
        match self {
            Self::UnknownOpcode { address, .. }
            | Self::UnsupportedOperand { address, .. }
            | Self::OutOfBounds { address, .. } => *address,
        }
    }
}

/// Failure while loading an executable image; raised before any instruction runs.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The executable could not be read from disk.
    #[error("could not read '{}': {source}", .path.display())]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The file is not a well-formed ELF container.
    #[error("malformed executable: {0}")]
    Malformed(#[from] object::Error),

    /// No global function symbol with this name exists, or its address is zero.
    #[error("could not find entrypoint symbol: {0}")]
    MissingEntry(String),

    /// No segment or section yields a load address.
    #[error("could not determine load address")]
    UnresolvableLoadAddress,

    /// The image does not fit in simulated memory at its load address.
    #[error("image of {len} bytes at {load_address:#x} does not fit in {memory_size} bytes of memory")]
    ImageTooLarge {
        /// Requested load address.
        load_address: u64,
        /// Image length in bytes.
        len: usize,
        /// Simulated memory size in bytes.
        memory_size: usize,
    },

    /// The engine thread could not be spawned.
    #[error("could not start execution engine: {0}")]
    Spawn(#[source] io::Error),
}

/// Failure to resolve a debugger token to a value; never mutates state.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// The token is neither a register name, a `0x` hex literal, nor a decimal literal.
    #[error("cannot resolve '{0}': expected a register name, hex (0x10), or decimal (16)")]
    Unresolvable(String),
}

/// Step gate has been closed because the engine stopped.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum GateError {
    /// The engine halted or faulted; no further steps will be consumed.
    #[error("execution engine has stopped")]
    Closed,
}

/// Abnormal termination of the engine thread.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// Guest execution hit an unrecoverable fault.
    #[error("fatal fault: {0}")]
    Fault(#[from] Fault),

    /// The engine thread panicked.
    #[error("execution engine panicked")]
    Panicked,
}
