//! Minimal user-mode x86-64 emulator library.
//!
//! This crate loads a statically-linked executable into a flat simulated memory
//! and executes a small subset of x86-64 encodings, one instruction per step:
//! 1. **Core:** The `Cpu` state container and its fetch/decode/execute step.
//! 2. **Memory:** A fixed-size flat address space with a little-endian codec.
//! 3. **ISA:** Register set, prefix scan, opcode dispatch, and disassembly.
//! 4. **Simulation:** Loader, step gate, engine thread, and debugger resolver.

/// Common types and constants (registers, access types, errors).
pub mod common;
/// Emulator configuration (defaults and JSON deserialization).
pub mod config;
/// CPU core (state, bootstrap, execution).
pub mod core;
/// Instruction set (registers, opcodes, decode, disassembly).
pub mod isa;
/// Simulated memory and byte codec.
pub mod memory;
/// Loader, step gate, simulator, and debugger support.
pub mod sim;

/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
/// Emulated CPU; holds registers and memory.
pub use crate::core::Cpu;
/// Engine-thread driver; construct with `Simulator::start`.
pub use crate::sim::Simulator;
