//! Core processor implementation.
//!
//! Holds the `Cpu` state container and the single-instruction execution step
//! that the engine thread drives.

/// CPU state, bootstrap, and execution.
pub mod cpu;

pub use self::cpu::{Cpu, ExitStatus, StepOutcome};
