//! Common utilities and types used throughout the emulator.
//!
//! This module provides the building blocks shared by every other component:
//! 1. **Constants:** Memory size, stack slot width, diagnostic window.
//! 2. **Memory Access:** Classification of accesses for fault reporting.
//! 3. **Error Handling:** Faults, load errors, and debugger errors.
//! 4. **Register Management:** The fixed 18-slot register file.

/// Common constants used throughout the emulator.
pub mod constants;

/// Memory access type definitions.
pub mod data;

/// Error types and fault definitions.
pub mod error;

/// Register file implementation.
pub mod reg;

pub use data::AccessType;
pub use error::{EngineError, Fault, GateError, LoadError, ResolveError};
pub use reg::RegisterFile;
