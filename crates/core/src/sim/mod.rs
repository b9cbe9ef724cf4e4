//! Simulation driver and program loading.
//!
//! Provides the loader that produces process images, the step gate that
//! couples a controller to the engine thread, the simulator that owns both
//! sides, and the debugger's value resolver.

/// Debugger token resolution (register, hex, decimal).
pub mod debugger;

/// Single-slot step request channel.
pub mod gate;

/// Immutable loaded executable image.
pub mod image;

/// ELF and flat binary loading.
pub mod loader;

/// Engine thread orchestration.
pub mod simulator;

pub use gate::StepGate;
pub use image::ProcessImage;
pub use simulator::{RunOutcome, Simulator};
