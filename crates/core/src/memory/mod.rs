//! Simulated memory.
//!
//! A flat, fixed-size byte buffer plus the little-endian codec used for every
//! multi-byte access.

/// Fixed-size flat memory with bounds-checked access.
pub mod buffer;

/// Little-endian width-aware byte codec.
pub mod codec;

pub use buffer::Memory;
