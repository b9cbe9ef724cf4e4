//! Flat Memory Buffer.
//!
//! This module provides the simulated address space: a fixed-size, zeroed byte
//! buffer addressed from 0. Every access is bounds-checked and reported as a
//! `Fault::OutOfBounds` rather than wrapping or panicking.

use crate::common::constants::FAULT_WINDOW;
use crate::common::data::AccessType;
use crate::common::error::Fault;

use super::codec;

/// Simulated flat memory.
///
/// Owned by the `Cpu`; mutated only during instruction execution or image
/// bootstrap.
#[derive(Clone, PartialEq, Eq)]
pub struct Memory {
    bytes: Vec<u8>,
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Memory").field("len", &self.bytes.len()).finish()
    }
}

impl Memory {
    /// Creates a zeroed memory of `size` bytes.
    pub fn new(size: usize) -> Self {
        Self {
            bytes: vec![0; size],
        }
    }

    /// Size of the address space in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if the address space is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Reads `width` (1-8) little-endian bytes at `address`.
    pub fn read(&self, address: u64, width: usize) -> Result<u64, Fault> {
        self.read_as(AccessType::Read, address, width)
    }

    /// Reads `width` little-endian bytes, reporting a fault as `access`.
    pub fn read_as(&self, access: AccessType, address: u64, width: usize) -> Result<u64, Fault> {
        codec::read_le(&self.bytes, address, width).ok_or(Fault::OutOfBounds {
            access,
            address,
            width,
        })
    }

    /// Fetches one instruction byte.
    #[inline]
    pub fn fetch_u8(&self, address: u64) -> Result<u8, Fault> {
        self.read_as(AccessType::Fetch, address, 1).map(|b| b as u8)
    }

    /// Writes the low `width` (1-8) bytes of `value` little-endian at `address`.
    pub fn write(&mut self, address: u64, width: usize, value: u64) -> Result<(), Fault> {
        codec::write_le(&mut self.bytes, address, width, value).ok_or(Fault::OutOfBounds {
            access: AccessType::Write,
            address,
            width,
        })
    }

    /// Borrows `len` bytes starting at `address`.
    pub fn slice(&self, address: u64, len: usize) -> Result<&[u8], Fault> {
        let fault = Fault::OutOfBounds {
            access: AccessType::Read,
            address,
            width: len,
        };
        let start = usize::try_from(address).map_err(|_| fault.clone())?;
        let end = start.checked_add(len).ok_or_else(|| fault.clone())?;
        self.bytes.get(start..end).ok_or(fault)
    }

    /// Copies `data` into memory starting at `address`.
    pub fn load(&mut self, address: u64, data: &[u8]) -> Result<(), Fault> {
        let fault = Fault::OutOfBounds {
            access: AccessType::Write,
            address,
            width: data.len(),
        };
        let start = usize::try_from(address).map_err(|_| fault.clone())?;
        let end = start.checked_add(data.len()).ok_or_else(|| fault.clone())?;
        self.bytes
            .get_mut(start..end)
            .ok_or(fault)?
            .copy_from_slice(data);
        Ok(())
    }

    /// Up to `FAULT_WINDOW` bytes starting at `address`, clipped to memory bounds.
    pub fn window(&self, address: u64) -> Vec<u8> {
        let Ok(start) = usize::try_from(address) else {
            return Vec::new();
        };
        let start = start.min(self.bytes.len());
        let end = start.saturating_add(FAULT_WINDOW).min(self.bytes.len());
        self.bytes[start..end].to_vec()
    }
}
