//! Little-endian byte codec.
//!
//! Width-aware reads and writes of 1 to 8 bytes over a plain byte slice. All
//! address arithmetic is checked; an access that would leave the slice (or
//! overflow `u64`) returns `None` instead of wrapping.

/// Maximum access width in bytes.
pub const MAX_WIDTH: usize = 8;

/// Resolves `address..address + width` to a slice range, if in bounds.
#[inline]
fn span(len: usize, address: u64, width: usize) -> Option<std::ops::Range<usize>> {
    let start = usize::try_from(address).ok()?;
    let end = start.checked_add(width)?;
    (end <= len).then_some(start..end)
}

/// Reads `width` little-endian bytes at `address`.
///
/// Returns `None` if the access leaves `mem` or `width` is not in `1..=8`.
pub fn read_le(mem: &[u8], address: u64, width: usize) -> Option<u64> {
    if !(1..=MAX_WIDTH).contains(&width) {
        return None;
    }
    let range = span(mem.len(), address, width)?;
    let mut buf = [0u8; MAX_WIDTH];
    buf[..width].copy_from_slice(&mem[range]);
    Some(u64::from_le_bytes(buf))
}

/// Writes the low `width` bytes of `value` little-endian at `address`.
///
/// Returns `None`, leaving `mem` untouched, if the access leaves `mem` or
/// `width` is not in `1..=8`.
pub fn write_le(mem: &mut [u8], address: u64, width: usize, value: u64) -> Option<()> {
    if !(1..=MAX_WIDTH).contains(&width) {
        return None;
    }
    let range = span(mem.len(), address, width)?;
    mem[range].copy_from_slice(&value.to_le_bytes()[..width]);
    Some(())
}

/// Masks `value` to its low `width` bytes.
#[inline]
pub const fn truncate(value: u64, width: usize) -> u64 {
    if width >= MAX_WIDTH {
        value
    } else {
        value & ((1u64 << (width * 8)) - 1)
    }
}
