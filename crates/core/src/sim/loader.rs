//! Executable Loader.
//!
//! This module turns files on disk into `ProcessImage`s. It performs:
//! 1. **Binary loading:** Reads a file into a byte buffer.
//! 2. **ELF loading:** Resolves the entry symbol and load address of a
//!    statically-linked ELF executable; the whole file becomes the image so
//!    file offsets map directly onto virtual addresses.
//! 3. **Flat loading:** Places raw bytes at a base address and enters there.

use std::fs;
use std::path::Path;

use object::{Object, ObjectSection, ObjectSegment, ObjectSymbol, SymbolKind};
use tracing::debug;

use crate::common::error::LoadError;

use super::image::ProcessImage;

/// Reads a file from disk into a byte vector.
///
/// # Errors
///
/// `LoadError::Io` if the file cannot be read.
pub fn load_binary(path: &Path) -> Result<Vec<u8>, LoadError> {
    fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads an ELF executable, entering at the global function `entry_symbol`.
///
/// # Errors
///
/// Any `LoadError`: unreadable file, malformed container, missing entry
/// symbol, or no resolvable load address.
pub fn load_elf(path: impl AsRef<Path>, entry_symbol: &str) -> Result<ProcessImage, LoadError> {
    let bytes = load_binary(path.as_ref())?;
    parse_elf(bytes, entry_symbol)
}

/// Builds an image from ELF bytes already in memory.
///
/// # Errors
///
/// As for [`load_elf`], minus I/O.
pub fn parse_elf(bytes: Vec<u8>, entry_symbol: &str) -> Result<ProcessImage, LoadError> {
    let (load_address, entry_address) = {
        let file = object::File::parse(bytes.as_slice())?;
        (
            resolve_load_address(&file)?,
            resolve_entry(&file, entry_symbol)?,
        )
    };

    debug!(
        entry_symbol,
        load_address = format_args!("{load_address:#x}"),
        entry = format_args!("{entry_address:#x}"),
        len = bytes.len(),
        "parsed ELF image"
    );
    Ok(ProcessImage::new(load_address, entry_address, bytes))
}

/// Loads raw bytes at `base` and enters at `base`.
///
/// # Errors
///
/// `LoadError::Io` if the file cannot be read.
pub fn load_flat(path: impl AsRef<Path>, base: u64) -> Result<ProcessImage, LoadError> {
    let bytes = load_binary(path.as_ref())?;
    debug!(base = format_args!("{base:#x}"), len = bytes.len(), "flat image");
    Ok(ProcessImage::new(base, base, bytes))
}

/// Address of the last global function symbol named `name`; zero counts as missing.
fn resolve_entry(file: &object::File<'_>, name: &str) -> Result<u64, LoadError> {
    file.symbols()
        .filter(|sym| {
            sym.kind() == SymbolKind::Text
                && sym.is_global()
                && sym.name().is_ok_and(|n| n == name)
        })
        .map(|sym| sym.address())
        .last()
        .filter(|&addr| addr != 0)
        .ok_or_else(|| LoadError::MissingEntry(name.to_string()))
}

/// `vaddr - file_offset` of the first loadable segment, else of the first
/// allocated section.
fn resolve_load_address(file: &object::File<'_>) -> Result<u64, LoadError> {
    let from_segments = file.segments().find_map(|seg| {
        let (offset, _) = seg.file_range();
        seg.address().checked_sub(offset).filter(|&a| a != 0)
    });

    from_segments
        .or_else(|| {
            file.sections().find_map(|sec| {
                let (offset, _) = sec.file_range()?;
                sec.address().checked_sub(offset).filter(|&a| a != 0)
            })
        })
        .ok_or(LoadError::UnresolvableLoadAddress)
}
