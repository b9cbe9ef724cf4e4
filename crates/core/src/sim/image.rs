//! Process Image.
//!
//! The loader's output: raw bytes together with the address they are placed at
//! and the address execution starts from.

/// Immutable, pre-parsed executable image.
#[derive(Clone, PartialEq, Eq)]
pub struct ProcessImage {
    load_address: u64,
    entry_address: u64,
    bytes: Vec<u8>,
}

impl std::fmt::Debug for ProcessImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessImage")
            .field("load_address", &format_args!("{:#x}", self.load_address))
            .field("entry_address", &format_args!("{:#x}", self.entry_address))
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl ProcessImage {
    /// Creates an image placing `bytes` at `load_address` and entering at `entry_address`.
    ///
    /// No validation happens here: fitting the image into memory is checked
    /// by `Cpu::boot`, and a non-zero entry is enforced by the ELF loader.
    pub fn new(load_address: u64, entry_address: u64, bytes: Vec<u8>) -> Self {
        Self {
            load_address,
            entry_address,
            bytes,
        }
    }

    /// Address the first byte is placed at.
    pub fn load_address(&self) -> u64 {
        self.load_address
    }

    /// Address execution starts from.
    pub fn entry_address(&self) -> u64 {
        self.entry_address
    }

    /// Raw image bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}
