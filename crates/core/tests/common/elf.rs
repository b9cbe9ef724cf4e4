//! Minimal ELF64 x86-64 executable writer.
//!
//! Produces a file with one `PT_LOAD` segment covering the whole file, a
//! `.text` section holding the code, and a symbol table with one global
//! function symbol pointing at the start of `.text`.
//!
//! File layout:
//!
//! ```text
//! 0x00  ELF header (64)
//! 0x40  program header (56)
//! 0x80  .text
//!       .symtab (8-aligned, 2 entries)
//!       .strtab
//!       .shstrtab
//!       section headers (8-aligned, 5 entries)
//! ```

#![allow(dead_code)]

/// Offset of `.text` in the file.
pub const TEXT_OFFSET: u64 = 0x80;

/// Conventional base address of a non-PIE x86-64 executable.
pub const DEFAULT_BASE: u64 = 0x40_0000;

const EHDR_SIZE: u16 = 64;
const PHDR_SIZE: u16 = 56;
const SHDR_SIZE: u16 = 64;
const SYM_SIZE: u64 = 24;

const SHSTRTAB: &[u8] = b"\0.text\0.symtab\0.strtab\0.shstrtab\0";
const NAME_TEXT: u32 = 1;
const NAME_SYMTAB: u32 = 7;
const NAME_STRTAB: u32 = 15;
const NAME_SHSTRTAB: u32 = 23;

#[derive(Debug)]
pub struct ElfBuilder {
    base: u64,
    code: Vec<u8>,
    symbol: String,
    symbol_info: u8,
}

impl ElfBuilder {
    /// An executable at `DEFAULT_BASE` whose `main` is a global function.
    pub fn new(code: &[u8]) -> Self {
        Self {
            base: DEFAULT_BASE,
            code: code.to_vec(),
            symbol: "main".to_string(),
            // STB_GLOBAL << 4 | STT_FUNC
            symbol_info: 0x12,
        }
    }

    pub fn base(mut self, base: u64) -> Self {
        self.base = base;
        self
    }

    pub fn symbol(mut self, name: &str) -> Self {
        self.symbol = name.to_string();
        self
    }

    /// Makes the symbol local instead of global.
    pub fn local(mut self) -> Self {
        self.symbol_info = 0x02;
        self
    }

    /// Virtual address of the first code byte.
    pub fn entry(&self) -> u64 {
        self.base + TEXT_OFFSET
    }

    pub fn build(&self) -> Vec<u8> {
        let text_len = self.code.len() as u64;
        let symtab_off = align(TEXT_OFFSET + text_len, 8);
        let symtab_len = 2 * SYM_SIZE;
        let strtab_off = symtab_off + symtab_len;
        let mut strtab = vec![0u8];
        strtab.extend(self.symbol.as_bytes());
        strtab.push(0);
        let strtab_len = strtab.len() as u64;
        let shstrtab_off = strtab_off + strtab_len;
        let shstrtab_len = SHSTRTAB.len() as u64;
        let shoff = align(shstrtab_off + shstrtab_len, 8);
        let file_len = shoff + 5 * u64::from(SHDR_SIZE);

        let mut out = Vec::with_capacity(file_len as usize);

        // ELF header
        out.extend(b"\x7fELF");
        out.extend([2, 1, 1, 0]); // ELFCLASS64, little-endian, EV_CURRENT, SYSV
        out.extend([0u8; 8]);
        out.extend(2u16.to_le_bytes()); // ET_EXEC
        out.extend(0x3Eu16.to_le_bytes()); // EM_X86_64
        out.extend(1u32.to_le_bytes());
        out.extend(self.entry().to_le_bytes());
        out.extend(u64::from(EHDR_SIZE).to_le_bytes()); // e_phoff
        out.extend(shoff.to_le_bytes());
        out.extend(0u32.to_le_bytes()); // e_flags
        out.extend(EHDR_SIZE.to_le_bytes());
        out.extend(PHDR_SIZE.to_le_bytes());
        out.extend(1u16.to_le_bytes()); // e_phnum
        out.extend(SHDR_SIZE.to_le_bytes());
        out.extend(5u16.to_le_bytes()); // e_shnum
        out.extend(4u16.to_le_bytes()); // e_shstrndx

        // PT_LOAD covering the whole file, R+X
        out.extend(1u32.to_le_bytes());
        out.extend(5u32.to_le_bytes());
        out.extend(0u64.to_le_bytes());
        out.extend(self.base.to_le_bytes());
        out.extend(self.base.to_le_bytes());
        out.extend(file_len.to_le_bytes());
        out.extend(file_len.to_le_bytes());
        out.extend(0x1000u64.to_le_bytes());

        pad_to(&mut out, TEXT_OFFSET);
        out.extend(&self.code);

        pad_to(&mut out, symtab_off);
        out.extend([0u8; SYM_SIZE as usize]);
        out.extend(1u32.to_le_bytes()); // st_name
        out.push(self.symbol_info);
        out.push(0); // st_other
        out.extend(1u16.to_le_bytes()); // st_shndx = .text
        out.extend(self.entry().to_le_bytes());
        out.extend(text_len.to_le_bytes());

        out.extend(&strtab);
        out.extend(SHSTRTAB);
        pad_to(&mut out, shoff);

        // Section headers: null, .text, .symtab, .strtab, .shstrtab
        out.extend([0u8; SHDR_SIZE as usize]);
        section(&mut out, NAME_TEXT, 1, 0x6, self.entry(), TEXT_OFFSET, text_len, 0, 0, 16, 0);
        section(&mut out, NAME_SYMTAB, 2, 0, 0, symtab_off, symtab_len, 3, 1, 8, SYM_SIZE);
        section(&mut out, NAME_STRTAB, 3, 0, 0, strtab_off, strtab_len, 0, 0, 1, 0);
        section(&mut out, NAME_SHSTRTAB, 3, 0, 0, shstrtab_off, shstrtab_len, 0, 0, 1, 0);

        assert_eq!(out.len() as u64, file_len);
        out
    }
}

const fn align(value: u64, to: u64) -> u64 {
    value.div_ceil(to) * to
}

fn pad_to(out: &mut Vec<u8>, offset: u64) {
    out.resize(offset as usize, 0);
}

#[allow(clippy::too_many_arguments)]
fn section(
    out: &mut Vec<u8>,
    name: u32,
    kind: u32,
    flags: u64,
    addr: u64,
    offset: u64,
    size: u64,
    link: u32,
    info: u32,
    align: u64,
    entsize: u64,
) {
    out.extend(name.to_le_bytes());
    out.extend(kind.to_le_bytes());
    out.extend(flags.to_le_bytes());
    out.extend(addr.to_le_bytes());
    out.extend(offset.to_le_bytes());
    out.extend(size.to_le_bytes());
    out.extend(link.to_le_bytes());
    out.extend(info.to_le_bytes());
    out.extend(align.to_le_bytes());
    out.extend(entsize.to_le_bytes());
}
