//! Configuration system for the emulator.
//!
//! This module defines the configuration structures used to parameterize a run.
//! It provides:
//! 1. **Defaults:** Baseline constants (memory size, entry symbol).
//! 2. **Structures:** Hierarchical config for general and memory settings.
//!
//! Configuration is read once at boot, either from JSON (`Config::from_json`) or
//! via `Config::default()`. The memory size is fixed once a `Cpu` is built.

use serde::Deserialize;

use crate::common::constants::{DEFAULT_ENTRY_SYMBOL, DEFAULT_MEMORY_SIZE};

/// Root configuration.
///
/// # Example
///
/// ```
/// use amd64emu_core::config::Config;
///
/// let json = r#"{
///     "general": { "entry_symbol": "_start", "trace_instructions": true },
///     "memory": { "ram_size": 1048576 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.general.entry_symbol, "_start");
/// assert!(config.general.trace_instructions);
/// assert_eq!(config.memory.ram_size, 1024 * 1024);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General run settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Simulated memory settings
    #[serde(default)]
    pub memory: MemoryConfig,
}

impl Config {
    /// Parses a configuration from JSON; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the document is malformed.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// General run settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Symbol the ELF loader resolves as the entry function.
    #[serde(default = "GeneralConfig::default_entry_symbol")]
    pub entry_symbol: String,

    /// Log every retired instruction at `info` level instead of `trace`.
    #[serde(default)]
    pub trace_instructions: bool,
}

impl GeneralConfig {
    fn default_entry_symbol() -> String {
        DEFAULT_ENTRY_SYMBOL.to_string()
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            entry_symbol: Self::default_entry_symbol(),
            trace_instructions: false,
        }
    }
}

/// Simulated memory settings.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// Size of the flat address space in bytes.
    #[serde(default = "MemoryConfig::default_ram_size")]
    pub ram_size: usize,
}

impl MemoryConfig {
    const fn default_ram_size() -> usize {
        DEFAULT_MEMORY_SIZE
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            ram_size: Self::default_ram_size(),
        }
    }
}
