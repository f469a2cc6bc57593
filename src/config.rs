//! Reader configuration.
//!
//! Provides the settings that choose how point data is decoded and how the
//! operating system is asked to cache memory-mapped scans.

use crate::app::services::mapped_file::AccessHint;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Source the point decoder reads from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodeStrategy {
    /// Parse directly from a read-only memory map of the file
    #[default]
    MemoryMapped,
    /// Parse line by line through a buffered reader
    Buffered,
}

impl fmt::Display for DecodeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeStrategy::MemoryMapped => write!(f, "mmap"),
            DecodeStrategy::Buffered => write!(f, "buffered"),
        }
    }
}

impl FromStr for DecodeStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "mmap" | "memory-mapped" | "memory_mapped" => Ok(DecodeStrategy::MemoryMapped),
            "buffered" | "stream" => Ok(DecodeStrategy::Buffered),
            other => Err(Error::configuration(format!(
                "unknown decode strategy '{}' (expected mmap or buffered)",
                other
            ))),
        }
    }
}

/// Settings for reading a scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReaderConfig {
    /// How point data is decoded
    pub strategy: DecodeStrategy,

    /// Access pattern hint for the memory map (ignored by the buffered strategy)
    pub access_hint: AccessHint,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            strategy: DecodeStrategy::MemoryMapped,
            access_hint: AccessHint::Sequential,
        }
    }
}

impl ReaderConfig {
    /// Use the given decode strategy
    pub fn with_strategy(mut self, strategy: DecodeStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Use the given memory map access hint
    pub fn with_access_hint(mut self, access_hint: AccessHint) -> Self {
        self.access_hint = access_hint;
        self
    }

    /// Decode through a buffered line reader instead of a memory map
    pub fn buffered() -> Self {
        Self::default().with_strategy(DecodeStrategy::Buffered)
    }

    /// Check that the settings can be honoured
    pub fn validate(&self) -> Result<()> {
        if self.strategy == DecodeStrategy::Buffered && self.access_hint != AccessHint::Sequential
        {
            return Err(Error::configuration(format!(
                "access hint {:?} only applies to the memory-mapped strategy",
                self.access_hint
            )));
        }
        Ok(())
    }
}
