//! Error types for dasm86-core.

use thiserror::Error;

/// Error parsing a disassembler option string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionsError {
    /// Keyword not recognised.
    #[error("unrecognised disassembler option: {0}")]
    Unknown(String),

    /// Empty entry in a comma-separated list.
    #[error("empty disassembler option at position {0}")]
    Empty(usize),
}

/// A byte source could not supply the requested range.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("no code bytes available at {address:#x}")]
pub struct FetchError {
    /// First address that could not be fetched.
    pub address: u64,
}

impl FetchError {
    pub fn at(address: u64) -> Self {
        Self { address }
    }
}
