//! Disassembly error types.

use thiserror::Error;

/// Error type for strict instruction decoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Undecodable opcode encountered.
    #[error("bad opcode at {address:#x}: {bytes:02x?}")]
    BadOpcode { address: u64, bytes: Vec<u8> },

    /// Instruction was truncated (not enough bytes).
    #[error("truncated instruction at {address:#x}: need {needed} bytes, have {available}")]
    Truncated {
        address: u64,
        needed: usize,
        available: usize,
    },

    /// Invalid VEX/XOP/EVEX envelope or prefix combination.
    #[error("invalid encoding at {address:#x}: {reason}")]
    InvalidEncoding { address: u64, reason: String },
}

impl DecodeError {
    /// Creates a new BadOpcode error.
    pub fn bad_opcode(address: u64, bytes: &[u8]) -> Self {
        Self::BadOpcode {
            address,
            bytes: bytes.to_vec(),
        }
    }

    /// Creates a new Truncated error.
    pub fn truncated(address: u64, needed: usize, available: usize) -> Self {
        Self::Truncated {
            address,
            needed,
            available,
        }
    }

    /// Creates a new InvalidEncoding error.
    pub fn invalid_encoding(address: u64, reason: impl Into<String>) -> Self {
        Self::InvalidEncoding {
            address,
            reason: reason.into(),
        }
    }

    /// Address of the failing instruction.
    pub fn address(&self) -> u64 {
        match self {
            Self::BadOpcode { address, .. }
            | Self::Truncated { address, .. }
            | Self::InvalidEncoding { address, .. } => *address,
        }
    }
}

/// Early exit out of an in-progress decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Abort {
    /// The byte source could not supply the byte at this offset.
    Truncated { needed: usize },
    /// The instruction would exceed the architectural length limit.
    TooLong,
    /// The envelope or prefix combination is invalid.
    Invalid(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = DecodeError::bad_opcode(0x1000, &[0x0f, 0x04]);
        assert_eq!(err.to_string(), "bad opcode at 0x1000: [0f, 04]");
        let err = DecodeError::truncated(0x20, 5, 2);
        assert_eq!(err.to_string(), "truncated instruction at 0x20: need 5 bytes, have 2");
        assert_eq!(err.address(), 0x20);
    }
}
