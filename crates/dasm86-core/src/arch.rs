//! Processor mode and output flavour identification.

use std::fmt;

/// Default address/operand width the decoder starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AddressMode {
    /// Real mode / 16-bit protected mode (i8086).
    Mode16,
    /// 32-bit protected mode (i386).
    Mode32,
    /// Long mode (x86-64).
    #[default]
    Mode64,
}

impl AddressMode {
    /// Returns the native address width in bits.
    pub fn bits(&self) -> u32 {
        match self {
            Self::Mode16 => 16,
            Self::Mode32 => 32,
            Self::Mode64 => 64,
        }
    }

    /// Returns true for long mode.
    pub fn is_64bit(&self) -> bool {
        matches!(self, Self::Mode64)
    }

    /// Returns the name used in option strings.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mode16 => "i8086",
            Self::Mode32 => "i386",
            Self::Mode64 => "x86-64",
        }
    }
}

impl fmt::Display for AddressMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Assembly syntax used for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Syntax {
    /// AT&T: `%`-prefixed registers, `$` immediates, source first.
    #[default]
    Att,
    /// Intel: bare registers, `PTR` size keywords, destination first.
    Intel,
}

impl Syntax {
    pub fn is_intel(&self) -> bool {
        matches!(self, Self::Intel)
    }
}

/// 64-bit ISA flavour. The two vendors disagree on how `0x66` affects
/// near branches in long mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Isa64 {
    #[default]
    Amd64,
    Intel64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_bits() {
        assert_eq!(AddressMode::Mode16.bits(), 16);
        assert_eq!(AddressMode::Mode32.bits(), 32);
        assert!(AddressMode::Mode64.is_64bit());
        assert!(!AddressMode::Mode32.is_64bit());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(AddressMode::default(), AddressMode::Mode64);
        assert_eq!(Syntax::default(), Syntax::Att);
        assert_eq!(Isa64::default(), Isa64::Amd64);
    }
}
