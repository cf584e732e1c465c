//! Decoder configuration and option-string parsing.
//!
//! Option strings are comma-separated keyword lists in the style accepted by
//! GNU disassemblers (`-M intel,x86-64,suffix`).

use std::str::FromStr;

use crate::{AddressMode, Isa64, OptionsError, Syntax};

/// Caller-supplied configuration, fixed for the lifetime of a decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisasmOptions {
    /// Processor mode.
    pub mode: AddressMode,
    /// Output syntax.
    pub syntax: Syntax,
    /// Use Intel mnemonics for the x87 reverse-operation forms.
    pub intel_mnemonic: bool,
    /// Always print AT&T size suffixes.
    pub suffix_always: bool,
    /// Long-mode ISA flavour.
    pub isa64: Isa64,
    /// Default operand size is 16 bits (only meaningful outside long mode).
    pub data16: bool,
    /// Default address size is 16 bits (only meaningful outside long mode).
    pub addr16: bool,
}

impl DisasmOptions {
    /// Options for a given mode, everything else default.
    pub fn new(mode: AddressMode) -> Self {
        Self {
            mode,
            data16: mode == AddressMode::Mode16,
            addr16: mode == AddressMode::Mode16,
            ..Self::default()
        }
    }

    /// Returns a copy using the given syntax.
    pub fn with_syntax(mut self, syntax: Syntax) -> Self {
        self.syntax = syntax;
        self
    }

    /// Returns a copy using the given long-mode ISA flavour.
    pub fn with_isa64(mut self, isa64: Isa64) -> Self {
        self.isa64 = isa64;
        self
    }

    /// Applies a comma-separated option list on top of the current values.
    pub fn parse_options(&mut self, list: &str) -> Result<(), OptionsError> {
        for (position, raw) in list.split(',').enumerate() {
            let keyword = raw.trim();
            if keyword.is_empty() {
                return Err(OptionsError::Empty(position));
            }
            self.apply(keyword)?;
        }
        Ok(())
    }

    fn apply(&mut self, keyword: &str) -> Result<(), OptionsError> {
        match keyword {
            "x86-64" => self.set_mode(AddressMode::Mode64),
            "i386" => self.set_mode(AddressMode::Mode32),
            "i8086" => self.set_mode(AddressMode::Mode16),
            "att" => self.syntax = Syntax::Att,
            "intel" => {
                self.syntax = Syntax::Intel;
                self.intel_mnemonic = true;
            }
            "att-mnemonic" => self.intel_mnemonic = false,
            "intel-mnemonic" => self.intel_mnemonic = true,
            "addr16" => self.addr16 = true,
            "addr32" => self.addr16 = false,
            "data16" => self.data16 = true,
            "data32" => self.data16 = false,
            "suffix" => self.suffix_always = true,
            "amd64" => self.isa64 = Isa64::Amd64,
            "intel64" => self.isa64 = Isa64::Intel64,
            other => return Err(OptionsError::Unknown(other.to_string())),
        }
        Ok(())
    }

    fn set_mode(&mut self, mode: AddressMode) {
        self.mode = mode;
        let small = mode == AddressMode::Mode16;
        self.data16 = small;
        self.addr16 = small;
    }

    /// Default operand size in bits before any prefix.
    pub fn default_operand_bits(&self) -> u32 {
        match self.mode {
            AddressMode::Mode64 => 32,
            _ if self.data16 => 16,
            _ => 32,
        }
    }

    /// Default address size in bits before any prefix.
    pub fn default_address_bits(&self) -> u32 {
        match self.mode {
            AddressMode::Mode64 => 64,
            _ if self.addr16 => 16,
            _ => 32,
        }
    }
}

impl FromStr for DisasmOptions {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut options = Self::default();
        options.parse_options(s)?;
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_intel_i386() {
        let options: DisasmOptions = "intel,i386".parse().unwrap();
        assert_eq!(options.syntax, Syntax::Intel);
        assert_eq!(options.mode, AddressMode::Mode32);
        assert!(options.intel_mnemonic);
        assert_eq!(options.default_operand_bits(), 32);
        assert_eq!(options.default_address_bits(), 32);
    }

    #[test]
    fn test_mnemonic_override_after_syntax() {
        let options: DisasmOptions = "intel,att-mnemonic".parse().unwrap();
        assert_eq!(options.syntax, Syntax::Intel);
        assert!(!options.intel_mnemonic);
    }

    #[test]
    fn test_i8086_defaults_and_overrides() {
        let options: DisasmOptions = "i8086".parse().unwrap();
        assert_eq!(options.default_operand_bits(), 16);
        assert_eq!(options.default_address_bits(), 16);

        let options: DisasmOptions = "i8086,data32,addr32".parse().unwrap();
        assert_eq!(options.default_operand_bits(), 32);
        assert_eq!(options.default_address_bits(), 32);
    }

    #[test]
    fn test_size_overrides_ignored_in_long_mode() {
        let options: DisasmOptions = "x86-64,data16,addr16".parse().unwrap();
        assert_eq!(options.default_operand_bits(), 32);
        assert_eq!(options.default_address_bits(), 64);
    }

    #[test]
    fn test_unknown_and_empty_options() {
        assert_eq!(
            "intel,bogus".parse::<DisasmOptions>(),
            Err(OptionsError::Unknown("bogus".to_string()))
        );
        assert_eq!("att,,suffix".parse::<DisasmOptions>(), Err(OptionsError::Empty(1)));
    }

    #[test]
    fn test_isa64_and_suffix() {
        let options: DisasmOptions = "intel64,suffix".parse().unwrap();
        assert_eq!(options.isa64, Isa64::Intel64);
        assert!(options.suffix_always);
    }
}
