//! Rendered instruction representation.

use std::fmt;

/// Coarse control-flow classification of a decoded instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InsnClass {
    /// Falls through to the next instruction.
    #[default]
    Normal,
    /// Conditional branch (Jcc, LOOP, JCXZ).
    ConditionalBranch,
    /// Unconditional direct jump.
    UnconditionalBranch,
    /// Direct call.
    Call,
    /// Jump, call or return through a register, memory operand or stack.
    Indirect,
    /// Undecodable bytes or truncated input.
    Invalid,
}

impl InsnClass {
    /// Returns the name of this class.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::ConditionalBranch => "conditional-branch",
            Self::UnconditionalBranch => "unconditional-branch",
            Self::Call => "call",
            Self::Indirect => "indirect",
            Self::Invalid => "invalid",
        }
    }

    /// Returns true for any control transfer.
    pub fn is_branch(&self) -> bool {
        !matches!(self, Self::Normal | Self::Invalid)
    }
}

/// One decoded instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instruction {
    /// Virtual address of the first byte.
    pub address: u64,
    /// Number of bytes consumed. Always at least 1.
    pub size: usize,
    /// Raw bytes of the instruction.
    pub bytes: Vec<u8>,
    /// Prefix names printed before the mnemonic (`lock`, `rep`, `data16`, ...).
    pub prefixes: Vec<String>,
    /// Final mnemonic text.
    pub mnemonic: String,
    /// Operand texts in printed order.
    pub operands: Vec<String>,
    /// Complete rendering: prefixes, padded mnemonic, operands, comment.
    pub text: String,
    /// Control-flow classification.
    pub class: InsnClass,
    /// Absolute target of a direct branch or call.
    pub target: Option<u64>,
    /// Absolute address referenced by a RIP-relative memory operand.
    pub data_ref: Option<u64>,
}

impl Instruction {
    /// Creates an instruction with just a mnemonic and no operands.
    pub fn new(address: u64, bytes: Vec<u8>, mnemonic: impl Into<String>) -> Self {
        let mnemonic = mnemonic.into();
        Self {
            address,
            size: bytes.len(),
            bytes,
            prefixes: Vec::new(),
            text: mnemonic.clone(),
            mnemonic,
            operands: Vec::new(),
            class: InsnClass::Normal,
            target: None,
            data_ref: None,
        }
    }

    /// Sets the classification.
    pub fn with_class(mut self, class: InsnClass) -> Self {
        self.class = class;
        self
    }

    /// Returns the address just past this instruction.
    pub fn end_address(&self) -> u64 {
        self.address.wrapping_add(self.size as u64)
    }

    /// Returns true if the bytes could not be decoded.
    pub fn is_invalid(&self) -> bool {
        matches!(self.class, InsnClass::Invalid)
    }

    /// Returns true if this instruction transfers control.
    pub fn is_branch(&self) -> bool {
        self.class.is_branch()
    }

    /// Returns true if this instruction is a direct call.
    pub fn is_call(&self) -> bool {
        matches!(self.class, InsnClass::Call)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}:  ", self.address)?;

        for byte in &self.bytes {
            write!(f, "{:02x} ", byte)?;
        }

        // Pad to align the text column
        for _ in self.bytes.len()..8 {
            write!(f, "   ")?;
        }

        write!(f, " {}", self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_address() {
        let insn = Instruction::new(0x1000, vec![0x48, 0x89, 0xe5], "mov");
        assert_eq!(insn.size, 3);
        assert_eq!(insn.end_address(), 0x1003);
        assert!(!insn.is_branch());
    }

    #[test]
    fn test_display_pads_bytes() {
        let insn = Instruction::new(0x1000, vec![0xc3], "ret").with_class(InsnClass::Indirect);
        let text = insn.to_string();
        assert!(text.starts_with("0x00001000:  c3 "));
        assert!(text.ends_with(" ret"));
        assert!(insn.is_branch());
    }

    #[test]
    fn test_class_names() {
        assert_eq!(InsnClass::ConditionalBranch.name(), "conditional-branch");
        assert!(!InsnClass::Invalid.is_branch());
    }
}
