//! Register naming schemes for the two output syntaxes.

use dasm86_core::Syntax;

pub(crate) const NAMES64: [&str; 16] = [
    "rax", "rcx", "rdx", "rbx", "rsp", "rbp", "rsi", "rdi", "r8", "r9", "r10", "r11", "r12", "r13", "r14", "r15",
];
pub(crate) const NAMES32: [&str; 16] = [
    "eax", "ecx", "edx", "ebx", "esp", "ebp", "esi", "edi", "r8d", "r9d", "r10d", "r11d", "r12d", "r13d", "r14d",
    "r15d",
];
pub(crate) const NAMES16: [&str; 16] = [
    "ax", "cx", "dx", "bx", "sp", "bp", "si", "di", "r8w", "r9w", "r10w", "r11w", "r12w", "r13w", "r14w", "r15w",
];
/// Byte registers when a REX prefix is present.
pub(crate) const NAMES8_REX: [&str; 16] = [
    "al", "cl", "dl", "bl", "spl", "bpl", "sil", "dil", "r8b", "r9b", "r10b", "r11b", "r12b", "r13b", "r14b", "r15b",
];
pub(crate) const NAMES8: [&str; 8] = ["al", "cl", "dl", "bl", "ah", "ch", "dh", "bh"];
pub(crate) const SEGMENTS: [&str; 6] = ["es", "cs", "ss", "ds", "fs", "gs"];

/// Register width for general-purpose register lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GprWidth {
    Byte,
    /// Byte registers with REX semantics (spl..dil, r8b..).
    ByteRex,
    Word,
    Dword,
    Qword,
}

impl GprWidth {
    pub fn from_bits(bits: u32) -> Self {
        match bits {
            8 => Self::Byte,
            16 => Self::Word,
            64 => Self::Qword,
            _ => Self::Dword,
        }
    }
}

/// Vector register file width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum VecWidth {
    Xmm,
    Ymm,
    Zmm,
}

impl VecWidth {
    pub fn from_bits(bits: u32) -> Self {
        match bits {
            256 => Self::Ymm,
            512 => Self::Zmm,
            _ => Self::Xmm,
        }
    }
}

/// Register naming selected once per decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NamingScheme {
    sigil: &'static str,
    intel: bool,
}

impl NamingScheme {
    pub fn new(syntax: Syntax) -> Self {
        match syntax {
            Syntax::Att => Self { sigil: "%", intel: false },
            Syntax::Intel => Self { sigil: "", intel: true },
        }
    }

    fn named(&self, name: &str) -> String {
        format!("{}{}", self.sigil, name)
    }

    pub fn gpr(&self, width: GprWidth, index: u8) -> String {
        let i = usize::from(index & 0x0f);
        match width {
            GprWidth::Byte => self.named(NAMES8[i & 7]),
            GprWidth::ByteRex => self.named(NAMES8_REX[i]),
            GprWidth::Word => self.named(NAMES16[i]),
            GprWidth::Dword => self.named(NAMES32[i]),
            GprWidth::Qword => self.named(NAMES64[i]),
        }
    }

    pub fn segment(&self, index: u8) -> Option<String> {
        SEGMENTS.get(usize::from(index)).map(|s| self.named(s))
    }

    pub fn control(&self, index: u8) -> String {
        self.named(&format!("cr{index}"))
    }

    pub fn debug(&self, index: u8) -> String {
        if self.intel {
            format!("dr{index}")
        } else {
            self.named(&format!("db{index}"))
        }
    }

    pub fn test(&self, index: u8) -> String {
        self.named(&format!("tr{index}"))
    }

    pub fn mmx(&self, index: u8) -> String {
        self.named(&format!("mm{}", index & 7))
    }

    pub fn vector(&self, width: VecWidth, index: u8) -> String {
        let prefix = match width {
            VecWidth::Xmm => "xmm",
            VecWidth::Ymm => "ymm",
            VecWidth::Zmm => "zmm",
        };
        self.named(&format!("{prefix}{index}"))
    }

    pub fn mask(&self, index: u8) -> String {
        self.named(&format!("k{index}"))
    }

    pub fn bound(&self, index: u8) -> String {
        self.named(&format!("bnd{index}"))
    }

    pub fn tile(&self, index: u8) -> String {
        self.named(&format!("tmm{index}"))
    }

    /// x87 stack register; `st` for the top.
    pub fn st(&self, index: Option<u8>) -> String {
        match index {
            None => self.named("st"),
            Some(i) => self.named(&format!("st({i})")),
        }
    }

    pub fn rip(&self, addr_bits: u32) -> String {
        self.named(if addr_bits == 32 { "eip" } else { "rip" })
    }

    /// Base/index pair of a 16-bit addressing form.
    pub fn index16(&self, rm: u8) -> &'static str {
        const ATT: [&str; 8] = ["%bx,%si", "%bx,%di", "%bp,%si", "%bp,%di", "%si", "%di", "%bp", "%bx"];
        const INTEL: [&str; 8] = ["bx+si", "bx+di", "bp+si", "bp+di", "si", "di", "bp", "bx"];
        let i = usize::from(rm & 7);
        if self.intel {
            INTEL[i]
        } else {
            ATT[i]
        }
    }

    /// Pseudo index register for SIB forms without an index.
    pub fn zero_index(&self, addr_bits: u32) -> String {
        self.named(if addr_bits == 64 { "riz" } else { "eiz" })
    }

    pub fn is_intel(&self) -> bool {
        self.intel
    }
}
