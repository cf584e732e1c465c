//! Per-instruction decode state.

use dasm86_core::{AddressMode, DisasmOptions, Isa64};

use super::modrm::{MemGeometry, ModRm};
use super::names::NamingScheme;
use super::prefix::{Envelope, EnvelopeKind, PrefixFlags, Prefixes, REX_OPCODE, REX_W};
use super::tables::{Attrs, Flow, Mode};
use crate::error::Abort;
use crate::fetch::{ByteSource, FetchWindow};

/// Everything learned about the instruction being decoded. Created fresh
/// for each instruction and dropped when the decode returns.
pub(crate) struct DecodeState<'o> {
    pub opts: &'o DisasmOptions,
    pub names: NamingScheme,
    pub mode64: bool,
    pub address: u64,

    pub prefixes: Prefixes,
    /// Prefix classes that influenced decoding.
    pub used: PrefixFlags,
    pub rex: u8,
    pub rex_used: u8,

    pub env: Option<Envelope>,
    /// Vector length in bits.
    pub length: u32,
    pub env_prefix_used: bool,
    pub vvvv_used: bool,
    pub vsib_used: bool,
    pub evex_b_used: bool,

    pub opcode: u8,
    pub opcode_end: usize,
    pub needs_modrm: bool,
    pub modrm: Option<ModRm>,
    pub geometry: Option<MemGeometry>,

    pub flow: Flow,
    pub attrs: Attrs,
    pub has_reg_operand: bool,
    pub broadcast: bool,
    /// Mnemonic replacement chosen by an operand (3DNow! suffixes).
    pub mnemonic_override: Option<&'static str>,
    /// Predicate folded into the mnemonic by `%CC`.
    pub cmp_infix: Option<&'static str>,
    /// Displacement of a RIP-relative operand, resolved once the length is known.
    pub rip_disp: Option<(i64, u32)>,
    pub target: Option<u64>,
    /// Reason the whole instruction turned out invalid after operand resolution.
    pub invalid: Option<&'static str>,
}

impl<'o> DecodeState<'o> {
    pub fn new(opts: &'o DisasmOptions, address: u64) -> Self {
        Self {
            opts,
            names: NamingScheme::new(opts.syntax),
            mode64: opts.mode == AddressMode::Mode64,
            address,
            prefixes: Prefixes::default(),
            used: PrefixFlags::empty(),
            rex: 0,
            rex_used: 0,
            env: None,
            length: 128,
            env_prefix_used: false,
            vvvv_used: false,
            vsib_used: false,
            evex_b_used: false,
            opcode: 0,
            opcode_end: 0,
            needs_modrm: false,
            modrm: None,
            geometry: None,
            flow: Flow::Normal,
            attrs: Attrs::NONE,
            has_reg_operand: false,
            broadcast: false,
            mnemonic_override: None,
            cmp_infix: None,
            rip_disp: None,
            target: None,
            invalid: None,
        }
    }

    pub fn intel(&self) -> bool {
        self.names.is_intel()
    }

    pub fn is_evex(&self) -> bool {
        matches!(self.env, Some(env) if env.kind == EnvelopeKind::Evex)
    }

    /// Tests a legacy prefix class and marks it used when present.
    pub fn use_prefix(&mut self, flag: PrefixFlags) -> bool {
        let present = self.prefixes.flags.contains(flag);
        if present {
            self.used |= flag;
        }
        present
    }

    /// Tests a REX bit, recording that the prefix was consulted.
    ///
    /// A zero `bit` records that the mere presence of REX mattered.
    pub fn rex_bit(&mut self, bit: u8) -> bool {
        if bit == 0 {
            if self.rex != 0 {
                self.rex_used |= REX_OPCODE;
            }
            return false;
        }
        let set = self.rex & bit != 0;
        if set {
            self.rex_used |= bit | REX_OPCODE;
        }
        set
    }

    /// Register-number extension of 8 when `bit` is set.
    pub fn rex_ext(&mut self, bit: u8) -> u8 {
        if self.rex_bit(bit) {
            8
        } else {
            0
        }
    }

    /// Operand size before any 66 prefix.
    pub fn default_operand_bits(&self) -> u32 {
        self.opts.default_operand_bits()
    }

    /// 16/32/64-bit operand size.
    pub fn operand_bits(&mut self) -> u32 {
        if self.mode64 && self.rex_bit(REX_W) {
            return 64;
        }
        self.toggled_bits()
    }

    /// 16/32-bit operand size, ignoring REX.W.
    fn toggled_bits(&mut self) -> u32 {
        let default = self.default_operand_bits();
        if self.use_prefix(PrefixFlags::DATA) {
            if default == 16 {
                32
            } else {
                16
            }
        } else {
            default
        }
    }

    pub fn stack_bits(&mut self) -> u32 {
        if !self.mode64 {
            return self.operand_bits();
        }
        if self.rex_bit(REX_W) {
            return 64;
        }
        if self.use_prefix(PrefixFlags::DATA) {
            16
        } else {
            64
        }
    }

    /// Near indirect branch operand size. Intel64 ignores 66 in long mode.
    pub fn indirect_bits(&mut self) -> u32 {
        if self.mode64 && self.opts.isa64 == Isa64::Intel64 {
            return 64;
        }
        self.stack_bits()
    }

    pub fn dq_bits(&mut self) -> u32 {
        if self.rex_bit(REX_W) {
            64
        } else {
            32
        }
    }

    /// Effective address size without marking 67 as used.
    pub fn peek_address_bits(&self) -> u32 {
        let default = self.opts.default_address_bits();
        if !self.prefixes.flags.contains(PrefixFlags::ADDR) {
            return default;
        }
        match default {
            64 => 32,
            32 => 16,
            _ => 32,
        }
    }

    /// Effective address size, marking 67 as used.
    pub fn address_bits(&mut self) -> u32 {
        self.use_prefix(PrefixFlags::ADDR);
        self.peek_address_bits()
    }

    /// Width in bits described by `mode`. Consulting the size marks the
    /// deciding prefixes as used.
    pub fn mode_bits(&mut self, mode: Mode) -> u32 {
        match mode {
            Mode::B => 8,
            Mode::W => 16,
            Mode::D => 32,
            Mode::Q => 64,
            Mode::T => 80,
            Mode::Xmm => 128,
            Mode::O => {
                if self.rex_bit(REX_W) {
                    128
                } else {
                    64
                }
            }
            Mode::ElemW => {
                if self.env.is_some_and(|env| env.w) {
                    64
                } else {
                    32
                }
            }
            Mode::Ymm => 256,
            Mode::V => self.operand_bits(),
            Mode::Z => self.toggled_bits(),
            Mode::StackV => self.stack_bits(),
            Mode::IndirV => self.indirect_bits(),
            Mode::Dq => self.dq_bits(),
            Mode::Native => {
                if self.mode64 {
                    64
                } else {
                    32
                }
            }
            Mode::P => 16 + self.operand_bits(),
            Mode::A => 2 * self.toggled_bits(),
            Mode::None => 0,
            Mode::Vec | Mode::VecB | Mode::VecBd | Mode::VecBq => self.length,
            Mode::Half | Mode::HalfBd => self.length / 2,
            Mode::Quarter => self.length / 4,
            Mode::Eighth => self.length / 8,
        }
    }

    /// Fetches the ModR/M byte on first use.
    pub fn fetch_modrm<S: ByteSource + ?Sized>(&mut self, win: &mut FetchWindow<'_, S>) -> Result<ModRm, Abort> {
        if let Some(modrm) = self.modrm {
            return Ok(modrm);
        }
        let modrm = ModRm::from_byte(win.next_u8()?);
        self.modrm = Some(modrm);
        Ok(modrm)
    }

    /// Whether the r/m operand is a register.
    pub fn rm_is_register<S: ByteSource + ?Sized>(&mut self, win: &mut FetchWindow<'_, S>) -> Result<bool, Abort> {
        let modrm = self.fetch_modrm(win)?;
        Ok(modrm.is_register() || self.attrs.contains(Attrs::REG_FORM))
    }

    /// Consumes the ModR/M byte and any SIB/displacement bytes that are
    /// still pending. Runs before any immediate is fetched.
    pub fn ensure_geometry<S: ByteSource + ?Sized>(
        &mut self,
        win: &mut FetchWindow<'_, S>,
    ) -> Result<Option<MemGeometry>, Abort> {
        if !self.needs_modrm && self.modrm.is_none() {
            return Ok(None);
        }
        if self.rm_is_register(win)? {
            return Ok(None);
        }
        if self.geometry.is_none() {
            let modrm = self.fetch_modrm(win)?;
            let bits = self.peek_address_bits();
            self.geometry = Some(MemGeometry::parse(win, modrm, bits, self.mode64)?);
        }
        Ok(self.geometry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::x86::prefix::REX_B;

    #[test]
    fn test_operand_size_rules() {
        let opts = DisasmOptions::default();
        let mut st = DecodeState::new(&opts, 0);
        assert_eq!(st.operand_bits(), 32);
        st.prefixes.flags = PrefixFlags::DATA;
        assert_eq!(st.operand_bits(), 16);
        assert!(st.used.contains(PrefixFlags::DATA));
        st.rex = 0x48;
        assert_eq!(st.operand_bits(), 64);
        assert_eq!(st.rex_used, 0x48);
        assert_eq!(st.stack_bits(), 64);
    }

    #[test]
    fn test_rex_usage_tracking() {
        let opts = DisasmOptions::default();
        let mut st = DecodeState::new(&opts, 0);
        st.rex = 0x41;
        assert!(!st.rex_bit(REX_W));
        assert_eq!(st.rex_used, 0);
        assert_eq!(st.rex_ext(REX_B), 8);
        assert_eq!(st.rex_used, 0x41);
    }

    #[test]
    fn test_address_size_toggle() {
        let opts = DisasmOptions::new(AddressMode::Mode16);
        let mut st = DecodeState::new(&opts, 0);
        assert_eq!(st.address_bits(), 16);
        st.prefixes.flags = PrefixFlags::ADDR;
        assert_eq!(st.peek_address_bits(), 32);
        assert!(st.used.is_empty());
        assert_eq!(st.address_bits(), 32);
        assert!(st.used.contains(PrefixFlags::ADDR));
    }

    #[test]
    fn test_indirect_branch_size_by_isa() {
        let amd = DisasmOptions::default();
        let mut st = DecodeState::new(&amd, 0);
        st.prefixes.flags = PrefixFlags::DATA;
        assert_eq!(st.indirect_bits(), 16);
        let intel = DisasmOptions::default().with_isa64(Isa64::Intel64);
        let mut st = DecodeState::new(&intel, 0);
        st.prefixes.flags = PrefixFlags::DATA;
        assert_eq!(st.indirect_bits(), 64);
        assert!(st.used.is_empty());
    }
}
