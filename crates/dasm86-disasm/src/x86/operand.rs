//! Operand resolvers.
//!
//! Each [`Op`] slot of a terminal descriptor is rendered to text by a single
//! `match`. Register operands pick a name from the active [`NamingScheme`],
//! memory operands are assembled from the ModR/M geometry.
//!
//! [`NamingScheme`]: super::names::NamingScheme

use dasm86_core::Isa64;

use super::names::{GprWidth, VecWidth};
use super::prefix::{EnvelopeKind, PrefixFlags, REX_B, REX_R, REX_W, REX_X};
use super::state::DecodeState;
use super::tables::{Attrs, CmpKind, Fixed, Mode, Op, VsibIndex};
use crate::error::Abort;
use crate::fetch::{ByteSource, FetchWindow};

/// Text of an operand that cannot be encoded.
pub(crate) const BAD_OPERAND: &str = "(bad)";

const SSE_PREDICATES: [&str; 8] = ["eq", "lt", "le", "unord", "neq", "nlt", "nle", "ord"];

const AVX_PREDICATES: [&str; 32] = [
    "eq", "lt", "le", "unord", "neq", "nlt", "nle", "ord", "eq_uq", "nge", "ngt", "false", "neq_oq", "ge", "gt", "true",
    "eq_os", "lt_oq", "le_oq", "unord_s", "neq_us", "nlt_uq", "nle_uq", "ord_s", "eq_us", "nge_uq", "ngt_uq",
    "false_os", "neq_os", "ge_oq", "gt_oq", "true_us",
];

const XOP_PREDICATES: [&str; 8] = ["lt", "le", "gt", "ge", "eq", "neq", "false", "true"];

const ROUNDING: [&str; 4] = ["{rn-sae}", "{rd-sae}", "{ru-sae}", "{rz-sae}"];

const AMD_3DNOW: [(u8, &str); 24] = [
    (0x0c, "pi2fw"),
    (0x0d, "pi2fd"),
    (0x1c, "pf2iw"),
    (0x1d, "pf2id"),
    (0x8a, "pfnacc"),
    (0x8e, "pfpnacc"),
    (0x90, "pfcmpge"),
    (0x94, "pfmin"),
    (0x96, "pfrcp"),
    (0x97, "pfrsqrt"),
    (0x9a, "pfsub"),
    (0x9e, "pfadd"),
    (0xa0, "pfcmpgt"),
    (0xa4, "pfmax"),
    (0xa6, "pfrcpit1"),
    (0xa7, "pfrsqit1"),
    (0xaa, "pfsubr"),
    (0xae, "pfacc"),
    (0xb0, "pfcmpeq"),
    (0xb4, "pfmul"),
    (0xb6, "pfrcpit2"),
    (0xb7, "pmulhrw"),
    (0xbb, "pswapd"),
    (0xbf, "pavgusb"),
];

/// Signed displacement, `-0x8` style.
fn displacement_text(value: i64) -> String {
    if value < 0 {
        format!("-{:#x}", value.unsigned_abs())
    } else {
        format!("{value:#x}")
    }
}

impl DecodeState<'_> {
    /// Renders one operand slot. An empty string means the slot prints nothing.
    pub fn operand<S: ByteSource + ?Sized>(&mut self, win: &mut FetchWindow<'_, S>, op: Op) -> Result<String, Abort> {
        Ok(match op {
            Op::E(mode) => {
                if self.rm_is_register(win)? {
                    let index = self.rm_index(win)?;
                    self.gpr(mode, index)
                } else {
                    self.memory(win, mode, None)?
                }
            }
            Op::G(mode) => {
                let index = self.reg_index(win)?;
                self.gpr(mode, index)
            }
            Op::M(mode) => {
                if self.rm_is_register(win)? {
                    BAD_OPERAND.to_string()
                } else {
                    self.memory(win, mode, None)?
                }
            }
            Op::R(mode) => {
                let index = self.rm_index(win)?;
                self.gpr(mode, index)
            }
            Op::IndE(mode) => {
                let text = if self.rm_is_register(win)? {
                    let index = self.rm_index(win)?;
                    self.gpr(mode, index)
                } else {
                    self.memory(win, mode, None)?
                };
                if self.intel() {
                    text
                } else {
                    format!("*{text}")
                }
            }
            Op::I(mode) => self.immediate(win, mode)?,
            Op::SI(mode) => {
                self.ensure_geometry(win)?;
                let value = i64::from(win.next_u8()? as i8) as u64;
                let bits = self.mode_bits(mode);
                self.immediate_text(mask_to(value, bits))
            }
            Op::Iv64 => {
                if self.mode64 && self.rex_bit(REX_W) {
                    self.ensure_geometry(win)?;
                    let value = win.next_u64()?;
                    self.immediate_text(value)
                } else {
                    self.immediate(win, Mode::V)?
                }
            }
            Op::J(mode) => self.branch_target(win, mode)?,
            Op::Ap => self.far_pointer(win)?,
            Op::Off(mode) => self.memory_offset(win, mode)?,
            Op::Acc(mode) => self.gpr(mode, 0),
            Op::Fixed(fixed) => self.fixed(fixed),
            Op::OpReg(mode) => {
                let index = (self.opcode & 7) | self.rex_ext(REX_B);
                self.gpr(mode, index)
            }
            Op::Sw => {
                let modrm = self.fetch_modrm(win)?;
                self.has_reg_operand = true;
                self.names
                    .segment(modrm.reg)
                    .unwrap_or_else(|| BAD_OPERAND.to_string())
            }
            Op::Cr => {
                let mut index = self.reg_index(win)?;
                if !self.mode64 && self.attrs.contains(Attrs::LOCK_CR8) && self.use_prefix(PrefixFlags::LOCK) {
                    index |= 8;
                }
                self.has_reg_operand = true;
                self.names.control(index)
            }
            Op::Dr => {
                let index = self.reg_index(win)?;
                self.has_reg_operand = true;
                self.names.debug(index)
            }
            Op::Tr => {
                let modrm = self.fetch_modrm(win)?;
                self.has_reg_operand = true;
                self.names.test(modrm.reg)
            }
            Op::P => {
                let modrm = self.fetch_modrm(win)?;
                self.has_reg_operand = true;
                self.names.mmx(modrm.reg)
            }
            Op::Q(mode) => {
                if self.rm_is_register(win)? {
                    let modrm = self.fetch_modrm(win)?;
                    self.has_reg_operand = true;
                    self.names.mmx(modrm.rm)
                } else {
                    self.memory(win, mode, None)?
                }
            }
            Op::N => {
                let modrm = self.fetch_modrm(win)?;
                self.has_reg_operand = true;
                self.names.mmx(modrm.rm)
            }
            Op::MxG => {
                if self.use_prefix(PrefixFlags::DATA) {
                    let index = self.vector_reg_index(win)?;
                    self.vector(Mode::Xmm, index)
                } else {
                    let modrm = self.fetch_modrm(win)?;
                    self.has_reg_operand = true;
                    self.names.mmx(modrm.reg)
                }
            }
            Op::MxE(mode) => {
                let sse = self.use_prefix(PrefixFlags::DATA);
                if self.rm_is_register(win)? {
                    if sse {
                        let index = self.vector_rm_index(win)?;
                        self.vector(Mode::Xmm, index)
                    } else {
                        let modrm = self.fetch_modrm(win)?;
                        self.has_reg_operand = true;
                        self.names.mmx(modrm.rm)
                    }
                } else {
                    self.memory(win, if sse { Mode::Xmm } else { mode }, None)?
                }
            }
            Op::V(mode) => {
                let index = self.vector_reg_index(win)?;
                self.vector(mode, index)
            }
            Op::W(mode) => {
                if self.rm_is_register(win)? {
                    let index = self.vector_rm_index(win)?;
                    self.vector(mode, index)
                } else {
                    self.memory(win, mode, None)?
                }
            }
            Op::U(mode) => {
                let index = self.vector_rm_index(win)?;
                self.vector(mode, index)
            }
            Op::H(mode) => match self.take_vvvv() {
                Some(index) => self.vector(mode, index),
                None => BAD_OPERAND.to_string(),
            },
            Op::L(mode) => {
                self.ensure_geometry(win)?;
                let byte = win.next_u8()?;
                let index = if self.mode64 { byte >> 4 } else { (byte >> 4) & 7 };
                self.vector(mode, index)
            }
            Op::By(mode) => match self.take_vvvv() {
                Some(index) => self.gpr(mode, index & 0x0f),
                None => BAD_OPERAND.to_string(),
            },
            Op::KG => {
                let index = self.vector_reg_index(win)?;
                self.small_file(index, 8, |names, i| names.mask(i))
            }
            Op::KE(mode) => {
                if self.rm_is_register(win)? {
                    let index = self.vector_rm_index(win)?;
                    self.small_file(index, 8, |names, i| names.mask(i))
                } else {
                    self.memory(win, mode, None)?
                }
            }
            Op::KH => match self.take_vvvv() {
                Some(index) => self.small_file(index, 8, |names, i| names.mask(i)),
                None => BAD_OPERAND.to_string(),
            },
            Op::KR => {
                let index = self.vector_rm_index(win)?;
                self.small_file(index, 8, |names, i| names.mask(i))
            }
            Op::BndG => {
                let index = self.reg_index(win)?;
                self.small_file(index, 4, |names, i| names.bound(i))
            }
            Op::BndE(mode) => {
                if self.rm_is_register(win)? {
                    let index = self.rm_index(win)?;
                    self.small_file(index, 4, |names, i| names.bound(i))
                } else {
                    self.memory(win, mode, None)?
                }
            }
            Op::TG => {
                let index = self.reg_index(win)?;
                self.small_file(index, 8, |names, i| names.tile(i))
            }
            Op::TE => {
                let index = self.rm_index(win)?;
                self.small_file(index, 8, |names, i| names.tile(i))
            }
            Op::TH => match self.take_vvvv() {
                Some(index) => self.small_file(index, 8, |names, i| names.tile(i)),
                None => BAD_OPERAND.to_string(),
            },
            Op::Rc => self.rounding(win, true)?,
            Op::Sae => self.rounding(win, false)?,
            Op::St => {
                self.has_reg_operand = true;
                self.names.st(None)
            }
            Op::Sti => {
                let modrm = self.fetch_modrm(win)?;
                self.has_reg_operand = true;
                self.names.st(Some(modrm.rm))
            }
            Op::X(mode) => self.string_operand(mode, true),
            Op::Y(mode) => self.string_operand(mode, false),
            Op::Xlat => self.xlat_operand(),
            Op::One => {
                if self.intel() {
                    "1".to_string()
                } else {
                    String::new()
                }
            }
            Op::Cmp(kind) => self.predicate(win, kind)?,
            Op::Vsib(mode, index) => {
                if self.rm_is_register(win)? {
                    BAD_OPERAND.to_string()
                } else {
                    self.memory(win, mode, Some(index))?
                }
            }
            Op::Suffix3dNow => {
                self.ensure_geometry(win)?;
                let byte = win.next_u8()?;
                match AMD_3DNOW.iter().find(|(b, _)| *b == byte) {
                    Some((_, name)) => self.mnemonic_override = Some(name),
                    None => self.invalid = Some("unknown 3DNow! suffix"),
                }
                String::new()
            }
        })
    }

    fn reg_index<S: ByteSource + ?Sized>(&mut self, win: &mut FetchWindow<'_, S>) -> Result<u8, Abort> {
        let modrm = self.fetch_modrm(win)?;
        Ok(modrm.reg | self.rex_ext(REX_R))
    }

    fn rm_index<S: ByteSource + ?Sized>(&mut self, win: &mut FetchWindow<'_, S>) -> Result<u8, Abort> {
        let modrm = self.fetch_modrm(win)?;
        Ok(modrm.rm | self.rex_ext(REX_B))
    }

    /// ModR/M reg for register files that EVEX widens to 32 entries.
    fn vector_reg_index<S: ByteSource + ?Sized>(&mut self, win: &mut FetchWindow<'_, S>) -> Result<u8, Abort> {
        let mut index = self.reg_index(win)?;
        if matches!(self.env, Some(env) if env.kind == EnvelopeKind::Evex && env.r_hi) {
            index |= 16;
        }
        Ok(index)
    }

    /// ModR/M r/m for register files that EVEX widens through EVEX.X.
    fn vector_rm_index<S: ByteSource + ?Sized>(&mut self, win: &mut FetchWindow<'_, S>) -> Result<u8, Abort> {
        let mut index = self.rm_index(win)?;
        if self.is_evex() && self.rex_bit(REX_X) {
            index |= 16;
        }
        Ok(index)
    }

    /// Claims VEX.vvvv for an operand.
    fn take_vvvv(&mut self) -> Option<u8> {
        let env = self.env?;
        self.vvvv_used = true;
        Some(env.vvvv)
    }

    fn gpr(&mut self, mode: Mode, index: u8) -> String {
        self.has_reg_operand = true;
        let bits = self.mode_bits(mode);
        let width = if bits == 8 {
            if self.rex != 0 {
                self.rex_bit(0);
                GprWidth::ByteRex
            } else {
                GprWidth::Byte
            }
        } else {
            GprWidth::from_bits(bits)
        };
        self.names.gpr(width, index)
    }

    fn vector(&mut self, mode: Mode, index: u8) -> String {
        self.has_reg_operand = true;
        let bits = if mode.is_vector() {
            self.mode_bits(mode).max(128)
        } else {
            128
        };
        self.names.vector(VecWidth::from_bits(bits), index)
    }

    /// Mask, bound and tile registers: indices past the file are `(bad)`.
    fn small_file(&mut self, index: u8, size: u8, name: impl Fn(&super::names::NamingScheme, u8) -> String) -> String {
        self.has_reg_operand = true;
        if index >= size {
            BAD_OPERAND.to_string()
        } else {
            name(&self.names, index)
        }
    }

    fn fixed(&mut self, fixed: Fixed) -> String {
        self.has_reg_operand = true;
        let sigil = if self.intel() { "" } else { "%" };
        match fixed {
            Fixed::Cl => format!("{sigil}cl"),
            Fixed::DxPort => {
                if self.intel() {
                    "dx".to_string()
                } else {
                    "(%dx)".to_string()
                }
            }
            Fixed::Es => format!("{sigil}es"),
            Fixed::Cs => format!("{sigil}cs"),
            Fixed::Ss => format!("{sigil}ss"),
            Fixed::Ds => format!("{sigil}ds"),
            Fixed::Fs => format!("{sigil}fs"),
            Fixed::Gs => format!("{sigil}gs"),
            Fixed::Xmm0 => format!("{sigil}xmm0"),
        }
    }

    /// Absolute value as printed for addresses and immediates.
    fn value_text(&self, value: u64) -> String {
        if self.mode64 {
            format!("{value:#x}")
        } else {
            format!("{:#x}", value & 0xffff_ffff)
        }
    }

    fn immediate_text(&self, value: u64) -> String {
        let text = self.value_text(value);
        if self.intel() {
            text
        } else {
            format!("${text}")
        }
    }

    fn immediate<S: ByteSource + ?Sized>(&mut self, win: &mut FetchWindow<'_, S>, mode: Mode) -> Result<String, Abort> {
        self.ensure_geometry(win)?;
        let value = match mode {
            Mode::B => u64::from(win.next_u8()?),
            Mode::W => u64::from(win.next_u16()?),
            Mode::Q => win.next_u64()?,
            Mode::V => match self.operand_bits() {
                64 => i64::from(win.next_u32()? as i32) as u64,
                32 => u64::from(win.next_u32()?),
                _ => u64::from(win.next_u16()?),
            },
            _ => match self.mode_bits(mode) {
                16 => u64::from(win.next_u16()?),
                64 => i64::from(win.next_u32()? as i32) as u64,
                _ => u64::from(win.next_u32()?),
            },
        };
        Ok(self.immediate_text(value))
    }

    fn branch_target<S: ByteSource + ?Sized>(&mut self, win: &mut FetchWindow<'_, S>, mode: Mode) -> Result<String, Abort> {
        self.ensure_geometry(win)?;
        let mut mask = None;
        let disp = if mode == Mode::B {
            i64::from(win.next_u8()? as i8)
        } else {
            let data = self.prefixes.flags.contains(PrefixFlags::DATA);
            let dflag = (self.default_operand_bits() == 32) != data;
            let intel64 = self.mode64 && self.opts.isa64 == Isa64::Intel64;
            let rex_w = self.mode64 && self.rex_bit(REX_W);
            if !self.mode64 || (!intel64 && !rex_w) {
                self.use_prefix(PrefixFlags::DATA);
            }
            if dflag || intel64 || rex_w {
                i64::from(win.next_u32()? as i32)
            } else {
                mask = Some(data);
                i64::from(win.next_u16()? as i16)
            }
        };
        let next = self.address.wrapping_add(win.pos() as u64);
        let mut target = next.wrapping_add(disp as u64);
        if let Some(data) = mask {
            // A 16-bit branch wraps within its 64k segment.
            let segment = if data { 0 } else { next & !0xffff };
            target = (target & 0xffff) | segment;
        }
        if !self.mode64 {
            target &= 0xffff_ffff;
        }
        self.target = Some(target);
        Ok(self.value_text(target))
    }

    fn far_pointer<S: ByteSource + ?Sized>(&mut self, win: &mut FetchWindow<'_, S>) -> Result<String, Abort> {
        let offset = if self.toggled_operand_bits() == 32 {
            u64::from(win.next_u32()?)
        } else {
            u64::from(win.next_u16()?)
        };
        let segment = win.next_u16()?;
        Ok(if self.intel() {
            format!("{segment:#x}:{offset:#x}")
        } else {
            format!("${segment:#x},${offset:#x}")
        })
    }

    fn toggled_operand_bits(&mut self) -> u32 {
        self.mode_bits(Mode::Z)
    }

    fn memory_offset<S: ByteSource + ?Sized>(&mut self, win: &mut FetchWindow<'_, S>, mode: Mode) -> Result<String, Abort> {
        let bits = self.address_bits();
        let offset = win.next_sized((bits / 8) as usize)?;
        let mut out = String::new();
        // Claims the size prefixes; direct offsets carry no size keyword.
        self.mode_bits(mode);
        match self.segment_override() {
            Some(seg) => out.push_str(&seg),
            None if self.intel() => out.push_str("ds:"),
            None => {}
        }
        out.push_str(&self.value_text(offset));
        Ok(out)
    }

    /// Active segment override as `%fs:` / `fs:`, marking it used.
    fn segment_override(&mut self) -> Option<String> {
        let seg = self.prefixes.segment?;
        self.used |= seg.flag();
        let sigil = if self.intel() { "" } else { "%" };
        Some(format!("{sigil}{}:", seg.name()))
    }

    /// Intel `... PTR` keyword for a memory operand.
    fn size_keyword(&mut self, mode: Mode, broadcast: Option<u32>) -> Option<&'static str> {
        let bits = match broadcast {
            Some(bits) => bits,
            None => match mode {
                Mode::None => return None,
                Mode::O => {
                    return Some(if self.mode_bits(mode) == 128 { "OWORD" } else { "QWORD" });
                }
                Mode::P => {
                    return Some(match self.operand_bits() {
                        16 => "DWORD",
                        64 => "TBYTE",
                        _ => "FWORD",
                    })
                }
                _ => self.mode_bits(mode),
            },
        };
        Some(match bits {
            8 => "BYTE",
            16 => "WORD",
            32 => "DWORD",
            64 => "QWORD",
            80 => "TBYTE",
            128 => "XMMWORD",
            256 => "YMMWORD",
            512 => "ZMMWORD",
            _ => return None,
        })
    }

    /// EVEX compressed displacement scale (log2 of N).
    pub(crate) fn disp8_shift(&mut self, mode: Mode, w: bool, broadcast: bool) -> u32 {
        if broadcast {
            if let Some(bits) = mode.broadcast_bits(w) {
                return (bits / 8).trailing_zeros();
            }
        }
        match mode {
            Mode::B => 0,
            Mode::W => 1,
            Mode::D => 2,
            Mode::Q => 3,
            Mode::Dq => {
                if w {
                    3
                } else {
                    2
                }
            }
            Mode::Xmm => 4,
            Mode::ElemW => {
                if w {
                    3
                } else {
                    2
                }
            }
            Mode::Ymm => 5,
            m if m.is_vector() => (self.mode_bits(m) / 8).max(1).trailing_zeros(),
            _ => 0,
        }
    }

    fn memory<S: ByteSource + ?Sized>(
        &mut self,
        win: &mut FetchWindow<'_, S>,
        mode: Mode,
        vsib: Option<VsibIndex>,
    ) -> Result<String, Abort> {
        let Some(geo) = self.ensure_geometry(win)? else {
            return Ok(BAD_OPERAND.to_string());
        };
        let modrm = self.fetch_modrm(win)?;
        let addr_bits = self.address_bits();
        let intel = self.intel();

        let evex = self.env.filter(|env| env.kind == EnvelopeKind::Evex);
        let broadcast = match evex {
            Some(env) if env.b => mode.broadcast_bits(env.w),
            _ => None,
        };
        if broadcast.is_some() {
            self.evex_b_used = true;
            self.broadcast = true;
        }

        let mut out = String::new();
        if intel {
            if let Some(keyword) = self.size_keyword(mode, broadcast) {
                out.push_str(keyword);
                out.push_str(" PTR ");
            }
        } else {
            self.mode_bits(mode);
        }
        let seg = self.segment_override();
        let has_seg = seg.is_some();
        if let Some(seg) = seg {
            out.push_str(&seg);
        }

        let mut disp = geo.disp;
        if let Some(env) = evex {
            if geo.disp_bytes == 1 {
                disp <<= self.disp8_shift(mode, env.w, env.b);
            }
        }

        if addr_bits == 16 {
            if vsib.is_some() {
                return Ok(BAD_OPERAND.to_string());
            }
            self.memory16(&mut out, modrm.mod_, modrm.rm, disp, has_seg);
        } else {
            let Some(text) = self.memory32(geo, modrm.mod_, modrm.rm, disp, addr_bits, vsib, has_seg) else {
                return Ok(BAD_OPERAND.to_string());
            };
            out.push_str(&text);
        }

        if let Some(bits) = broadcast {
            // Count elements of the operand itself: half-width sources broadcast fewer.
            let width = self.mode_bits(mode);
            out.push_str(&format!("{{1to{}}}", width / bits));
        }
        Ok(out)
    }

    fn memory16(&mut self, out: &mut String, mod_: u8, rm: u8, disp: i64, has_seg: bool) {
        let intel = self.intel();
        let direct = mod_ == 0 && rm == 6;
        if !intel && (mod_ != 0 || rm == 6) {
            out.push_str(&displacement_text(disp));
        }
        if !direct {
            out.push(if intel { '[' } else { '(' });
            out.push_str(self.names.index16(rm));
            if intel && (disp != 0 || mod_ != 0) {
                let mut disp = disp;
                if disp >= 0 {
                    out.push('+');
                } else if mod_ != 1 {
                    out.push('-');
                    disp = -disp;
                }
                out.push_str(&displacement_text(disp));
            }
            out.push(if intel { ']' } else { ')' });
        } else if intel {
            if !has_seg {
                out.push_str("ds:");
            }
            out.push_str(&format!("{:#x}", disp & 0xffff));
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn memory32(
        &mut self,
        geo: super::modrm::MemGeometry,
        mod_: u8,
        rm: u8,
        disp: i64,
        addr_bits: u32,
        vsib: Option<VsibIndex>,
        has_seg: bool,
    ) -> Option<String> {
        let intel = self.intel();
        let width = GprWidth::from_bits(addr_bits);
        let base_ext = self.rex_ext(REX_B);
        let base3 = geo.sib.map_or(rm, |sib| sib.base);
        let have_base = geo.has_base;
        let have_sib = geo.sib.is_some();
        let scale = geo.sib.map_or(0, |sib| sib.scale);

        if vsib.is_some() && !have_sib {
            return None;
        }

        let mut index_name = None;
        if let Some(sib) = geo.sib {
            let mut index = sib.index | self.rex_ext(REX_X);
            match vsib {
                Some(kind) => {
                    if let Some(env) = self.env {
                        if env.kind == EnvelopeKind::Evex && env.vvvv & 0x10 != 0 {
                            index |= 16;
                        }
                    }
                    self.vsib_used = true;
                    let bits = match kind {
                        VsibIndex::Full => self.length,
                        VsibIndex::Half => (self.length / 2).max(128),
                    };
                    index_name = Some(self.names.vector(VecWidth::from_bits(bits), index));
                }
                None if index != 4 => index_name = Some(self.names.gpr(width, index)),
                None => {}
            }
        }
        let have_index = index_name.is_some();
        let need_index = have_sib && !have_base && !have_index && !(self.mode64 && addr_bits == 64);
        let have_disp = have_base || need_index || (have_sib && (have_index || scale != 0));
        let rip = geo.rip_relative;
        let show_index = have_sib && (scale != 0 || need_index || have_index || (have_base && base3 != 4));
        let index_text = index_name.unwrap_or_else(|| self.names.zero_index(addr_bits));
        let base_text = self.names.gpr(width, base3 | base_ext);
        let explicit_disp = mod_ != 0 || base3 == 5;

        if rip {
            self.rip_disp = Some((disp, addr_bits));
        }

        let mut out = String::new();
        if !intel {
            if explicit_disp {
                if have_disp || rip {
                    out.push_str(&displacement_text(disp));
                } else {
                    out.push_str(&self.value_text(disp as u64));
                }
                if rip {
                    out.push('(');
                    out.push_str(&self.names.rip(addr_bits));
                    out.push(')');
                }
            }
            if have_disp {
                out.push('(');
                if have_base {
                    out.push_str(&base_text);
                }
                if show_index {
                    out.push(',');
                    out.push_str(&index_text);
                    out.push(',');
                    out.push_str(&(1u32 << scale).to_string());
                }
                out.push(')');
            }
            return Some(out);
        }

        if have_disp || rip {
            out.push('[');
            if rip {
                out.push_str(&self.names.rip(addr_bits));
            }
            if have_base {
                out.push_str(&base_text);
            }
            if show_index {
                if have_base {
                    out.push('+');
                }
                out.push_str(&index_text);
                out.push('*');
                out.push_str(&(1u32 << scale).to_string());
            }
            if disp != 0 || explicit_disp {
                let mut disp = disp;
                if !have_disp || disp >= 0 {
                    out.push('+');
                } else if mod_ != 1 {
                    out.push('-');
                    disp = -disp;
                }
                if have_disp {
                    out.push_str(&displacement_text(disp));
                } else {
                    out.push_str(&self.value_text(disp as u64));
                }
            }
            out.push(']');
        } else if explicit_disp {
            if !has_seg {
                out.push_str("ds:");
            }
            out.push_str(&self.value_text(disp as u64));
        }
        Some(out)
    }

    fn string_operand(&mut self, mode: Mode, source: bool) -> String {
        let bits = self.address_bits();
        let reg = self.names.gpr(GprWidth::from_bits(bits), if source { 6 } else { 7 });
        let sigil = if self.intel() { "" } else { "%" };
        let seg = if source {
            self.segment_override().unwrap_or_else(|| format!("{sigil}ds:"))
        } else {
            format!("{sigil}es:")
        };
        if self.intel() {
            let keyword = self.size_keyword(mode, None).unwrap_or("BYTE");
            format!("{keyword} PTR {seg}[{reg}]")
        } else {
            self.mode_bits(mode);
            format!("{seg}({reg})")
        }
    }

    fn xlat_operand(&mut self) -> String {
        let bits = self.address_bits();
        let reg = self.names.gpr(GprWidth::from_bits(bits), 3);
        let sigil = if self.intel() { "" } else { "%" };
        let seg = self.segment_override().unwrap_or_else(|| format!("{sigil}ds:"));
        if self.intel() {
            format!("BYTE PTR {seg}[{reg}]")
        } else {
            format!("{seg}({reg})")
        }
    }

    fn rounding<S: ByteSource + ?Sized>(&mut self, win: &mut FetchWindow<'_, S>, with_mode: bool) -> Result<String, Abort> {
        let Some(env) = self.env.filter(|env| env.kind == EnvelopeKind::Evex && env.b) else {
            return Ok(String::new());
        };
        if !self.rm_is_register(win)? {
            return Ok(String::new());
        }
        self.evex_b_used = true;
        Ok(if with_mode {
            ROUNDING[usize::from(env.ll & 3)].to_string()
        } else {
            "{sae}".to_string()
        })
    }

    fn predicate<S: ByteSource + ?Sized>(&mut self, win: &mut FetchWindow<'_, S>, kind: CmpKind) -> Result<String, Abort> {
        self.ensure_geometry(win)?;
        let imm = win.next_u8()?;
        let i = usize::from(imm);
        let name = match kind {
            CmpKind::Sse => SSE_PREDICATES.get(i).copied(),
            CmpKind::Avx => AVX_PREDICATES.get(i).copied(),
            CmpKind::Vpcmp => SSE_PREDICATES.get(i).copied().filter(|_| imm != 3 && imm != 7),
            CmpKind::Xop => XOP_PREDICATES.get(i).copied(),
            CmpKind::Pclmul => match imm {
                0x00 => Some("lql"),
                0x01 => Some("hql"),
                0x10 => Some("lqh"),
                0x11 => Some("hqh"),
                _ => None,
            },
        };
        Ok(match name {
            Some(name) => {
                self.cmp_infix = Some(name);
                String::new()
            }
            None => self.immediate_text(u64::from(imm)),
        })
    }
}

fn mask_to(value: u64, bits: u32) -> u64 {
    if bits >= 64 {
        value
    } else {
        value & ((1u64 << bits) - 1)
    }
}
