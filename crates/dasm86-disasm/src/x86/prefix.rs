//! Legacy prefix scanning and VEX/XOP/EVEX envelope decoding.

use bitflags::bitflags;

use crate::error::Abort;
use crate::fetch::{ByteSource, FetchWindow, MAX_CODE_LENGTH};

bitflags! {
    /// Legacy prefix classes present on (or consumed by) an instruction.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PrefixFlags: u16 {
        const REPZ = 1 << 0;
        const REPNZ = 1 << 1;
        const LOCK = 1 << 2;
        const CS = 1 << 3;
        const SS = 1 << 4;
        const DS = 1 << 5;
        const ES = 1 << 6;
        const FS = 1 << 7;
        const GS = 1 << 8;
        const DATA = 1 << 9;
        const ADDR = 1 << 10;
        const FWAIT = 1 << 11;
    }
}

impl PrefixFlags {
    /// Prefix class of a legacy prefix byte.
    pub fn from_byte(byte: u8) -> Option<Self> {
        Some(match byte {
            0xf3 => Self::REPZ,
            0xf2 => Self::REPNZ,
            0xf0 => Self::LOCK,
            0x2e => Self::CS,
            0x36 => Self::SS,
            0x3e => Self::DS,
            0x26 => Self::ES,
            0x64 => Self::FS,
            0x65 => Self::GS,
            0x66 => Self::DATA,
            0x67 => Self::ADDR,
            _ => return None,
        })
    }
}

/// REX prefix bits.
pub const REX_OPCODE: u8 = 0x40;
pub const REX_W: u8 = 0x08;
pub const REX_R: u8 = 0x04;
pub const REX_X: u8 = 0x02;
pub const REX_B: u8 = 0x01;

/// Segment override prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Es,
    Cs,
    Ss,
    Ds,
    Fs,
    Gs,
}

impl Segment {
    fn from_flag(flag: PrefixFlags) -> Option<Self> {
        [
            (PrefixFlags::ES, Self::Es),
            (PrefixFlags::CS, Self::Cs),
            (PrefixFlags::SS, Self::Ss),
            (PrefixFlags::DS, Self::Ds),
            (PrefixFlags::FS, Self::Fs),
            (PrefixFlags::GS, Self::Gs),
        ]
        .into_iter()
        .find_map(|(f, seg)| (f == flag).then_some(seg))
    }

    pub fn flag(self) -> PrefixFlags {
        match self {
            Self::Es => PrefixFlags::ES,
            Self::Cs => PrefixFlags::CS,
            Self::Ss => PrefixFlags::SS,
            Self::Ds => PrefixFlags::DS,
            Self::Fs => PrefixFlags::FS,
            Self::Gs => PrefixFlags::GS,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Es => "es",
            Self::Cs => "cs",
            Self::Ss => "ss",
            Self::Ds => "ds",
            Self::Fs => "fs",
            Self::Gs => "gs",
        }
    }
}

/// How the legacy prefix loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScanEnd {
    /// The cursor sits on the first opcode byte.
    Opcode,
    /// A REX prefix was followed by another prefix, or the prefixes filled
    /// the length limit. The consumed prefixes form the whole instruction.
    Void,
}

/// Legacy prefixes in encounter order, with per-class positions.
///
/// Consumed prefixes are zeroed in `bytes` so that whatever remains is
/// printed by name ahead of the mnemonic.
#[derive(Debug, Clone, Default)]
pub(crate) struct Prefixes {
    pub flags: PrefixFlags,
    pub bytes: [u8; MAX_CODE_LENGTH],
    pub count: usize,
    pub last_repz: Option<usize>,
    pub last_repnz: Option<usize>,
    pub last_lock: Option<usize>,
    pub last_data: Option<usize>,
    pub last_addr: Option<usize>,
    pub last_seg: Option<usize>,
    pub last_rex: Option<usize>,
    pub segment: Option<Segment>,
    /// Position of the prefix that selected `segment`.
    pub segment_at: Option<usize>,
    pub rex: u8,
    /// Number of recorded prefixes that precede a FWAIT byte.
    pub fwait_at: Option<usize>,
}

impl Prefixes {
    /// Runs the legacy prefix loop.
    pub fn scan<S: ByteSource + ?Sized>(
        win: &mut FetchWindow<'_, S>,
        mode64: bool,
    ) -> Result<(Self, ScanEnd), Abort> {
        let mut p = Self::default();
        loop {
            // Fourteen prefixes leave no room for an opcode.
            if p.count == MAX_CODE_LENGTH - 1 {
                return Ok((p, ScanEnd::Void));
            }
            let byte = win.peek()?;
            let mut new_rex = 0;
            match byte {
                0x40..=0x4f if mode64 => {
                    new_rex = byte;
                }
                0x9b => {
                    let earlier = !p.flags.is_empty() || p.rex != 0;
                    p.flags |= PrefixFlags::FWAIT;
                    p.fwait_at = Some(p.count);
                    win.next_u8()?;
                    if earlier {
                        let end = if p.rex != 0 { ScanEnd::Void } else { ScanEnd::Opcode };
                        return Ok((p, end));
                    }
                    continue;
                }
                _ => {
                    let Some(flag) = PrefixFlags::from_byte(byte) else {
                        return Ok((p, ScanEnd::Opcode));
                    };
                    p.flags |= flag;
                    let at = Some(p.count);
                    if flag == PrefixFlags::REPZ {
                        p.last_repz = at;
                    } else if flag == PrefixFlags::REPNZ {
                        p.last_repnz = at;
                    } else if flag == PrefixFlags::LOCK {
                        p.last_lock = at;
                    } else if flag == PrefixFlags::DATA {
                        p.last_data = at;
                    } else if flag == PrefixFlags::ADDR {
                        p.last_addr = at;
                    } else {
                        p.last_seg = at;
                        // Only fs and gs overrides are honoured in long mode.
                        if !mode64 || flag.intersects(PrefixFlags::FS | PrefixFlags::GS) {
                            p.segment = Segment::from_flag(flag);
                            p.segment_at = at;
                        }
                    }
                }
            }
            if p.rex != 0 {
                return Ok((p, ScanEnd::Void));
            }
            if new_rex != 0 {
                p.last_rex = Some(p.count);
            }
            p.bytes[p.count] = byte;
            p.count += 1;
            p.rex = new_rex;
            win.next_u8()?;
        }
    }

    /// Prefix bytes still present, in order.
    pub fn remaining(&self) -> impl Iterator<Item = u8> + '_ {
        self.bytes[..self.count].iter().copied().filter(|&b| b != 0)
    }

    pub fn remove(&mut self, at: Option<usize>) {
        if let Some(i) = at {
            self.bytes[i] = 0;
        }
    }

    /// Whether any of 66/F2/F3/F0 or REX preceded a VEX-style escape.
    pub fn conflicts_with_vex(&self) -> bool {
        self.rex != 0
            || self
                .flags
                .intersects(PrefixFlags::DATA | PrefixFlags::REPZ | PrefixFlags::REPNZ | PrefixFlags::LOCK)
    }
}

/// Name of a single prefix byte, as printed ahead of a mnemonic.
pub(crate) fn prefix_name(byte: u8, mode64: bool, data16_default: bool, addr16_default: bool) -> Option<&'static str> {
    const REX_NAMES: [&str; 16] = [
        "rex", "rex.B", "rex.X", "rex.XB", "rex.R", "rex.RB", "rex.RX", "rex.RXB", "rex.W", "rex.WB", "rex.WX",
        "rex.WXB", "rex.WR", "rex.WRB", "rex.WRX", "rex.WRXB",
    ];
    Some(match byte {
        0x40..=0x4f if mode64 => REX_NAMES[usize::from(byte & 0x0f)],
        0xf3 => "repz",
        0xf2 => "repnz",
        0xf0 => "lock",
        0x2e => "cs",
        0x36 => "ss",
        0x3e => "ds",
        0x26 => "es",
        0x64 => "fs",
        0x65 => "gs",
        0x66 => {
            if data16_default {
                "data32"
            } else {
                "data16"
            }
        }
        0x67 => {
            if mode64 {
                "addr32"
            } else if addr16_default {
                "addr32"
            } else {
                "addr16"
            }
        }
        0x9b => "fwait",
        _ => return None,
    })
}

/// Which escape introduced a vector envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeKind {
    Vex,
    Xop,
    Evex,
}

/// Decoded VEX/XOP/EVEX fields. Inverted fields are stored un-inverted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Envelope {
    pub kind: EnvelopeKind,
    /// Opcode map (1-3 for VEX/EVEX, 8-10 for XOP).
    pub map: u8,
    pub w: bool,
    /// Register specifier; bit 4 is EVEX.V'.
    pub vvvv: u8,
    /// `vvvv` as encoded, before the mode drops its high bits.
    pub raw_vvvv: u8,
    /// Raw vector length bits (L, or L'L).
    pub ll: u8,
    /// Implied prefix: 0 none, 1 66, 2 F3, 3 F2.
    pub pp: u8,
    /// R/X/B as REX bits.
    pub rex: u8,
    /// EVEX.R'
    pub r_hi: bool,
    /// EVEX.aaa
    pub mask: u8,
    /// EVEX.z
    pub zeroing: bool,
    /// EVEX.b
    pub b: bool,
}

impl Envelope {
    fn rex_bits(byte: u8) -> u8 {
        let mut rex = 0;
        if byte & 0x80 == 0 {
            rex |= REX_R;
        }
        if byte & 0x40 == 0 {
            rex |= REX_X;
        }
        if byte & 0x20 == 0 {
            rex |= REX_B;
        }
        rex
    }

    /// Two-byte VEX: `C5 RvvvvLpp`.
    pub fn vex2(p0: u8, mode64: bool) -> Self {
        let mut env = Self {
            kind: EnvelopeKind::Vex,
            map: 1,
            w: false,
            vvvv: (!p0 >> 3) & 0x0f,
            raw_vvvv: (!p0 >> 3) & 0x0f,
            ll: (p0 >> 2) & 1,
            pp: p0 & 3,
            rex: if p0 & 0x80 == 0 { REX_R } else { 0 },
            r_hi: false,
            mask: 0,
            zeroing: false,
            b: false,
        };
        env.clamp(mode64);
        env
    }

    /// Three-byte VEX or XOP: `C4|8F RXBmmmmm WvvvvLpp`.
    pub fn vex3(kind: EnvelopeKind, p0: u8, p1: u8, mode64: bool) -> Self {
        let mut env = Self {
            kind,
            map: p0 & 0x1f,
            w: p1 & 0x80 != 0,
            vvvv: (!p1 >> 3) & 0x0f,
            raw_vvvv: (!p1 >> 3) & 0x0f,
            ll: (p1 >> 2) & 1,
            pp: p1 & 3,
            rex: Self::rex_bits(p0),
            r_hi: false,
            mask: 0,
            zeroing: false,
            b: false,
        };
        env.clamp(mode64);
        env
    }

    /// EVEX: `62 RXBR'0mmm Wvvvv1pp zL'LbV'aaa`.
    pub fn evex(p0: u8, p1: u8, p2: u8, mode64: bool) -> Result<Self, Abort> {
        if p0 & 0x08 != 0 {
            return Err(Abort::Invalid("EVEX P0 reserved bit set"));
        }
        if p1 & 0x04 == 0 {
            return Err(Abort::Invalid("EVEX P1 fixed bit clear"));
        }
        let mut vvvv = (!p1 >> 3) & 0x0f;
        if p2 & 0x08 == 0 {
            vvvv |= 0x10;
        }
        let mut env = Self {
            kind: EnvelopeKind::Evex,
            map: p0 & 0x07,
            w: p1 & 0x80 != 0,
            vvvv,
            raw_vvvv: vvvv,
            ll: (p2 >> 5) & 3,
            pp: p1 & 3,
            rex: Self::rex_bits(p0),
            r_hi: p0 & 0x10 == 0,
            mask: p2 & 7,
            zeroing: p2 & 0x80 != 0,
            b: p2 & 0x10 != 0,
        };
        env.clamp(mode64);
        Ok(env)
    }

    /// Outside long mode the extension bits are silently dropped.
    fn clamp(&mut self, mode64: bool) {
        if !mode64 {
            self.rex &= !REX_B;
            self.r_hi = false;
            self.vvvv &= 7;
        }
    }

    /// Prefix-table index for `pp`: [none, F3, 66, F2].
    pub fn prefix_index(&self) -> usize {
        match self.pp {
            1 => 2,
            2 => 1,
            3 => 3,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::SliceSource;

    fn scan(bytes: &[u8], mode64: bool) -> (Prefixes, ScanEnd, usize) {
        let mut src = SliceSource::new(0, bytes);
        let mut win = FetchWindow::new(&mut src, 0);
        let (p, end) = Prefixes::scan(&mut win, mode64).unwrap();
        let pos = win.pos();
        (p, end, pos)
    }

    #[test]
    fn test_legacy_prefixes_recorded_in_order() {
        let (p, end, pos) = scan(&[0xf0, 0x66, 0x2e, 0x90], false);
        assert_eq!(end, ScanEnd::Opcode);
        assert_eq!(pos, 3);
        assert!(p.flags.contains(PrefixFlags::LOCK | PrefixFlags::DATA | PrefixFlags::CS));
        assert_eq!(p.last_lock, Some(0));
        assert_eq!(p.last_data, Some(1));
        assert_eq!(p.segment, Some(Segment::Cs));
        assert_eq!(p.remaining().collect::<Vec<_>>(), vec![0xf0, 0x66, 0x2e]);
    }

    #[test]
    fn test_rex_only_in_long_mode() {
        let (p, end, pos) = scan(&[0x48, 0x89, 0xe5], true);
        assert_eq!((end, pos, p.rex), (ScanEnd::Opcode, 1, 0x48));
        let (p, _, pos) = scan(&[0x48, 0x89, 0xe5], false);
        assert_eq!((pos, p.rex), (0, 0));
    }

    #[test]
    fn test_rex_followed_by_prefix_is_void() {
        let (p, end, pos) = scan(&[0x48, 0x66, 0x90], true);
        assert_eq!(end, ScanEnd::Void);
        assert_eq!(pos, 1);
        assert_eq!(p.count, 1);
    }

    #[test]
    fn test_long_mode_ignores_legacy_segments() {
        let (p, _, _) = scan(&[0x2e, 0x90], true);
        assert_eq!(p.segment, None);
        let (p, _, _) = scan(&[0x64, 0x90], true);
        assert_eq!(p.segment, Some(Segment::Fs));
    }

    #[test]
    fn test_fwait_not_recorded() {
        let (p, end, pos) = scan(&[0x9b, 0xdb, 0xe2], true);
        assert_eq!((end, pos, p.count), (ScanEnd::Opcode, 1, 0));
        assert!(p.flags.contains(PrefixFlags::FWAIT));
    }

    #[test]
    fn test_vex_field_decode() {
        // c4 e2 79 ...: R X B clear (no extension), map 2, W0, vvvv=1111, L0, pp=01
        let env = Envelope::vex3(EnvelopeKind::Vex, 0xe2, 0x79, true);
        assert_eq!((env.map, env.w, env.vvvv, env.ll, env.pp, env.rex), (2, false, 0, 0, 1, 0));
        assert_eq!(env.prefix_index(), 2);
        let env = Envelope::vex2(0x74, true);
        assert_eq!((env.rex, env.vvvv, env.ll), (REX_R, 1, 1));
    }

    #[test]
    fn test_evex_reserved_bits() {
        assert!(Envelope::evex(0xf9, 0x7c, 0x48, true).is_err());
        assert!(Envelope::evex(0xf1, 0x78, 0x48, true).is_err());
        let env = Envelope::evex(0xf1, 0x7c, 0x48, true).unwrap();
        assert_eq!((env.map, env.ll, env.vvvv, env.mask, env.b), (1, 2, 0, 0, false));
    }

    #[test]
    fn test_legacy_modes_keep_the_encoded_specifier() {
        let env = Envelope::vex3(EnvelopeKind::Vex, 0xe1, 0x38, false);
        assert_eq!((env.vvvv, env.raw_vvvv), (0, 8));
        let env = Envelope::evex(0xf1, 0x7c, 0x00, false).unwrap();
        assert_eq!((env.vvvv, env.raw_vvvv), (0, 0x10));
    }

    #[test]
    fn test_prefix_names() {
        assert_eq!(prefix_name(0x4d, true, false, false), Some("rex.WRB"));
        assert_eq!(prefix_name(0x66, false, true, true), Some("data32"));
        assert_eq!(prefix_name(0x67, false, false, false), Some("addr16"));
        assert_eq!(prefix_name(0x90, true, false, false), None);
    }
}
