//! ModR/M, SIB and displacement decoding.

use crate::error::Abort;
use crate::fetch::{ByteSource, FetchWindow};

/// Decoded ModR/M byte. Fields are raw; register extensions are applied by
/// the operand resolvers so that REX usage can be tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModRm {
    /// Mod field (2 bits)
    pub mod_: u8,
    /// Reg field (3 bits)
    pub reg: u8,
    /// R/M field (3 bits)
    pub rm: u8,
}

impl ModRm {
    pub fn from_byte(byte: u8) -> Self {
        Self {
            mod_: (byte >> 6) & 0x3,
            reg: (byte >> 3) & 0x7,
            rm: byte & 0x7,
        }
    }

    /// Returns true if this ModR/M encodes a register operand (mod=11).
    pub fn is_register(&self) -> bool {
        self.mod_ == 0b11
    }
}

/// Decoded SIB byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sib {
    /// Scale (2 bits) - actual scale is 1 << scale
    pub scale: u8,
    /// Index register (3 bits)
    pub index: u8,
    /// Base register (3 bits)
    pub base: u8,
}

impl Sib {
    pub fn from_byte(byte: u8) -> Self {
        Self {
            scale: (byte >> 6) & 0x3,
            index: (byte >> 3) & 0x7,
            base: byte & 0x7,
        }
    }
}

/// Memory operand geometry: everything encoded after the ModR/M byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemGeometry {
    pub addr_bits: u32,
    pub sib: Option<Sib>,
    /// Sign-extended displacement as encoded (before EVEX scaling).
    pub disp: i64,
    /// Encoded displacement width in bytes.
    pub disp_bytes: u8,
    /// A base register participates in the address.
    pub has_base: bool,
    /// mod=00 rm=101 in long mode.
    pub rip_relative: bool,
}

impl MemGeometry {
    /// Reads SIB and displacement bytes for a memory-form ModR/M.
    pub fn parse<S: ByteSource + ?Sized>(
        win: &mut FetchWindow<'_, S>,
        modrm: ModRm,
        addr_bits: u32,
        mode64: bool,
    ) -> Result<Self, Abort> {
        let mut geo = Self {
            addr_bits,
            sib: None,
            disp: 0,
            disp_bytes: 0,
            has_base: true,
            rip_relative: false,
        };

        if addr_bits == 16 {
            match modrm.mod_ {
                0 if modrm.rm == 6 => {
                    geo.disp = i64::from(win.next_u16()? as i16);
                    geo.disp_bytes = 2;
                    geo.has_base = false;
                }
                1 => {
                    geo.disp = i64::from(win.next_u8()? as i8);
                    geo.disp_bytes = 1;
                }
                2 => {
                    geo.disp = i64::from(win.next_u16()? as i16);
                    geo.disp_bytes = 2;
                }
                _ => {}
            }
            return Ok(geo);
        }

        let mut base = modrm.rm;
        if modrm.rm == 4 {
            let sib = Sib::from_byte(win.next_u8()?);
            base = sib.base;
            geo.sib = Some(sib);
        }
        match modrm.mod_ {
            0 if base == 5 => {
                geo.disp = i64::from(win.next_u32()? as i32);
                geo.disp_bytes = 4;
                geo.has_base = false;
                geo.rip_relative = mode64 && geo.sib.is_none();
            }
            1 => {
                geo.disp = i64::from(win.next_u8()? as i8);
                geo.disp_bytes = 1;
            }
            2 => {
                geo.disp = i64::from(win.next_u32()? as i32);
                geo.disp_bytes = 4;
            }
            _ => {}
        }
        Ok(geo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::SliceSource;

    fn parse(bytes: &[u8], addr_bits: u32, mode64: bool) -> (MemGeometry, usize) {
        let mut src = SliceSource::new(0, bytes);
        let mut win = FetchWindow::new(&mut src, 0);
        let modrm = ModRm::from_byte(win.next_u8().unwrap());
        let geo = MemGeometry::parse(&mut win, modrm, addr_bits, mode64).unwrap();
        (geo, win.pos())
    }

    #[test]
    fn test_modrm_fields() {
        let m = ModRm::from_byte(0xe5);
        assert_eq!((m.mod_, m.reg, m.rm), (3, 4, 5));
        assert!(m.is_register());
        let s = Sib::from_byte(0xc8);
        assert_eq!((s.scale, s.index, s.base), (3, 1, 0));
    }

    #[test]
    fn test_rip_relative_only_in_long_mode() {
        let (geo, len) = parse(&[0x05, 0x10, 0, 0, 0], 64, true);
        assert!(geo.rip_relative);
        assert_eq!((geo.disp, len), (0x10, 5));
        let (geo, _) = parse(&[0x05, 0x10, 0, 0, 0], 32, false);
        assert!(!geo.rip_relative);
        assert!(!geo.has_base);
    }

    #[test]
    fn test_sib_without_base_takes_disp32() {
        let (geo, len) = parse(&[0x04, 0xc5, 0xf0, 0xff, 0xff, 0xff], 64, true);
        assert_eq!(geo.disp, -16);
        assert!(!geo.has_base && !geo.rip_relative);
        assert_eq!(len, 6);
    }

    #[test]
    fn test_disp8_is_sign_extended() {
        let (geo, len) = parse(&[0x45, 0xf8], 64, true);
        assert_eq!((geo.disp, geo.disp_bytes, len), (-8, 1, 2));
    }

    #[test]
    fn test_16bit_direct_displacement() {
        let (geo, len) = parse(&[0x06, 0x34, 0x12], 16, false);
        assert_eq!((geo.disp, geo.has_base, len), (0x1234, false, 3));
        let (geo, len) = parse(&[0x46, 0x00], 16, false);
        assert!(geo.has_base);
        assert_eq!(len, 2);
    }
}
