//! Instruction decoder: prefix scan, table walk, envelope dispatch and
//! final validity checks.

use dasm86_core::{AddressMode, DisasmOptions, InsnClass, Instruction};

use super::format::layout;
use super::prefix::{prefix_name, Envelope, EnvelopeKind, PrefixFlags, Prefixes, ScanEnd, Segment, REX_B, REX_R, REX_W};
use super::state::DecodeState;
use super::tables::{
    has_modrm, Attrs, Entry, Insn, Redirect, EVEX_MAP1, EVEX_MAP2, EVEX_MAP3, FLOAT_MEM, FLOAT_REG, ONE_BYTE,
    ONE_BYTE_HAS_MODRM, TWO_BYTE, TWO_BYTE_HAS_MODRM, VEX_MAP1, VEX_MAP2, VEX_MAP3,
    XOP_MAP8, XOP_MAP9, XOP_MAPA,
};
use crate::error::{Abort, DecodeError};
use crate::fetch::{ByteSource, FetchWindow, SliceSource, MAX_CODE_LENGTH};
use crate::traits::{DecodedInstruction, Disassembler};

/// Upper bound on redirect hops for one instruction. The deepest chain
/// (envelope, prefix, length, W, reg) is well below it.
const MAX_REDIRECTS: usize = 8;

/// How a table walk ended.
enum Walk {
    /// A terminal descriptor was rendered.
    Decoded(Instruction),
    /// The walk reached an empty slot.
    Bad,
    /// A REX prefix was followed by another prefix.
    Void,
    /// A FWAIT byte followed by a non-x87 opcode.
    Fwait,
}

/// Why a decode produced a placeholder instead of an instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Failure {
    Bad { opcode_end: usize },
    Invalid(&'static str),
    Truncated { needed: usize, available: usize },
    TooLong,
}

/// x86 / x86-64 disassembler.
#[derive(Debug, Clone, Default)]
pub struct X86Disassembler {
    options: DisasmOptions,
}

impl X86Disassembler {
    pub fn new(options: DisasmOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DisasmOptions {
        &self.options
    }

    /// Decodes one instruction at `address`. Never fails: undecodable input
    /// yields a `(bad)` or `.byte` placeholder that still consumes at least
    /// one byte.
    pub fn decode<S: ByteSource + ?Sized>(&self, source: &mut S, address: u64) -> Instruction {
        self.decode_detailed(source, address).0
    }

    /// Convenience wrapper over [`decode`](Self::decode) for a slice mapped
    /// at `address`.
    pub fn decode_bytes(&self, bytes: &[u8], address: u64) -> Instruction {
        let mut source = SliceSource::new(address, bytes);
        self.decode(&mut source, address)
    }

    /// Decodes a whole buffer, advancing by each instruction's size.
    pub fn decode_all(&self, bytes: &[u8], address: u64) -> Vec<Instruction> {
        let mut source = SliceSource::new(address, bytes);
        let mut out = Vec::new();
        let mut offset = 0usize;
        while offset < bytes.len() {
            let insn = self.decode(&mut source, address.wrapping_add(offset as u64));
            offset += insn.size.max(1);
            out.push(insn);
        }
        out
    }

    fn decode_detailed<S: ByteSource + ?Sized>(&self, source: &mut S, address: u64) -> (Instruction, Option<Failure>) {
        let mut win = FetchWindow::new(source, address);
        let mut st = DecodeState::new(&self.options, address);

        let result = self.walk(&mut st, &mut win);
        let (insn, failure) = match result {
            Ok(Walk::Decoded(insn)) => (insn, None),
            Ok(Walk::Bad) => {
                st.remove_used_prefixes();
                let prefixes = st.prefix_names();
                let end = st.opcode_end.max(1);
                let insn = placeholder(address, win.bytes(), end, prefixes, "(bad)");
                (insn, Some(Failure::Bad { opcode_end: end }))
            }
            Ok(Walk::Void) => (self.void_prefixes(&st, address, win.bytes()), None),
            Ok(Walk::Fwait) => (self.lone_fwait(&st, address, win.bytes()), None),
            Err(Abort::Invalid(reason)) => {
                log::trace!("invalid encoding at {address:#x}: {reason}");
                let end = if st.opcode_end > 0 { st.opcode_end } else { win.pos() };
                let insn = placeholder(address, win.bytes(), end.max(1), Vec::new(), "(bad)");
                (insn, Some(Failure::Invalid(reason)))
            }
            Err(Abort::Truncated { needed }) => {
                let available = win.fetched();
                (self.truncated(address, win.bytes()), Some(Failure::Truncated { needed, available }))
            }
            Err(Abort::TooLong) => {
                let insn = if win.ensure(MAX_CODE_LENGTH).is_ok() {
                    placeholder(address, win.bytes(), MAX_CODE_LENGTH, Vec::new(), "(bad)")
                } else {
                    self.truncated(address, win.bytes())
                };
                (insn, Some(Failure::TooLong))
            }
        };
        log::trace!("{address:#x}: {} ({} bytes)", insn.text, insn.size);
        (insn, failure)
    }

    /// Placeholder for input that ran out (or past 15 bytes) mid-instruction.
    fn truncated(&self, address: u64, fetched: &[u8]) -> Instruction {
        let Some(&first) = fetched.first() else {
            let mut insn = Instruction::new(address, Vec::new(), "(bad)").with_class(InsnClass::Invalid);
            insn.size = 1;
            return insn;
        };
        let mode64 = self.options.mode == AddressMode::Mode64;
        let text = match prefix_name(first, mode64, self.options.data16, self.options.addr16) {
            Some(name) => name.to_string(),
            None => format!(".byte {first:#x}"),
        };
        Instruction::new(address, vec![first], text).with_class(InsnClass::Invalid)
    }

    /// A REX prefix followed by another prefix: the prefixes seen so far are
    /// the whole instruction.
    fn void_prefixes(&self, st: &DecodeState<'_>, address: u64, fetched: &[u8]) -> Instruction {
        let count = st.prefixes.count;
        let mut names: Vec<String> = st.prefixes.bytes[..count]
            .iter()
            .filter_map(|&b| prefix_name(b, st.mode64, self.options.data16, self.options.addr16))
            .map(str::to_string)
            .collect();
        let mnemonic = names.pop().unwrap_or_default();
        let mut insn = Instruction::new(address, fetched[..count.min(fetched.len())].to_vec(), mnemonic);
        insn.text = layout(&names, &insn.mnemonic, &[]);
        insn.prefixes = names;
        insn.size = insn.size.max(1);
        insn
    }

    /// FWAIT with something other than an x87 opcode after it decodes as a
    /// plain `fwait`, taking any earlier prefixes with it.
    fn lone_fwait(&self, st: &DecodeState<'_>, address: u64, fetched: &[u8]) -> Instruction {
        let at = st.prefixes.fwait_at.unwrap_or(0);
        let names: Vec<String> = st.prefixes.bytes[..at]
            .iter()
            .filter_map(|&b| prefix_name(b, st.mode64, self.options.data16, self.options.addr16))
            .map(str::to_string)
            .collect();
        let mut insn = Instruction::new(address, fetched[..(at + 1).min(fetched.len())].to_vec(), "fwait");
        insn.text = layout(&names, "fwait", &[]);
        insn.prefixes = names;
        insn.size = at + 1;
        insn
    }

    fn walk<S: ByteSource + ?Sized>(&self, st: &mut DecodeState<'_>, win: &mut FetchWindow<'_, S>) -> Result<Walk, Abort> {
        let (prefixes, end) = Prefixes::scan(win, st.mode64)?;
        st.rex = prefixes.rex;
        st.prefixes = prefixes;
        if end == ScanEnd::Void {
            return Ok(Walk::Void);
        }

        let first = win.next_u8()?;
        if st.prefixes.flags.contains(PrefixFlags::FWAIT) && !(0xd8..=0xdf).contains(&first) {
            return Ok(Walk::Fwait);
        }
        let mut entry = if first == 0x0f {
            let second = win.next_u8()?;
            st.opcode = second;
            st.needs_modrm = has_modrm(&TWO_BYTE_HAS_MODRM, second);
            TWO_BYTE[usize::from(second)]
        } else {
            st.opcode = first;
            st.needs_modrm = has_modrm(&ONE_BYTE_HAS_MODRM, first);
            ONE_BYTE[usize::from(first)]
        };
        st.opcode_end = win.pos();

        for _ in 0..MAX_REDIRECTS {
            entry = match entry {
                Entry::Bad => return Ok(Walk::Bad),
                Entry::Insn(insn) => return self.finish(st, win, insn).map(Walk::Decoded),
                Entry::Redirect(kind, table) => self.select(st, win, kind, table)?,
            };
        }
        Ok(Walk::Bad)
    }

    /// Picks the sub-table slot a redirect names.
    fn select<S: ByteSource + ?Sized>(
        &self,
        st: &mut DecodeState<'_>,
        win: &mut FetchWindow<'_, S>,
        kind: Redirect,
        table: &'static [Entry],
    ) -> Result<Entry, Abort> {
        let index = match kind {
            Redirect::Reg => usize::from(st.fetch_modrm(win)?.reg),
            Redirect::Rm => usize::from(st.fetch_modrm(win)?.rm),
            Redirect::Mod => usize::from(st.fetch_modrm(win)?.is_register()),
            Redirect::Prefix => self.prefix_slot(st),
            Redirect::X86_64 => usize::from(st.mode64),
            Redirect::ThreeByte => {
                let byte = win.next_u8()?;
                st.opcode = byte;
                st.needs_modrm = true;
                st.opcode_end = win.pos();
                usize::from(byte)
            }
            Redirect::VexC4 | Redirect::VexC5 | Redirect::Xop | Redirect::Evex => {
                return match self.envelope(st, win, kind)? {
                    Some(entry) => Ok(entry),
                    None => Ok(table.first().copied().unwrap_or(Entry::Bad)),
                };
            }
            Redirect::VexLen => usize::from(st.env.map_or(0, |env| env.ll & 1)),
            Redirect::VexW => usize::from(st.env.is_some_and(|env| env.w)),
            Redirect::EvexLen => match st.length {
                512 => 2,
                256 => 1,
                _ => 0,
            },
            Redirect::Float => {
                let modrm = st.fetch_modrm(win)?;
                let slot = usize::from(st.opcode - 0xd8) * 8 + usize::from(modrm.reg);
                return Ok(if modrm.is_register() { FLOAT_REG[slot] } else { FLOAT_MEM[slot] });
            }
            Redirect::RexB => usize::from(st.rex_bit(REX_B)),
        };
        Ok(table.get(index).copied().unwrap_or(Entry::Bad))
    }

    /// Mandatory-prefix slot: [none, F3, 66, F2]. The last of F3/F2 wins
    /// over 66, and the chosen prefix is consumed.
    fn prefix_slot(&self, st: &mut DecodeState<'_>) -> usize {
        if let Some(env) = st.env {
            st.env_prefix_used = true;
            return env.prefix_index();
        }
        let p = &st.prefixes;
        if p.flags.intersects(PrefixFlags::REPZ | PrefixFlags::REPNZ) {
            if p.last_repz > p.last_repnz {
                st.used |= PrefixFlags::REPZ;
                return 1;
            }
            st.used |= PrefixFlags::REPNZ;
            return 3;
        }
        if st.use_prefix(PrefixFlags::DATA) {
            return 2;
        }
        0
    }

    /// Decodes a VEX, XOP or EVEX envelope if the escape byte introduces
    /// one here. `None` means the escape is the legacy instruction.
    fn envelope<S: ByteSource + ?Sized>(
        &self,
        st: &mut DecodeState<'_>,
        win: &mut FetchWindow<'_, S>,
        kind: Redirect,
    ) -> Result<Option<Entry>, Abort> {
        let next = win.peek()?;
        let mode64 = st.mode64;
        let env = match kind {
            Redirect::VexC5 if mode64 || next & 0xc0 == 0xc0 => Envelope::vex2(win.next_u8()?, mode64),
            Redirect::VexC4 if mode64 || next & 0xc0 == 0xc0 => {
                let p0 = win.next_u8()?;
                let p1 = win.next_u8()?;
                Envelope::vex3(EnvelopeKind::Vex, p0, p1, mode64)
            }
            Redirect::Xop if (0x08..=0x0a).contains(&(next & 0x1f)) => {
                let p0 = win.next_u8()?;
                let p1 = win.next_u8()?;
                Envelope::vex3(EnvelopeKind::Xop, p0, p1, mode64)
            }
            Redirect::Evex if mode64 || next & 0xc0 == 0xc0 => {
                let p0 = win.next_u8()?;
                let p1 = win.next_u8()?;
                let p2 = win.next_u8()?;
                Envelope::evex(p0, p1, p2, mode64)?
            }
            _ => return Ok(None),
        };

        let opcode = win.next_u8()?;
        st.opcode = opcode;
        st.opcode_end = win.pos();
        if st.prefixes.conflicts_with_vex() {
            return Err(Abort::Invalid("legacy prefix before vector envelope"));
        }
        st.rex = env.rex;
        if env.w && mode64 {
            st.rex |= REX_W;
        }
        st.env = Some(env);
        st.needs_modrm = !(env.kind == EnvelopeKind::Vex && env.map == 1 && opcode == 0x77);

        let i = usize::from(opcode);
        let entry = match (env.kind, env.map) {
            (EnvelopeKind::Vex, 1) => VEX_MAP1[i],
            (EnvelopeKind::Vex, 2) => VEX_MAP2[i],
            (EnvelopeKind::Vex, 3) => VEX_MAP3[i],
            (EnvelopeKind::Xop, 8) => XOP_MAP8[i],
            (EnvelopeKind::Xop, 9) => XOP_MAP9[i],
            (EnvelopeKind::Xop, 10) => XOP_MAPA[i],
            (EnvelopeKind::Evex, 1) => EVEX_MAP1[i],
            (EnvelopeKind::Evex, 2) => EVEX_MAP2[i],
            (EnvelopeKind::Evex, 3) => EVEX_MAP3[i],
            _ => Entry::Bad,
        };

        st.length = match env.kind {
            EnvelopeKind::Evex => {
                let modrm = st.fetch_modrm(win)?;
                if env.b && modrm.is_register() {
                    512
                } else {
                    match env.ll {
                        0 => 128,
                        1 => 256,
                        2 => 512,
                        _ => return Err(Abort::Invalid("EVEX.L'L reserved")),
                    }
                }
            }
            _ => {
                if env.ll == 0 {
                    128
                } else {
                    256
                }
            }
        };
        Ok(Some(entry))
    }

    /// Resolves a terminal descriptor's operands and renders it.
    fn finish<S: ByteSource + ?Sized>(
        &self,
        st: &mut DecodeState<'_>,
        win: &mut FetchWindow<'_, S>,
        insn: Insn,
    ) -> Result<Instruction, Abort> {
        st.flow = insn.flow;
        st.attrs = insn.attrs;
        if insn.attrs.contains(Attrs::NOTRACK) && st.notrack_applies() && st.prefixes.segment == Some(Segment::Ds) {
            st.prefixes.segment = None;
        }

        let mut operands = Vec::with_capacity(insn.ops.len());
        for &op in insn.ops {
            operands.push(st.operand(win, op)?);
        }
        st.ensure_geometry(win)?;
        self.validate(st)?;

        let mnemonic = match st.mnemonic_override {
            Some(name) => name.to_string(),
            None => st.expand(insn.template),
        };
        let size = win.pos();
        let bytes = win.bytes()[..size].to_vec();
        Ok(st.render(mnemonic, operands, bytes))
    }

    /// Whole-instruction checks that can only run once every operand has
    /// claimed its fields.
    fn validate(&self, st: &mut DecodeState<'_>) -> Result<(), Abort> {
        if let Some(reason) = st.invalid {
            return Err(Abort::Invalid(reason));
        }
        if let Some(env) = st.env {
            let raw = env.raw_vvvv;
            if !st.vvvv_used && (raw & 0x0f != 0 || (raw & 0x10 != 0 && !st.vsib_used)) {
                return Err(Abort::Invalid("unused VEX.vvvv"));
            }
            if !st.env_prefix_used && env.pp != 0 {
                return Err(Abort::Invalid("unused VEX.pp"));
            }
            if env.kind == EnvelopeKind::Evex {
                if env.zeroing && env.mask == 0 {
                    return Err(Abort::Invalid("EVEX.z without a mask"));
                }
                if env.b && !st.evex_b_used {
                    return Err(Abort::Invalid("unused EVEX.b"));
                }
            }
        }
        if st.attrs.contains(Attrs::PREFIX_STRICT) {
            let mandatory = PrefixFlags::REPZ | PrefixFlags::REPNZ | PrefixFlags::DATA;
            if !(st.prefixes.flags & mandatory).difference(st.used).is_empty() {
                return Err(Abort::Invalid("unconsumed mandatory prefix"));
            }
        }
        if st.attrs.contains(Attrs::TILE_DISTINCT) {
            if let (Some(modrm), Some(env)) = (st.modrm, st.env) {
                let reg = modrm.reg | st.rex_ext(REX_R);
                let rm = modrm.rm | st.rex_ext(REX_B);
                if reg == rm || reg == env.vvvv || rm == env.vvvv {
                    return Err(Abort::Invalid("tile operands must differ"));
                }
            }
        }
        Ok(())
    }
}

/// `(bad)` rendering that consumes `end` bytes.
fn placeholder(address: u64, fetched: &[u8], end: usize, prefixes: Vec<String>, mnemonic: &str) -> Instruction {
    let end = end.min(MAX_CODE_LENGTH);
    let bytes = fetched[..end.min(fetched.len())].to_vec();
    let mut insn = Instruction::new(address, bytes, mnemonic).with_class(InsnClass::Invalid);
    insn.text = layout(&prefixes, mnemonic, &[]);
    insn.prefixes = prefixes;
    insn.size = end;
    insn
}

impl Disassembler for X86Disassembler {
    fn decode_instruction(&self, bytes: &[u8], address: u64) -> Result<DecodedInstruction, DecodeError> {
        let mut source = SliceSource::new(address, bytes);
        let (instruction, failure) = self.decode_detailed(&mut source, address);
        match failure {
            None => {
                let size = instruction.size;
                Ok(DecodedInstruction { instruction, size })
            }
            Some(Failure::Bad { opcode_end }) => {
                Err(DecodeError::bad_opcode(address, &bytes[..opcode_end.min(bytes.len())]))
            }
            Some(Failure::Invalid(reason)) => Err(DecodeError::invalid_encoding(address, reason)),
            Some(Failure::Truncated { needed, available }) => Err(DecodeError::truncated(address, needed, available)),
            Some(Failure::TooLong) => Err(DecodeError::invalid_encoding(
                address,
                format!("instruction longer than {MAX_CODE_LENGTH} bytes"),
            )),
        }
    }

    fn min_instruction_size(&self) -> usize {
        1
    }

    fn max_instruction_size(&self) -> usize {
        MAX_CODE_LENGTH
    }

    fn address_mode(&self) -> AddressMode {
        self.options.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dasm86_core::Syntax;

    fn att64(bytes: &[u8]) -> Instruction {
        X86Disassembler::new(DisasmOptions::default()).decode_bytes(bytes, 0x1000)
    }

    #[test]
    fn test_basic_mov() {
        let insn = att64(&[0x48, 0x89, 0xe5]);
        assert_eq!(insn.text, "mov    %rsp,%rbp");
        assert_eq!(insn.size, 3);
        assert!(insn.prefixes.is_empty());
    }

    #[test]
    fn test_empty_input_is_bad() {
        let insn = att64(&[]);
        assert_eq!(insn.text, "(bad)");
        assert_eq!(insn.size, 1);
        assert!(insn.is_invalid());
    }

    #[test]
    fn test_truncated_prefix_prints_name() {
        let insn = att64(&[0x66]);
        assert_eq!((insn.text.as_str(), insn.size), ("data16", 1));
        let insn = att64(&[0xe8, 0x01]);
        assert_eq!((insn.text.as_str(), insn.size), (".byte 0xe8", 1));
        let insn = att64(&[0x05]);
        assert_eq!((insn.text.as_str(), insn.size), (".byte 0x5", 1));
    }

    #[test]
    fn test_prefix_run_stops_at_fourteen() {
        let mut bytes = vec![0x66; 15];
        bytes.push(0x90);
        let insn = att64(&bytes);
        assert_eq!(insn.size, 14);
        let names: Vec<&str> = insn.text.split_whitespace().collect();
        assert_eq!(names, vec!["data16"; 14]);
    }

    #[test]
    fn test_instruction_past_fifteen_bytes_is_bad() {
        let disasm = X86Disassembler::new(DisasmOptions::new(AddressMode::Mode32));
        let mut bytes = vec![0x26; 13];
        bytes.extend_from_slice(&[0x05, 0x01, 0x02, 0x03, 0x04]);
        let insn = disasm.decode_bytes(&bytes, 0);
        assert_eq!((insn.text.as_str(), insn.size), ("(bad)", 15));
        assert!(insn.is_invalid());

        // Without the bytes to fill the window it is a plain truncation.
        let insn = disasm.decode_bytes(&bytes[..14], 0);
        assert_eq!((insn.text.as_str(), insn.size), ("es", 1));
    }

    #[test]
    fn test_rex_then_prefix_is_void() {
        let insn = att64(&[0x48, 0x66, 0x90]);
        assert_eq!(insn.text, "rex.W");
        assert_eq!(insn.size, 1);
    }

    #[test]
    fn test_lone_fwait() {
        let insn = att64(&[0x9b, 0x90]);
        assert_eq!((insn.text.as_str(), insn.size), ("fwait", 1));
    }

    #[test]
    fn test_strict_errors() {
        let disasm = X86Disassembler::new(DisasmOptions::default());
        assert!(matches!(
            disasm.decode_instruction(&[0xe8, 0x01], 0),
            Err(DecodeError::Truncated { needed: 5, available: 1, .. })
        ));
        assert!(matches!(disasm.decode_instruction(&[0x0f, 0x04], 0), Err(DecodeError::BadOpcode { .. })));
        let ok = disasm.decode_instruction(&[0xc3], 0).unwrap();
        assert_eq!(ok.size, 1);
    }

    #[test]
    fn test_intel_syntax_smoke() {
        let opts = DisasmOptions::default().with_syntax(Syntax::Intel);
        let insn = X86Disassembler::new(opts).decode_bytes(&[0x48, 0x89, 0xe5], 0);
        assert_eq!(insn.text, "mov    rbp,rsp");
    }
}
