//! Walks every terminal descriptor reachable from the opcode maps,
//! synthesizes bytes that select it, and checks the decoder lands on it.

use dasm86_core::{AddressMode, DisasmOptions};

use super::tables::{
    has_modrm, Entry, Redirect, EVEX_MAP1, EVEX_MAP2, EVEX_MAP3, FLOAT_MEM, FLOAT_REG, ONE_BYTE, ONE_BYTE_HAS_MODRM,
    TWO_BYTE, TWO_BYTE_HAS_MODRM, VEX_MAP1, VEX_MAP2, VEX_MAP3, XOP_MAP8, XOP_MAP9, XOP_MAPA,
};
use super::X86Disassembler;

const LEGACY_PREFIXES: [u8; 12] = [0x26, 0x2e, 0x36, 0x3e, 0x64, 0x65, 0x66, 0x67, 0x9b, 0xf0, 0xf2, 0xf3];
const SLOT_PREFIX: [Option<u8>; 4] = [None, Some(0xf3), Some(0x66), Some(0xf2)];
/// `pp` field for each mandatory-prefix slot.
const SLOT_PP: [u8; 4] = [0, 2, 1, 3];

/// Vector escape and opcode map a path starts from.
#[derive(Debug, Clone, Copy)]
enum Escape {
    Vex(u8),
    Xop(u8),
    Evex(u8),
}

/// Choices a path through the tables has committed to.
#[derive(Debug, Clone, Copy, Default)]
struct Path {
    escape: Option<Escape>,
    slot: Option<usize>,
    mode64: Option<bool>,
    mod_: Option<u8>,
    reg: Option<u8>,
    rm: Option<u8>,
    w: Option<bool>,
    ll: Option<u8>,
}

fn pick(current: Option<u8>, value: u8) -> Option<Option<u8>> {
    match current {
        Some(existing) if existing != value => None,
        _ => Some(Some(value)),
    }
}

impl Path {
    fn with_reg(self, reg: u8) -> Option<Self> {
        pick(self.reg, reg).map(|reg| Self { reg, ..self })
    }

    fn with_rm(self, rm: u8) -> Option<Self> {
        pick(self.rm, rm).map(|rm| Self { rm, ..self })
    }

    fn with_register_form(self, register: bool) -> Option<Self> {
        let mod_ = if register { 3 } else { 0 };
        pick(self.mod_, mod_).map(|mod_| Self { mod_, ..self })
    }

    fn with_mode64(self, mode64: bool) -> Option<Self> {
        match self.mode64 {
            Some(existing) if existing != mode64 => None,
            _ => Some(Self { mode64: Some(mode64), ..self }),
        }
    }

    fn with_w(self, w: bool) -> Option<Self> {
        match self.w {
            Some(existing) if existing != w => None,
            _ => Some(Self { w: Some(w), ..self }),
        }
    }

    /// VEX.L selects on the low length bit only.
    fn with_l(self, l: u8) -> Option<Self> {
        match self.ll {
            Some(existing) if existing & 1 != l => None,
            Some(_) => Some(self),
            None => Some(Self { ll: Some(l), ..self }),
        }
    }

    fn with_ll(self, ll: u8) -> Option<Self> {
        pick(self.ll, ll).map(|ll| Self { ll, ..self })
    }

    fn constrains_modrm(&self) -> bool {
        self.mod_.is_some() || self.reg.is_some() || self.rm.is_some()
    }
}

struct Case {
    bytes: Vec<u8>,
    mode: AddressMode,
    template: &'static str,
}

fn each<F>(table: &'static [Entry], path: Path, opcode: &[u8], out: &mut Vec<Case>, narrow: F)
where
    F: Fn(Path, usize) -> Option<Path>,
{
    for (i, &next) in table.iter().enumerate() {
        if let Some(p) = narrow(path, i) {
            collect(next, p, opcode, out);
        }
    }
}

fn collect(entry: Entry, path: Path, opcode: &[u8], out: &mut Vec<Case>) {
    let (kind, table) = match entry {
        Entry::Bad => return,
        Entry::Insn(insn) => {
            out.push(build(path, opcode, insn.template));
            return;
        }
        Entry::Redirect(kind, table) => (kind, table),
    };
    match kind {
        Redirect::Reg => each(table, path, opcode, out, |p, i| p.with_reg(i as u8)),
        Redirect::Rm => each(table, path, opcode, out, |p, i| p.with_rm(i as u8)),
        Redirect::Mod => each(table, path, opcode, out, |p, i| p.with_register_form(i == 1)),
        Redirect::Prefix => each(table, path, opcode, out, |p, i| {
            p.slot.map_or(true, |slot| slot == i).then_some(Path { slot: Some(i), ..p })
        }),
        Redirect::X86_64 => each(table, path, opcode, out, |p, i| p.with_mode64(i == 1)),
        Redirect::VexLen => each(table, path, opcode, out, |p, i| p.with_l(i as u8)),
        Redirect::VexW => each(table, path, opcode, out, |p, i| p.with_w(i == 1)),
        Redirect::EvexLen => each(table, path, opcode, out, |p, i| p.with_ll(i as u8)),
        Redirect::ThreeByte => {
            for (i, &next) in table.iter().enumerate() {
                let mut longer = opcode.to_vec();
                longer.push(i as u8);
                collect(next, path, &longer, out);
            }
        }
        Redirect::RexB => {
            if let Some(&next) = table.first() {
                collect(next, path, opcode, out);
            }
        }
        Redirect::Float => {
            let Some(&last) = opcode.last() else {
                return;
            };
            let escape = usize::from(last - 0xd8);
            for reg in 0..8u8 {
                let slot = escape * 8 + usize::from(reg);
                for (register, next) in [(false, FLOAT_MEM[slot]), (true, FLOAT_REG[slot])] {
                    if let Some(p) = path.with_register_form(register).and_then(|p| p.with_reg(reg)) {
                        collect(next, p, opcode, out);
                    }
                }
            }
        }
        // The legacy reading of C4, C5 and 62 needs a memory ModR/M outside
        // long mode. The vector maps are walked separately.
        Redirect::VexC4 | Redirect::VexC5 | Redirect::Evex => {
            let legacy = path.with_mode64(false).and_then(|p| p.with_register_form(false));
            if let (Some(p), Some(&next)) = (legacy, table.first()) {
                collect(next, p, opcode, out);
            }
        }
        // 8F with a ModR/M below the XOP map numbers is `pop`.
        Redirect::Xop => {
            if let Some(&next) = table.first() {
                collect(next, path, opcode, out);
            }
        }
    }
}

fn build(path: Path, opcode: &[u8], template: &'static str) -> Case {
    let mode64 = match path.escape {
        Some(_) => path.mode64 != Some(false),
        None => path.mode64 == Some(true),
    };
    let mode = if mode64 { AddressMode::Mode64 } else { AddressMode::Mode32 };
    let Some(escape) = path.escape else {
        let mut bytes: Vec<u8> = path.slot.and_then(|slot| SLOT_PREFIX[slot]).into_iter().collect();
        bytes.extend_from_slice(opcode);
        let wants_modrm = match opcode {
            [op] => has_modrm(&ONE_BYTE_HAS_MODRM, *op),
            [0x0f, op] => has_modrm(&TWO_BYTE_HAS_MODRM, *op),
            _ => true,
        };
        if wants_modrm || path.constrains_modrm() {
            let mod_ = path.mod_.unwrap_or(3);
            bytes.push((mod_ << 6) | (path.reg.unwrap_or(0) << 3) | path.rm.unwrap_or(0));
        }
        bytes.extend_from_slice(&[0; 10]);
        return Case { bytes, mode, template };
    };

    // No register extensions, vvvv names register 0, no masking.
    let pp = path.slot.map_or(0, |slot| SLOT_PP[slot]);
    let w = if path.w == Some(true) { 0x80 } else { 0 };
    let ll = path.ll.unwrap_or(0);
    let payload = w | 0x78 | pp;
    let mut bytes = match escape {
        Escape::Vex(map) => vec![0xc4, 0xe0 | map, payload | ((ll & 1) << 2)],
        Escape::Xop(map) => vec![0x8f, 0xe0 | map, payload | ((ll & 1) << 2)],
        Escape::Evex(map) => vec![0x62, 0xf0 | map, payload | 0x04, (ll << 5) | 0x08],
    };
    bytes.extend_from_slice(opcode);
    // Distinct reg and r/m keep tile operands apart from each other and from vvvv.
    let mod_ = path.mod_.unwrap_or(3);
    bytes.push((mod_ << 6) | (path.reg.unwrap_or(1) << 3) | path.rm.unwrap_or(2));
    bytes.extend_from_slice(&[0; 10]);
    Case { bytes, mode, template }
}

/// The literal text a template starts with in AT&T syntax, before any
/// macro letter.
fn literal_head(template: &str) -> String {
    let mut head = String::new();
    let mut chars = template.chars();
    while let Some(c) = chars.next() {
        match c {
            'a'..='z' | '0'..='9' => head.push(c),
            '{' => {
                // The AT&T alternative comes first.
                let att: String = chars.by_ref().take_while(|&c| c != '|').collect();
                if !att.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()) {
                    break;
                }
                head.push_str(&att);
                chars.by_ref().take_while(|&c| c != '}').for_each(drop);
            }
            _ => break,
        }
    }
    head
}

fn legacy_cases() -> Vec<Case> {
    let mut cases = Vec::new();
    for op in 0..=0xffu8 {
        if op == 0x0f || LEGACY_PREFIXES.contains(&op) {
            continue;
        }
        collect(ONE_BYTE[usize::from(op)], Path::default(), &[op], &mut cases);
    }
    for op in 0..=0xffu8 {
        collect(TWO_BYTE[usize::from(op)], Path::default(), &[0x0f, op], &mut cases);
    }
    cases
}

fn vector_cases() -> Vec<Case> {
    let maps: [(Escape, &'static [Entry; 256]); 9] = [
        (Escape::Vex(1), &VEX_MAP1),
        (Escape::Vex(2), &VEX_MAP2),
        (Escape::Vex(3), &VEX_MAP3),
        (Escape::Xop(8), &XOP_MAP8),
        (Escape::Xop(9), &XOP_MAP9),
        (Escape::Xop(10), &XOP_MAPA),
        (Escape::Evex(1), &EVEX_MAP1),
        (Escape::Evex(2), &EVEX_MAP2),
        (Escape::Evex(3), &EVEX_MAP3),
    ];
    let mut cases = Vec::new();
    for (escape, table) in maps {
        let start = Path { escape: Some(escape), ..Path::default() };
        for op in 0..=0xffu8 {
            collect(table[usize::from(op)], start, &[op], &mut cases);
        }
    }
    cases
}

fn check(cases: &[Case]) {
    let decoders = [
        (AddressMode::Mode32, X86Disassembler::new(DisasmOptions::new(AddressMode::Mode32))),
        (AddressMode::Mode64, X86Disassembler::new(DisasmOptions::new(AddressMode::Mode64))),
    ];
    for case in cases {
        let Some((_, disasm)) = decoders.iter().find(|(mode, _)| *mode == case.mode) else {
            continue;
        };
        let insn = disasm.decode_bytes(&case.bytes, 0x1000);
        let head = literal_head(case.template);
        assert!(
            insn.mnemonic.starts_with(head.as_str()),
            "{:02x?} in {}: expected {:?}, decoded {:?}",
            case.bytes,
            case.mode,
            case.template,
            insn.text
        );
    }
}

#[test]
fn test_every_legacy_descriptor_decodes_to_its_mnemonic() {
    let cases = legacy_cases();
    assert!(cases.len() > 500, "walk found only {} descriptors", cases.len());
    check(&cases);
}

#[test]
fn test_every_vector_descriptor_decodes_to_its_mnemonic() {
    let cases = vector_cases();
    assert!(cases.len() > 1000, "walk found only {} descriptors", cases.len());
    check(&cases);
}

#[test]
fn test_literal_head() {
    assert_eq!(literal_head("movS"), "mov");
    assert_eq!(literal_head("cvtsi2ss"), "cvtsi2ss");
    assert_eq!(literal_head("{l|}call{T|}"), "lcall");
    assert_eq!(literal_head("pop{P|}"), "pop");
    assert_eq!(literal_head("fsub{!M|r}p"), "fsub");
    assert_eq!(literal_head("vcmp%CCps"), "vcmp");
}
