//! Static opcode tables.
//!
//! Every table slot is either a terminal [`Insn`], [`Entry::Bad`], or a
//! [`Redirect`] naming the selector used to index the next table.

#![allow(non_upper_case_globals)]

use bitflags::bitflags;

mod evex;
mod groups;
mod onebyte;
mod operands;
mod three_byte;
mod twobyte;
mod vex;
mod x87;
mod xop;

pub(crate) use evex::{EVEX_MAP1, EVEX_MAP2, EVEX_MAP3};
pub(crate) use onebyte::ONE_BYTE;
pub(crate) use twobyte::TWO_BYTE;
pub(crate) use vex::{VEX_MAP1, VEX_MAP2, VEX_MAP3};
pub(crate) use x87::{FLOAT_MEM, FLOAT_REG};
pub(crate) use xop::{XOP_MAP8, XOP_MAP9, XOP_MAPA};

/// Operand size / semantic type of an operand slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// 8-bit
    B,
    /// 16-bit
    W,
    /// 32-bit
    D,
    /// 64-bit
    Q,
    /// 80-bit x87 extended / packed BCD
    T,
    /// 64-bit, or 128-bit under REX.W (cmpxchg8b / cmpxchg16b)
    O,
    /// 16/32/64 by operand-size prefix and REX.W
    V,
    /// 16/32 by operand-size prefix; REX.W reads 32
    Z,
    /// Stack operand: 64-bit default in long mode
    StackV,
    /// Indirect branch target: like `StackV`, honouring the 64-bit ISA flavour
    IndirV,
    /// 32/64 by REX.W (or VEX.W)
    Dq,
    /// Scalar vector element: 32/64 by VEX.W / EVEX.W in any mode
    ElemW,
    /// 64-bit in long mode, 32-bit otherwise
    Native,
    /// Far pointer (16:16, 16:32 or 16:64)
    P,
    /// bound operand pair
    A,
    /// Memory with no size keyword
    None,
    /// Full vector, by VEX.L / EVEX.L'L
    Vec,
    /// Full vector with element broadcast sized by W
    VecB,
    /// Full vector with 32-bit broadcast
    VecBd,
    /// Full vector with 64-bit broadcast
    VecBq,
    /// Always 128-bit
    Xmm,
    /// Always 256-bit
    Ymm,
    /// Half vector
    Half,
    /// Half vector with 32-bit broadcast
    HalfBd,
    /// Quarter vector
    Quarter,
    /// Eighth vector
    Eighth,
}

impl Mode {
    /// Element size when broadcasting, `None` if broadcast is not allowed.
    pub fn broadcast_bits(self, w: bool) -> Option<u32> {
        match self {
            Self::VecB => Some(if w { 64 } else { 32 }),
            Self::VecBd | Self::HalfBd => Some(32),
            Self::VecBq => Some(64),
            _ => None,
        }
    }

    /// Whether this mode describes a vector-register-sized operand.
    pub fn is_vector(self) -> bool {
        matches!(
            self,
            Self::Vec
                | Self::VecB
                | Self::VecBd
                | Self::VecBq
                | Self::Xmm
                | Self::Ymm
                | Self::Half
                | Self::HalfBd
                | Self::Quarter
                | Self::Eighth
        )
    }
}

/// Fixed registers named directly by an opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fixed {
    Cl,
    /// `(%dx)` port operand
    DxPort,
    Es,
    Cs,
    Ss,
    Ds,
    Fs,
    Gs,
    /// Implicit `%xmm0` of SSE4.1 blends
    Xmm0,
}

/// Comparison predicate families folded into mnemonics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpKind {
    /// SSE cmpps and friends (8 predicates)
    Sse,
    /// AVX vcmpps and friends (32 predicates)
    Avx,
    /// AVX-512 vpcmp (8 predicates)
    Vpcmp,
    /// XOP vpcom (8 predicates)
    Xop,
    /// pclmulqdq lane selectors
    Pclmul,
}

/// Index register width of a VSIB memory operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VsibIndex {
    /// Same width as the vector length
    Full,
    /// Half the vector length
    Half,
}

/// Operand slot kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// ModR/M r/m: general register or memory
    E(Mode),
    /// ModR/M reg: general register
    G(Mode),
    /// ModR/M r/m: memory only
    M(Mode),
    /// ModR/M r/m: general register regardless of mod
    R(Mode),
    /// Indirect branch operand, `*`-prefixed in AT&T
    IndE(Mode),
    /// Unsigned immediate
    I(Mode),
    /// 8-bit immediate sign-extended to the operand size
    SI(Mode),
    /// Immediate that is 64-bit under REX.W (movabs)
    Iv64,
    /// Relative branch target
    J(Mode),
    /// Direct far pointer
    Ap,
    /// Absolute memory offset (moffs)
    Off(Mode),
    /// Accumulator sized by mode
    Acc(Mode),
    Fixed(Fixed),
    /// General register in the low opcode bits
    OpReg(Mode),
    /// Segment register from ModR/M reg
    Sw,
    /// Control register from ModR/M reg
    Cr,
    /// Debug register from ModR/M reg
    Dr,
    /// Test register from ModR/M reg
    Tr,
    /// MMX register from ModR/M reg
    P,
    /// MMX register or memory from ModR/M r/m
    Q(Mode),
    /// MMX register from ModR/M r/m
    N,
    /// MMX register, or XMM under a 66 prefix, from ModR/M reg
    MxG,
    /// MMX or XMM register or memory from ModR/M r/m
    MxE(Mode),
    /// Vector register from ModR/M reg
    V(Mode),
    /// Vector register or memory from ModR/M r/m
    W(Mode),
    /// Vector register from ModR/M r/m
    U(Mode),
    /// Vector register from VEX.vvvv
    H(Mode),
    /// Vector register from imm8[7:4]
    L(Mode),
    /// General register from VEX.vvvv
    By(Mode),
    /// Mask register from ModR/M reg
    KG,
    /// Mask register or memory from ModR/M r/m
    KE(Mode),
    /// Mask register from VEX.vvvv
    KH,
    /// Mask register from ModR/M r/m
    KR,
    /// Bound register from ModR/M reg
    BndG,
    /// Bound register or memory from ModR/M r/m
    BndE(Mode),
    /// Tile register from ModR/M reg
    TG,
    /// Tile register from ModR/M r/m
    TE,
    /// Tile register from VEX.vvvv
    TH,
    /// Static rounding control slot
    Rc,
    /// Suppress-all-exceptions slot
    Sae,
    /// x87 stack top
    St,
    /// x87 stack register from ModR/M r/m
    Sti,
    /// String source `ds:(%esi)`
    X(Mode),
    /// String destination `es:(%edi)`
    Y(Mode),
    /// `xlat` table operand `ds:(%ebx)`
    Xlat,
    /// Implicit shift count of one
    One,
    /// Predicate immediate
    Cmp(CmpKind),
    /// VSIB memory operand
    Vsib(Mode, VsibIndex),
    /// 3DNow! suffix opcode byte
    Suffix3dNow,
}

/// Control-flow shape of a terminal descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Normal,
    CondJump,
    Jump,
    Call,
    Ret,
    IndirectJump,
    IndirectCall,
}

bitflags! {
    /// Per-descriptor decoding attributes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Attrs: u16 {
        const NONE = 0;
        /// Operands keep table order in both syntaxes.
        const KEEP_ORDER = 1 << 0;
        /// F2 prints as `bnd`.
        const BND = 1 << 1;
        /// 3E prints as `notrack`.
        const NOTRACK = 1 << 2;
        /// F3 prints as `rep`.
        const REP = 1 << 3;
        /// F2/F3 print as `xacquire`/`xrelease` under lock.
        const HLE = 1 << 4;
        /// F3 prints as `xrelease` on a store even without lock.
        const HLE_STORE = 1 << 5;
        /// No two tile operands may name the same register.
        const TILE_DISTINCT = 1 << 6;
        /// ModR/M mod is ignored and read as a register form.
        const REG_FORM = 1 << 7;
        /// A lock prefix selects cr8 outside long mode.
        const LOCK_CR8 = 1 << 8;
        /// An F3, F2 or 66 prefix no operand consumes makes the encoding invalid.
        const PREFIX_STRICT = 1 << 9;
        const BND_NOTRACK = Self::BND.bits() | Self::NOTRACK.bits();
        const HLE_ANY = Self::HLE.bits() | Self::HLE_STORE.bits();
    }
}

/// Terminal table entry.
#[derive(Debug, Clone, Copy)]
pub struct Insn {
    pub template: &'static str,
    pub ops: &'static [Op],
    pub flow: Flow,
    pub attrs: Attrs,
}

impl Insn {
    pub const fn flow(mut self, flow: Flow) -> Self {
        self.flow = flow;
        self
    }

    pub const fn attrs(mut self, attrs: Attrs) -> Self {
        self.attrs = attrs;
        self
    }
}

/// Selector used to index a redirect's sub-table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    /// ModR/M reg (8 entries)
    Reg,
    /// ModR/M mod: [memory, register]
    Mod,
    /// ModR/M r/m (8 entries)
    Rm,
    /// Mandatory prefix: [none, F3, 66, F2]
    Prefix,
    /// Processor mode: [16/32-bit, 64-bit]
    X86_64,
    /// Third opcode byte (256 entries)
    ThreeByte,
    /// 8F: XOP or the legacy entry in slot 0
    Xop,
    /// C4: three-byte VEX or the legacy entry in slot 0
    VexC4,
    /// C5: two-byte VEX or the legacy entry in slot 0
    VexC5,
    /// VEX.L: [128, 256]
    VexLen,
    /// VEX.W / EVEX.W: [W0, W1]
    VexW,
    /// 62: EVEX or the legacy entry in slot 0
    Evex,
    /// D8-DF: memory forms by ModR/M reg, register forms by reg then r/m
    Float,
    /// REX.B: [clear, set]
    RexB,
    /// EVEX.L'L: [128, 256, 512]
    EvexLen,
}

/// A table slot.
#[derive(Debug, Clone, Copy)]
pub enum Entry {
    Bad,
    Insn(Insn),
    Redirect(Redirect, &'static [Entry]),
}

impl Entry {
    pub const fn flow(self, flow: Flow) -> Self {
        match self {
            Self::Insn(insn) => Self::Insn(insn.flow(flow)),
            other => other,
        }
    }

    pub const fn attrs(self, attrs: Attrs) -> Self {
        match self {
            Self::Insn(insn) => Self::Insn(insn.attrs(attrs)),
            other => other,
        }
    }
}

pub(crate) const BAD: Entry = Entry::Bad;

/// Builds a terminal entry from a template and operand slots.
macro_rules! ins {
    ($t:expr) => {
        $crate::x86::tables::Entry::Insn($crate::x86::tables::Insn {
            template: $t,
            ops: &[],
            flow: $crate::x86::tables::Flow::Normal,
            attrs: $crate::x86::tables::Attrs::NONE,
        })
    };
    ($t:expr, $($op:expr),+ $(,)?) => {
        $crate::x86::tables::Entry::Insn($crate::x86::tables::Insn {
            template: $t,
            ops: &[$($op),+],
            flow: $crate::x86::tables::Flow::Normal,
            attrs: $crate::x86::tables::Attrs::NONE,
        })
    };
}

/// Builds a redirect entry.
macro_rules! redirect {
    ($kind:ident, $table:expr) => {
        $crate::x86::tables::Entry::Redirect($crate::x86::tables::Redirect::$kind, &$table)
    };
}

/// Inline redirect whose sub-table is a block-scoped static.
macro_rules! select {
    ($kind:ident, $n:literal, [$($slot:expr),+ $(,)?]) => {{
        static SLOTS: [$crate::x86::tables::Entry; $n] = [$($slot),+];
        $crate::x86::tables::Entry::Redirect($crate::x86::tables::Redirect::$kind, &SLOTS)
    }};
}

/// Mandatory prefix split: none, F3, 66, F2.
macro_rules! by_prefix {
    ($none:expr, $f3:expr, $p66:expr, $f2:expr $(,)?) => {
        $crate::x86::tables::select!(Prefix, 4, [$none, $f3, $p66, $f2])
    };
}

/// Valid only under a 66 mandatory prefix.
macro_rules! p66 {
    ($entry:expr) => {
        $crate::x86::tables::by_prefix!(
            $crate::x86::tables::BAD,
            $crate::x86::tables::BAD,
            $entry,
            $crate::x86::tables::BAD
        )
    };
}

/// Valid only without a mandatory prefix.
macro_rules! pnone {
    ($entry:expr) => {
        $crate::x86::tables::by_prefix!(
            $entry,
            $crate::x86::tables::BAD,
            $crate::x86::tables::BAD,
            $crate::x86::tables::BAD
        )
    };
}

macro_rules! by_w {
    ($w0:expr, $w1:expr $(,)?) => {
        $crate::x86::tables::select!(VexW, 2, [$w0, $w1])
    };
}

macro_rules! by_len {
    ($l0:expr, $l1:expr $(,)?) => {
        $crate::x86::tables::select!(VexLen, 2, [$l0, $l1])
    };
}

macro_rules! by_mod {
    ($mem:expr, $reg:expr $(,)?) => {
        $crate::x86::tables::select!(Mod, 2, [$mem, $reg])
    };
}

macro_rules! by_reg {
    ($($slot:expr),+ $(,)?) => {
        $crate::x86::tables::select!(Reg, 8, [$($slot),+])
    };
}

pub(crate) use by_len;
pub(crate) use by_mod;
pub(crate) use by_prefix;
pub(crate) use by_reg;
pub(crate) use by_w;
pub(crate) use ins;
pub(crate) use p66;
pub(crate) use pnone;
pub(crate) use redirect;
pub(crate) use select;

/// Rows of 16 bits, one per high nibble; bit n set when opcode `row*16+n`
/// takes a ModR/M byte.
pub(crate) static ONE_BYTE_HAS_MODRM: [u16; 16] = [
    0x0f0f, 0x0f0f, 0x0f0f, 0x0f0f, // 00-3f
    0x0000, 0x0000, // 40-5f
    0x0a0c, // 60-6f: 62 63 69 6b
    0x0000, // 70-7f
    0xffff, // 80-8f
    0x0000, 0x0000, 0x0000, // 90-bf
    0x00f3, // c0-cf: c0 c1 c4 c5 c6 c7
    0xff0f, // d0-df: d0-d3 d8-df
    0x0000, // e0-ef
    0xc0c0, // f0-ff: f6 f7 fe ff
];

pub(crate) static TWO_BYTE_HAS_MODRM: [u16; 16] = [
    0xa00f, // 00-0f: 00-03 0d 0f
    0xffff, // 10-1f
    0xff7f, // 20-2f: all but 27
    0x0500, // 30-3f: 38 3a
    0xffff, 0xffff, 0xffff, // 40-6f
    0xff7f, // 70-7f: all but 77
    0x0000, // 80-8f
    0xffff, // 90-9f
    0xf8f8, // a0-af: a3-a7 ab-af
    0xffff, // b0-bf
    0x00ff, // c0-cf: c0-c7
    0xffff, 0xffff, 0xffff, // d0-ff
];

pub(crate) fn has_modrm(bitmap: &[u16; 16], opcode: u8) -> bool {
    bitmap[usize::from(opcode >> 4)] & (1 << (opcode & 0x0f)) != 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modrm_bitmaps() {
        for op in [0x00, 0x03, 0x62, 0x63, 0x69, 0x6b, 0x8d, 0xc0, 0xc7, 0xd9, 0xf6, 0xff] {
            assert!(has_modrm(&ONE_BYTE_HAS_MODRM, op), "{op:#x}");
        }
        for op in [0x04, 0x40, 0x68, 0x90, 0xb8, 0xc3, 0xcd, 0xd4, 0xe8, 0xf4, 0xfc] {
            assert!(!has_modrm(&ONE_BYTE_HAS_MODRM, op), "{op:#x}");
        }
        for op in [0x01, 0x0d, 0x1f, 0x38, 0x3a, 0xa3, 0xaf, 0xb6, 0xc7, 0xff] {
            assert!(has_modrm(&TWO_BYTE_HAS_MODRM, op), "0f {op:#x}");
        }
        for op in [0x05, 0x0b, 0x27, 0x31, 0x77, 0x84, 0xa2, 0xa8, 0xc8] {
            assert!(!has_modrm(&TWO_BYTE_HAS_MODRM, op), "0f {op:#x}");
        }
    }

    #[test]
    fn test_mode_broadcast_width() {
        assert_eq!(Mode::VecB.broadcast_bits(true), Some(64));
        assert_eq!(Mode::VecB.broadcast_bits(false), Some(32));
        assert_eq!(Mode::Vec.broadcast_bits(true), None);
        assert!(Mode::Half.is_vector());
        assert!(!Mode::Q.is_vector());
    }
}
