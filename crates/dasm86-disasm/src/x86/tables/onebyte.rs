//! The one-byte opcode map.

use super::groups::*;
use super::operands::*;
use super::{ins, redirect, Attrs, Entry, Flow, BAD};

/// The six ALU forms at `base..base + 6`.
macro_rules! alu {
    ($t:ident, $base:expr, $name:literal, $lock:expr) => {
        $t[$base] = ins!(concat!($name, "B"), Eb, Gb).attrs($lock);
        $t[$base + 1] = ins!(concat!($name, "S"), Ev, Gv).attrs($lock);
        $t[$base + 2] = ins!(concat!($name, "B"), Gb, Eb);
        $t[$base + 3] = ins!(concat!($name, "S"), Gv, Ev);
        $t[$base + 4] = ins!(concat!($name, "B"), AL, Ib);
        $t[$base + 5] = ins!(concat!($name, "S"), eAX, Iv);
    };
}

pub(super) const JCC: [&str; 16] = [
    "joH", "jnoH", "jbH", "jaeH", "jeH", "jneH", "jbeH", "jaH", "jsH", "jnsH", "jpH", "jnpH", "jlH", "jgeH", "jleH",
    "jgH",
];

static PUSH_ES: [Entry; 2] = [ins!("push{T|}", ES), BAD];
static POP_ES: [Entry; 2] = [ins!("pop{T|}", ES), BAD];
static PUSH_CS: [Entry; 2] = [ins!("push{T|}", CS), BAD];
static PUSH_SS: [Entry; 2] = [ins!("push{T|}", SS), BAD];
static POP_SS: [Entry; 2] = [ins!("pop{T|}", SS), BAD];
static PUSH_DS: [Entry; 2] = [ins!("push{T|}", DS), BAD];
static POP_DS: [Entry; 2] = [ins!("pop{T|}", DS), BAD];
static DAA: [Entry; 2] = [ins!("daa"), BAD];
static DAS: [Entry; 2] = [ins!("das"), BAD];
static AAA: [Entry; 2] = [ins!("aaa"), BAD];
static AAS: [Entry; 2] = [ins!("aas"), BAD];
static PUSHA: [Entry; 2] = [ins!("pushaP"), BAD];
static POPA: [Entry; 2] = [ins!("popaP"), BAD];
static BOUND: [Entry; 2] = [ins!("bound{S|}", Gv, Ma).attrs(Attrs::KEEP_ORDER), BAD];
static ARPL_MOVSXD: [Entry; 2] = [ins!("arpl", Ew, Gw), ins!("movs%XD", Gv, Ed)];
static LES: [Entry; 2] = [ins!("les{S|}", Gv, Mp), BAD];
static LDS: [Entry; 2] = [ins!("lds{S|}", Gv, Mp), BAD];
static INTO: [Entry; 2] = [ins!("into"), BAD];
static AAM: [Entry; 2] = [ins!("aam", Ib), BAD];
static AAD: [Entry; 2] = [ins!("aad", Ib), BAD];
static CALL_FAR: [Entry; 2] = [ins!("{l|}call{T|}", Ap).flow(Flow::Call), BAD];
static JMP_FAR: [Entry; 2] = [ins!("{l|}jmp{T|}", Ap).flow(Flow::Jump), BAD];

static MOV_FROM_SEG: [Entry; 2] = [ins!("mov", Mw, Sw), ins!("movS", Rv, Sw)];
static MOV_TO_SEG: [Entry; 2] = [ins!("mov", Sw, Mw), ins!("movS", Sw, Rv)];

static NOP_OR_XCHG: [Entry; 2] = [ins!("nop"), ins!("xchgS", Zv, eAX)];
static OPCODE_90: [Entry; 4] = [
    redirect!(RexB, NOP_OR_XCHG),
    ins!("pause"),
    ins!("xchgS", Zv, eAX),
    redirect!(RexB, NOP_OR_XCHG),
];

// Legacy fallbacks for the envelope escapes sit in slot 0.
static ESCAPE_C4: [Entry; 1] = [redirect!(X86_64, LES)];
static ESCAPE_C5: [Entry; 1] = [redirect!(X86_64, LDS)];
static ESCAPE_62: [Entry; 1] = [redirect!(X86_64, BOUND)];
static ESCAPE_8F: [Entry; 1] = [redirect!(Reg, GROUP1A)];

static FLOAT_ESCAPE: [Entry; 0] = [];

pub(crate) static ONE_BYTE: [Entry; 256] = {
    let mut t = [BAD; 256];

    alu!(t, 0x00, "add", Attrs::HLE);
    t[0x06] = redirect!(X86_64, PUSH_ES);
    t[0x07] = redirect!(X86_64, POP_ES);
    alu!(t, 0x08, "or", Attrs::HLE);
    t[0x0e] = redirect!(X86_64, PUSH_CS);
    alu!(t, 0x10, "adc", Attrs::HLE);
    t[0x16] = redirect!(X86_64, PUSH_SS);
    t[0x17] = redirect!(X86_64, POP_SS);
    alu!(t, 0x18, "sbb", Attrs::HLE);
    t[0x1e] = redirect!(X86_64, PUSH_DS);
    t[0x1f] = redirect!(X86_64, POP_DS);
    alu!(t, 0x20, "and", Attrs::HLE);
    t[0x27] = redirect!(X86_64, DAA);
    alu!(t, 0x28, "sub", Attrs::HLE);
    t[0x2f] = redirect!(X86_64, DAS);
    alu!(t, 0x30, "xor", Attrs::HLE);
    t[0x37] = redirect!(X86_64, AAA);
    alu!(t, 0x38, "cmp", Attrs::NONE);
    t[0x3f] = redirect!(X86_64, AAS);

    let mut r = 0;
    while r < 8 {
        // 40-4f are REX in long mode and never reach the table there.
        t[0x40 + r] = ins!("incS", Zv);
        t[0x48 + r] = ins!("decS", Zv);
        t[0x50 + r] = ins!("pushP", Zs);
        t[0x58 + r] = ins!("popP", Zs);
        r += 1;
    }

    t[0x60] = redirect!(X86_64, PUSHA);
    t[0x61] = redirect!(X86_64, POPA);
    t[0x62] = redirect!(Evex, ESCAPE_62);
    t[0x63] = redirect!(X86_64, ARPL_MOVSXD);
    t[0x68] = ins!("pushP", Is);
    t[0x69] = ins!("imulS", Gv, Ev, Iv);
    t[0x6a] = ins!("pushP", sIbs);
    t[0x6b] = ins!("imulS", Gv, Ev, sIb);
    t[0x6c] = ins!("ins{b|}", Yb, DXp).attrs(Attrs::REP);
    t[0x6d] = ins!("ins{R|}", Yz, DXp).attrs(Attrs::REP);
    t[0x6e] = ins!("outs{b|}", DXp, Xb).attrs(Attrs::REP);
    t[0x6f] = ins!("outs{R|}", DXp, Xz).attrs(Attrs::REP);

    let mut cc = 0;
    while cc < 16 {
        t[0x70 + cc] = ins!(JCC[cc], Jb).flow(Flow::CondJump).attrs(Attrs::BND);
        cc += 1;
    }

    t[0x80] = redirect!(Reg, GROUP1_EB_IB);
    t[0x81] = redirect!(Reg, GROUP1_EV_IV);
    t[0x82] = redirect!(X86_64, GROUP1_82);
    t[0x83] = redirect!(Reg, GROUP1_EV_IB);
    t[0x84] = ins!("testB", Eb, Gb);
    t[0x85] = ins!("testS", Ev, Gv);
    t[0x86] = ins!("xchgB", Eb, Gb).attrs(Attrs::HLE_ANY);
    t[0x87] = ins!("xchgS", Ev, Gv).attrs(Attrs::HLE_ANY);
    t[0x88] = ins!("movB", Eb, Gb).attrs(Attrs::HLE_STORE);
    t[0x89] = ins!("movS", Ev, Gv).attrs(Attrs::HLE_STORE);
    t[0x8a] = ins!("movB", Gb, Eb);
    t[0x8b] = ins!("movS", Gv, Ev);
    t[0x8c] = redirect!(Mod, MOV_FROM_SEG);
    t[0x8d] = ins!("leaS", Gv, M0);
    t[0x8e] = redirect!(Mod, MOV_TO_SEG);
    t[0x8f] = redirect!(Xop, ESCAPE_8F);

    t[0x90] = redirect!(Prefix, OPCODE_90);
    r = 1;
    while r < 8 {
        t[0x90 + r] = ins!("xchgS", Zv, eAX);
        r += 1;
    }
    t[0x98] = ins!("cW{t|}R");
    t[0x99] = ins!("cR{t|}O");
    t[0x9a] = redirect!(X86_64, CALL_FAR);
    t[0x9b] = ins!("fwait");
    t[0x9c] = ins!("pushfP");
    t[0x9d] = ins!("popfP");
    t[0x9e] = ins!("sahf");
    t[0x9f] = ins!("lahf");

    t[0xa0] = ins!("mov%LB", AL, Ob);
    t[0xa1] = ins!("mov%LS", eAX, Ov);
    t[0xa2] = ins!("mov%LB", Ob, AL);
    t[0xa3] = ins!("mov%LS", Ov, eAX);
    t[0xa4] = ins!("movs{b|}", Yb, Xb).attrs(Attrs::REP);
    t[0xa5] = ins!("movs{R|}", Yv, Xv).attrs(Attrs::REP);
    t[0xa6] = ins!("cmps{b|}", Xb, Yb);
    t[0xa7] = ins!("cmps{R|}", Xv, Yv);
    t[0xa8] = ins!("testB", AL, Ib);
    t[0xa9] = ins!("testS", eAX, Iv);
    t[0xaa] = ins!("stosB", Yb, AL).attrs(Attrs::REP);
    t[0xab] = ins!("stosS", Yv, eAX).attrs(Attrs::REP);
    t[0xac] = ins!("lodsB", AL, Xb).attrs(Attrs::REP);
    t[0xad] = ins!("lodsS", eAX, Xv).attrs(Attrs::REP);
    t[0xae] = ins!("scasB", AL, Yb);
    t[0xaf] = ins!("scasS", eAX, Yv);

    r = 0;
    while r < 8 {
        t[0xb0 + r] = ins!("movB", Zb, Ib);
        t[0xb8 + r] = ins!("mov%LV", Zv, Iv64);
        r += 1;
    }

    t[0xc0] = redirect!(Reg, GROUP2_EB_IB);
    t[0xc1] = redirect!(Reg, GROUP2_EV_IB);
    t[0xc2] = ins!("ret{@|}", Iw).flow(Flow::Ret).attrs(Attrs::BND);
    t[0xc3] = ins!("ret{@|}").flow(Flow::Ret).attrs(Attrs::BND);
    t[0xc4] = redirect!(VexC4, ESCAPE_C4);
    t[0xc5] = redirect!(VexC5, ESCAPE_C5);
    t[0xc6] = redirect!(Reg, GROUP11_EB);
    t[0xc7] = redirect!(Reg, GROUP11_EV);
    t[0xc8] = ins!("enterP", Iw, Ib).attrs(Attrs::KEEP_ORDER);
    t[0xc9] = ins!("leaveP");
    t[0xca] = ins!("{l|}ret{|f}%LP", Iw).flow(Flow::Ret);
    t[0xcb] = ins!("{l|}ret{|f}%LP").flow(Flow::Ret);
    t[0xcc] = ins!("int3");
    t[0xcd] = ins!("int", Ib);
    t[0xce] = redirect!(X86_64, INTO);
    t[0xcf] = ins!("iret%LP").flow(Flow::Ret);

    t[0xd0] = redirect!(Reg, GROUP2_EB_1);
    t[0xd1] = redirect!(Reg, GROUP2_EV_1);
    t[0xd2] = redirect!(Reg, GROUP2_EB_CL);
    t[0xd3] = redirect!(Reg, GROUP2_EV_CL);
    t[0xd4] = redirect!(X86_64, AAM);
    t[0xd5] = redirect!(X86_64, AAD);
    t[0xd7] = ins!("xlat", XLAT);
    r = 0;
    while r < 8 {
        t[0xd8 + r] = redirect!(Float, FLOAT_ESCAPE);
        r += 1;
    }

    t[0xe0] = ins!("loopneF", Jb).flow(Flow::CondJump);
    t[0xe1] = ins!("loopeF", Jb).flow(Flow::CondJump);
    t[0xe2] = ins!("loopF", Jb).flow(Flow::CondJump);
    t[0xe3] = ins!("jEcxz", Jb).flow(Flow::CondJump);
    t[0xe4] = ins!("inB", AL, Ib);
    t[0xe5] = ins!("inS", zAX, Ib);
    t[0xe6] = ins!("outB", Ib, AL);
    t[0xe7] = ins!("outS", Ib, zAX);
    t[0xe8] = ins!("call{@|}", Jv).flow(Flow::Call).attrs(Attrs::BND);
    t[0xe9] = ins!("jmp{@|}", Jv).flow(Flow::Jump).attrs(Attrs::BND);
    t[0xea] = redirect!(X86_64, JMP_FAR);
    t[0xeb] = ins!("jmp", Jb).flow(Flow::Jump).attrs(Attrs::BND);
    t[0xec] = ins!("inB", AL, DXp);
    t[0xed] = ins!("inS", zAX, DXp);
    t[0xee] = ins!("outB", DXp, AL);
    t[0xef] = ins!("outS", DXp, zAX);

    t[0xf1] = ins!("int1");
    t[0xf4] = ins!("hlt");
    t[0xf5] = ins!("cmc");
    t[0xf6] = redirect!(Reg, GROUP3_EB);
    t[0xf7] = redirect!(Reg, GROUP3_EV);
    t[0xf8] = ins!("clc");
    t[0xf9] = ins!("stc");
    t[0xfa] = ins!("cli");
    t[0xfb] = ins!("sti");
    t[0xfc] = ins!("cld");
    t[0xfd] = ins!("std");
    t[0xfe] = redirect!(Reg, GROUP4);
    t[0xff] = redirect!(Reg, GROUP5);
    t
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_bytes_are_not_opcodes() {
        for op in [0x26, 0x2e, 0x36, 0x3e, 0x64, 0x65, 0x66, 0x67, 0xf0, 0xf2, 0xf3] {
            assert!(matches!(ONE_BYTE[op], Entry::Bad), "{op:#x}");
        }
    }

    #[test]
    fn test_branch_flows() {
        for op in 0x70..0x80 {
            assert!(matches!(ONE_BYTE[op], Entry::Insn(i) if i.flow == Flow::CondJump && i.attrs.contains(Attrs::BND)));
        }
        assert!(matches!(ONE_BYTE[0xe8], Entry::Insn(i) if i.flow == Flow::Call));
        assert!(matches!(ONE_BYTE[0xc3], Entry::Insn(i) if i.flow == Flow::Ret));
        assert!(matches!(ONE_BYTE[0xc8], Entry::Insn(i) if i.attrs.contains(Attrs::KEEP_ORDER)));
    }
}
