//! ModR/M.reg groups of the one-byte map.

use super::operands::*;
use super::{ins, redirect, Attrs, Entry, Flow, BAD};

const LOCKABLE: Attrs = Attrs::HLE;

pub(super) static GROUP1_EB_IB: [Entry; 8] = [
    ins!("addA", Eb, Ib).attrs(LOCKABLE),
    ins!("orA", Eb, Ib).attrs(LOCKABLE),
    ins!("adcA", Eb, Ib).attrs(LOCKABLE),
    ins!("sbbA", Eb, Ib).attrs(LOCKABLE),
    ins!("andA", Eb, Ib).attrs(LOCKABLE),
    ins!("subA", Eb, Ib).attrs(LOCKABLE),
    ins!("xorA", Eb, Ib).attrs(LOCKABLE),
    ins!("cmpA", Eb, Ib),
];

pub(super) static GROUP1_EV_IV: [Entry; 8] = [
    ins!("addQ", Ev, Iv).attrs(LOCKABLE),
    ins!("orQ", Ev, Iv).attrs(LOCKABLE),
    ins!("adcQ", Ev, Iv).attrs(LOCKABLE),
    ins!("sbbQ", Ev, Iv).attrs(LOCKABLE),
    ins!("andQ", Ev, Iv).attrs(LOCKABLE),
    ins!("subQ", Ev, Iv).attrs(LOCKABLE),
    ins!("xorQ", Ev, Iv).attrs(LOCKABLE),
    ins!("cmpQ", Ev, Iv),
];

pub(super) static GROUP1_EV_IB: [Entry; 8] = [
    ins!("addQ", Ev, sIb).attrs(LOCKABLE),
    ins!("orQ", Ev, sIb).attrs(LOCKABLE),
    ins!("adcQ", Ev, sIb).attrs(LOCKABLE),
    ins!("sbbQ", Ev, sIb).attrs(LOCKABLE),
    ins!("andQ", Ev, sIb).attrs(LOCKABLE),
    ins!("subQ", Ev, sIb).attrs(LOCKABLE),
    ins!("xorQ", Ev, sIb).attrs(LOCKABLE),
    ins!("cmpQ", Ev, sIb),
];

/// 82 aliases the byte group outside long mode.
pub(super) static GROUP1_82: [Entry; 2] = [redirect!(Reg, GROUP1_EB_IB), BAD];

pub(super) static GROUP1A: [Entry; 8] = [ins!("pop{P|}", Es), BAD, BAD, BAD, BAD, BAD, BAD, BAD];

macro_rules! shift_group {
    ($name:ident, $suffix:literal, $($op:expr),+) => {
        pub(super) static $name: [Entry; 8] = [
            ins!(concat!("rol", $suffix), $($op),+),
            ins!(concat!("ror", $suffix), $($op),+),
            ins!(concat!("rcl", $suffix), $($op),+),
            ins!(concat!("rcr", $suffix), $($op),+),
            ins!(concat!("shl", $suffix), $($op),+),
            ins!(concat!("shr", $suffix), $($op),+),
            ins!(concat!("shl", $suffix), $($op),+),
            ins!(concat!("sar", $suffix), $($op),+),
        ];
    };
}

shift_group!(GROUP2_EB_IB, "A", Eb, Ib);
shift_group!(GROUP2_EV_IB, "Q", Ev, Ib);
shift_group!(GROUP2_EB_1, "A", Eb, I1);
shift_group!(GROUP2_EV_1, "Q", Ev, I1);
shift_group!(GROUP2_EB_CL, "A", Eb, CL);
shift_group!(GROUP2_EV_CL, "Q", Ev, CL);

pub(super) static GROUP3_EB: [Entry; 8] = [
    ins!("testA", Eb, Ib),
    ins!("testA", Eb, Ib),
    ins!("notA", Eb).attrs(LOCKABLE),
    ins!("negA", Eb).attrs(LOCKABLE),
    ins!("mulA", Eb),
    ins!("imulA", Eb),
    ins!("divA", Eb),
    ins!("idivA", Eb),
];

pub(super) static GROUP3_EV: [Entry; 8] = [
    ins!("testQ", Ev, Iv),
    ins!("testQ", Ev, Iv),
    ins!("notQ", Ev).attrs(LOCKABLE),
    ins!("negQ", Ev).attrs(LOCKABLE),
    ins!("mulQ", Ev),
    ins!("imulQ", Ev),
    ins!("divQ", Ev),
    ins!("idivQ", Ev),
];

pub(super) static GROUP4: [Entry; 8] = [
    ins!("incA", Eb).attrs(LOCKABLE),
    ins!("decA", Eb).attrs(LOCKABLE),
    BAD,
    BAD,
    BAD,
    BAD,
    BAD,
    BAD,
];

static FAR_CALL: [Entry; 2] = [ins!("{l|}call^", Mfar).flow(Flow::IndirectCall), BAD];
static FAR_JUMP: [Entry; 2] = [ins!("{l|}jmp^", Mfar).flow(Flow::IndirectJump), BAD];

pub(super) static GROUP5: [Entry; 8] = [
    ins!("incQ", Ev).attrs(LOCKABLE),
    ins!("decQ", Ev).attrs(LOCKABLE),
    ins!("call{@|}", Eind).flow(Flow::IndirectCall).attrs(Attrs::BND_NOTRACK),
    redirect!(Mod, FAR_CALL),
    ins!("jmp{@|}", Eind).flow(Flow::IndirectJump).attrs(Attrs::BND_NOTRACK),
    redirect!(Mod, FAR_JUMP),
    ins!("push{P|}", Es),
    BAD,
];

static XABORT: [Entry; 8] = [ins!("xabort", Ib), BAD, BAD, BAD, BAD, BAD, BAD, BAD];
static XABORT_FORM: [Entry; 2] = [BAD, redirect!(Rm, XABORT)];
static XBEGIN: [Entry; 8] = [ins!("xbeginT", Jv).flow(Flow::CondJump), BAD, BAD, BAD, BAD, BAD, BAD, BAD];
static XBEGIN_FORM: [Entry; 2] = [BAD, redirect!(Rm, XBEGIN)];

pub(super) static GROUP11_EB: [Entry; 8] = [
    ins!("movA", Eb, Ib).attrs(Attrs::HLE_STORE),
    BAD,
    BAD,
    BAD,
    BAD,
    BAD,
    BAD,
    redirect!(Mod, XABORT_FORM),
];

pub(super) static GROUP11_EV: [Entry; 8] = [
    ins!("movQ", Ev, Iv).attrs(Attrs::HLE_STORE),
    BAD,
    BAD,
    BAD,
    BAD,
    BAD,
    BAD,
    redirect!(Mod, XBEGIN_FORM),
];
