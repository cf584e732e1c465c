//! AMD XOP maps 8, 9 and A, reached through an 8F escape whose map
//! field is at least 8.

use super::operands::*;
use super::{by_mod, by_reg, by_w, ins, Entry, BAD};

/// Multiply-accumulate with the accumulator in imm8[7:4].
macro_rules! macc {
    ($name:literal) => {
        by_w!(ins!($name, Vo, Ho, Wo, Lo), BAD)
    };
}

/// Shift or rotate by per-element counts: W swaps which source is r/m.
macro_rules! shift_var {
    ($name:literal) => {
        by_w!(ins!($name, Vo, Wo, Ho), ins!($name, Vo, Ho, Wo))
    };
}

/// Comparison with the predicate folded into the mnemonic.
macro_rules! vpcom {
    ($name:literal) => {
        ins!($name, Vo, Ho, Wo, CMP_XOP)
    };
}

pub(crate) static XOP_MAP8: [Entry; 256] = {
    let mut t = [BAD; 256];

    t[0x85] = macc!("vpmacssww");
    t[0x86] = macc!("vpmacsswd");
    t[0x87] = macc!("vpmacssdql");
    t[0x8e] = macc!("vpmacssdd");
    t[0x8f] = macc!("vpmacssdqh");
    t[0x95] = macc!("vpmacsww");
    t[0x96] = macc!("vpmacswd");
    t[0x97] = macc!("vpmacsdql");
    t[0x9e] = macc!("vpmacsdd");
    t[0x9f] = macc!("vpmacsdqh");
    t[0xa2] = by_w!(ins!("vpcmov", Vx, Hx, Wx, Lx), ins!("vpcmov", Vx, Hx, Lx, Wx));
    t[0xa3] = by_w!(ins!("vpperm", Vo, Ho, Wo, Lo), ins!("vpperm", Vo, Ho, Lo, Wo));
    t[0xa6] = macc!("vpmadcsswd");
    t[0xb6] = macc!("vpmadcswd");

    t[0xc0] = ins!("vprotb", Vo, Wo, Ib);
    t[0xc1] = ins!("vprotw", Vo, Wo, Ib);
    t[0xc2] = ins!("vprotd", Vo, Wo, Ib);
    t[0xc3] = ins!("vprotq", Vo, Wo, Ib);
    t[0xcc] = vpcom!("vpcom%CCb");
    t[0xcd] = vpcom!("vpcom%CCw");
    t[0xce] = vpcom!("vpcom%CCd");
    t[0xcf] = vpcom!("vpcom%CCq");
    t[0xec] = vpcom!("vpcom%CCub");
    t[0xed] = vpcom!("vpcom%CCuw");
    t[0xee] = vpcom!("vpcom%CCud");
    t[0xef] = vpcom!("vpcom%CCuq");
    t
};

pub(crate) static XOP_MAP9: [Entry; 256] = {
    let mut t = [BAD; 256];

    t[0x01] = by_reg!(
        BAD,
        ins!("blcfill", By, Edq),
        ins!("blsfill", By, Edq),
        ins!("blcs", By, Edq),
        ins!("tzmsk", By, Edq),
        ins!("blcic", By, Edq),
        ins!("blsic", By, Edq),
        ins!("t1mskc", By, Edq)
    );
    t[0x02] = by_reg!(
        BAD,
        ins!("blcmsk", By, Edq),
        BAD,
        BAD,
        BAD,
        BAD,
        ins!("blci", By, Edq),
        BAD
    );
    t[0x12] = by_mod!(
        BAD,
        by_reg!(ins!("llwpcb", Rdq), ins!("slwpcb", Rdq), BAD, BAD, BAD, BAD, BAD, BAD)
    );

    t[0x80] = ins!("vfrczps", Vx, Wx);
    t[0x81] = ins!("vfrczpd", Vx, Wx);
    t[0x82] = ins!("vfrczss", Vo, Wd);
    t[0x83] = ins!("vfrczsd", Vo, Wq);

    t[0x90] = shift_var!("vprotb");
    t[0x91] = shift_var!("vprotw");
    t[0x92] = shift_var!("vprotd");
    t[0x93] = shift_var!("vprotq");
    t[0x94] = shift_var!("vpshlb");
    t[0x95] = shift_var!("vpshlw");
    t[0x96] = shift_var!("vpshld");
    t[0x97] = shift_var!("vpshlq");
    t[0x98] = shift_var!("vpshab");
    t[0x99] = shift_var!("vpshaw");
    t[0x9a] = shift_var!("vpshad");
    t[0x9b] = shift_var!("vpshaq");

    t[0xc1] = ins!("vphaddbw", Vo, Wo);
    t[0xc2] = ins!("vphaddbd", Vo, Wo);
    t[0xc3] = ins!("vphaddbq", Vo, Wo);
    t[0xc6] = ins!("vphaddwd", Vo, Wo);
    t[0xc7] = ins!("vphaddwq", Vo, Wo);
    t[0xcb] = ins!("vphadddq", Vo, Wo);
    t[0xd1] = ins!("vphaddubw", Vo, Wo);
    t[0xd2] = ins!("vphaddubd", Vo, Wo);
    t[0xd3] = ins!("vphaddubq", Vo, Wo);
    t[0xd6] = ins!("vphadduwd", Vo, Wo);
    t[0xd7] = ins!("vphadduwq", Vo, Wo);
    t[0xdb] = ins!("vphaddudq", Vo, Wo);
    t[0xe1] = ins!("vphsubbw", Vo, Wo);
    t[0xe2] = ins!("vphsubwd", Vo, Wo);
    t[0xe3] = ins!("vphsubdq", Vo, Wo);
    t
};

pub(crate) static XOP_MAPA: [Entry; 256] = {
    let mut t = [BAD; 256];

    t[0x10] = ins!("bextr", Gdq, Edq, Id);
    t[0x12] = by_reg!(
        ins!("lwpins", By, Ed, Id),
        ins!("lwpval", By, Ed, Id),
        BAD,
        BAD,
        BAD,
        BAD,
        BAD,
        BAD
    );
    t
};
