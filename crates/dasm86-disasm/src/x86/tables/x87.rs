//! x87 escapes D8-DF. Both tables are indexed by
//! `(opcode - 0xd8) * 8 + modrm.reg`; register forms that depend on the
//! r/m field redirect once more.

use super::operands::*;
use super::{ins, redirect, Entry, BAD};

pub(crate) static FLOAT_MEM: [Entry; 64] = [
    // d8
    ins!("fadd{s|}", Md),
    ins!("fmul{s|}", Md),
    ins!("fcom{s|}", Md),
    ins!("fcomp{s|}", Md),
    ins!("fsub{s|}", Md),
    ins!("fsubr{s|}", Md),
    ins!("fdiv{s|}", Md),
    ins!("fdivr{s|}", Md),
    // d9
    ins!("fld{s|}", Md),
    BAD,
    ins!("fst{s|}", Md),
    ins!("fstp{s|}", Md),
    ins!("fldenvC", M0),
    ins!("fldcw", Mw),
    ins!("fNstenvC", M0),
    ins!("fNstcw", Mw),
    // da
    ins!("fiadd{l|}", Md),
    ins!("fimul{l|}", Md),
    ins!("ficom{l|}", Md),
    ins!("ficomp{l|}", Md),
    ins!("fisub{l|}", Md),
    ins!("fisubr{l|}", Md),
    ins!("fidiv{l|}", Md),
    ins!("fidivr{l|}", Md),
    // db
    ins!("fild{l|}", Md),
    ins!("fisttp{l|}", Md),
    ins!("fist{l|}", Md),
    ins!("fistp{l|}", Md),
    BAD,
    ins!("fld{t|}", Mt),
    BAD,
    ins!("fstp{t|}", Mt),
    // dc
    ins!("fadd{l|}", Mq),
    ins!("fmul{l|}", Mq),
    ins!("fcom{l|}", Mq),
    ins!("fcomp{l|}", Mq),
    ins!("fsub{l|}", Mq),
    ins!("fsubr{l|}", Mq),
    ins!("fdiv{l|}", Mq),
    ins!("fdivr{l|}", Mq),
    // dd
    ins!("fld{l|}", Mq),
    ins!("fisttp{ll|}", Mq),
    ins!("fst{l|}", Mq),
    ins!("fstp{l|}", Mq),
    ins!("frstorC", M0),
    BAD,
    ins!("fNsaveC", M0),
    ins!("fNstsw", Mw),
    // de
    ins!("fiadd{s|}", Mw),
    ins!("fimul{s|}", Mw),
    ins!("ficom{s|}", Mw),
    ins!("ficomp{s|}", Mw),
    ins!("fisub{s|}", Mw),
    ins!("fisubr{s|}", Mw),
    ins!("fidiv{s|}", Mw),
    ins!("fidivr{s|}", Mw),
    // df
    ins!("fild{s|}", Mw),
    ins!("fisttp{s|}", Mw),
    ins!("fist{s|}", Mw),
    ins!("fistp{s|}", Mw),
    ins!("fbld", Mt),
    ins!("fild{ll|}", Mq),
    ins!("fbstp", Mt),
    ins!("fistp{ll|}", Mq),
];

static FNOP: [Entry; 8] = [ins!("fnop"), BAD, BAD, BAD, BAD, BAD, BAD, BAD];
static D9_SIGN: [Entry; 8] = [ins!("fchs"), ins!("fabs"), BAD, BAD, ins!("ftst"), ins!("fxam"), BAD, BAD];
static D9_CONST: [Entry; 8] = [
    ins!("fld1"),
    ins!("fldl2t"),
    ins!("fldl2e"),
    ins!("fldpi"),
    ins!("fldlg2"),
    ins!("fldln2"),
    ins!("fldz"),
    BAD,
];
static D9_TRANS: [Entry; 8] = [
    ins!("f2xm1"),
    ins!("fyl2x"),
    ins!("fptan"),
    ins!("fpatan"),
    ins!("fxtract"),
    ins!("fprem1"),
    ins!("fdecstp"),
    ins!("fincstp"),
];
static D9_ROUND: [Entry; 8] = [
    ins!("fprem"),
    ins!("fyl2xp1"),
    ins!("fsqrt"),
    ins!("fsincos"),
    ins!("frndint"),
    ins!("fscale"),
    ins!("fsin"),
    ins!("fcos"),
];
static FUCOMPP: [Entry; 8] = [BAD, ins!("fucompp"), BAD, BAD, BAD, BAD, BAD, BAD];
static DB_CONTROL: [Entry; 8] = [
    ins!("fNeni(8087 only)"),
    ins!("fNdisi(8087 only)"),
    ins!("fNclex"),
    ins!("fNinit"),
    ins!("fNsetpm(287 only)"),
    ins!("frstpm"),
    BAD,
    BAD,
];
static FCOMPP: [Entry; 8] = [BAD, ins!("fcompp"), BAD, BAD, BAD, BAD, BAD, BAD];
static FNSTSW_AX: [Entry; 8] = [ins!("fNstsw", AX), BAD, BAD, BAD, BAD, BAD, BAD, BAD];

pub(crate) static FLOAT_REG: [Entry; 64] = [
    // d8
    ins!("fadd", ST, STi),
    ins!("fmul", ST, STi),
    ins!("fcom", STi),
    ins!("fcomp", STi),
    ins!("fsub", ST, STi),
    ins!("fsubr", ST, STi),
    ins!("fdiv", ST, STi),
    ins!("fdivr", ST, STi),
    // d9
    ins!("fld", STi),
    ins!("fxch", STi),
    redirect!(Rm, FNOP),
    BAD,
    redirect!(Rm, D9_SIGN),
    redirect!(Rm, D9_CONST),
    redirect!(Rm, D9_TRANS),
    redirect!(Rm, D9_ROUND),
    // da
    ins!("fcmovb", ST, STi),
    ins!("fcmove", ST, STi),
    ins!("fcmovbe", ST, STi),
    ins!("fcmovu", ST, STi),
    BAD,
    redirect!(Rm, FUCOMPP),
    BAD,
    BAD,
    // db
    ins!("fcmovnb", ST, STi),
    ins!("fcmovne", ST, STi),
    ins!("fcmovnbe", ST, STi),
    ins!("fcmovnu", ST, STi),
    redirect!(Rm, DB_CONTROL),
    ins!("fucomi", ST, STi),
    ins!("fcomi", ST, STi),
    BAD,
    // dc
    ins!("fadd", STi, ST),
    ins!("fmul", STi, ST),
    BAD,
    BAD,
    ins!("fsub{!M|r}", STi, ST),
    ins!("fsub{M|}", STi, ST),
    ins!("fdiv{!M|r}", STi, ST),
    ins!("fdiv{M|}", STi, ST),
    // dd
    ins!("ffree", STi),
    BAD,
    ins!("fst", STi),
    ins!("fstp", STi),
    ins!("fucom", STi),
    ins!("fucomp", STi),
    BAD,
    BAD,
    // de
    ins!("faddp", STi, ST),
    ins!("fmulp", STi, ST),
    BAD,
    redirect!(Rm, FCOMPP),
    ins!("fsub{!M|r}p", STi, ST),
    ins!("fsub{M|}p", STi, ST),
    ins!("fdiv{!M|r}p", STi, ST),
    ins!("fdiv{M|}p", STi, ST),
    // df
    ins!("ffreep", STi),
    BAD,
    BAD,
    BAD,
    redirect!(Rm, FNSTSW_AX),
    ins!("fucomip", ST, STi),
    ins!("fcomip", ST, STi),
    BAD,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reg_forms_by_escape() {
        assert!(matches!(FLOAT_REG[0], Entry::Insn(i) if i.template == "fadd"));
        assert!(matches!(FLOAT_REG[5 * 8 + 3], Entry::Insn(i) if i.template == "fstp"));
        assert!(matches!(FLOAT_MEM[3 * 8 + 5], Entry::Insn(i) if i.template == "fld{t|}"));
        assert!(matches!(FLOAT_MEM[9], Entry::Bad));
    }
}
