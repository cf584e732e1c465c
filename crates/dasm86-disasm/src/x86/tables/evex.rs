//! EVEX opcode maps 1 (0F), 2 (0F38) and 3 (0F3A).
//!
//! Rounding and exception-suppression slots sit after the register
//! sources and before any immediate, so AT&T prints them first.
//! Destination masking is attached by the renderer, not the tables.

use super::operands::*;
use super::{by_mod, by_prefix, by_reg, by_w, ins, p66, select, Entry, BAD};

/// Defined for EVEX.W0 only.
macro_rules! w0 {
    ($entry:expr) => {
        by_w!($entry, BAD)
    };
}

/// Defined for EVEX.W1 only.
macro_rules! w1 {
    ($entry:expr) => {
        by_w!(BAD, $entry)
    };
}

/// Three-operand op under 66 with the given r/m source.
macro_rules! evex3 {
    ($name:literal, $src:expr) => {
        p66!(ins!($name, Vx, Hx, $src))
    };
}

/// Compare into a mask register under 66.
macro_rules! kcmp {
    ($name:literal, $src:expr) => {
        p66!(ins!($name, KG, Hx, $src))
    };
}

/// Floating-point arithmetic row with a rounding or SAE slot.
macro_rules! arith {
    ($op:literal, $dec:expr) => {
        by_prefix!(
            w0!(ins!(concat!($op, "ps"), Vx, Hx, Wbx, $dec)),
            w0!(ins!(concat!($op, "ss"), Vo, Ho, Wd, $dec)),
            w1!(ins!(concat!($op, "pd"), Vx, Hx, Wbx, $dec)),
            w1!(ins!(concat!($op, "sd"), Vo, Ho, Wq, $dec)),
        )
    };
}

/// Packed-only logic row.
macro_rules! packed {
    ($op:literal) => {
        by_prefix!(
            w0!(ins!(concat!($op, "ps"), Vx, Hx, Wbx)),
            BAD,
            w1!(ins!(concat!($op, "pd"), Vx, Hx, Wbx)),
            BAD,
        )
    };
}

/// Full-vector move pair: load and store with the same names.
macro_rules! vmov {
    ($ps:literal, $pd:literal, $dst:expr, $src:expr) => {
        by_prefix!(w0!(ins!($ps, $dst, $src)), BAD, w1!(ins!($pd, $dst, $src)), BAD)
    };
}

/// 128/256-bit lane insert or extract selected by W.
macro_rules! lanes {
    ($w0:literal, $w1:literal, $($op:expr),+) => {
        p66!(by_w!(ins!($w0, $($op),+), ins!($w1, $($op),+)))
    };
}

pub(crate) static EVEX_MAP1: [Entry; 256] = {
    let mut t = [BAD; 256];

    t[0x10] = by_prefix!(
        w0!(ins!("vmovups", Vx, Wx)),
        w0!(by_mod!(ins!("vmovss", Vo, Md), ins!("vmovss", Vo, Ho, Uo))),
        w1!(ins!("vmovupd", Vx, Wx)),
        w1!(by_mod!(ins!("vmovsd", Vo, Mq), ins!("vmovsd", Vo, Ho, Uo))),
    );
    t[0x11] = by_prefix!(
        w0!(ins!("vmovups", Wx, Vx)),
        w0!(by_mod!(ins!("vmovss", Md, Vo), ins!("vmovss", Uo, Ho, Vo))),
        w1!(ins!("vmovupd", Wx, Vx)),
        w1!(by_mod!(ins!("vmovsd", Mq, Vo), ins!("vmovsd", Uo, Ho, Vo))),
    );
    t[0x12] = by_prefix!(
        w0!(by_mod!(ins!("vmovlps", Vo, Ho, Mq), ins!("vmovhlps", Vo, Ho, Uo))),
        w0!(ins!("vmovsldup", Vx, Wx)),
        w1!(by_mod!(ins!("vmovlpd", Vo, Ho, Mq), BAD)),
        w1!(select!(EvexLen, 3, [
            ins!("vmovddup", Vo, Wq),
            ins!("vmovddup", Vx, Wx),
            ins!("vmovddup", Vx, Wx),
        ])),
    );
    t[0x13] = by_prefix!(
        w0!(by_mod!(ins!("vmovlps", Mq, Vo), BAD)),
        BAD,
        w1!(by_mod!(ins!("vmovlpd", Mq, Vo), BAD)),
        BAD,
    );
    t[0x14] = packed!("vunpckl");
    t[0x15] = packed!("vunpckh");
    t[0x16] = by_prefix!(
        w0!(by_mod!(ins!("vmovhps", Vo, Ho, Mq), ins!("vmovlhps", Vo, Ho, Uo))),
        w0!(ins!("vmovshdup", Vx, Wx)),
        w1!(by_mod!(ins!("vmovhpd", Vo, Ho, Mq), BAD)),
        BAD,
    );
    t[0x17] = by_prefix!(
        w0!(by_mod!(ins!("vmovhps", Mq, Vo), BAD)),
        BAD,
        w1!(by_mod!(ins!("vmovhpd", Mq, Vo), BAD)),
        BAD,
    );

    t[0x28] = vmov!("vmovaps", "vmovapd", Vx, Wx);
    t[0x29] = vmov!("vmovaps", "vmovapd", Wx, Vx);
    t[0x2a] = by_prefix!(
        BAD,
        ins!("vcvtsi2ss%LQ", Vo, Ho, Rc, Edq),
        BAD,
        ins!("vcvtsi2sd%LQ", Vo, Ho, Rc, Edq),
    );
    t[0x2b] = by_mod!(vmov!("vmovntps", "vmovntpd", Mx, Vx), BAD);
    t[0x2c] = by_prefix!(
        BAD,
        w0!(ins!("vcvttss2si", Gdq, Wd, Sae)),
        BAD,
        ins!("vcvttsd2si", Gdq, Wq, Sae),
    );
    t[0x2d] = by_prefix!(BAD, ins!("vcvtss2si", Gdq, Wd, Rc), BAD, ins!("vcvtsd2si", Gdq, Wq, Rc));
    t[0x2e] = by_prefix!(
        w0!(ins!("vucomiss", Vo, Wd, Sae)),
        BAD,
        w1!(ins!("vucomisd", Vo, Wq, Sae)),
        BAD,
    );
    t[0x2f] = by_prefix!(
        w0!(ins!("vcomiss", Vo, Wd, Sae)),
        BAD,
        w1!(ins!("vcomisd", Vo, Wq, Sae)),
        BAD,
    );

    t[0x51] = by_prefix!(
        w0!(ins!("vsqrtps", Vx, Wbx, Rc)),
        w0!(ins!("vsqrtss", Vo, Ho, Wd, Rc)),
        w1!(ins!("vsqrtpd", Vx, Wbx, Rc)),
        w1!(ins!("vsqrtsd", Vo, Ho, Wq, Rc)),
    );
    t[0x54] = packed!("vand");
    t[0x55] = packed!("vandn");
    t[0x56] = packed!("vor");
    t[0x57] = packed!("vxor");
    t[0x58] = arith!("vadd", Rc);
    t[0x59] = arith!("vmul", Rc);
    t[0x5a] = by_prefix!(
        w0!(ins!("vcvtps2pd", Vx, Whb, Sae)),
        w0!(ins!("vcvtss2sd", Vo, Ho, Wd, Sae)),
        w1!(ins!("vcvtpd2ps%XY", Vh, Wbq, Rc)),
        w1!(ins!("vcvtsd2ss", Vo, Ho, Wq, Rc)),
    );
    t[0x5b] = by_prefix!(
        by_w!(ins!("vcvtdq2ps", Vx, Wbd, Rc), ins!("vcvtqq2ps%XY", Vh, Wbq, Rc)),
        w0!(ins!("vcvttps2dq", Vx, Wbd, Sae)),
        w0!(ins!("vcvtps2dq", Vx, Wbd, Rc)),
        BAD,
    );
    t[0x5c] = arith!("vsub", Rc);
    t[0x5d] = arith!("vmin", Sae);
    t[0x5e] = arith!("vdiv", Rc);
    t[0x5f] = arith!("vmax", Sae);

    t[0x60] = evex3!("vpunpcklbw", Wx);
    t[0x61] = evex3!("vpunpcklwd", Wx);
    t[0x62] = evex3!("vpunpckldq", Wbd);
    t[0x63] = evex3!("vpacksswb", Wx);
    t[0x64] = kcmp!("vpcmpgtb", Wx);
    t[0x65] = kcmp!("vpcmpgtw", Wx);
    t[0x66] = kcmp!("vpcmpgtd", Wbd);
    t[0x67] = evex3!("vpackuswb", Wx);
    t[0x68] = evex3!("vpunpckhbw", Wx);
    t[0x69] = evex3!("vpunpckhwd", Wx);
    t[0x6a] = evex3!("vpunpckhdq", Wbd);
    t[0x6b] = evex3!("vpackssdw", Wbd);
    t[0x6c] = evex3!("vpunpcklqdq", Wbq);
    t[0x6d] = evex3!("vpunpckhqdq", Wbq);
    t[0x6e] = p66!(ins!("vmovK", Vo, Edq));
    t[0x6f] = by_prefix!(
        BAD,
        by_w!(ins!("vmovdqu32", Vx, Wx), ins!("vmovdqu64", Vx, Wx)),
        by_w!(ins!("vmovdqa32", Vx, Wx), ins!("vmovdqa64", Vx, Wx)),
        by_w!(ins!("vmovdqu8", Vx, Wx), ins!("vmovdqu16", Vx, Wx)),
    );
    t[0x70] = by_prefix!(
        BAD,
        ins!("vpshufhw", Vx, Wx, Ib),
        w0!(ins!("vpshufd", Vx, Wbd, Ib)),
        ins!("vpshuflw", Vx, Wx, Ib),
    );
    t[0x71] = p66!(by_reg!(
        BAD,
        BAD,
        ins!("vpsrlw", Hx, Wx, Ib),
        BAD,
        ins!("vpsraw", Hx, Wx, Ib),
        BAD,
        ins!("vpsllw", Hx, Wx, Ib),
        BAD
    ));
    t[0x72] = p66!(by_reg!(
        ins!("vpror%DQ", Hx, Wbx, Ib),
        ins!("vprol%DQ", Hx, Wbx, Ib),
        w0!(ins!("vpsrld", Hx, Wbd, Ib)),
        BAD,
        ins!("vpsra%DQ", Hx, Wbx, Ib),
        BAD,
        w0!(ins!("vpslld", Hx, Wbd, Ib)),
        BAD
    ));
    t[0x73] = p66!(by_reg!(
        BAD,
        BAD,
        w1!(ins!("vpsrlq", Hx, Wbq, Ib)),
        ins!("vpsrldq", Hx, Wx, Ib),
        BAD,
        BAD,
        w1!(ins!("vpsllq", Hx, Wbq, Ib)),
        ins!("vpslldq", Hx, Wx, Ib)
    ));
    t[0x74] = kcmp!("vpcmpeqb", Wx);
    t[0x75] = kcmp!("vpcmpeqw", Wx);
    t[0x76] = kcmp!("vpcmpeqd", Wbd);
    t[0x78] = by_prefix!(
        by_w!(ins!("vcvttps2udq", Vx, Wbd, Sae), ins!("vcvttpd2udq%XY", Vh, Wbq, Sae)),
        ins!("vcvttss2usi", Gdq, Wd, Sae),
        by_w!(ins!("vcvttps2uqq", Vx, Whb, Sae), ins!("vcvttpd2uqq", Vx, Wbq, Sae)),
        ins!("vcvttsd2usi", Gdq, Wq, Sae),
    );
    t[0x79] = by_prefix!(
        by_w!(ins!("vcvtps2udq", Vx, Wbd, Rc), ins!("vcvtpd2udq%XY", Vh, Wbq, Rc)),
        ins!("vcvtss2usi", Gdq, Wd, Rc),
        by_w!(ins!("vcvtps2uqq", Vx, Whb, Rc), ins!("vcvtpd2uqq", Vx, Wbq, Rc)),
        ins!("vcvtsd2usi", Gdq, Wq, Rc),
    );
    t[0x7a] = by_prefix!(
        BAD,
        by_w!(ins!("vcvtudq2pd", Vx, Whb), ins!("vcvtuqq2pd", Vx, Wbq, Rc)),
        by_w!(ins!("vcvttps2qq", Vx, Whb, Sae), ins!("vcvttpd2qq", Vx, Wbq, Sae)),
        by_w!(ins!("vcvtudq2ps", Vx, Wbd, Rc), ins!("vcvtuqq2ps%XY", Vh, Wbq, Rc)),
    );
    t[0x7b] = by_prefix!(
        BAD,
        ins!("vcvtusi2ss%LQ", Vo, Ho, Rc, Edq),
        by_w!(ins!("vcvtps2qq", Vx, Whb, Rc), ins!("vcvtpd2qq", Vx, Wbq, Rc)),
        ins!("vcvtusi2sd%LQ", Vo, Ho, Rc, Edq),
    );
    t[0x7e] = by_prefix!(BAD, w1!(ins!("vmovq", Vo, Wq)), ins!("vmovK", Edq, Vo), BAD);
    t[0x7f] = by_prefix!(
        BAD,
        by_w!(ins!("vmovdqu32", Wx, Vx), ins!("vmovdqu64", Wx, Vx)),
        by_w!(ins!("vmovdqa32", Wx, Vx), ins!("vmovdqa64", Wx, Vx)),
        by_w!(ins!("vmovdqu8", Wx, Vx), ins!("vmovdqu16", Wx, Vx)),
    );

    t[0xc2] = by_prefix!(
        w0!(ins!("vcmp%CCps", KG, Hx, Wbx, Sae, CMP_AVX)),
        w0!(ins!("vcmp%CCss", KG, Ho, Wd, Sae, CMP_AVX)),
        w1!(ins!("vcmp%CCpd", KG, Hx, Wbx, Sae, CMP_AVX)),
        w1!(ins!("vcmp%CCsd", KG, Ho, Wq, Sae, CMP_AVX)),
    );
    t[0xc4] = p66!(by_mod!(ins!("vpinsrw", Vo, Ho, Mw, Ib), ins!("vpinsrw", Vo, Ho, Rd, Ib)));
    t[0xc5] = p66!(ins!("vpextrw", Gdq, Uo, Ib));
    t[0xc6] = by_prefix!(
        w0!(ins!("vshufps", Vx, Hx, Wbx, Ib)),
        BAD,
        w1!(ins!("vshufpd", Vx, Hx, Wbx, Ib)),
        BAD,
    );

    t[0xd1] = evex3!("vpsrlw", Wo);
    t[0xd2] = p66!(w0!(ins!("vpsrld", Vx, Hx, Wo)));
    t[0xd3] = p66!(w1!(ins!("vpsrlq", Vx, Hx, Wo)));
    t[0xd4] = p66!(w1!(ins!("vpaddq", Vx, Hx, Wbq)));
    t[0xd5] = evex3!("vpmullw", Wx);
    t[0xd6] = p66!(w1!(ins!("vmovq", Wq, Vo)));
    t[0xd8] = evex3!("vpsubusb", Wx);
    t[0xd9] = evex3!("vpsubusw", Wx);
    t[0xda] = evex3!("vpminub", Wx);
    t[0xdb] = evex3!("vpand%DQ", Wbx);
    t[0xdc] = evex3!("vpaddusb", Wx);
    t[0xdd] = evex3!("vpaddusw", Wx);
    t[0xde] = evex3!("vpmaxub", Wx);
    t[0xdf] = evex3!("vpandn%DQ", Wbx);

    t[0xe0] = evex3!("vpavgb", Wx);
    t[0xe1] = evex3!("vpsraw", Wo);
    t[0xe2] = evex3!("vpsra%DQ", Wo);
    t[0xe3] = evex3!("vpavgw", Wx);
    t[0xe4] = evex3!("vpmulhuw", Wx);
    t[0xe5] = evex3!("vpmulhw", Wx);
    t[0xe6] = by_prefix!(
        BAD,
        by_w!(ins!("vcvtdq2pd", Vx, Whb), ins!("vcvtqq2pd", Vx, Wbq, Rc)),
        w1!(ins!("vcvttpd2dq%XY", Vh, Wbq, Sae)),
        w1!(ins!("vcvtpd2dq%XY", Vh, Wbq, Rc)),
    );
    t[0xe7] = p66!(by_mod!(ins!("vmovntdq", Mx, Vx), BAD));
    t[0xe8] = evex3!("vpsubsb", Wx);
    t[0xe9] = evex3!("vpsubsw", Wx);
    t[0xea] = evex3!("vpminsw", Wx);
    t[0xeb] = evex3!("vpor%DQ", Wbx);
    t[0xec] = evex3!("vpaddsb", Wx);
    t[0xed] = evex3!("vpaddsw", Wx);
    t[0xee] = evex3!("vpmaxsw", Wx);
    t[0xef] = evex3!("vpxor%DQ", Wbx);

    t[0xf1] = evex3!("vpsllw", Wo);
    t[0xf2] = p66!(w0!(ins!("vpslld", Vx, Hx, Wo)));
    t[0xf3] = p66!(w1!(ins!("vpsllq", Vx, Hx, Wo)));
    t[0xf4] = p66!(w1!(ins!("vpmuludq", Vx, Hx, Wbq)));
    t[0xf5] = evex3!("vpmaddwd", Wx);
    t[0xf6] = evex3!("vpsadbw", Wx);
    t[0xf8] = evex3!("vpsubb", Wx);
    t[0xf9] = evex3!("vpsubw", Wx);
    t[0xfa] = p66!(w0!(ins!("vpsubd", Vx, Hx, Wbd)));
    t[0xfb] = p66!(w1!(ins!("vpsubq", Vx, Hx, Wbq)));
    t[0xfc] = evex3!("vpaddb", Wx);
    t[0xfd] = evex3!("vpaddw", Wx);
    t[0xfe] = p66!(w0!(ins!("vpaddd", Vx, Hx, Wbd)));
    t
};

/// One FMA column with rounding control.
macro_rules! fma_column {
    ($t:ident, $base:literal, $order:literal) => {
        $t[$base + 0x6] = p66!(ins!(concat!("vfmaddsub", $order, "p%XW"), Vx, Hx, Wbx, Rc));
        $t[$base + 0x7] = p66!(ins!(concat!("vfmsubadd", $order, "p%XW"), Vx, Hx, Wbx, Rc));
        $t[$base + 0x8] = p66!(ins!(concat!("vfmadd", $order, "p%XW"), Vx, Hx, Wbx, Rc));
        $t[$base + 0x9] = p66!(ins!(concat!("vfmadd", $order, "s%XW"), Vo, Ho, Wsw, Rc));
        $t[$base + 0xa] = p66!(ins!(concat!("vfmsub", $order, "p%XW"), Vx, Hx, Wbx, Rc));
        $t[$base + 0xb] = p66!(ins!(concat!("vfmsub", $order, "s%XW"), Vo, Ho, Wsw, Rc));
        $t[$base + 0xc] = p66!(ins!(concat!("vfnmadd", $order, "p%XW"), Vx, Hx, Wbx, Rc));
        $t[$base + 0xd] = p66!(ins!(concat!("vfnmadd", $order, "s%XW"), Vo, Ho, Wsw, Rc));
        $t[$base + 0xe] = p66!(ins!(concat!("vfnmsub", $order, "p%XW"), Vx, Hx, Wbx, Rc));
        $t[$base + 0xf] = p66!(ins!(concat!("vfnmsub", $order, "s%XW"), Vo, Ho, Wsw, Rc));
    };
}

/// Down-converting moves under F3 and the matching sign/zero extension
/// under 66.
macro_rules! narrow {
    ($down:literal, $narrow:expr, $extend:literal) => {
        by_prefix!(
            BAD,
            w0!(ins!($down, $narrow, Vx)),
            ins!($extend, Vx, $narrow),
            BAD,
        )
    };
}

pub(crate) static EVEX_MAP2: [Entry; 256] = {
    let mut t = [BAD; 256];

    t[0x00] = evex3!("vpshufb", Wx);
    t[0x04] = evex3!("vpmaddubsw", Wx);
    t[0x0b] = evex3!("vpmulhrsw", Wx);
    t[0x0c] = p66!(w0!(ins!("vpermilps", Vx, Hx, Wbd)));
    t[0x0d] = p66!(w1!(ins!("vpermilpd", Vx, Hx, Wbq)));
    t[0x10] = by_prefix!(BAD, w0!(ins!("vpmovuswb", Wh, Vx)), w1!(ins!("vpsrlvw", Vx, Hx, Wx)), BAD);
    t[0x11] = by_prefix!(BAD, w0!(ins!("vpmovusdb", Wqu, Vx)), w1!(ins!("vpsravw", Vx, Hx, Wx)), BAD);
    t[0x12] = by_prefix!(BAD, w0!(ins!("vpmovusqb", We, Vx)), w1!(ins!("vpsllvw", Vx, Hx, Wx)), BAD);
    t[0x13] = by_prefix!(BAD, w0!(ins!("vpmovusdw", Wh, Vx)), w0!(ins!("vcvtph2ps", Vx, Wh, Sae)), BAD);
    t[0x14] = by_prefix!(BAD, w0!(ins!("vpmovusqw", Wqu, Vx)), ins!("vprorv%DQ", Vx, Hx, Wbx), BAD);
    t[0x15] = by_prefix!(BAD, w0!(ins!("vpmovusqd", Wh, Vx)), ins!("vprolv%DQ", Vx, Hx, Wbx), BAD);
    t[0x16] = p66!(ins!("vpermp%XW", Vx, Hx, Wbx));
    t[0x18] = p66!(w0!(ins!("vbroadcastss", Vx, Wd)));
    t[0x19] = p66!(by_w!(ins!("vbroadcastf32x2", Vx, Wq), ins!("vbroadcastsd", Vx, Wq)));
    t[0x1a] = p66!(by_mod!(
        by_w!(ins!("vbroadcastf32x4", Vx, Mxmm), ins!("vbroadcastf64x2", Vx, Mxmm)),
        BAD
    ));
    t[0x1b] = p66!(by_mod!(
        by_w!(ins!("vbroadcastf32x8", Vx, Mymm), ins!("vbroadcastf64x4", Vx, Mymm)),
        BAD
    ));
    t[0x1c] = p66!(ins!("vpabsb", Vx, Wx));
    t[0x1d] = p66!(ins!("vpabsw", Vx, Wx));
    t[0x1e] = p66!(w0!(ins!("vpabsd", Vx, Wbd)));
    t[0x1f] = p66!(w1!(ins!("vpabsq", Vx, Wbq)));

    t[0x20] = narrow!("vpmovswb", Wh, "vpmovsxbw");
    t[0x21] = narrow!("vpmovsdb", Wqu, "vpmovsxbd");
    t[0x22] = narrow!("vpmovsqb", We, "vpmovsxbq");
    t[0x23] = narrow!("vpmovsdw", Wh, "vpmovsxwd");
    t[0x24] = narrow!("vpmovsqw", Wqu, "vpmovsxwq");
    t[0x25] = narrow!("vpmovsqd", Wh, "vpmovsxdq");
    t[0x26] = by_prefix!(
        BAD,
        by_w!(ins!("vptestnmb", KG, Hx, Wx), ins!("vptestnmw", KG, Hx, Wx)),
        by_w!(ins!("vptestmb", KG, Hx, Wx), ins!("vptestmw", KG, Hx, Wx)),
        BAD,
    );
    t[0x27] = by_prefix!(
        BAD,
        ins!("vptestnm%DQ", KG, Hx, Wbx),
        ins!("vptestm%DQ", KG, Hx, Wbx),
        BAD,
    );
    t[0x28] = by_prefix!(
        BAD,
        by_mod!(BAD, ins!("vpmovm2%BW", Vx, KR)),
        w1!(ins!("vpmuldq", Vx, Hx, Wbq)),
        BAD,
    );
    t[0x29] = by_prefix!(
        BAD,
        by_mod!(BAD, ins!("vpmov%BW2m", KG, Ux)),
        w1!(ins!("vpcmpeqq", KG, Hx, Wbq)),
        BAD,
    );
    t[0x2a] = by_prefix!(
        BAD,
        by_mod!(BAD, w1!(ins!("vpbroadcastmb2q", Vx, KR))),
        by_mod!(w0!(ins!("vmovntdqa", Vx, Mx)), BAD),
        BAD,
    );
    t[0x2b] = p66!(w0!(ins!("vpackusdw", Vx, Hx, Wbd)));
    t[0x2c] = p66!(ins!("vscalefp%XW", Vx, Hx, Wbx, Rc));
    t[0x2d] = p66!(ins!("vscalefs%XW", Vo, Ho, Wsw, Rc));

    t[0x30] = narrow!("vpmovwb", Wh, "vpmovzxbw");
    t[0x31] = narrow!("vpmovdb", Wqu, "vpmovzxbd");
    t[0x32] = narrow!("vpmovqb", We, "vpmovzxbq");
    t[0x33] = narrow!("vpmovdw", Wh, "vpmovzxwd");
    t[0x34] = narrow!("vpmovqw", Wqu, "vpmovzxwq");
    t[0x35] = narrow!("vpmovqd", Wh, "vpmovzxdq");
    t[0x36] = p66!(ins!("vperm%DQ", Vx, Hx, Wbx));
    t[0x37] = p66!(w1!(ins!("vpcmpgtq", KG, Hx, Wbq)));
    t[0x38] = by_prefix!(BAD, by_mod!(BAD, ins!("vpmovm2%DQ", Vx, KR)), ins!("vpminsb", Vx, Hx, Wx), BAD);
    t[0x39] = by_prefix!(
        BAD,
        by_mod!(BAD, ins!("vpmov%DQ2m", KG, Ux)),
        ins!("vpmins%DQ", Vx, Hx, Wbx),
        BAD,
    );
    t[0x3a] = by_prefix!(
        BAD,
        by_mod!(BAD, w0!(ins!("vpbroadcastmw2d", Vx, KR))),
        ins!("vpminuw", Vx, Hx, Wx),
        BAD,
    );
    t[0x3b] = evex3!("vpminu%DQ", Wbx);
    t[0x3c] = evex3!("vpmaxsb", Wx);
    t[0x3d] = evex3!("vpmaxs%DQ", Wbx);
    t[0x3e] = evex3!("vpmaxuw", Wx);
    t[0x3f] = evex3!("vpmaxu%DQ", Wbx);

    t[0x40] = evex3!("vpmull%DQ", Wbx);
    t[0x42] = p66!(ins!("vgetexpp%XW", Vx, Wbx, Sae));
    t[0x43] = p66!(ins!("vgetexps%XW", Vo, Ho, Wsw, Sae));
    t[0x44] = p66!(ins!("vplzcnt%DQ", Vx, Wbx));
    t[0x45] = evex3!("vpsrlv%DQ", Wbx);
    t[0x46] = evex3!("vpsrav%DQ", Wbx);
    t[0x47] = evex3!("vpsllv%DQ", Wbx);
    t[0x4c] = p66!(ins!("vrcp14p%XW", Vx, Wbx));
    t[0x4d] = p66!(ins!("vrcp14s%XW", Vo, Ho, Wsw));
    t[0x4e] = p66!(ins!("vrsqrt14p%XW", Vx, Wbx));
    t[0x4f] = p66!(ins!("vrsqrt14s%XW", Vo, Ho, Wsw));

    t[0x50] = p66!(w0!(ins!("vpdpbusd", Vx, Hx, Wbd)));
    t[0x51] = p66!(w0!(ins!("vpdpbusds", Vx, Hx, Wbd)));
    t[0x52] = p66!(w0!(ins!("vpdpwssd", Vx, Hx, Wbd)));
    t[0x53] = p66!(w0!(ins!("vpdpwssds", Vx, Hx, Wbd)));
    t[0x54] = p66!(ins!("vpopcnt%BW", Vx, Wx));
    t[0x55] = p66!(ins!("vpopcnt%DQ", Vx, Wbx));
    t[0x58] = p66!(w0!(ins!("vpbroadcastd", Vx, Wd)));
    t[0x59] = p66!(by_w!(ins!("vbroadcasti32x2", Vx, Wq), ins!("vpbroadcastq", Vx, Wq)));
    t[0x5a] = p66!(by_mod!(
        by_w!(ins!("vbroadcasti32x4", Vx, Mxmm), ins!("vbroadcasti64x2", Vx, Mxmm)),
        BAD
    ));
    t[0x5b] = p66!(by_mod!(
        by_w!(ins!("vbroadcasti32x8", Vx, Mymm), ins!("vbroadcasti64x4", Vx, Mymm)),
        BAD
    ));
    t[0x62] = p66!(ins!("vpexpand%BW", Vx, Wx));
    t[0x63] = p66!(ins!("vpcompress%BW", Wx, Vx));
    t[0x64] = evex3!("vpblendm%DQ", Wbx);
    t[0x65] = evex3!("vblendmp%XW", Wbx);
    t[0x66] = evex3!("vpblendm%BW", Wx);

    t[0x70] = p66!(w1!(ins!("vpshldvw", Vx, Hx, Wx)));
    t[0x71] = evex3!("vpshldv%DQ", Wbx);
    t[0x72] = p66!(w1!(ins!("vpshrdvw", Vx, Hx, Wx)));
    t[0x73] = evex3!("vpshrdv%DQ", Wbx);
    t[0x75] = evex3!("vpermi2%BW", Wx);
    t[0x76] = evex3!("vpermi2%DQ", Wbx);
    t[0x77] = evex3!("vpermi2p%XW", Wbx);
    t[0x78] = p66!(w0!(ins!("vpbroadcastb", Vx, Wb)));
    t[0x79] = p66!(w0!(ins!("vpbroadcastw", Vx, Ww)));
    t[0x7a] = p66!(by_mod!(BAD, w0!(ins!("vpbroadcastb", Vx, Rd))));
    t[0x7b] = p66!(by_mod!(BAD, w0!(ins!("vpbroadcastw", Vx, Rd))));
    t[0x7c] = p66!(by_mod!(
        BAD,
        by_w!(ins!("vpbroadcastd", Vx, Rd), ins!("vpbroadcastq", Vx, Rq))
    ));
    t[0x7d] = evex3!("vpermt2%BW", Wx);
    t[0x7e] = evex3!("vpermt2%DQ", Wbx);
    t[0x7f] = evex3!("vpermt2p%XW", Wbx);

    t[0x83] = p66!(w1!(ins!("vpmultishiftqb", Vx, Hx, Wbq)));
    t[0x88] = p66!(ins!("vexpandp%XW", Vx, Wx));
    t[0x89] = p66!(ins!("vpexpand%DQ", Vx, Wx));
    t[0x8a] = p66!(ins!("vcompressp%XW", Wx, Vx));
    t[0x8b] = p66!(ins!("vpcompress%DQ", Wx, Vx));
    t[0x8d] = evex3!("vperm%BW", Wx);
    t[0x8f] = p66!(w0!(ins!("vpshufbitqmb", KG, Hx, Wx)));

    t[0x90] = p66!(by_w!(ins!("vpgatherdd", Vx, VSIBd), ins!("vpgatherdq", Vx, VSIBqh)));
    t[0x91] = p66!(by_w!(ins!("vpgatherqd", Vh, VSIBd), ins!("vpgatherqq", Vx, VSIBq)));
    t[0x92] = p66!(by_w!(ins!("vgatherdps", Vx, VSIBd), ins!("vgatherdpd", Vx, VSIBqh)));
    t[0x93] = p66!(by_w!(ins!("vgatherqps", Vh, VSIBd), ins!("vgatherqpd", Vx, VSIBq)));
    t[0xa0] = p66!(by_w!(ins!("vpscatterdd", VSIBd, Vx), ins!("vpscatterdq", VSIBqh, Vx)));
    t[0xa1] = p66!(by_w!(ins!("vpscatterqd", VSIBd, Vh), ins!("vpscatterqq", VSIBq, Vx)));
    t[0xa2] = p66!(by_w!(ins!("vscatterdps", VSIBd, Vx), ins!("vscatterdpd", VSIBqh, Vx)));
    t[0xa3] = p66!(by_w!(ins!("vscatterqps", VSIBd, Vh), ins!("vscatterqpd", VSIBq, Vx)));

    fma_column!(t, 0x90, "132");
    fma_column!(t, 0xa0, "213");
    fma_column!(t, 0xb0, "231");

    t[0xb4] = p66!(w1!(ins!("vpmadd52luq", Vx, Hx, Wbq)));
    t[0xb5] = p66!(w1!(ins!("vpmadd52huq", Vx, Hx, Wbq)));
    t[0xc4] = p66!(ins!("vpconflict%DQ", Vx, Wbx));
    t[0xc8] = p66!(ins!("vexp2p%XW", Vx, Wbx, Sae));
    t[0xca] = p66!(ins!("vrcp28p%XW", Vx, Wbx, Sae));
    t[0xcb] = p66!(ins!("vrcp28s%XW", Vo, Ho, Wsw, Sae));
    t[0xcc] = p66!(ins!("vrsqrt28p%XW", Vx, Wbx, Sae));
    t[0xcd] = p66!(ins!("vrsqrt28s%XW", Vo, Ho, Wsw, Sae));
    t[0xcf] = p66!(w0!(ins!("vgf2p8mulb", Vx, Hx, Wx)));
    t[0xdc] = evex3!("vaesenc", Wx);
    t[0xdd] = evex3!("vaesenclast", Wx);
    t[0xde] = evex3!("vaesdec", Wx);
    t[0xdf] = evex3!("vaesdeclast", Wx);
    t
};

pub(crate) static EVEX_MAP3: [Entry; 256] = {
    let mut t = [BAD; 256];

    t[0x00] = p66!(w1!(ins!("vpermq", Vx, Wbq, Ib)));
    t[0x01] = p66!(w1!(ins!("vpermpd", Vx, Wbq, Ib)));
    t[0x03] = p66!(ins!("valign%DQ", Vx, Hx, Wbx, Ib));
    t[0x04] = p66!(w0!(ins!("vpermilps", Vx, Wbd, Ib)));
    t[0x05] = p66!(w1!(ins!("vpermilpd", Vx, Wbq, Ib)));
    t[0x08] = p66!(w0!(ins!("vrndscaleps", Vx, Wbd, Sae, Ib)));
    t[0x09] = p66!(w1!(ins!("vrndscalepd", Vx, Wbq, Sae, Ib)));
    t[0x0a] = p66!(w0!(ins!("vrndscaless", Vo, Ho, Wd, Sae, Ib)));
    t[0x0b] = p66!(w1!(ins!("vrndscalesd", Vo, Ho, Wq, Sae, Ib)));
    t[0x0f] = p66!(ins!("vpalignr", Vx, Hx, Wx, Ib));

    t[0x14] = p66!(by_mod!(ins!("vpextrb", Mb, Vo, Ib), ins!("vpextrb", Rd, Vo, Ib)));
    t[0x15] = p66!(by_mod!(ins!("vpextrw", Mw, Vo, Ib), ins!("vpextrw", Rd, Vo, Ib)));
    t[0x16] = p66!(ins!("vpextrK", Edq, Vo, Ib));
    t[0x17] = p66!(ins!("vextractps", Ed, Vo, Ib));
    t[0x18] = lanes!("vinsertf32x4", "vinsertf64x2", Vx, Hx, Wo, Ib);
    t[0x19] = lanes!("vextractf32x4", "vextractf64x2", Wo, Vx, Ib);
    t[0x1a] = lanes!("vinsertf32x8", "vinsertf64x4", Vx, Hx, Wy, Ib);
    t[0x1b] = lanes!("vextractf32x8", "vextractf64x4", Wy, Vx, Ib);
    t[0x1d] = p66!(w0!(ins!("vcvtps2ph", Wh, Vx, Sae, Ib)));
    t[0x1e] = p66!(ins!("vpcmp%CCu%DQ", KG, Hx, Wbx, CMP_VPCMP));
    t[0x1f] = p66!(ins!("vpcmp%CC%DQ", KG, Hx, Wbx, CMP_VPCMP));

    t[0x20] = p66!(by_mod!(ins!("vpinsrb", Vo, Ho, Mb, Ib), ins!("vpinsrb", Vo, Ho, Rd, Ib)));
    t[0x21] = p66!(w0!(ins!("vinsertps", Vo, Ho, Wd, Ib)));
    t[0x22] = p66!(ins!("vpinsrK", Vo, Ho, Edq, Ib));
    t[0x23] = lanes!("vshuff32x4", "vshuff64x2", Vx, Hx, Wbx, Ib);
    t[0x25] = p66!(ins!("vpternlog%DQ", Vx, Hx, Wbx, Ib));
    t[0x26] = p66!(ins!("vgetmantp%XW", Vx, Wbx, Sae, Ib));
    t[0x27] = p66!(ins!("vgetmants%XW", Vo, Ho, Wsw, Sae, Ib));

    t[0x38] = lanes!("vinserti32x4", "vinserti64x2", Vx, Hx, Wo, Ib);
    t[0x39] = lanes!("vextracti32x4", "vextracti64x2", Wo, Vx, Ib);
    t[0x3a] = lanes!("vinserti32x8", "vinserti64x4", Vx, Hx, Wy, Ib);
    t[0x3b] = lanes!("vextracti32x8", "vextracti64x4", Wy, Vx, Ib);
    t[0x3e] = p66!(ins!("vpcmp%CCu%BW", KG, Hx, Wx, CMP_VPCMP));
    t[0x3f] = p66!(ins!("vpcmp%CC%BW", KG, Hx, Wx, CMP_VPCMP));

    t[0x42] = p66!(w0!(ins!("vdbpsadbw", Vx, Hx, Wx, Ib)));
    t[0x43] = lanes!("vshufi32x4", "vshufi64x2", Vx, Hx, Wbx, Ib);
    t[0x44] = p66!(ins!("vpclmul%CCqdq", Vx, Hx, Wx, CMP_CLMUL));
    t[0x50] = p66!(ins!("vrangep%XW", Vx, Hx, Wbx, Sae, Ib));
    t[0x51] = p66!(ins!("vranges%XW", Vo, Ho, Wsw, Sae, Ib));
    t[0x54] = p66!(ins!("vfixupimmp%XW", Vx, Hx, Wbx, Sae, Ib));
    t[0x55] = p66!(ins!("vfixupimms%XW", Vo, Ho, Wsw, Sae, Ib));
    t[0x56] = p66!(ins!("vreducep%XW", Vx, Wbx, Sae, Ib));
    t[0x57] = p66!(ins!("vreduces%XW", Vo, Ho, Wsw, Sae, Ib));
    t[0x66] = p66!(ins!("vfpclassp%XW%XZ", KG, Wbx, Ib));
    t[0x67] = p66!(ins!("vfpclasss%XW", KG, Wsw, Ib));

    t[0x70] = p66!(w1!(ins!("vpshldw", Vx, Hx, Wx, Ib)));
    t[0x71] = p66!(ins!("vpshld%DQ", Vx, Hx, Wbx, Ib));
    t[0x72] = p66!(w1!(ins!("vpshrdw", Vx, Hx, Wx, Ib)));
    t[0x73] = p66!(ins!("vpshrd%DQ", Vx, Hx, Wbx, Ib));
    t[0xce] = p66!(w1!(ins!("vgf2p8affineqb", Vx, Hx, Wbq, Ib)));
    t[0xcf] = p66!(w1!(ins!("vgf2p8affineinvqb", Vx, Hx, Wbq, Ib)));
    t
};

#[cfg(test)]
mod tests {
    use super::super::Redirect;
    use super::*;

    fn resolve(entry: Entry, path: &[usize]) -> Entry {
        let mut entry = entry;
        for &slot in path {
            entry = match entry {
                Entry::Redirect(_, table) => table[slot],
                other => return other,
            };
        }
        entry
    }

    #[test]
    fn test_movdqu_sized_by_w() {
        assert!(matches!(resolve(EVEX_MAP1[0x6f], &[3, 0]), Entry::Insn(i) if i.template == "vmovdqu8"));
        assert!(matches!(resolve(EVEX_MAP1[0x6f], &[1, 1]), Entry::Insn(i) if i.template == "vmovdqu64"));
        assert!(matches!(resolve(EVEX_MAP1[0x6f], &[2, 0]), Entry::Insn(i) if i.template == "vmovdqa32"));
    }

    #[test]
    fn test_scalar_arith_requires_matching_w() {
        assert!(matches!(resolve(EVEX_MAP1[0x58], &[1, 1]), Entry::Bad));
        assert!(matches!(resolve(EVEX_MAP1[0x58], &[3, 1]), Entry::Insn(i) if i.template == "vaddsd"));
    }

    #[test]
    fn test_compares_write_masks() {
        let Entry::Insn(insn) = resolve(EVEX_MAP3[0x1f], &[2]) else {
            panic!("expected vpcmp");
        };
        assert_eq!(insn.ops[0], KG);
        assert!(matches!(EVEX_MAP3[0x1f], Entry::Redirect(Redirect::Prefix, _)));
    }

    #[test]
    fn test_gathers_use_vsib() {
        let Entry::Insn(insn) = resolve(EVEX_MAP2[0x92], &[2, 0]) else {
            panic!("expected vgatherdps");
        };
        assert_eq!(insn.template, "vgatherdps");
        assert_eq!(insn.ops[1], VSIBd);
    }
}
