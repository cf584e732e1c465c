//! VEX opcode maps 1 (0F), 2 (0F38) and 3 (0F3A).
//!
//! VEX.pp stands in for the mandatory prefix, so every entry that needs
//! one goes through a [none, F3, 66, F2] split. Scalar forms ignore
//! VEX.L and always name xmm registers.

use super::operands::*;
use super::{by_len, by_mod, by_prefix, by_reg, by_w, ins, p66, pnone, select, Attrs, Entry, BAD};

/// Three-operand integer op under 66: `Vx, Hx, Wx`.
macro_rules! avx3 {
    ($name:literal) => {
        p66!(ins!($name, Vx, Hx, Wx))
    };
}

/// Two-operand op under 66: `Vx, Wx`.
macro_rules! avx2 {
    ($name:literal) => {
        p66!(ins!($name, Vx, Wx))
    };
}

/// Floating-point arithmetic row: ps, ss, pd, sd.
macro_rules! arith {
    ($op:literal) => {
        by_prefix!(
            ins!(concat!($op, "ps"), Vx, Hx, Wx),
            ins!(concat!($op, "ss"), Vo, Ho, Wd),
            ins!(concat!($op, "pd"), Vx, Hx, Wx),
            ins!(concat!($op, "sd"), Vo, Ho, Wq),
        )
    };
}

/// Packed-only row: ps and pd.
macro_rules! packed {
    ($op:literal) => {
        by_prefix!(
            ins!(concat!($op, "ps"), Vx, Hx, Wx),
            BAD,
            ins!(concat!($op, "pd"), Vx, Hx, Wx),
            BAD,
        )
    };
}

/// Mask-register op sized by prefix and W: w/q without a prefix, b/d under 66.
macro_rules! kmask {
    ($name:literal, $($op:expr),+) => {
        by_prefix!(
            by_w!(ins!(concat!($name, "w"), $($op),+), ins!(concat!($name, "q"), $($op),+)),
            BAD,
            by_w!(ins!(concat!($name, "b"), $($op),+), ins!(concat!($name, "d"), $($op),+)),
            BAD,
        )
    };
}

/// Two-source mask op, defined only for VEX.L=1.
macro_rules! kbinary {
    ($name:literal) => {
        by_len!(BAD, kmask!($name, KG, KH, KR))
    };
}

/// VEX-encoded shift-by-immediate group on the 66 prefix.
macro_rules! shift_imm {
    ($r2:expr, $r3:expr, $r4:expr, $r6:expr, $r7:expr) => {
        p66!(by_mod!(BAD, by_reg!(BAD, BAD, $r2, $r3, $r4, BAD, $r6, $r7)))
    };
}

pub(crate) static VEX_MAP1: [Entry; 256] = {
    let mut t = [BAD; 256];

    t[0x10] = by_prefix!(
        ins!("vmovups", Vx, Wx),
        by_mod!(ins!("vmovss", Vo, Md), ins!("vmovss", Vo, Ho, Uo)),
        ins!("vmovupd", Vx, Wx),
        by_mod!(ins!("vmovsd", Vo, Mq), ins!("vmovsd", Vo, Ho, Uo)),
    );
    t[0x11] = by_prefix!(
        ins!("vmovups", Wx, Vx),
        by_mod!(ins!("vmovss", Md, Vo), ins!("vmovss", Uo, Ho, Vo)),
        ins!("vmovupd", Wx, Vx),
        by_mod!(ins!("vmovsd", Mq, Vo), ins!("vmovsd", Uo, Ho, Vo)),
    );
    t[0x12] = by_prefix!(
        by_mod!(ins!("vmovlps", Vo, Ho, Mq), ins!("vmovhlps", Vo, Ho, Uo)),
        ins!("vmovsldup", Vx, Wx),
        by_mod!(ins!("vmovlpd", Vo, Ho, Mq), BAD),
        by_len!(ins!("vmovddup", Vo, Wq), ins!("vmovddup", Vx, Wx)),
    );
    t[0x13] = by_prefix!(
        by_mod!(ins!("vmovlps", Mq, Vo), BAD),
        BAD,
        by_mod!(ins!("vmovlpd", Mq, Vo), BAD),
        BAD,
    );
    t[0x14] = packed!("vunpckl");
    t[0x15] = packed!("vunpckh");
    t[0x16] = by_prefix!(
        by_mod!(ins!("vmovhps", Vo, Ho, Mq), ins!("vmovlhps", Vo, Ho, Uo)),
        ins!("vmovshdup", Vx, Wx),
        by_mod!(ins!("vmovhpd", Vo, Ho, Mq), BAD),
        BAD,
    );
    t[0x17] = by_prefix!(
        by_mod!(ins!("vmovhps", Mq, Vo), BAD),
        BAD,
        by_mod!(ins!("vmovhpd", Mq, Vo), BAD),
        BAD,
    );

    t[0x28] = by_prefix!(ins!("vmovaps", Vx, Wx), BAD, ins!("vmovapd", Vx, Wx), BAD);
    t[0x29] = by_prefix!(ins!("vmovaps", Wx, Vx), BAD, ins!("vmovapd", Wx, Vx), BAD);
    t[0x2a] = by_prefix!(
        BAD,
        ins!("vcvtsi2ss%LQ", Vo, Ho, Edq),
        BAD,
        ins!("vcvtsi2sd%LQ", Vo, Ho, Edq),
    );
    t[0x2b] = by_prefix!(
        by_mod!(ins!("vmovntps", Mx, Vx), BAD),
        BAD,
        by_mod!(ins!("vmovntpd", Mx, Vx), BAD),
        BAD,
    );
    t[0x2c] = by_prefix!(BAD, ins!("vcvttss2si", Gdq, Wd), BAD, ins!("vcvttsd2si", Gdq, Wq));
    t[0x2d] = by_prefix!(BAD, ins!("vcvtss2si", Gdq, Wd), BAD, ins!("vcvtsd2si", Gdq, Wq));
    t[0x2e] = by_prefix!(ins!("vucomiss", Vo, Wd), BAD, ins!("vucomisd", Vo, Wq), BAD);
    t[0x2f] = by_prefix!(ins!("vcomiss", Vo, Wd), BAD, ins!("vcomisd", Vo, Wq), BAD);

    t[0x41] = kbinary!("kand");
    t[0x42] = kbinary!("kandn");
    t[0x44] = by_len!(kmask!("knot", KG, KR), BAD);
    t[0x45] = kbinary!("kor");
    t[0x46] = kbinary!("kxnor");
    t[0x47] = kbinary!("kxor");
    t[0x4a] = kbinary!("kadd");
    t[0x4b] = by_len!(
        BAD,
        by_prefix!(
            by_w!(ins!("kunpckwd", KG, KH, KR), ins!("kunpckdq", KG, KH, KR)),
            BAD,
            by_w!(ins!("kunpckbw", KG, KH, KR), BAD),
            BAD,
        )
    );

    t[0x50] = by_prefix!(ins!("vmovmskps", Gdq, Ux), BAD, ins!("vmovmskpd", Gdq, Ux), BAD);
    t[0x51] = by_prefix!(
        ins!("vsqrtps", Vx, Wx),
        ins!("vsqrtss", Vo, Ho, Wd),
        ins!("vsqrtpd", Vx, Wx),
        ins!("vsqrtsd", Vo, Ho, Wq),
    );
    t[0x52] = by_prefix!(ins!("vrsqrtps", Vx, Wx), ins!("vrsqrtss", Vo, Ho, Wd), BAD, BAD);
    t[0x53] = by_prefix!(ins!("vrcpps", Vx, Wx), ins!("vrcpss", Vo, Ho, Wd), BAD, BAD);
    t[0x54] = packed!("vand");
    t[0x55] = packed!("vandn");
    t[0x56] = packed!("vor");
    t[0x57] = packed!("vxor");
    t[0x58] = arith!("vadd");
    t[0x59] = arith!("vmul");
    t[0x5a] = by_prefix!(
        ins!("vcvtps2pd", Vx, Wh),
        ins!("vcvtss2sd", Vo, Ho, Wd),
        ins!("vcvtpd2ps%XY", Vo, Wx),
        ins!("vcvtsd2ss", Vo, Ho, Wq),
    );
    t[0x5b] = by_prefix!(
        ins!("vcvtdq2ps", Vx, Wx),
        ins!("vcvttps2dq", Vx, Wx),
        ins!("vcvtps2dq", Vx, Wx),
        BAD,
    );
    t[0x5c] = arith!("vsub");
    t[0x5d] = arith!("vmin");
    t[0x5e] = arith!("vdiv");
    t[0x5f] = arith!("vmax");

    t[0x60] = avx3!("vpunpcklbw");
    t[0x61] = avx3!("vpunpcklwd");
    t[0x62] = avx3!("vpunpckldq");
    t[0x63] = avx3!("vpacksswb");
    t[0x64] = avx3!("vpcmpgtb");
    t[0x65] = avx3!("vpcmpgtw");
    t[0x66] = avx3!("vpcmpgtd");
    t[0x67] = avx3!("vpackuswb");
    t[0x68] = avx3!("vpunpckhbw");
    t[0x69] = avx3!("vpunpckhwd");
    t[0x6a] = avx3!("vpunpckhdq");
    t[0x6b] = avx3!("vpackssdw");
    t[0x6c] = avx3!("vpunpcklqdq");
    t[0x6d] = avx3!("vpunpckhqdq");
    t[0x6e] = p66!(by_len!(ins!("vmovK", Vo, Edq), BAD));
    t[0x6f] = by_prefix!(BAD, ins!("vmovdqu", Vx, Wx), ins!("vmovdqa", Vx, Wx), BAD);
    t[0x70] = by_prefix!(
        BAD,
        ins!("vpshufhw", Vx, Wx, Ib),
        ins!("vpshufd", Vx, Wx, Ib),
        ins!("vpshuflw", Vx, Wx, Ib),
    );
    t[0x71] = shift_imm!(
        ins!("vpsrlw", Hx, Ux, Ib),
        BAD,
        ins!("vpsraw", Hx, Ux, Ib),
        ins!("vpsllw", Hx, Ux, Ib),
        BAD
    );
    t[0x72] = shift_imm!(
        ins!("vpsrld", Hx, Ux, Ib),
        BAD,
        ins!("vpsrad", Hx, Ux, Ib),
        ins!("vpslld", Hx, Ux, Ib),
        BAD
    );
    t[0x73] = shift_imm!(
        ins!("vpsrlq", Hx, Ux, Ib),
        ins!("vpsrldq", Hx, Ux, Ib),
        BAD,
        ins!("vpsllq", Hx, Ux, Ib),
        ins!("vpslldq", Hx, Ux, Ib)
    );
    t[0x74] = avx3!("vpcmpeqb");
    t[0x75] = avx3!("vpcmpeqw");
    t[0x76] = avx3!("vpcmpeqd");
    t[0x77] = pnone!(by_len!(ins!("vzeroupper"), ins!("vzeroall")));
    t[0x7c] = by_prefix!(BAD, BAD, ins!("vhaddpd", Vx, Hx, Wx), ins!("vhaddps", Vx, Hx, Wx));
    t[0x7d] = by_prefix!(BAD, BAD, ins!("vhsubpd", Vx, Hx, Wx), ins!("vhsubps", Vx, Hx, Wx));
    t[0x7e] = by_prefix!(
        BAD,
        by_len!(ins!("vmovq", Vo, Wq), BAD),
        by_len!(ins!("vmovK", Edq, Vo), BAD),
        BAD,
    );
    t[0x7f] = by_prefix!(BAD, ins!("vmovdqu", Wx, Vx), ins!("vmovdqa", Wx, Vx), BAD);

    t[0x90] = by_len!(
        by_prefix!(
            by_w!(ins!("kmovw", KG, KEw), ins!("kmovq", KG, KEq)),
            BAD,
            by_w!(ins!("kmovb", KG, KEb), ins!("kmovd", KG, KEd)),
            BAD,
        ),
        BAD
    );
    t[0x91] = by_len!(
        by_mod!(
            by_prefix!(
                by_w!(ins!("kmovw", Mw, KG), ins!("kmovq", Mq, KG)),
                BAD,
                by_w!(ins!("kmovb", Mb, KG), ins!("kmovd", Md, KG)),
                BAD,
            ),
            BAD
        ),
        BAD
    );
    t[0x92] = by_len!(
        by_mod!(
            BAD,
            by_prefix!(
                by_w!(ins!("kmovw", KG, Rd), BAD),
                BAD,
                by_w!(ins!("kmovb", KG, Rd), BAD),
                by_w!(ins!("kmovd", KG, Rd), ins!("kmovq", KG, Rq)),
            )
        ),
        BAD
    );
    t[0x93] = by_len!(
        by_mod!(
            BAD,
            by_prefix!(
                by_w!(ins!("kmovw", Gd, KR), BAD),
                BAD,
                by_w!(ins!("kmovb", Gd, KR), BAD),
                by_w!(ins!("kmovd", Gd, KR), ins!("kmovq", Gq, KR)),
            )
        ),
        BAD
    );
    t[0x98] = by_len!(kmask!("kortest", KG, KR), BAD);
    t[0x99] = by_len!(kmask!("ktest", KG, KR), BAD);

    t[0xae] = pnone!(by_mod!(
        by_reg!(BAD, BAD, ins!("vldmxcsr", Md), ins!("vstmxcsr", Md), BAD, BAD, BAD, BAD),
        BAD
    ));

    t[0xc2] = by_prefix!(
        ins!("vcmp%CCps", Vx, Hx, Wx, CMP_AVX),
        ins!("vcmp%CCss", Vo, Ho, Wd, CMP_AVX),
        ins!("vcmp%CCpd", Vx, Hx, Wx, CMP_AVX),
        ins!("vcmp%CCsd", Vo, Ho, Wq, CMP_AVX),
    );
    t[0xc4] = p66!(by_len!(
        by_mod!(ins!("vpinsrw", Vo, Ho, Mw, Ib), ins!("vpinsrw", Vo, Ho, Rd, Ib)),
        BAD
    ));
    t[0xc5] = p66!(by_len!(ins!("vpextrw", Gdq, Uo, Ib), BAD));
    t[0xc6] = by_prefix!(
        ins!("vshufps", Vx, Hx, Wx, Ib),
        BAD,
        ins!("vshufpd", Vx, Hx, Wx, Ib),
        BAD,
    );

    t[0xd0] = by_prefix!(BAD, BAD, ins!("vaddsubpd", Vx, Hx, Wx), ins!("vaddsubps", Vx, Hx, Wx));
    t[0xd1] = p66!(ins!("vpsrlw", Vx, Hx, Wo));
    t[0xd2] = p66!(ins!("vpsrld", Vx, Hx, Wo));
    t[0xd3] = p66!(ins!("vpsrlq", Vx, Hx, Wo));
    t[0xd4] = avx3!("vpaddq");
    t[0xd5] = avx3!("vpmullw");
    t[0xd6] = p66!(by_len!(ins!("vmovq", Wq, Vo), BAD));
    t[0xd7] = p66!(ins!("vpmovmskb", Gdq, Ux));
    t[0xd8] = avx3!("vpsubusb");
    t[0xd9] = avx3!("vpsubusw");
    t[0xda] = avx3!("vpminub");
    t[0xdb] = avx3!("vpand");
    t[0xdc] = avx3!("vpaddusb");
    t[0xdd] = avx3!("vpaddusw");
    t[0xde] = avx3!("vpmaxub");
    t[0xdf] = avx3!("vpandn");

    t[0xe0] = avx3!("vpavgb");
    t[0xe1] = p66!(ins!("vpsraw", Vx, Hx, Wo));
    t[0xe2] = p66!(ins!("vpsrad", Vx, Hx, Wo));
    t[0xe3] = avx3!("vpavgw");
    t[0xe4] = avx3!("vpmulhuw");
    t[0xe5] = avx3!("vpmulhw");
    t[0xe6] = by_prefix!(
        BAD,
        ins!("vcvtdq2pd", Vx, Wh),
        ins!("vcvttpd2dq%XY", Vo, Wx),
        ins!("vcvtpd2dq%XY", Vo, Wx),
    );
    t[0xe7] = p66!(by_mod!(ins!("vmovntdq", Mx, Vx), BAD));
    t[0xe8] = avx3!("vpsubsb");
    t[0xe9] = avx3!("vpsubsw");
    t[0xea] = avx3!("vpminsw");
    t[0xeb] = avx3!("vpor");
    t[0xec] = avx3!("vpaddsb");
    t[0xed] = avx3!("vpaddsw");
    t[0xee] = avx3!("vpmaxsw");
    t[0xef] = avx3!("vpxor");

    t[0xf0] = by_prefix!(BAD, BAD, BAD, by_mod!(ins!("vlddqu", Vx, Mx), BAD));
    t[0xf1] = p66!(ins!("vpsllw", Vx, Hx, Wo));
    t[0xf2] = p66!(ins!("vpslld", Vx, Hx, Wo));
    t[0xf3] = p66!(ins!("vpsllq", Vx, Hx, Wo));
    t[0xf4] = avx3!("vpmuludq");
    t[0xf5] = avx3!("vpmaddwd");
    t[0xf6] = avx3!("vpsadbw");
    t[0xf7] = p66!(by_len!(by_mod!(BAD, ins!("vmaskmovdqu", Vo, Uo)), BAD));
    t[0xf8] = avx3!("vpsubb");
    t[0xf9] = avx3!("vpsubw");
    t[0xfa] = avx3!("vpsubd");
    t[0xfb] = avx3!("vpsubq");
    t[0xfc] = avx3!("vpaddb");
    t[0xfd] = avx3!("vpaddw");
    t[0xfe] = avx3!("vpaddd");
    t
};

/// One FMA column: the packed and scalar forms of each operation with a
/// given operand order, at `base + 6 ..= base + 15`.
macro_rules! fma_column {
    ($t:ident, $base:literal, $order:literal) => {
        $t[$base + 0x6] = p66!(ins!(concat!("vfmaddsub", $order, "p%XW"), Vx, Hx, Wx));
        $t[$base + 0x7] = p66!(ins!(concat!("vfmsubadd", $order, "p%XW"), Vx, Hx, Wx));
        $t[$base + 0x8] = p66!(ins!(concat!("vfmadd", $order, "p%XW"), Vx, Hx, Wx));
        $t[$base + 0x9] = p66!(ins!(concat!("vfmadd", $order, "s%XW"), Vo, Ho, Wsw));
        $t[$base + 0xa] = p66!(ins!(concat!("vfmsub", $order, "p%XW"), Vx, Hx, Wx));
        $t[$base + 0xb] = p66!(ins!(concat!("vfmsub", $order, "s%XW"), Vo, Ho, Wsw));
        $t[$base + 0xc] = p66!(ins!(concat!("vfnmadd", $order, "p%XW"), Vx, Hx, Wx));
        $t[$base + 0xd] = p66!(ins!(concat!("vfnmadd", $order, "s%XW"), Vo, Ho, Wsw));
        $t[$base + 0xe] = p66!(ins!(concat!("vfnmsub", $order, "p%XW"), Vx, Hx, Wx));
        $t[$base + 0xf] = p66!(ins!(concat!("vfnmsub", $order, "s%XW"), Vo, Ho, Wsw));
    };
}

/// AMX dot products: register forms only, all three tiles distinct.
macro_rules! tile_dot {
    ($name:literal) => {
        by_mod!(BAD, ins!($name, TG, TE, TH).attrs(Attrs::TILE_DISTINCT))
    };
}

pub(crate) static VEX_MAP2: [Entry; 256] = {
    let mut t = [BAD; 256];

    t[0x00] = avx3!("vpshufb");
    t[0x01] = avx3!("vphaddw");
    t[0x02] = avx3!("vphaddd");
    t[0x03] = avx3!("vphaddsw");
    t[0x04] = avx3!("vpmaddubsw");
    t[0x05] = avx3!("vphsubw");
    t[0x06] = avx3!("vphsubd");
    t[0x07] = avx3!("vphsubsw");
    t[0x08] = avx3!("vpsignb");
    t[0x09] = avx3!("vpsignw");
    t[0x0a] = avx3!("vpsignd");
    t[0x0b] = avx3!("vpmulhrsw");
    t[0x0c] = p66!(by_w!(ins!("vpermilps", Vx, Hx, Wx), BAD));
    t[0x0d] = p66!(by_w!(ins!("vpermilpd", Vx, Hx, Wx), BAD));
    t[0x0e] = p66!(by_w!(ins!("vtestps", Vx, Wx), BAD));
    t[0x0f] = p66!(by_w!(ins!("vtestpd", Vx, Wx), BAD));

    t[0x13] = p66!(by_w!(ins!("vcvtph2ps", Vx, Wh), BAD));
    t[0x16] = p66!(by_len!(BAD, by_w!(ins!("vpermps", Vx, Hx, Wx), BAD)));
    t[0x17] = avx2!("vptest");
    t[0x18] = p66!(by_w!(ins!("vbroadcastss", Vx, Wd), BAD));
    t[0x19] = p66!(by_len!(BAD, by_w!(ins!("vbroadcastsd", Vx, Wq), BAD)));
    t[0x1a] = p66!(by_len!(BAD, by_mod!(ins!("vbroadcastf128", Vx, Mxmm), BAD)));
    t[0x1c] = avx2!("vpabsb");
    t[0x1d] = avx2!("vpabsw");
    t[0x1e] = avx2!("vpabsd");

    t[0x20] = p66!(ins!("vpmovsxbw", Vx, Wh));
    t[0x21] = p66!(ins!("vpmovsxbd", Vx, Wqu));
    t[0x22] = p66!(ins!("vpmovsxbq", Vx, We));
    t[0x23] = p66!(ins!("vpmovsxwd", Vx, Wh));
    t[0x24] = p66!(ins!("vpmovsxwq", Vx, Wqu));
    t[0x25] = p66!(ins!("vpmovsxdq", Vx, Wh));
    t[0x28] = avx3!("vpmuldq");
    t[0x29] = avx3!("vpcmpeqq");
    t[0x2a] = p66!(by_mod!(ins!("vmovntdqa", Vx, Mx), BAD));
    t[0x2b] = avx3!("vpackusdw");
    t[0x2c] = p66!(by_mod!(ins!("vmaskmovps", Vx, Hx, Mx), BAD));
    t[0x2d] = p66!(by_mod!(ins!("vmaskmovpd", Vx, Hx, Mx), BAD));
    t[0x2e] = p66!(by_mod!(ins!("vmaskmovps", Mx, Hx, Vx), BAD));
    t[0x2f] = p66!(by_mod!(ins!("vmaskmovpd", Mx, Hx, Vx), BAD));

    t[0x30] = p66!(ins!("vpmovzxbw", Vx, Wh));
    t[0x31] = p66!(ins!("vpmovzxbd", Vx, Wqu));
    t[0x32] = p66!(ins!("vpmovzxbq", Vx, We));
    t[0x33] = p66!(ins!("vpmovzxwd", Vx, Wh));
    t[0x34] = p66!(ins!("vpmovzxwq", Vx, Wqu));
    t[0x35] = p66!(ins!("vpmovzxdq", Vx, Wh));
    t[0x36] = p66!(by_len!(BAD, by_w!(ins!("vpermd", Vx, Hx, Wx), BAD)));
    t[0x37] = avx3!("vpcmpgtq");
    t[0x38] = avx3!("vpminsb");
    t[0x39] = avx3!("vpminsd");
    t[0x3a] = avx3!("vpminuw");
    t[0x3b] = avx3!("vpminud");
    t[0x3c] = avx3!("vpmaxsb");
    t[0x3d] = avx3!("vpmaxsd");
    t[0x3e] = avx3!("vpmaxuw");
    t[0x3f] = avx3!("vpmaxud");

    t[0x40] = avx3!("vpmulld");
    t[0x41] = p66!(by_len!(ins!("vphminposuw", Vo, Wo), BAD));
    t[0x45] = avx3!("vpsrlv%DQ");
    t[0x46] = p66!(by_w!(ins!("vpsravd", Vx, Hx, Wx), BAD));
    t[0x47] = avx3!("vpsllv%DQ");
    t[0x49] = by_len!(
        by_w!(
            by_prefix!(
                by_mod!(
                    ins!("ldtilecfg", M0),
                    by_reg!(
                        select!(Rm, 8, [ins!("tilerelease"), BAD, BAD, BAD, BAD, BAD, BAD, BAD]),
                        BAD,
                        BAD,
                        BAD,
                        BAD,
                        BAD,
                        BAD,
                        BAD
                    )
                ),
                BAD,
                by_mod!(ins!("sttilecfg", M0), BAD),
                by_mod!(BAD, ins!("tilezero", TG)),
            ),
            BAD
        ),
        BAD
    );
    t[0x4b] = by_mod!(
        by_prefix!(
            BAD,
            ins!("tilestored", M0, TG),
            ins!("tileloaddt1", TG, M0),
            ins!("tileloadd", TG, M0),
        ),
        BAD
    );
    t[0x58] = p66!(ins!("vpbroadcastd", Vx, Wd));
    t[0x59] = p66!(ins!("vpbroadcastq", Vx, Wq));
    t[0x5a] = p66!(by_len!(BAD, by_mod!(ins!("vbroadcasti128", Vx, Mxmm), BAD)));
    t[0x5c] = by_prefix!(BAD, tile_dot!("tdpbf16ps"), BAD, BAD);
    t[0x5e] = by_prefix!(
        tile_dot!("tdpbuud"),
        tile_dot!("tdpbsud"),
        tile_dot!("tdpbusd"),
        tile_dot!("tdpbssd"),
    );
    t[0x78] = p66!(ins!("vpbroadcastb", Vx, Wb));
    t[0x79] = p66!(ins!("vpbroadcastw", Vx, Ww));
    t[0x8c] = p66!(by_mod!(ins!("vpmaskmov%DQ", Vx, Hx, Mx), BAD));
    t[0x8e] = p66!(by_mod!(ins!("vpmaskmov%DQ", Mx, Hx, Vx), BAD));

    t[0x90] = p66!(by_w!(
        ins!("vpgatherdd", Vx, VSIBd, Hx),
        ins!("vpgatherdq", Vx, VSIBqh, Hx)
    ));
    t[0x91] = p66!(by_w!(
        ins!("vpgatherqd", Vh, VSIBd, Hh),
        ins!("vpgatherqq", Vx, VSIBq, Hx)
    ));
    t[0x92] = p66!(by_w!(
        ins!("vgatherdps", Vx, VSIBd, Hx),
        ins!("vgatherdpd", Vx, VSIBqh, Hx)
    ));
    t[0x93] = p66!(by_w!(
        ins!("vgatherqps", Vh, VSIBd, Hh),
        ins!("vgatherqpd", Vx, VSIBq, Hx)
    ));

    fma_column!(t, 0x90, "132");
    fma_column!(t, 0xa0, "213");
    fma_column!(t, 0xb0, "231");

    t[0xcf] = p66!(by_w!(ins!("vgf2p8mulb", Vx, Hx, Wx), BAD));
    t[0xdb] = p66!(by_len!(ins!("vaesimc", Vo, Wo), BAD));
    t[0xdc] = avx3!("vaesenc");
    t[0xdd] = avx3!("vaesenclast");
    t[0xde] = avx3!("vaesdec");
    t[0xdf] = avx3!("vaesdeclast");

    t[0xf2] = pnone!(by_len!(ins!("andn", Gdq, By, Edq), BAD));
    t[0xf3] = pnone!(by_len!(
        by_reg!(
            BAD,
            ins!("blsr", By, Edq),
            ins!("blsmsk", By, Edq),
            ins!("blsi", By, Edq),
            BAD,
            BAD,
            BAD,
            BAD
        ),
        BAD
    ));
    t[0xf5] = by_len!(
        by_prefix!(
            ins!("bzhi", Gdq, Edq, By),
            ins!("pext", Gdq, By, Edq),
            BAD,
            ins!("pdep", Gdq, By, Edq),
        ),
        BAD
    );
    t[0xf6] = by_prefix!(BAD, BAD, BAD, by_len!(ins!("mulx", Gdq, By, Edq), BAD));
    t[0xf7] = by_len!(
        by_prefix!(
            ins!("bextr", Gdq, Edq, By),
            ins!("sarx", Gdq, Edq, By),
            ins!("shlx", Gdq, Edq, By),
            ins!("shrx", Gdq, Edq, By),
        ),
        BAD
    );
    t
};

/// FMA4 packed op: W selects whether imm8[7:4] or r/m is the third source.
macro_rules! fma4 {
    ($name:literal) => {
        p66!(by_w!(ins!($name, Vx, Hx, Wx, Lx), ins!($name, Vx, Hx, Lx, Wx)))
    };
}

/// FMA4 scalar op on the low element.
macro_rules! fma4_scalar {
    ($name:literal, $w:expr) => {
        p66!(by_w!(ins!($name, Vo, Ho, $w, Lo), ins!($name, Vo, Ho, Lo, $w)))
    };
}

/// Mask shift by immediate, VEX.L=0 only.
macro_rules! kshift {
    ($w0:literal, $w1:literal) => {
        p66!(by_len!(by_mod!(BAD, by_w!(ins!($w0, KG, KR, Ib), ins!($w1, KG, KR, Ib))), BAD))
    };
}

pub(crate) static VEX_MAP3: [Entry; 256] = {
    let mut t = [BAD; 256];

    t[0x00] = p66!(by_len!(BAD, by_w!(BAD, ins!("vpermq", Vx, Wx, Ib))));
    t[0x01] = p66!(by_len!(BAD, by_w!(BAD, ins!("vpermpd", Vx, Wx, Ib))));
    t[0x02] = p66!(by_w!(ins!("vpblendd", Vx, Hx, Wx, Ib), BAD));
    t[0x04] = p66!(by_w!(ins!("vpermilps", Vx, Wx, Ib), BAD));
    t[0x05] = p66!(by_w!(ins!("vpermilpd", Vx, Wx, Ib), BAD));
    t[0x06] = p66!(by_len!(BAD, by_w!(ins!("vperm2f128", Vx, Hx, Wx, Ib), BAD)));
    t[0x08] = p66!(ins!("vroundps", Vx, Wx, Ib));
    t[0x09] = p66!(ins!("vroundpd", Vx, Wx, Ib));
    t[0x0a] = p66!(ins!("vroundss", Vo, Ho, Wd, Ib));
    t[0x0b] = p66!(ins!("vroundsd", Vo, Ho, Wq, Ib));
    t[0x0c] = p66!(ins!("vblendps", Vx, Hx, Wx, Ib));
    t[0x0d] = p66!(ins!("vblendpd", Vx, Hx, Wx, Ib));
    t[0x0e] = p66!(ins!("vpblendw", Vx, Hx, Wx, Ib));
    t[0x0f] = p66!(ins!("vpalignr", Vx, Hx, Wx, Ib));

    t[0x14] = p66!(by_len!(
        by_mod!(ins!("vpextrb", Mb, Vo, Ib), ins!("vpextrb", Rd, Vo, Ib)),
        BAD
    ));
    t[0x15] = p66!(by_len!(
        by_mod!(ins!("vpextrw", Mw, Vo, Ib), ins!("vpextrw", Rd, Vo, Ib)),
        BAD
    ));
    t[0x16] = p66!(by_len!(ins!("vpextrK", Edq, Vo, Ib), BAD));
    t[0x17] = p66!(by_len!(ins!("vextractps", Ed, Vo, Ib), BAD));
    t[0x18] = p66!(by_len!(BAD, by_w!(ins!("vinsertf128", Vx, Hx, Wo, Ib), BAD)));
    t[0x19] = p66!(by_len!(BAD, by_w!(ins!("vextractf128", Wo, Vx, Ib), BAD)));
    t[0x1d] = p66!(by_w!(ins!("vcvtps2ph", Wh, Vx, Ib), BAD));

    t[0x20] = p66!(by_len!(
        by_mod!(ins!("vpinsrb", Vo, Ho, Mb, Ib), ins!("vpinsrb", Vo, Ho, Rd, Ib)),
        BAD
    ));
    t[0x21] = p66!(by_len!(ins!("vinsertps", Vo, Ho, Wd, Ib), BAD));
    t[0x22] = p66!(by_len!(ins!("vpinsrK", Vo, Ho, Edq, Ib), BAD));

    t[0x30] = kshift!("kshiftrb", "kshiftrw");
    t[0x31] = kshift!("kshiftrd", "kshiftrq");
    t[0x32] = kshift!("kshiftlb", "kshiftlw");
    t[0x33] = kshift!("kshiftld", "kshiftlq");

    t[0x38] = p66!(by_len!(BAD, by_w!(ins!("vinserti128", Vx, Hx, Wo, Ib), BAD)));
    t[0x39] = p66!(by_len!(BAD, by_w!(ins!("vextracti128", Wo, Vx, Ib), BAD)));
    t[0x40] = p66!(ins!("vdpps", Vx, Hx, Wx, Ib));
    t[0x41] = p66!(by_len!(ins!("vdppd", Vo, Ho, Wo, Ib), BAD));
    t[0x42] = p66!(ins!("vmpsadbw", Vx, Hx, Wx, Ib));
    t[0x44] = p66!(ins!("vpclmul%CCqdq", Vx, Hx, Wx, CMP_CLMUL));
    t[0x46] = p66!(by_len!(BAD, by_w!(ins!("vperm2i128", Vx, Hx, Wx, Ib), BAD)));
    t[0x4a] = p66!(by_w!(ins!("vblendvps", Vx, Hx, Wx, Lx), BAD));
    t[0x4b] = p66!(by_w!(ins!("vblendvpd", Vx, Hx, Wx, Lx), BAD));
    t[0x4c] = p66!(by_w!(ins!("vpblendvb", Vx, Hx, Wx, Lx), BAD));

    t[0x5c] = fma4!("vfmaddsubps");
    t[0x5d] = fma4!("vfmaddsubpd");
    t[0x5e] = fma4!("vfmsubaddps");
    t[0x5f] = fma4!("vfmsubaddpd");
    t[0x60] = p66!(by_len!(ins!("vpcmpestrm", Vo, Wo, Ib), BAD));
    t[0x61] = p66!(by_len!(ins!("vpcmpestri", Vo, Wo, Ib), BAD));
    t[0x62] = p66!(by_len!(ins!("vpcmpistrm", Vo, Wo, Ib), BAD));
    t[0x63] = p66!(by_len!(ins!("vpcmpistri", Vo, Wo, Ib), BAD));
    t[0x68] = fma4!("vfmaddps");
    t[0x69] = fma4!("vfmaddpd");
    t[0x6a] = fma4_scalar!("vfmaddss", Wd);
    t[0x6b] = fma4_scalar!("vfmaddsd", Wq);
    t[0x6c] = fma4!("vfmsubps");
    t[0x6d] = fma4!("vfmsubpd");
    t[0x6e] = fma4_scalar!("vfmsubss", Wd);
    t[0x6f] = fma4_scalar!("vfmsubsd", Wq);
    t[0x78] = fma4!("vfnmaddps");
    t[0x79] = fma4!("vfnmaddpd");
    t[0x7a] = fma4_scalar!("vfnmaddss", Wd);
    t[0x7b] = fma4_scalar!("vfnmaddsd", Wq);
    t[0x7c] = fma4!("vfnmsubps");
    t[0x7d] = fma4!("vfnmsubpd");
    t[0x7e] = fma4_scalar!("vfnmsubss", Wd);
    t[0x7f] = fma4_scalar!("vfnmsubsd", Wq);

    t[0xce] = p66!(by_w!(BAD, ins!("vgf2p8affineqb", Vx, Hx, Wx, Ib)));
    t[0xcf] = p66!(by_w!(BAD, ins!("vgf2p8affineinvqb", Vx, Hx, Wx, Ib)));
    t[0xdf] = p66!(by_len!(ins!("vaeskeygenassist", Vo, Wo, Ib), BAD));
    t[0xf0] = by_prefix!(BAD, BAD, BAD, by_len!(ins!("rorxK", Gdq, Edq, Ib), BAD));
    t
};

#[cfg(test)]
mod tests {
    use super::super::Redirect;
    use super::*;

    fn prefix_slot(entry: Entry, slot: usize) -> Entry {
        match entry {
            Entry::Redirect(Redirect::Prefix, table) => table[slot],
            other => other,
        }
    }

    #[test]
    fn test_integer_ops_need_66() {
        let entry = VEX_MAP1[0xfe];
        assert!(matches!(prefix_slot(entry, 0), Entry::Bad));
        assert!(matches!(prefix_slot(entry, 2), Entry::Insn(i) if i.template == "vpaddd"));
    }

    #[test]
    fn test_fma_columns() {
        assert!(matches!(prefix_slot(VEX_MAP2[0x98], 2), Entry::Insn(i) if i.template == "vfmadd132p%XW"));
        assert!(matches!(prefix_slot(VEX_MAP2[0xa9], 2), Entry::Insn(i) if i.template == "vfmadd213s%XW"));
        assert!(matches!(prefix_slot(VEX_MAP2[0xbf], 2), Entry::Insn(i) if i.template == "vfnmsub231s%XW"));
    }

    #[test]
    fn test_unassigned_slots() {
        assert!(matches!(VEX_MAP1[0x00], Entry::Bad));
        assert!(matches!(VEX_MAP2[0xff], Entry::Bad));
        assert!(matches!(VEX_MAP3[0xff], Entry::Bad));
        assert!(matches!(VEX_MAP1[0x77], Entry::Redirect(Redirect::Prefix, _)));
    }

    #[test]
    fn test_tile_dot_products_are_distinct() {
        let Entry::Redirect(Redirect::Mod, forms) = prefix_slot(VEX_MAP2[0x5e], 3) else {
            panic!("expected a mod split");
        };
        assert!(matches!(forms[0], Entry::Bad));
        assert!(matches!(forms[1], Entry::Insn(i) if i.attrs.contains(Attrs::TILE_DISTINCT)));
    }
}
