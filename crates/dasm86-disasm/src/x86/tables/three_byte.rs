//! The legacy 0F 38 and 0F 3A maps.

use super::operands::*;
use super::{ins, redirect, Attrs, Entry, BAD};

/// SSSE3 rows: MMX without a prefix, XMM under 66.
const SSSE3_38: [(u8, &str); 15] = [
    (0x00, "pshufb"),
    (0x01, "phaddw"),
    (0x02, "phaddd"),
    (0x03, "phaddsw"),
    (0x04, "pmaddubsw"),
    (0x05, "phsubw"),
    (0x06, "phsubd"),
    (0x07, "phsubsw"),
    (0x08, "psignb"),
    (0x09, "psignw"),
    (0x0a, "psignd"),
    (0x0b, "pmulhrsw"),
    (0x1c, "pabsb"),
    (0x1d, "pabsw"),
    (0x1e, "pabsd"),
];

macro_rules! only_66 {
    ($name:ident, $entry:expr) => {
        static $name: [Entry; 4] = [BAD, BAD, $entry, BAD];
    };
}

only_66!(PTEST, ins!("ptest", Vx, Wx));
only_66!(PMULDQ, ins!("pmuldq", Vx, Wx));
only_66!(PCMPEQQ, ins!("pcmpeqq", Vx, Wx));
only_66!(PACKUSDW, ins!("packusdw", Vx, Wx));
only_66!(PCMPGTQ, ins!("pcmpgtq", Vx, Wx));
only_66!(PMINSB, ins!("pminsb", Vx, Wx));
only_66!(PMINSD, ins!("pminsd", Vx, Wx));
only_66!(PMINUW, ins!("pminuw", Vx, Wx));
only_66!(PMINUD, ins!("pminud", Vx, Wx));
only_66!(PMAXSB, ins!("pmaxsb", Vx, Wx));
only_66!(PMAXSD, ins!("pmaxsd", Vx, Wx));
only_66!(PMAXUW, ins!("pmaxuw", Vx, Wx));
only_66!(PMAXUD, ins!("pmaxud", Vx, Wx));
only_66!(PMULLD, ins!("pmulld", Vx, Wx));
only_66!(PHMINPOSUW, ins!("phminposuw", Vx, Wx));
only_66!(GF2P8MULB, ins!("gf2p8mulb", Vx, Wx));
only_66!(AESIMC, ins!("aesimc", Vx, Wx));
only_66!(AESENC, ins!("aesenc", Vx, Wx));
only_66!(AESENCLAST, ins!("aesenclast", Vx, Wx));
only_66!(AESDEC, ins!("aesdec", Vx, Wx));
only_66!(AESDECLAST, ins!("aesdeclast", Vx, Wx));
only_66!(PBLENDVB, ins!("pblendvb", Vx, Wx, XMM0));
only_66!(BLENDVPS, ins!("blendvps", Vx, Wx, XMM0));
only_66!(BLENDVPD, ins!("blendvpd", Vx, Wx, XMM0));
only_66!(PMOVSXBW, ins!("pmovsxbw", Vx, Wq));
only_66!(PMOVSXBD, ins!("pmovsxbd", Vx, Wd));
only_66!(PMOVSXBQ, ins!("pmovsxbq", Vx, Ww));
only_66!(PMOVSXWD, ins!("pmovsxwd", Vx, Wq));
only_66!(PMOVSXWQ, ins!("pmovsxwq", Vx, Wd));
only_66!(PMOVSXDQ, ins!("pmovsxdq", Vx, Wq));
only_66!(PMOVZXBW, ins!("pmovzxbw", Vx, Wq));
only_66!(PMOVZXBD, ins!("pmovzxbd", Vx, Wd));
only_66!(PMOVZXBQ, ins!("pmovzxbq", Vx, Ww));
only_66!(PMOVZXWD, ins!("pmovzxwd", Vx, Wq));
only_66!(PMOVZXWQ, ins!("pmovzxwq", Vx, Wd));
only_66!(PMOVZXDQ, ins!("pmovzxdq", Vx, Wq));
only_66!(MOVNTDQA, ins!("movntdqa", Vx, Mx));
only_66!(INVEPT, ins!("invept", Gn, Mxmm));
only_66!(INVVPID, ins!("invvpid", Gn, Mxmm));
only_66!(INVPCID, ins!("invpcid", Gn, Mxmm));
only_66!(WRUSS, ins!("wrussK", Mdq, Gdq));

static SHA_C8: [Entry; 4] = [ins!("sha1nexte", Vx, Wx), BAD, BAD, BAD];
static SHA_C9: [Entry; 4] = [ins!("sha1msg1", Vx, Wx), BAD, BAD, BAD];
static SHA_CA: [Entry; 4] = [ins!("sha1msg2", Vx, Wx), BAD, BAD, BAD];
static SHA_CB: [Entry; 4] = [ins!("sha256rnds2", Vx, Wx, XMM0), BAD, BAD, BAD];
static SHA_CC: [Entry; 4] = [ins!("sha256msg1", Vx, Wx), BAD, BAD, BAD];
static SHA_CD: [Entry; 4] = [ins!("sha256msg2", Vx, Wx), BAD, BAD, BAD];

static MOVBE_LOAD: [Entry; 4] = [
    ins!("movbeS", Gv, Mv),
    BAD,
    ins!("movbeS", Gv, Mv),
    ins!("crc32{b|}", Gdq, Eb),
];
static MOVBE_STORE: [Entry; 4] = [
    ins!("movbeS", Mv, Gv),
    BAD,
    ins!("movbeS", Mv, Gv),
    ins!("crc32{R|}", Gdq, Ev),
];
static ADX: [Entry; 4] = [
    ins!("wrssK", Mdq, Gdq),
    ins!("adoxS", Gdq, Edq),
    ins!("adcxS", Gdq, Edq),
    BAD,
];
static MOVDIRI: [Entry; 4] = [ins!("movdiriS", Mdq, Gdq), BAD, BAD, BAD];

pub(crate) static THREE_BYTE_38: [Entry; 256] = {
    let mut t = [BAD; 256];
    let mut i = 0;
    while i < SSSE3_38.len() {
        let (opcode, name) = SSSE3_38[i];
        t[opcode as usize] = ins!(name, MXg, MXq).attrs(Attrs::PREFIX_STRICT);
        i += 1;
    }
    t[0x10] = redirect!(Prefix, PBLENDVB);
    t[0x14] = redirect!(Prefix, BLENDVPS);
    t[0x15] = redirect!(Prefix, BLENDVPD);
    t[0x20] = redirect!(Prefix, PMOVSXBW);
    t[0x21] = redirect!(Prefix, PMOVSXBD);
    t[0x22] = redirect!(Prefix, PMOVSXBQ);
    t[0x23] = redirect!(Prefix, PMOVSXWD);
    t[0x24] = redirect!(Prefix, PMOVSXWQ);
    t[0x25] = redirect!(Prefix, PMOVSXDQ);
    t[0x2a] = redirect!(Prefix, MOVNTDQA);
    t[0x30] = redirect!(Prefix, PMOVZXBW);
    t[0x31] = redirect!(Prefix, PMOVZXBD);
    t[0x32] = redirect!(Prefix, PMOVZXBQ);
    t[0x33] = redirect!(Prefix, PMOVZXWD);
    t[0x34] = redirect!(Prefix, PMOVZXWQ);
    t[0x35] = redirect!(Prefix, PMOVZXDQ);
    t[0x80] = redirect!(Prefix, INVEPT);
    t[0x81] = redirect!(Prefix, INVVPID);
    t[0x82] = redirect!(Prefix, INVPCID);
    t[0x17] = redirect!(Prefix, PTEST);
    t[0x28] = redirect!(Prefix, PMULDQ);
    t[0x29] = redirect!(Prefix, PCMPEQQ);
    t[0x2b] = redirect!(Prefix, PACKUSDW);
    t[0x37] = redirect!(Prefix, PCMPGTQ);
    t[0x38] = redirect!(Prefix, PMINSB);
    t[0x39] = redirect!(Prefix, PMINSD);
    t[0x3a] = redirect!(Prefix, PMINUW);
    t[0x3b] = redirect!(Prefix, PMINUD);
    t[0x3c] = redirect!(Prefix, PMAXSB);
    t[0x3d] = redirect!(Prefix, PMAXSD);
    t[0x3e] = redirect!(Prefix, PMAXUW);
    t[0x3f] = redirect!(Prefix, PMAXUD);
    t[0x40] = redirect!(Prefix, PMULLD);
    t[0x41] = redirect!(Prefix, PHMINPOSUW);
    t[0xcf] = redirect!(Prefix, GF2P8MULB);
    t[0xdb] = redirect!(Prefix, AESIMC);
    t[0xdc] = redirect!(Prefix, AESENC);
    t[0xdd] = redirect!(Prefix, AESENCLAST);
    t[0xde] = redirect!(Prefix, AESDEC);
    t[0xdf] = redirect!(Prefix, AESDECLAST);
    t[0xc8] = redirect!(Prefix, SHA_C8);
    t[0xc9] = redirect!(Prefix, SHA_C9);
    t[0xca] = redirect!(Prefix, SHA_CA);
    t[0xcb] = redirect!(Prefix, SHA_CB);
    t[0xcc] = redirect!(Prefix, SHA_CC);
    t[0xcd] = redirect!(Prefix, SHA_CD);
    t[0xf0] = redirect!(Prefix, MOVBE_LOAD);
    t[0xf1] = redirect!(Prefix, MOVBE_STORE);
    t[0xf5] = redirect!(Prefix, WRUSS);
    t[0xf6] = redirect!(Prefix, ADX);
    t[0xf9] = redirect!(Prefix, MOVDIRI);
    t
};

only_66!(ROUNDPS, ins!("roundps", Vx, Wx, Ib));
only_66!(ROUNDPD, ins!("roundpd", Vx, Wx, Ib));
only_66!(ROUNDSS, ins!("roundss", Vx, Wd, Ib));
only_66!(ROUNDSD, ins!("roundsd", Vx, Wq, Ib));
only_66!(BLENDPS, ins!("blendps", Vx, Wx, Ib));
only_66!(BLENDPD, ins!("blendpd", Vx, Wx, Ib));
only_66!(PBLENDW, ins!("pblendw", Vx, Wx, Ib));
only_66!(PEXTRD, ins!("pextrK", Edq, Vx, Ib));
only_66!(EXTRACTPS, ins!("extractps", Ed, Vx, Ib));
only_66!(INSERTPS, ins!("insertps", Vx, Wd, Ib));
only_66!(PINSRD, ins!("pinsrK", Vx, Edq, Ib));
only_66!(DPPS, ins!("dpps", Vx, Wx, Ib));
only_66!(DPPD, ins!("dppd", Vx, Wx, Ib));
only_66!(MPSADBW, ins!("mpsadbw", Vx, Wx, Ib));
only_66!(PCLMULQDQ, ins!("pclmul%CCqdq", Vx, Wx, CMP_CLMUL));
only_66!(PCMPESTRM, ins!("pcmpestrm", Vx, Wx, Ib));
only_66!(PCMPESTRI, ins!("pcmpestri", Vx, Wx, Ib));
only_66!(PCMPISTRM, ins!("pcmpistrm", Vx, Wx, Ib));
only_66!(PCMPISTRI, ins!("pcmpistri", Vx, Wx, Ib));
only_66!(GF2P8AFFINEQB, ins!("gf2p8affineqb", Vx, Wx, Ib));
only_66!(GF2P8AFFINEINVQB, ins!("gf2p8affineinvqb", Vx, Wx, Ib));
only_66!(AESKEYGENASSIST, ins!("aeskeygenassist", Vx, Wx, Ib));

static PEXTRB_FORMS: [Entry; 2] = [ins!("pextrb", Mb, Vx, Ib), ins!("pextrb", Rdq, Vx, Ib)];
static PEXTRW_FORMS: [Entry; 2] = [ins!("pextrw", Mw, Vx, Ib), ins!("pextrw", Rdq, Vx, Ib)];
static PINSRB_FORMS: [Entry; 2] = [ins!("pinsrb", Vx, Mb, Ib), ins!("pinsrb", Vx, Rd, Ib)];
static PEXTRB: [Entry; 4] = [BAD, BAD, redirect!(Mod, PEXTRB_FORMS), BAD];
static PEXTRW: [Entry; 4] = [BAD, BAD, redirect!(Mod, PEXTRW_FORMS), BAD];
static PINSRB: [Entry; 4] = [BAD, BAD, redirect!(Mod, PINSRB_FORMS), BAD];
static SHA1RNDS4: [Entry; 4] = [ins!("sha1rnds4", Vx, Wx, Ib), BAD, BAD, BAD];

pub(crate) static THREE_BYTE_3A: [Entry; 256] = {
    let mut t = [BAD; 256];
    t[0x08] = redirect!(Prefix, ROUNDPS);
    t[0x09] = redirect!(Prefix, ROUNDPD);
    t[0x0a] = redirect!(Prefix, ROUNDSS);
    t[0x0b] = redirect!(Prefix, ROUNDSD);
    t[0x0c] = redirect!(Prefix, BLENDPS);
    t[0x0d] = redirect!(Prefix, BLENDPD);
    t[0x0e] = redirect!(Prefix, PBLENDW);
    t[0x0f] = ins!("palignr", MXg, MXq, Ib).attrs(Attrs::PREFIX_STRICT);
    t[0x14] = redirect!(Prefix, PEXTRB);
    t[0x15] = redirect!(Prefix, PEXTRW);
    t[0x16] = redirect!(Prefix, PEXTRD);
    t[0x17] = redirect!(Prefix, EXTRACTPS);
    t[0x20] = redirect!(Prefix, PINSRB);
    t[0x21] = redirect!(Prefix, INSERTPS);
    t[0x22] = redirect!(Prefix, PINSRD);
    t[0x40] = redirect!(Prefix, DPPS);
    t[0x41] = redirect!(Prefix, DPPD);
    t[0x42] = redirect!(Prefix, MPSADBW);
    t[0x44] = redirect!(Prefix, PCLMULQDQ);
    t[0x60] = redirect!(Prefix, PCMPESTRM);
    t[0x61] = redirect!(Prefix, PCMPESTRI);
    t[0x62] = redirect!(Prefix, PCMPISTRM);
    t[0x63] = redirect!(Prefix, PCMPISTRI);
    t[0xcc] = redirect!(Prefix, SHA1RNDS4);
    t[0xce] = redirect!(Prefix, GF2P8AFFINEQB);
    t[0xcf] = redirect!(Prefix, GF2P8AFFINEINVQB);
    t[0xdf] = redirect!(Prefix, AESKEYGENASSIST);
    t
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sse41_rows_are_66_only() {
        for opcode in [0x17, 0x29, 0x3f, 0x41, 0xdb] {
            let Entry::Redirect(_, rows) = THREE_BYTE_38[opcode] else {
                panic!("{opcode:#x} is not prefix-split");
            };
            assert!(matches!(rows[0], Entry::Bad));
            assert!(matches!(rows[2], Entry::Insn(_)));
        }
    }

    #[test]
    fn test_ssse3_rows_take_mmx() {
        assert!(matches!(THREE_BYTE_38[0x00], Entry::Insn(i) if i.template == "pshufb"));
        assert!(matches!(THREE_BYTE_3A[0x0f], Entry::Insn(i) if i.template == "palignr"));
    }
}
