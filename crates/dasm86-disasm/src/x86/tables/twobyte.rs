//! The 0F two-byte opcode map with its groups and mandatory-prefix
//! splits. Prefix sub-tables are ordered [none, F3, 66, F2].

use super::onebyte::JCC;
use super::operands::*;
use super::three_byte::{THREE_BYTE_38, THREE_BYTE_3A};
use super::{ins, redirect, Attrs, Entry, Flow, BAD};

const CMOV: [&str; 16] = [
    "cmovoS", "cmovnoS", "cmovbS", "cmovaeS", "cmoveS", "cmovneS", "cmovbeS", "cmovaS", "cmovsS", "cmovnsS", "cmovpS",
    "cmovnpS", "cmovlS", "cmovgeS", "cmovleS", "cmovgS",
];

const SETCC: [&str; 16] = [
    "seto", "setno", "setb", "setae", "sete", "setne", "setbe", "seta", "sets", "setns", "setp", "setnp", "setl",
    "setge", "setle", "setg",
];

const NOP_EV: Entry = ins!("nopQ", Ev);

// 0F 00
static SLDT: [Entry; 2] = [ins!("sldt", Mw), ins!("sldtS", Rv)];
static STR: [Entry; 2] = [ins!("str", Mw), ins!("strS", Rv)];
static GROUP6: [Entry; 8] = [
    redirect!(Mod, SLDT),
    redirect!(Mod, STR),
    ins!("lldt", Ew),
    ins!("ltr", Ew),
    ins!("verr", Ew),
    ins!("verw", Ew),
    BAD,
    BAD,
];

// 0F 01
static VMX_RM: [Entry; 8] = [
    ins!("enclv"),
    ins!("vmcall"),
    ins!("vmlaunch"),
    ins!("vmresume"),
    ins!("vmxoff"),
    ins!("pconfig"),
    BAD,
    BAD,
];
static MONITOR_RM: [Entry; 8] =
    [ins!("monitor"), ins!("mwait"), ins!("clac"), ins!("stac"), BAD, BAD, BAD, ins!("encls")];
static XCR_RM: [Entry; 8] = [
    ins!("xgetbv"),
    ins!("xsetbv"),
    BAD,
    BAD,
    ins!("vmfunc"),
    ins!("xend"),
    ins!("xtest"),
    ins!("enclu"),
];
static SVM_RM: [Entry; 8] = [
    ins!("vmrun"),
    ins!("vmmcall"),
    ins!("vmload"),
    ins!("vmsave"),
    ins!("stgi"),
    ins!("clgi"),
    ins!("skinit"),
    ins!("invlpga"),
];
static SETSSBSY: [Entry; 4] = [BAD, ins!("setssbsy"), BAD, BAD];
static SAVEPREVSSP: [Entry; 4] = [BAD, ins!("saveprevssp"), BAD, BAD];
static PKRU_RM: [Entry; 8] = [
    redirect!(Prefix, SETSSBSY),
    BAD,
    redirect!(Prefix, SAVEPREVSSP),
    BAD,
    BAD,
    BAD,
    ins!("rdpkru"),
    ins!("wrpkru"),
];
static RSTORSSP: [Entry; 4] = [BAD, ins!("rstorssp", Mq), BAD, BAD];
static SWAPGS: [Entry; 2] = [BAD, ins!("swapgs")];
static SWAPGS_RM: [Entry; 8] = [
    redirect!(X86_64, SWAPGS),
    ins!("rdtscp"),
    ins!("monitorx"),
    ins!("mwaitx"),
    ins!("clzero"),
    ins!("rdpru"),
    BAD,
    BAD,
];
static GROUP7_MEM: [Entry; 8] = [
    ins!("sgdt{Q|}", M0),
    ins!("sidt{Q|}", M0),
    ins!("lgdt{Q|}", M0),
    ins!("lidt{Q|}", M0),
    ins!("smsw", Mw),
    redirect!(Prefix, RSTORSSP),
    ins!("lmsw", Ew),
    ins!("invlpg", Mb),
];
static GROUP7_REG: [Entry; 8] = [
    redirect!(Rm, VMX_RM),
    redirect!(Rm, MONITOR_RM),
    redirect!(Rm, XCR_RM),
    redirect!(Rm, SVM_RM),
    ins!("smswS", Rv),
    redirect!(Rm, PKRU_RM),
    ins!("lmsw", Ew),
    redirect!(Rm, SWAPGS_RM),
];
static GROUP7: [Entry; 2] = [redirect!(Reg, GROUP7_MEM), redirect!(Reg, GROUP7_REG)];

// 0F 0D
static PREFETCH_MEM: [Entry; 8] = [
    ins!("prefetch", Mb),
    ins!("prefetchw", Mb),
    ins!("prefetchwt1", Mb),
    ins!("prefetch", Mb),
    ins!("prefetch", Mb),
    ins!("prefetch", Mb),
    ins!("prefetch", Mb),
    ins!("prefetch", Mb),
];
static PREFETCH_AMD: [Entry; 2] = [redirect!(Reg, PREFETCH_MEM), NOP_EV];

// 0F 10-17
static MOVUPS_LOAD: [Entry; 4] = [
    ins!("movups", Vx, Wx),
    ins!("movss", Vx, Wd),
    ins!("movupd", Vx, Wx),
    ins!("movsd", Vx, Wq),
];
static MOVUPS_STORE: [Entry; 4] = [
    ins!("movups", Wx, Vx),
    ins!("movss", Wd, Vx),
    ins!("movupd", Wx, Vx),
    ins!("movsd", Wq, Vx),
];
static MOVLPS_LOAD: [Entry; 2] = [ins!("movlps", Vx, Mq), ins!("movhlps", Vx, Ux)];
static OPCODE_0F12: [Entry; 4] = [
    redirect!(Mod, MOVLPS_LOAD),
    ins!("movsldup", Vx, Wx),
    ins!("movlpd", Vx, Mq),
    ins!("movddup", Vx, Wq),
];
static OPCODE_0F13: [Entry; 4] = [ins!("movlps", Mq, Vx), BAD, ins!("movlpd", Mq, Vx), BAD];
static UNPCKL: [Entry; 4] = [ins!("unpcklps", Vx, Wx), BAD, ins!("unpcklpd", Vx, Wx), BAD];
static UNPCKH: [Entry; 4] = [ins!("unpckhps", Vx, Wx), BAD, ins!("unpckhpd", Vx, Wx), BAD];
static MOVHPS_LOAD: [Entry; 2] = [ins!("movhps", Vx, Mq), ins!("movlhps", Vx, Ux)];
static OPCODE_0F16: [Entry; 4] = [
    redirect!(Mod, MOVHPS_LOAD),
    ins!("movshdup", Vx, Wx),
    ins!("movhpd", Vx, Mq),
    BAD,
];
static OPCODE_0F17: [Entry; 4] = [ins!("movhps", Mq, Vx), BAD, ins!("movhpd", Mq, Vx), BAD];

// 0F 18-1F hint space
static HINT_18_MEM: [Entry; 8] = [
    ins!("prefetchnta", Mb),
    ins!("prefetcht0", Mb),
    ins!("prefetcht1", Mb),
    ins!("prefetcht2", Mb),
    NOP_EV,
    NOP_EV,
    NOP_EV,
    NOP_EV,
];
static HINT_18: [Entry; 2] = [redirect!(Reg, HINT_18_MEM), NOP_EV];
static BNDLDX: [Entry; 2] = [ins!("bndldx", BndG, M0), NOP_EV];
static OPCODE_0F1A: [Entry; 4] = [
    redirect!(Mod, BNDLDX),
    ins!("bndcl", BndG, En),
    ins!("bndmov", BndG, BndE),
    ins!("bndcu", BndG, En),
];
static BNDSTX: [Entry; 2] = [ins!("bndstx", M0, BndG), NOP_EV];
static BNDMK: [Entry; 2] = [ins!("bndmk", BndG, M0), NOP_EV];
static OPCODE_0F1B: [Entry; 4] = [
    redirect!(Mod, BNDSTX),
    redirect!(Mod, BNDMK),
    ins!("bndmov", BndE, BndG),
    ins!("bndcn", BndG, En),
];
static CLDEMOTE_MEM: [Entry; 8] = [ins!("cldemote", Mb), NOP_EV, NOP_EV, NOP_EV, NOP_EV, NOP_EV, NOP_EV, NOP_EV];
static CLDEMOTE: [Entry; 4] = [redirect!(Reg, CLDEMOTE_MEM), NOP_EV, NOP_EV, NOP_EV];
static HINT_1C: [Entry; 2] = [redirect!(Prefix, CLDEMOTE), NOP_EV];
static ENDBR_RM: [Entry; 8] = [
    NOP_EV,
    NOP_EV,
    ins!("endbr64"),
    ins!("endbr32"),
    NOP_EV,
    NOP_EV,
    NOP_EV,
    NOP_EV,
];
static CET_REG: [Entry; 8] = [
    NOP_EV,
    ins!("rdsspK", Rdq),
    NOP_EV,
    NOP_EV,
    NOP_EV,
    NOP_EV,
    NOP_EV,
    redirect!(Rm, ENDBR_RM),
];
static CET_F3: [Entry; 2] = [NOP_EV, redirect!(Reg, CET_REG)];
static HINT_1E: [Entry; 4] = [NOP_EV, redirect!(Mod, CET_F3), NOP_EV, NOP_EV];

// 0F 24/26 test registers exist only outside long mode.
static MOV_FROM_TR: [Entry; 2] = [ins!("movL", Rd, Tr).attrs(Attrs::REG_FORM), BAD];
static MOV_TO_TR: [Entry; 2] = [ins!("movL", Tr, Rd).attrs(Attrs::REG_FORM), BAD];

// 0F 28-2F
static MOVAPS_LOAD: [Entry; 4] = [ins!("movaps", Vx, Wx), BAD, ins!("movapd", Vx, Wx), BAD];
static MOVAPS_STORE: [Entry; 4] = [ins!("movaps", Wx, Vx), BAD, ins!("movapd", Wx, Vx), BAD];
static CVTPI2PS: [Entry; 4] = [
    ins!("cvtpi2ps", Vx, Qq),
    ins!("cvtsi2ss%LQ", Vx, Edq),
    ins!("cvtpi2pd", Vx, Qq),
    ins!("cvtsi2sd%LQ", Vx, Edq),
];
static MOVNTPS: [Entry; 4] = [
    ins!("movntps", Mx, Vx),
    ins!("movntss", Md, Vx),
    ins!("movntpd", Mx, Vx),
    ins!("movntsd", Mq, Vx),
];
static CVTTPS2PI: [Entry; 4] = [
    ins!("cvttps2pi", Pq, Wq),
    ins!("cvttss2si", Gdq, Wd),
    ins!("cvttpd2pi", Pq, Wx),
    ins!("cvttsd2si", Gdq, Wq),
];
static CVTPS2PI: [Entry; 4] = [
    ins!("cvtps2pi", Pq, Wq),
    ins!("cvtss2si", Gdq, Wd),
    ins!("cvtpd2pi", Pq, Wx),
    ins!("cvtsd2si", Gdq, Wq),
];
static UCOMIS: [Entry; 4] = [ins!("ucomiss", Vx, Wd), BAD, ins!("ucomisd", Vx, Wq), BAD];
static COMIS: [Entry; 4] = [ins!("comiss", Vx, Wd), BAD, ins!("comisd", Vx, Wq), BAD];

// 0F 50-5F
static MOVMSKPS: [Entry; 4] = [ins!("movmskps", Gdq, Ux), BAD, ins!("movmskpd", Gdq, Ux), BAD];

/// One arithmetic row: packed single, scalar single, packed double,
/// scalar double.
macro_rules! sse_arith {
    ($name:ident, $op:literal) => {
        static $name: [Entry; 4] = [
            ins!(concat!($op, "ps"), Vx, Wx),
            ins!(concat!($op, "ss"), Vx, Wd),
            ins!(concat!($op, "pd"), Vx, Wx),
            ins!(concat!($op, "sd"), Vx, Wq),
        ];
    };
}

/// Packed-only logic row: single and double.
macro_rules! sse_packed {
    ($name:ident, $op:literal) => {
        static $name: [Entry; 4] = [
            ins!(concat!($op, "ps"), Vx, Wx),
            BAD,
            ins!(concat!($op, "pd"), Vx, Wx),
            BAD,
        ];
    };
}

sse_arith!(SQRT, "sqrt");
sse_arith!(ADD, "add");
sse_arith!(MUL, "mul");
sse_arith!(SUB, "sub");
sse_arith!(MIN, "min");
sse_arith!(DIV, "div");
sse_arith!(MAX, "max");
sse_packed!(AND, "and");
sse_packed!(ANDN, "andn");
sse_packed!(OR, "or");
sse_packed!(XOR, "xor");
static RSQRT: [Entry; 4] = [ins!("rsqrtps", Vx, Wx), ins!("rsqrtss", Vx, Wd), BAD, BAD];
static RCP: [Entry; 4] = [ins!("rcpps", Vx, Wx), ins!("rcpss", Vx, Wd), BAD, BAD];
static CVTPS2PD: [Entry; 4] = [
    ins!("cvtps2pd", Vx, Wq),
    ins!("cvtss2sd", Vx, Wd),
    ins!("cvtpd2ps", Vx, Wx),
    ins!("cvtsd2ss", Vx, Wq),
];
static CVTDQ2PS: [Entry; 4] = [
    ins!("cvtdq2ps", Vx, Wx),
    ins!("cvttps2dq", Vx, Wx),
    ins!("cvtps2dq", Vx, Wx),
    BAD,
];

// 0F 60-7F
static PUNPCKLQDQ: [Entry; 4] = [BAD, BAD, ins!("punpcklqdq", Vx, Wx), BAD];
static PUNPCKHQDQ: [Entry; 4] = [BAD, BAD, ins!("punpckhqdq", Vx, Wx), BAD];
static MOVQ_LOAD: [Entry; 4] = [
    ins!("movq", Pq, Qq),
    ins!("movdqu", Vx, Wx),
    ins!("movdqa", Vx, Wx),
    BAD,
];
static PSHUF: [Entry; 4] = [
    ins!("pshufw", Pq, Qq, Ib),
    ins!("pshufhw", Vx, Wx, Ib),
    ins!("pshufd", Vx, Wx, Ib),
    ins!("pshuflw", Vx, Wx, Ib),
];
static GROUP12_REG: [Entry; 8] = [
    BAD,
    BAD,
    ins!("psrlw", MXq, Ib).attrs(Attrs::PREFIX_STRICT),
    BAD,
    ins!("psraw", MXq, Ib).attrs(Attrs::PREFIX_STRICT),
    BAD,
    ins!("psllw", MXq, Ib).attrs(Attrs::PREFIX_STRICT),
    BAD,
];
static GROUP13_REG: [Entry; 8] = [
    BAD,
    BAD,
    ins!("psrld", MXq, Ib).attrs(Attrs::PREFIX_STRICT),
    BAD,
    ins!("psrad", MXq, Ib).attrs(Attrs::PREFIX_STRICT),
    BAD,
    ins!("pslld", MXq, Ib).attrs(Attrs::PREFIX_STRICT),
    BAD,
];
static PSRLDQ: [Entry; 4] = [BAD, BAD, ins!("psrldq", Ux, Ib), BAD];
static PSLLDQ: [Entry; 4] = [BAD, BAD, ins!("pslldq", Ux, Ib), BAD];
static GROUP14_REG: [Entry; 8] = [
    BAD,
    BAD,
    ins!("psrlq", MXq, Ib).attrs(Attrs::PREFIX_STRICT),
    redirect!(Prefix, PSRLDQ),
    BAD,
    BAD,
    ins!("psllq", MXq, Ib).attrs(Attrs::PREFIX_STRICT),
    redirect!(Prefix, PSLLDQ),
];
static GROUP12: [Entry; 2] = [BAD, redirect!(Reg, GROUP12_REG)];
static GROUP13: [Entry; 2] = [BAD, redirect!(Reg, GROUP13_REG)];
static GROUP14: [Entry; 2] = [BAD, redirect!(Reg, GROUP14_REG)];
static VMREAD: [Entry; 4] = [ins!("vmread", En, Gn), BAD, BAD, BAD];
static VMWRITE: [Entry; 4] = [ins!("vmwrite", Gn, En), BAD, BAD, BAD];
static HADD: [Entry; 4] = [BAD, BAD, ins!("haddpd", Vx, Wx), ins!("haddps", Vx, Wx)];
static HSUB: [Entry; 4] = [BAD, BAD, ins!("hsubpd", Vx, Wx), ins!("hsubps", Vx, Wx)];
static MOVD_STORE: [Entry; 4] = [
    ins!("movK", Edq, MXg),
    ins!("movq", Vx, Wq),
    ins!("movK", Edq, MXg),
    BAD,
];
static MOVQ_STORE: [Entry; 4] = [
    ins!("movq", Qq, Pq),
    ins!("movdqu", Wx, Vx),
    ins!("movdqa", Wx, Vx),
    BAD,
];

// 0F A0-AF
static RDFSBASE: [Entry; 4] = [BAD, ins!("rdfsbase", Rdq), BAD, BAD];
static RDGSBASE: [Entry; 4] = [BAD, ins!("rdgsbase", Rdq), BAD, BAD];
static WRFSBASE: [Entry; 4] = [BAD, ins!("wrfsbase", Rdq), BAD, BAD];
static WRGSBASE: [Entry; 4] = [BAD, ins!("wrgsbase", Rdq), BAD, BAD];
static LFENCE: [Entry; 8] = [ins!("lfence"), BAD, BAD, BAD, BAD, BAD, BAD, BAD];
static MFENCE: [Entry; 8] = [ins!("mfence"), BAD, BAD, BAD, BAD, BAD, BAD, BAD];
static SFENCE: [Entry; 8] = [ins!("sfence"), BAD, BAD, BAD, BAD, BAD, BAD, BAD];
static FENCE5: [Entry; 4] = [redirect!(Rm, LFENCE), ins!("incsspK", Rdq), BAD, BAD];
static XSAVEOPT: [Entry; 4] = [ins!("xsaveopt%64", M0), BAD, ins!("clwb", Mb), BAD];
static CLFLUSH: [Entry; 4] = [ins!("clflush", Mb), BAD, ins!("clflushopt", Mb), BAD];
static GROUP15_MEM: [Entry; 8] = [
    ins!("fxsave%64", M0),
    ins!("fxrstor%64", M0),
    ins!("ldmxcsr", Md),
    ins!("stmxcsr", Md),
    ins!("xsave%64", M0),
    ins!("xrstor%64", M0),
    redirect!(Prefix, XSAVEOPT),
    redirect!(Prefix, CLFLUSH),
];
static GROUP15_REG: [Entry; 8] = [
    redirect!(Prefix, RDFSBASE),
    redirect!(Prefix, RDGSBASE),
    redirect!(Prefix, WRFSBASE),
    redirect!(Prefix, WRGSBASE),
    BAD,
    redirect!(Prefix, FENCE5),
    redirect!(Rm, MFENCE),
    redirect!(Rm, SFENCE),
];
static GROUP15: [Entry; 2] = [redirect!(Reg, GROUP15_MEM), redirect!(Reg, GROUP15_REG)];

// 0F B8-BF
static POPCNT: [Entry; 4] = [BAD, ins!("popcntS", Gv, Ev), BAD, BAD];
static GROUP8: [Entry; 8] = [
    BAD,
    BAD,
    BAD,
    BAD,
    ins!("btQ", Ev, Ib),
    ins!("btsQ", Ev, Ib).attrs(Attrs::HLE),
    ins!("btrQ", Ev, Ib).attrs(Attrs::HLE),
    ins!("btcQ", Ev, Ib).attrs(Attrs::HLE),
];
static BSF: [Entry; 4] = [
    ins!("bsfS", Gv, Ev),
    ins!("tzcntS", Gv, Ev),
    ins!("bsfS", Gv, Ev),
    ins!("bsfS", Gv, Ev),
];
static BSR: [Entry; 4] = [
    ins!("bsrS", Gv, Ev),
    ins!("lzcntS", Gv, Ev),
    ins!("bsrS", Gv, Ev),
    ins!("bsrS", Gv, Ev),
];

// 0F C0-C7
static CMPPS: [Entry; 4] = [
    ins!("cmp%CCps", Vx, Wx, CMP_SSE),
    ins!("cmp%CCss", Vx, Wd, CMP_SSE),
    ins!("cmp%CCpd", Vx, Wx, CMP_SSE),
    ins!("cmp%CCsd", Vx, Wq, CMP_SSE),
];
static PINSRW_MMX: [Entry; 2] = [ins!("pinsrw", Pq, Mw, Ib), ins!("pinsrw", Pq, Rd, Ib)];
static PINSRW_SSE: [Entry; 2] = [ins!("pinsrw", Vx, Mw, Ib), ins!("pinsrw", Vx, Rd, Ib)];
static PINSRW: [Entry; 4] = [redirect!(Mod, PINSRW_MMX), BAD, redirect!(Mod, PINSRW_SSE), BAD];
static PEXTRW: [Entry; 4] = [ins!("pextrw", Gdq, Nq, Ib), BAD, ins!("pextrw", Gdq, Ux, Ib), BAD];
static SHUFPS: [Entry; 4] = [ins!("shufps", Vx, Wx, Ib), BAD, ins!("shufpd", Vx, Wx, Ib), BAD];
static VMPTRLD: [Entry; 4] = [ins!("vmptrld", Mq), ins!("vmxon", Mq), ins!("vmclear", Mq), BAD];
static GROUP9_MEM: [Entry; 8] = [
    BAD,
    ins!("cmpxchg%CB", Mo).attrs(Attrs::HLE),
    BAD,
    ins!("xrstors%64", M0),
    ins!("xsavec%64", M0),
    ins!("xsaves%64", M0),
    redirect!(Prefix, VMPTRLD),
    ins!("vmptrst", Mq),
];
static RDSEED: [Entry; 4] = [ins!("rdseedS", Rv), ins!("rdpid", Rn), ins!("rdseedS", Rv), BAD];
static GROUP9_REG: [Entry; 8] = [
    BAD,
    BAD,
    BAD,
    BAD,
    BAD,
    BAD,
    ins!("rdrandS", Rv),
    redirect!(Prefix, RDSEED),
];
static GROUP9: [Entry; 2] = [redirect!(Reg, GROUP9_MEM), redirect!(Reg, GROUP9_REG)];

// 0F D0-FF
static ADDSUB: [Entry; 4] = [BAD, BAD, ins!("addsubpd", Vx, Wx), ins!("addsubps", Vx, Wx)];
static MOVQ_D6: [Entry; 4] = [
    BAD,
    ins!("movq2dq", Vx, Nq),
    ins!("movq", Wq, Vx),
    ins!("movdq2q", Pq, Ux),
];
static CVTDQ2PD: [Entry; 4] = [
    BAD,
    ins!("cvtdq2pd", Vx, Wq),
    ins!("cvttpd2dq", Vx, Wx),
    ins!("cvtpd2dq", Vx, Wx),
];
static MOVNTQ: [Entry; 4] = [ins!("movntq", Mq, Pq), BAD, ins!("movntdq", Mx, Vx), BAD];
static LDDQU: [Entry; 4] = [BAD, BAD, BAD, ins!("lddqu", Vx, Mx)];
static MASKMOVQ: [Entry; 4] = [ins!("maskmovq", Pq, Nq), BAD, ins!("maskmovdqu", Vx, Ux), BAD];

/// MMX/SSE2 integer operations, MMX by default and XMM under 66.
const MMX_OPS: [(u8, &str); 52] = [
    (0x63, "packsswb"),
    (0x64, "pcmpgtb"),
    (0x65, "pcmpgtw"),
    (0x66, "pcmpgtd"),
    (0x67, "packuswb"),
    (0x68, "punpckhbw"),
    (0x69, "punpckhwd"),
    (0x6a, "punpckhdq"),
    (0x6b, "packssdw"),
    (0x74, "pcmpeqb"),
    (0x75, "pcmpeqw"),
    (0x76, "pcmpeqd"),
    (0xd1, "psrlw"),
    (0xd2, "psrld"),
    (0xd3, "psrlq"),
    (0xd4, "paddq"),
    (0xd5, "pmullw"),
    (0xd8, "psubusb"),
    (0xd9, "psubusw"),
    (0xda, "pminub"),
    (0xdb, "pand"),
    (0xdc, "paddusb"),
    (0xdd, "paddusw"),
    (0xde, "pmaxub"),
    (0xdf, "pandn"),
    (0xe0, "pavgb"),
    (0xe1, "psraw"),
    (0xe2, "psrad"),
    (0xe3, "pavgw"),
    (0xe4, "pmulhuw"),
    (0xe5, "pmulhw"),
    (0xe8, "psubsb"),
    (0xe9, "psubsw"),
    (0xea, "pminsw"),
    (0xeb, "por"),
    (0xec, "paddsb"),
    (0xed, "paddsw"),
    (0xee, "pmaxsw"),
    (0xef, "pxor"),
    (0xf1, "psllw"),
    (0xf2, "pslld"),
    (0xf3, "psllq"),
    (0xf4, "pmuludq"),
    (0xf5, "pmaddwd"),
    (0xf6, "psadbw"),
    (0xf8, "psubb"),
    (0xf9, "psubw"),
    (0xfa, "psubd"),
    (0xfb, "psubq"),
    (0xfc, "paddb"),
    (0xfd, "paddw"),
    (0xfe, "paddd"),
];

pub(crate) static TWO_BYTE: [Entry; 256] = {
    let mut t = [BAD; 256];

    t[0x00] = redirect!(Reg, GROUP6);
    t[0x01] = redirect!(Mod, GROUP7);
    t[0x02] = ins!("larS", Gv, Ew);
    t[0x03] = ins!("lslS", Gv, Ew);
    t[0x05] = ins!("syscall");
    t[0x06] = ins!("clts");
    t[0x07] = ins!("sysret%LP").flow(Flow::Ret);
    t[0x08] = ins!("invd");
    t[0x09] = ins!("wbinvd");
    t[0x0b] = ins!("ud2");
    t[0x0d] = redirect!(Mod, PREFETCH_AMD);
    t[0x0e] = ins!("femms");
    t[0x0f] = ins!("", Pq, Qq, SUFFIX_3DNOW);

    t[0x10] = redirect!(Prefix, MOVUPS_LOAD);
    t[0x11] = redirect!(Prefix, MOVUPS_STORE);
    t[0x12] = redirect!(Prefix, OPCODE_0F12);
    t[0x13] = redirect!(Prefix, OPCODE_0F13);
    t[0x14] = redirect!(Prefix, UNPCKL);
    t[0x15] = redirect!(Prefix, UNPCKH);
    t[0x16] = redirect!(Prefix, OPCODE_0F16);
    t[0x17] = redirect!(Prefix, OPCODE_0F17);
    t[0x18] = redirect!(Mod, HINT_18);
    t[0x19] = NOP_EV;
    t[0x1a] = redirect!(Prefix, OPCODE_0F1A);
    t[0x1b] = redirect!(Prefix, OPCODE_0F1B);
    t[0x1c] = redirect!(Mod, HINT_1C);
    t[0x1d] = NOP_EV;
    t[0x1e] = redirect!(Prefix, HINT_1E);
    t[0x1f] = NOP_EV;

    t[0x20] = ins!("movZ", Rn, Cr).attrs(Attrs::REG_FORM.union(Attrs::LOCK_CR8));
    t[0x21] = ins!("movZ", Rn, Dr).attrs(Attrs::REG_FORM);
    t[0x22] = ins!("movZ", Cr, Rn).attrs(Attrs::REG_FORM.union(Attrs::LOCK_CR8));
    t[0x23] = ins!("movZ", Dr, Rn).attrs(Attrs::REG_FORM);
    t[0x24] = redirect!(X86_64, MOV_FROM_TR);
    t[0x26] = redirect!(X86_64, MOV_TO_TR);
    t[0x28] = redirect!(Prefix, MOVAPS_LOAD);
    t[0x29] = redirect!(Prefix, MOVAPS_STORE);
    t[0x2a] = redirect!(Prefix, CVTPI2PS);
    t[0x2b] = redirect!(Prefix, MOVNTPS);
    t[0x2c] = redirect!(Prefix, CVTTPS2PI);
    t[0x2d] = redirect!(Prefix, CVTPS2PI);
    t[0x2e] = redirect!(Prefix, UCOMIS);
    t[0x2f] = redirect!(Prefix, COMIS);

    t[0x30] = ins!("wrmsr");
    t[0x31] = ins!("rdtsc");
    t[0x32] = ins!("rdmsr");
    t[0x33] = ins!("rdpmc");
    t[0x34] = ins!("sysenter");
    t[0x35] = ins!("sysexit%LP").flow(Flow::Ret);
    t[0x37] = ins!("getsec");
    t[0x38] = redirect!(ThreeByte, THREE_BYTE_38);
    t[0x3a] = redirect!(ThreeByte, THREE_BYTE_3A);

    let mut cc = 0;
    while cc < 16 {
        t[0x40 + cc] = ins!(CMOV[cc], Gv, Ev);
        t[0x80 + cc] = ins!(JCC[cc], Jv).flow(Flow::CondJump).attrs(Attrs::BND);
        t[0x90 + cc] = ins!(SETCC[cc], Eb);
        cc += 1;
    }

    t[0x50] = redirect!(Prefix, MOVMSKPS);
    t[0x51] = redirect!(Prefix, SQRT);
    t[0x52] = redirect!(Prefix, RSQRT);
    t[0x53] = redirect!(Prefix, RCP);
    t[0x54] = redirect!(Prefix, AND);
    t[0x55] = redirect!(Prefix, ANDN);
    t[0x56] = redirect!(Prefix, OR);
    t[0x57] = redirect!(Prefix, XOR);
    t[0x58] = redirect!(Prefix, ADD);
    t[0x59] = redirect!(Prefix, MUL);
    t[0x5a] = redirect!(Prefix, CVTPS2PD);
    t[0x5b] = redirect!(Prefix, CVTDQ2PS);
    t[0x5c] = redirect!(Prefix, SUB);
    t[0x5d] = redirect!(Prefix, MIN);
    t[0x5e] = redirect!(Prefix, DIV);
    t[0x5f] = redirect!(Prefix, MAX);

    let mut i = 0;
    while i < MMX_OPS.len() {
        let (opcode, name) = MMX_OPS[i];
        t[opcode as usize] = ins!(name, MXg, MXq).attrs(Attrs::PREFIX_STRICT);
        i += 1;
    }
    // The low unpacks read half a register from memory.
    t[0x60] = ins!("punpcklbw", MXg, MXd).attrs(Attrs::PREFIX_STRICT);
    t[0x61] = ins!("punpcklwd", MXg, MXd).attrs(Attrs::PREFIX_STRICT);
    t[0x62] = ins!("punpckldq", MXg, MXd).attrs(Attrs::PREFIX_STRICT);
    t[0x6c] = redirect!(Prefix, PUNPCKLQDQ);
    t[0x6d] = redirect!(Prefix, PUNPCKHQDQ);
    t[0x6e] = ins!("movK", MXg, Edq).attrs(Attrs::PREFIX_STRICT);
    t[0x6f] = redirect!(Prefix, MOVQ_LOAD);
    t[0x70] = redirect!(Prefix, PSHUF);
    t[0x71] = redirect!(Mod, GROUP12);
    t[0x72] = redirect!(Mod, GROUP13);
    t[0x73] = redirect!(Mod, GROUP14);
    t[0x77] = ins!("emms");
    t[0x78] = redirect!(Prefix, VMREAD);
    t[0x79] = redirect!(Prefix, VMWRITE);
    t[0x7c] = redirect!(Prefix, HADD);
    t[0x7d] = redirect!(Prefix, HSUB);
    t[0x7e] = redirect!(Prefix, MOVD_STORE);
    t[0x7f] = redirect!(Prefix, MOVQ_STORE);

    t[0xa0] = ins!("push{T|}", FS);
    t[0xa1] = ins!("pop{T|}", FS);
    t[0xa2] = ins!("cpuid");
    t[0xa3] = ins!("btS", Ev, Gv);
    t[0xa4] = ins!("shldS", Ev, Gv, Ib);
    t[0xa5] = ins!("shldS", Ev, Gv, CL);
    t[0xa8] = ins!("push{T|}", GS);
    t[0xa9] = ins!("pop{T|}", GS);
    t[0xaa] = ins!("rsm");
    t[0xab] = ins!("btsS", Ev, Gv).attrs(Attrs::HLE);
    t[0xac] = ins!("shrdS", Ev, Gv, Ib);
    t[0xad] = ins!("shrdS", Ev, Gv, CL);
    t[0xae] = redirect!(Mod, GROUP15);
    t[0xaf] = ins!("imulS", Gv, Ev);

    t[0xb0] = ins!("cmpxchgB", Eb, Gb).attrs(Attrs::HLE);
    t[0xb1] = ins!("cmpxchgS", Ev, Gv).attrs(Attrs::HLE);
    t[0xb2] = ins!("lssS", Gv, Mp);
    t[0xb3] = ins!("btrS", Ev, Gv).attrs(Attrs::HLE);
    t[0xb4] = ins!("lfsS", Gv, Mp);
    t[0xb5] = ins!("lgsS", Gv, Mp);
    t[0xb6] = ins!("movz{bR|x}", Gv, Eb);
    t[0xb7] = ins!("movz{wR|x}", Gv, Ew);
    t[0xb8] = redirect!(Prefix, POPCNT);
    t[0xb9] = ins!("ud1S", Gv, Ev);
    t[0xba] = redirect!(Reg, GROUP8);
    t[0xbb] = ins!("btcS", Ev, Gv).attrs(Attrs::HLE);
    t[0xbc] = redirect!(Prefix, BSF);
    t[0xbd] = redirect!(Prefix, BSR);
    t[0xbe] = ins!("movs{bR|x}", Gv, Eb);
    t[0xbf] = ins!("movs{wR|x}", Gv, Ew);

    t[0xc0] = ins!("xaddB", Eb, Gb).attrs(Attrs::HLE);
    t[0xc1] = ins!("xaddS", Ev, Gv).attrs(Attrs::HLE);
    t[0xc2] = redirect!(Prefix, CMPPS);
    t[0xc3] = ins!("movntiS", Mdq, Gdq);
    t[0xc4] = redirect!(Prefix, PINSRW);
    t[0xc5] = redirect!(Prefix, PEXTRW);
    t[0xc6] = redirect!(Prefix, SHUFPS);
    t[0xc7] = redirect!(Mod, GROUP9);
    let mut r = 0;
    while r < 8 {
        t[0xc8 + r] = ins!("bswap", Zdq);
        r += 1;
    }

    t[0xd0] = redirect!(Prefix, ADDSUB);
    t[0xd6] = redirect!(Prefix, MOVQ_D6);
    t[0xd7] = ins!("pmovmskb", Gdq, MXq).attrs(Attrs::PREFIX_STRICT);
    t[0xe6] = redirect!(Prefix, CVTDQ2PD);
    t[0xe7] = redirect!(Prefix, MOVNTQ);
    t[0xf0] = redirect!(Prefix, LDDQU);
    t[0xf7] = redirect!(Prefix, MASKMOVQ);
    t[0xff] = ins!("ud0S", Gv, Ev);
    t
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_slots() {
        assert!(matches!(TWO_BYTE[0x38], Entry::Redirect(super::super::Redirect::ThreeByte, _)));
        assert!(matches!(TWO_BYTE[0x3a], Entry::Redirect(super::super::Redirect::ThreeByte, _)));
        assert!(matches!(TWO_BYTE[0x04], Entry::Bad));
    }

    #[test]
    fn test_mmx_rows_filled() {
        assert!(matches!(TWO_BYTE[0xfe], Entry::Insn(i) if i.template == "paddd"));
        assert!(matches!(TWO_BYTE[0xef], Entry::Insn(i) if i.template == "pxor"));
        assert!(matches!(TWO_BYTE[0x8f], Entry::Insn(i) if i.flow == Flow::CondJump));
    }
}
