//! VEX and EVEX operand rendering.

use dasm86_core::DisasmOptions;
use dasm86_disasm::X86Disassembler;

fn att64(bytes: &[u8]) -> String {
    X86Disassembler::new(DisasmOptions::default()).decode_bytes(bytes, 0x1000).text
}

#[test]
fn test_evex_disp8_is_scaled_by_vector_size() {
    // vaddps with a 128-bit memory operand: disp8 0x01 means 0x10.
    assert_eq!(att64(&[0x62, 0xf1, 0x7c, 0x08, 0x58, 0x40, 0x01]), "vaddps 0x10(%rax),%xmm0,%xmm0");
}

#[test]
fn test_evex_broadcast() {
    // Broadcasting a dword scales disp8 by 4.
    assert_eq!(att64(&[0x62, 0xf1, 0x7c, 0x18, 0x58, 0x40, 0x01]), "vaddps 0x4(%rax){1to4},%xmm0,%xmm0");
}

#[test]
fn test_evex_zmm_register_form() {
    assert_eq!(att64(&[0x62, 0xf1, 0x7c, 0x48, 0x58, 0xc1]), "vaddps %zmm1,%zmm0,%zmm0");
}

#[test]
fn test_evex_zeroing_needs_a_mask() {
    let disasm = X86Disassembler::new(DisasmOptions::default());
    let insn = disasm.decode_bytes(&[0x62, 0xf1, 0x7c, 0x88, 0x58, 0xc1], 0x1000);
    assert!(insn.is_invalid(), "{}", insn.text);
}

#[test]
fn test_vex_three_operand_form() {
    assert_eq!(att64(&[0xc5, 0xf4, 0x58, 0xc2]), "vaddps %ymm2,%ymm1,%ymm0");
}

#[test]
fn test_half_width_broadcast_counts_source_elements() {
    assert_eq!(att64(&[0x62, 0xf1, 0x7c, 0x58, 0x5a, 0x00]), "vcvtps2pd (%rax){1to8},%zmm0");
    assert_eq!(att64(&[0x62, 0xf1, 0x7c, 0x38, 0x5a, 0x00]), "vcvtps2pd (%rax){1to4},%ymm0");
    assert_eq!(att64(&[0x62, 0xf1, 0x7e, 0x58, 0xe6, 0x00]), "vcvtdq2pd (%rax){1to8},%zmm0");
    assert_eq!(att64(&[0x62, 0xf1, 0x7e, 0x38, 0xe6, 0x00]), "vcvtdq2pd (%rax){1to4},%ymm0");
}

#[test]
fn test_integer_convert_places_rounding_after_the_source() {
    assert_eq!(att64(&[0x62, 0xf1, 0x76, 0x18, 0x2a, 0xc0]), "vcvtsi2ss %eax,{rn-sae},%xmm1,%xmm0");
    assert_eq!(att64(&[0x62, 0xf1, 0x76, 0x38, 0x7b, 0xc0]), "vcvtusi2ss %eax,{rd-sae},%xmm1,%xmm0");

    let intel = X86Disassembler::new(DisasmOptions::default().with_syntax(dasm86_core::Syntax::Intel));
    let insn = intel.decode_bytes(&[0x62, 0xf1, 0x76, 0x18, 0x2a, 0xc0], 0x1000);
    assert_eq!(insn.text, "vcvtsi2ss xmm0,xmm1,{rn-sae},eax");
}

#[test]
fn test_mmx_forms_reject_stray_mandatory_prefixes() {
    let disasm = X86Disassembler::new(DisasmOptions::default());
    for bytes in [
        &[0xf3, 0x0f, 0xd4, 0xc1][..],
        &[0xf2, 0x0f, 0xfe, 0xc1],
        &[0xf3, 0x0f, 0x38, 0x00, 0xc1],
        &[0xf3, 0x0f, 0x3a, 0x0f, 0xc1, 0x01],
        &[0xf2, 0x0f, 0x71, 0xd0, 0x01],
    ] {
        let insn = disasm.decode_bytes(bytes, 0x1000);
        assert!(insn.is_invalid(), "{bytes:02x?} decoded as {}", insn.text);
    }
    assert_eq!(att64(&[0x0f, 0xd4, 0xc1]), "paddq  %mm1,%mm0");
    assert_eq!(att64(&[0x66, 0x0f, 0xd4, 0xc1]), "paddq  %xmm1,%xmm0");
    assert_eq!(att64(&[0x66, 0x0f, 0x38, 0x00, 0xc1]), "pshufb %xmm1,%xmm0");
}

#[test]
fn test_mask_index_past_the_file_is_a_bad_operand() {
    let disasm = X86Disassembler::new(DisasmOptions::default());
    // VEX.R widens the destination to k8.
    let insn = disasm.decode_bytes(&[0xc4, 0x61, 0x78, 0x90, 0xc1], 0x1000);
    assert_eq!(insn.text, "kmovw  %k1,(bad)");
    assert_eq!(insn.size, 5);
    assert!(!insn.is_invalid());
    // VEX.B widens the source to k9.
    assert_eq!(att64(&[0xc4, 0xc1, 0x78, 0x90, 0xc1]), "kmovw  (bad),%k0");
}

#[test]
fn test_bound_index_past_the_file_is_a_bad_operand() {
    assert_eq!(att64(&[0x66, 0x44, 0x0f, 0x1a, 0xc1]), "bndmov %bnd1,(bad)");
    assert_eq!(att64(&[0x66, 0x0f, 0x1a, 0xc1]), "bndmov %bnd1,%bnd0");
}
