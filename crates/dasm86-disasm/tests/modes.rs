//! Behaviour that depends on the processor mode.

use dasm86_core::{AddressMode, DisasmOptions, Syntax};
use dasm86_disasm::X86Disassembler;

fn att(mode: AddressMode, bytes: &[u8]) -> String {
    X86Disassembler::new(DisasmOptions::new(mode).with_syntax(Syntax::Att))
        .decode_bytes(bytes, 0x1000)
        .text
}

#[test]
fn test_default_widths() {
    assert_eq!(att(AddressMode::Mode32, &[0x55]), "push   %ebp");
    assert_eq!(att(AddressMode::Mode16, &[0x8b, 0x46, 0xfe]), "mov    -0x2(%bp),%ax");
}

#[test]
fn test_16bit_mod0_rm6_is_direct() {
    assert_eq!(att(AddressMode::Mode16, &[0x8b, 0x06, 0x34, 0x12]), "mov    0x1234,%ax");
}

#[test]
fn test_c5_is_lds_with_memory_modrm_outside_long_mode() {
    let text = att(AddressMode::Mode32, &[0xc5, 0x00]);
    assert!(text.starts_with("lds"), "{text}");
    assert_eq!(att(AddressMode::Mode32, &[0xc5, 0xf8, 0x77]), "vzeroupper");
    assert_eq!(att(AddressMode::Mode64, &[0xc5, 0xf8, 0x77]), "vzeroupper");
}

#[test]
fn test_rex_only_in_long_mode() {
    assert_eq!(att(AddressMode::Mode64, &[0x48, 0x89, 0xe5]), "mov    %rsp,%rbp");
    // 48 is `dec %eax` in 32-bit mode.
    let disasm = X86Disassembler::new(DisasmOptions::new(AddressMode::Mode32));
    assert_eq!(disasm.decode_bytes(&[0x48, 0x89, 0xe5], 0).size, 1);
}

#[test]
fn test_unused_vvvv_high_bits_are_checked_outside_long_mode() {
    let disasm = X86Disassembler::new(DisasmOptions::new(AddressMode::Mode32));
    // vmovaps has no vvvv operand: the specifier's top bit must still be clear.
    assert!(disasm.decode_bytes(&[0xc4, 0xe1, 0x38, 0x28, 0xc1], 0).is_invalid());
    // Likewise for EVEX with V' cleared.
    assert!(disasm.decode_bytes(&[0x62, 0xf1, 0x7c, 0x00, 0x28, 0xc1], 0).is_invalid());
    assert_eq!(att(AddressMode::Mode32, &[0xc4, 0xe1, 0x78, 0x28, 0xc1]), "vmovaps %xmm1,%xmm0");
    assert_eq!(att(AddressMode::Mode32, &[0x62, 0xf1, 0x7c, 0x08, 0x28, 0xc1]), "vmovaps %xmm1,%xmm0");
}
