//! Intel rendering: bare registers, size keywords, destination first.

use dasm86_core::{AddressMode, DisasmOptions, Syntax};
use dasm86_disasm::X86Disassembler;

fn intel(mode: AddressMode, bytes: &[u8]) -> String {
    let options = DisasmOptions::new(mode).with_syntax(Syntax::Intel);
    X86Disassembler::new(options).decode_bytes(bytes, 0x1000).text
}

#[test]
fn test_register_and_memory_operands() {
    assert_eq!(intel(AddressMode::Mode64, &[0x55]), "push   rbp");
    assert_eq!(intel(AddressMode::Mode64, &[0x48, 0x89, 0xe5]), "mov    rbp,rsp");
    assert_eq!(intel(AddressMode::Mode64, &[0x48, 0x8b, 0x45, 0xf8]), "mov    rax,QWORD PTR [rbp-0x8]");
}

#[test]
fn test_rip_relative() {
    let bytes = [0x48, 0x8b, 0x05, 0x10, 0x00, 0x00, 0x00];
    assert_eq!(intel(AddressMode::Mode64, &bytes), "mov    rax,QWORD PTR [rip+0x10]        # 0x1017");
}

#[test]
fn test_direct_16bit_displacement() {
    assert_eq!(intel(AddressMode::Mode16, &[0x8b, 0x06, 0x34, 0x12]), "mov    ax,WORD PTR ds:0x1234");
}

#[test]
fn test_branches_keep_plain_targets() {
    assert_eq!(intel(AddressMode::Mode64, &[0xe8, 0x00, 0x00, 0x00, 0x00]), "call   0x1005");
}

#[test]
fn test_direct_offsets_have_no_size_keyword() {
    assert_eq!(intel(AddressMode::Mode32, &[0xa1, 0x78, 0x56, 0x34, 0x12]), "mov    eax,ds:0x12345678");
    assert_eq!(intel(AddressMode::Mode32, &[0xa2, 0x78, 0x56, 0x34, 0x12]), "mov    ds:0x12345678,al");
    assert_eq!(intel(AddressMode::Mode32, &[0x64, 0xa1, 0x30, 0x00, 0x00, 0x00]), "mov    eax,fs:0x30");
    let bytes = [0xa1, 0x88, 0x77, 0x66, 0x55, 0x44, 0x33, 0x22, 0x11];
    assert_eq!(intel(AddressMode::Mode64, &bytes), "movabs eax,ds:0x1122334455667788");
}

#[test]
fn test_operands_reverse_between_syntaxes() {
    let att = X86Disassembler::new(DisasmOptions::new(AddressMode::Mode64));
    let intel = X86Disassembler::new(DisasmOptions::new(AddressMode::Mode64).with_syntax(Syntax::Intel));
    let cases: [&[u8]; 6] = [
        &[0x48, 0x89, 0xe5],
        &[0x48, 0x83, 0xec, 0x20],
        &[0xc5, 0xf4, 0x58, 0xc2],
        &[0xc4, 0xe3, 0x71, 0x4a, 0xc2, 0x30],
        &[0x0f, 0xa4, 0xc8, 0x05],
        &[0x62, 0xf1, 0x7c, 0x48, 0x58, 0xc1],
    ];
    for bytes in cases {
        let a = att.decode_bytes(bytes, 0);
        let i = intel.decode_bytes(bytes, 0);
        let reversed: Vec<String> = a
            .operands
            .iter()
            .rev()
            .map(|op| op.trim_start_matches(['%', '$']).to_string())
            .collect();
        assert_eq!(reversed, i.operands, "{} / {}", a.text, i.text);
    }

    // Table order survives in both syntaxes.
    assert_eq!(att.decode_bytes(&[0xc8, 0x08, 0x00, 0x01], 0).operands, vec!["$0x8", "$0x1"]);
    assert_eq!(intel.decode_bytes(&[0xc8, 0x08, 0x00, 0x01], 0).operands, vec!["0x8", "0x1"]);
}
