//! AT&T rendering of common 64-bit encodings.

use dasm86_core::{DisasmOptions, InsnClass};
use dasm86_disasm::X86Disassembler;

fn att64(bytes: &[u8]) -> String {
    X86Disassembler::new(DisasmOptions::default()).decode_bytes(bytes, 0x1000).text
}

#[test]
fn test_function_prologue() {
    assert_eq!(att64(&[0x55]), "push   %rbp");
    assert_eq!(att64(&[0x48, 0x89, 0xe5]), "mov    %rsp,%rbp");
    assert_eq!(att64(&[0x48, 0x8b, 0x45, 0xf8]), "mov    -0x8(%rbp),%rax");
    assert_eq!(att64(&[0xc3]), "ret");
    assert_eq!(att64(&[0x90]), "nop");
}

#[test]
fn test_rip_relative_annotation() {
    let bytes = [0x48, 0x8b, 0x05, 0x10, 0x00, 0x00, 0x00];
    assert_eq!(att64(&bytes), "mov    0x10(%rip),%rax        # 0x1017");

    let disasm = X86Disassembler::new(DisasmOptions::default());
    assert_eq!(disasm.decode_bytes(&bytes, 0x1000).data_ref, Some(0x1017));
}

#[test]
fn test_branch_targets_and_classes() {
    let disasm = X86Disassembler::new(DisasmOptions::default());

    let call = disasm.decode_bytes(&[0xe8, 0x00, 0x00, 0x00, 0x00], 0x1000);
    assert_eq!(call.text, "call   0x1005");
    assert_eq!(call.class, InsnClass::Call);
    assert_eq!(call.target, Some(0x1005));

    let jmp = disasm.decode_bytes(&[0xeb, 0xfe], 0x1000);
    assert_eq!(jmp.text, "jmp    0x1000");
    assert_eq!(jmp.class, InsnClass::UnconditionalBranch);
    assert_eq!(jmp.target, Some(0x1000));

    let je = disasm.decode_bytes(&[0x74, 0x00], 0x1000);
    assert_eq!(je.text, "je     0x1002");
    assert_eq!(je.class, InsnClass::ConditionalBranch);

    let ret = disasm.decode_bytes(&[0xc3], 0x1000);
    assert_eq!(ret.class, InsnClass::Indirect);
    assert_eq!(ret.target, None);

    assert_eq!(disasm.decode_bytes(&[0xcc], 0x1000).class, InsnClass::Normal);
}

#[test]
fn test_suffix_always() {
    let options: DisasmOptions = "x86-64,suffix".parse().unwrap();
    let insn = X86Disassembler::new(options).decode_bytes(&[0x48, 0x89, 0xe5], 0);
    assert_eq!(insn.text, "movq   %rsp,%rbp");
}

#[test]
fn test_truncation_yields_one_byte() {
    let disasm = X86Disassembler::new(DisasmOptions::default());
    let insn = disasm.decode_bytes(&[0x48, 0x8b], 0x1000);
    assert_eq!(insn.size, 1);
    assert_eq!(insn.class, InsnClass::Invalid);
}
