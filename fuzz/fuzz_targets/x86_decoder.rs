#![no_main]

use dasm86_core::{AddressMode, DisasmOptions, Syntax};
use dasm86_disasm::traits::Disassembler;
use dasm86_disasm::X86Disassembler;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // The first byte picks the mode and syntax, the rest is code.
    let Some((&selector, code)) = data.split_first() else {
        return;
    };
    let mode = match selector % 3 {
        0 => AddressMode::Mode16,
        1 => AddressMode::Mode32,
        _ => AddressMode::Mode64,
    };
    let syntax = if selector & 0x80 != 0 { Syntax::Intel } else { Syntax::Att };
    let disasm = X86Disassembler::new(DisasmOptions::new(mode).with_syntax(syntax));

    // Strict and lenient decoding must agree on the size of valid input.
    let lenient = disasm.decode_bytes(code, 0x1000);
    if let Ok(decoded) = disasm.decode_instruction(code, 0x1000) {
        assert_eq!(decoded.size, lenient.size);
        assert!(decoded.size <= 15);
    }

    // Block decoding tiles the buffer.
    if code.len() >= 16 {
        let mut offset = 0;
        for insn in disasm.decode_all(code, 0x1000) {
            assert_eq!(insn.address, 0x1000 + offset as u64);
            assert!(insn.size >= 1);
            offset += insn.size;
        }
    }
});
